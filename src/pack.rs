//! Bit packer: encodes values into a contiguous MSB-first bit stream.

use crate::{
    bits::{self, BitWriter},
    compiled::CompiledFormat,
    errors::PackError,
    field::{BitOrder, FieldSpec, FieldType},
    value::Value,
};

impl CompiledFormat {
    /// Packs `values` according to this format.
    ///
    /// The output is `ceil(total_bits / 8)` bytes long and any bits of the final
    /// byte beyond `total_bits` are zero. Numeric values that do not fit their
    /// field are rejected with [PackError::Overflow], never truncated. Text is
    /// rejected with [PackError::SplitCharacter] when its leading `bits` bits
    /// would not unpack as UTF-8.
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>, PackError> {
        let expected = self.value_count();
        if values.len() != expected {
            return Err(PackError::ArgumentCount {
                expected,
                actual: values.len(),
            });
        }

        let mut writer = BitWriter::with_capacity(self.total_bits());
        let mut index = 0;

        for field in self.fields() {
            match field.kind() {
                FieldType::PadZero => writer.fill(false, field.bits()),
                FieldType::PadOne => writer.fill(true, field.bits()),
                _ => {
                    pack_field(&mut writer, field, index, &values[index])?;
                    index += 1;
                }
            }
        }

        debug_assert_eq!(writer.position(), self.total_bits());
        tracing::trace!(bits = self.total_bits(), "packed values");

        Ok(writer.into_bytes())
    }
}

fn pack_field(
    writer: &mut BitWriter,
    field: &FieldSpec,
    index: usize,
    value: &Value,
) -> Result<(), PackError> {
    if !value.matches(field.kind()) {
        return Err(PackError::TypeMismatch {
            index,
            expected: field.kind(),
            actual: value.type_name(),
        });
    }

    match field.bit_order() {
        BitOrder::LsbFirst if field.is_byte_ordered() => {
            let mut scratch = BitWriter::with_capacity(field.bits());
            encode(&mut scratch, field.bits(), index, value)?;

            let little = bits::to_lsb_first(&scratch.into_bytes(), field.bits());
            writer.write_bytes(&little, field.bits());
            Ok(())
        }
        _ => encode(writer, field.bits(), index, value),
    }
}

/// Writes exactly `bits` bits encoding `value`.
fn encode(
    writer: &mut BitWriter,
    bits: usize,
    index: usize,
    value: &Value,
) -> Result<(), PackError> {
    match value {
        Value::U64(v) => {
            if bits < 64 && *v >> bits != 0 {
                return Err(PackError::Overflow { index, bits });
            }
            writer.write_bits(*v, bits);
        }
        Value::I64(v) => {
            if bits < 64 {
                let min = -(1i64 << (bits - 1));
                let max = (1i64 << (bits - 1)) - 1;
                if !(min..=max).contains(v) {
                    return Err(PackError::Overflow { index, bits });
                }
            }
            writer.write_bits(*v as u64, bits);
        }
        Value::F64(v) => {
            let raw = match bits {
                16 => half::f16::from_f64(*v).to_bits() as u64,
                32 => (*v as f32).to_bits() as u64,
                _ => v.to_bits(),
            };
            writer.write_bits(raw, bits);
        }
        Value::Bool(v) => {
            writer.fill(false, bits - 1);
            writer.write_bits(*v as u64, 1);
        }
        Value::Bytes(data) => write_payload(writer, data, bits, index)?,
        Value::Text(text) => {
            write_payload(writer, text.as_bytes(), bits, index)?;

            let mut head = BitWriter::with_capacity(bits);
            head.write_bytes(text.as_bytes(), bits);
            if std::str::from_utf8(&head.into_bytes()).is_err() {
                return Err(PackError::SplitCharacter { index });
            }
        }
    }

    Ok(())
}

fn write_payload(
    writer: &mut BitWriter,
    data: &[u8],
    bits: usize,
    index: usize,
) -> Result<(), PackError> {
    let available = data.len() * 8;
    if available < bits {
        return Err(PackError::ShortPayload {
            index,
            bits,
            available,
        });
    }

    writer.write_bytes(data, bits);
    Ok(())
}
