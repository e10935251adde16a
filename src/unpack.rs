//! Bit unpacker: slices a bit stream back into typed values.

use crate::{
    bits::{self, BitReader, sign_extend},
    compiled::CompiledFormat,
    errors::UnpackError,
    field::{BitOrder, FieldSpec, FieldType},
    value::Value,
};

impl CompiledFormat {
    /// Unpacks `data` according to this format.
    ///
    /// Padding fields are skipped, so the result holds one value per non-padding
    /// field. Bytes beyond `total_bits` are ignored.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<Value>, UnpackError> {
        let available = data.len() * 8;
        if available < self.total_bits() {
            return Err(UnpackError::BufferTooShort {
                required: self.total_bits(),
                available,
            });
        }

        let mut reader = BitReader::new(data);
        let mut values = Vec::with_capacity(self.value_count());

        for field in self.fields() {
            let value = match field.bit_order() {
                BitOrder::LsbFirst if field.is_byte_ordered() => {
                    let little = reader.read_bytes(field.bits())?;
                    let big = bits::to_msb_first(&little, field.bits());
                    decode(&mut BitReader::new(&big), field, values.len())?
                }
                _ => decode(&mut reader, field, values.len())?,
            };
            values.extend(value);
        }

        tracing::trace!(
            bits = self.total_bits(),
            values = values.len(),
            "unpacked values"
        );

        Ok(values)
    }
}

/// Reads exactly `field.bits()` bits and decodes them; padding yields `None`.
fn decode(
    reader: &mut BitReader<'_>,
    field: &FieldSpec,
    index: usize,
) -> Result<Option<Value>, UnpackError> {
    let bits = field.bits();

    let value = match field.kind() {
        FieldType::UnsignedInt => Value::U64(reader.read_bits(bits)?),
        FieldType::SignedInt => Value::I64(sign_extend(reader.read_bits(bits)?, bits)),
        FieldType::Float => {
            let raw = reader.read_bits(bits)?;
            Value::F64(match bits {
                16 => half::f16::from_bits(raw as u16).to_f64(),
                32 => f32::from_bits(raw as u32) as f64,
                _ => f64::from_bits(raw),
            })
        }
        FieldType::Bool => {
            let mut set = false;
            let mut remaining = bits;
            while remaining > 0 {
                let take = remaining.min(64);
                set |= reader.read_bits(take)? != 0;
                remaining -= take;
            }
            Value::Bool(set)
        }
        FieldType::RawBytes => Value::Bytes(reader.read_bytes(bits)?),
        FieldType::Text => {
            let bytes = reader.read_bytes(bits)?;
            Value::Text(String::from_utf8(bytes).map_err(|_| UnpackError::InvalidText { index })?)
        }
        FieldType::PadZero | FieldType::PadOne => {
            reader.skip_bits(bits)?;
            return Ok(None);
        }
    };

    Ok(Some(value))
}
