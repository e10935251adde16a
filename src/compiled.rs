//! Format string compiler.
//!
//! A format string is a concatenation of tokens with no separators. Each token
//! is an optional byte order prefix (`>` or `<`), one type tag character and a
//! decimal bit width, for example `u1u3u4s16` or `>u4<s12p4`. A prefix applies
//! to every following token until the next prefix.

use std::{fmt, str::FromStr};

use crate::{
    errors::FormatError,
    field::{BitOrder, FieldSpec, FieldType},
};

/// Largest total bit length a format may describe (a 512 MiB buffer).
pub const MAX_TOTAL_BITS: usize = u32::MAX as usize;

/// A compiled format: fields in declaration order and their total bit length.
///
/// Use [CompiledFormat::compile] to build one, then [CompiledFormat::pack] and
/// [CompiledFormat::unpack] as often as needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledFormat {
    fields: Vec<FieldSpec>,
    total_bits: usize,
}

impl CompiledFormat {
    /// Parses `format` into a list of fields. Fails on any malformed or unsupported token.
    pub fn compile(format: &str) -> Result<Self, FormatError> {
        let mut fields = Vec::new();
        let mut bit_order = BitOrder::default();
        let mut chars = format.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            let (tag_offset, tag) = match BitOrder::from_prefix(ch) {
                Some(order) => {
                    bit_order = order;
                    chars
                        .next()
                        .ok_or(FormatError::DanglingByteOrder { offset })?
                }
                None => (offset, ch),
            };

            let kind = FieldType::from_tag(tag).ok_or(FormatError::UnknownType {
                tag,
                offset: tag_offset,
            })?;

            let mut bits: Option<usize> = None;
            while let Some(&(_, digit)) = chars.peek() {
                let Some(value) = digit.to_digit(10) else {
                    break;
                };
                chars.next();

                bits = Some(
                    bits.unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|b| b.checked_add(value as usize))
                        .ok_or(FormatError::InvalidWidth { offset: tag_offset })?,
                );
            }

            let bits = bits.ok_or(FormatError::MissingWidth {
                tag,
                offset: tag_offset,
            })?;

            fields.push(FieldSpec::new(kind, bits, bit_order)?);
        }

        let format = Self::from_fields(fields)?;
        tracing::trace!(
            fields = format.fields.len(),
            total_bits = format.total_bits,
            "compiled format"
        );

        Ok(format)
    }

    /// Builds a format from already validated fields.
    pub fn from_fields(fields: Vec<FieldSpec>) -> Result<Self, FormatError> {
        if fields.is_empty() {
            return Err(FormatError::Empty);
        }

        let total_bits = fields
            .iter()
            .try_fold(0usize, |acc, field| acc.checked_add(field.bits()))
            .filter(|&total| total <= MAX_TOTAL_BITS)
            .ok_or(FormatError::TooLong)?;

        Ok(Self { fields, total_bits })
    }

    /// Fields in declaration order, padding included.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Length of a packed buffer: `ceil(total_bits / 8)`.
    pub fn total_bytes(&self) -> usize {
        self.total_bits.div_ceil(8)
    }

    /// Number of values consumed by `pack` and produced by `unpack`.
    pub fn value_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.is_padding()).count()
    }
}

impl FromStr for CompiledFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for CompiledFormat {
    /// Writes the canonical format string; prefixes appear only where the byte order changes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = BitOrder::default();

        for field in &self.fields {
            if field.bit_order() != current {
                current = field.bit_order();
                write!(f, "{}", current.prefix())?;
            }
            write!(f, "{}{}", field.kind().tag(), field.bits())?;
        }

        Ok(())
    }
}
