//! Field descriptors produced by the format compiler.

use std::fmt;

use crate::errors::FormatError;

/// Type of a single field in a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `u`: unsigned integer, 1 to 64 bits.
    UnsignedInt,
    /// `s`: two's complement signed integer, 1 to 64 bits.
    SignedInt,
    /// `f`: IEEE-754 half, single or double precision.
    Float,
    /// `?`: boolean stored as the integer 0 or 1.
    Bool,
    /// `b`: leading bits of a byte sequence.
    RawBytes,
    /// `t`: leading bits of a UTF-8 string.
    Text,
    /// `p`: zero bits, no value.
    PadZero,
    /// `P`: one bits, no value.
    PadOne,
}

impl FieldType {
    /// Maps a format-string tag character to its field type.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'u' => Some(FieldType::UnsignedInt),
            's' => Some(FieldType::SignedInt),
            'f' => Some(FieldType::Float),
            '?' => Some(FieldType::Bool),
            'b' => Some(FieldType::RawBytes),
            't' => Some(FieldType::Text),
            'p' => Some(FieldType::PadZero),
            'P' => Some(FieldType::PadOne),
            _ => None,
        }
    }

    /// The tag character used for this type in format strings.
    pub fn tag(self) -> char {
        match self {
            FieldType::UnsignedInt => 'u',
            FieldType::SignedInt => 's',
            FieldType::Float => 'f',
            FieldType::Bool => '?',
            FieldType::RawBytes => 'b',
            FieldType::Text => 't',
            FieldType::PadZero => 'p',
            FieldType::PadOne => 'P',
        }
    }

    pub fn is_padding(self) -> bool {
        matches!(self, FieldType::PadZero | FieldType::PadOne)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::UnsignedInt => "unsigned integer",
            FieldType::SignedInt => "signed integer",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::RawBytes => "raw bytes",
            FieldType::Text => "text",
            FieldType::PadZero => "zero padding",
            FieldType::PadOne => "one padding",
        };
        f.write_str(name)
    }
}

/// Byte order of a field's encoding within the bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitOrder {
    /// `>`: most significant byte first.
    #[default]
    MsbFirst,
    /// `<`: least significant byte first.
    LsbFirst,
}

impl BitOrder {
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            '>' => Some(BitOrder::MsbFirst),
            '<' => Some(BitOrder::LsbFirst),
            _ => None,
        }
    }

    pub fn prefix(self) -> char {
        match self {
            BitOrder::MsbFirst => '>',
            BitOrder::LsbFirst => '<',
        }
    }
}

/// A single validated field: type, width in bits and byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    kind: FieldType,
    bits: usize,
    bit_order: BitOrder,
}

impl FieldSpec {
    /// Builds a field, checking the width rules for its type.
    pub fn new(kind: FieldType, bits: usize, bit_order: BitOrder) -> Result<Self, FormatError> {
        match kind {
            FieldType::PadZero | FieldType::PadOne => {}
            _ if bits == 0 => return Err(FormatError::ZeroWidth { kind }),
            FieldType::UnsignedInt | FieldType::SignedInt if bits > 64 => {
                return Err(FormatError::IntegerTooWide { kind, bits });
            }
            FieldType::Float if !matches!(bits, 16 | 32 | 64) => {
                return Err(FormatError::InvalidFloatWidth { bits });
            }
            _ => {}
        }

        Ok(FieldSpec {
            kind,
            bits,
            bit_order,
        })
    }

    pub fn kind(&self) -> FieldType {
        self.kind
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    pub fn is_padding(&self) -> bool {
        self.kind.is_padding()
    }

    /// Whether the byte order prefix changes this field's layout. Padding and
    /// booleans are always written MSB-first.
    pub fn is_byte_ordered(&self) -> bool {
        !matches!(
            self.kind,
            FieldType::Bool | FieldType::PadZero | FieldType::PadOne
        )
    }
}
