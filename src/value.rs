//! Values accepted by the packer and produced by the unpacker.

use crate::field::FieldType;

/// A single packed or unpacked value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Text(String),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::U64(_) => "an unsigned integer",
            Value::I64(_) => "a signed integer",
            Value::F64(_) => "a float",
            Value::Bool(_) => "a bool",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
        }
    }

    /// Whether a field of type `kind` encodes this variant.
    pub fn matches(&self, kind: FieldType) -> bool {
        matches!(
            (self, kind),
            (Value::U64(_), FieldType::UnsignedInt)
                | (Value::I64(_), FieldType::SignedInt)
                | (Value::F64(_), FieldType::Float)
                | (Value::Bool(_), FieldType::Bool)
                | (Value::Bytes(_), FieldType::RawBytes)
                | (Value::Text(_), FieldType::Text)
        )
    }
}

macro_rules! impl_from {
    ($variant:ident, $target:ty; $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from!(U64, u64; u8, u16, u32, u64);
impl_from!(I64, i64; i8, i16, i32, i64);
impl_from!(F64, f64; f32, f64);
impl_from!(Bool, bool; bool);
impl_from!(Bytes, Vec<u8>; Vec<u8>, &[u8]);
impl_from!(Text, String; String, &str);

impl<const N: usize> From<[u8; N]> for Value {
    fn from(value: [u8; N]) -> Self {
        Value::Bytes(value.to_vec())
    }
}
