//! Serde-deserializable format description.
//!
//! These types describe the same layout as a format string, in a shape that can
//! be stored in a configuration file (JSON, TOML, ...) and compiled into a
//! [CompiledFormat] with the same validation as [CompiledFormat::compile].

use serde::{Deserialize, Serialize};

use crate::{
    compiled::CompiledFormat,
    errors::FormatError,
    field::{BitOrder, FieldSpec, FieldType},
};

/// Type of a field.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum FieldTypeDef {
    UnsignedInt,
    SignedInt,
    Float,
    Bool,
    RawBytes,
    Text,
    PadZero,
    PadOne,
}

/// Byte order of a field; defaults to MSB-first.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum BitOrderDef {
    #[default]
    MsbFirst,
    LsbFirst,
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    #[serde(rename = "type")]
    pub kind: FieldTypeDef,
    /// Width of the field in bits.
    pub bits: usize,
    #[serde(default)]
    pub bit_order: BitOrderDef,
}

/// Top-level format definition: fields in packing order.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FormatDef {
    pub fields: Vec<FieldDef>,
}

impl From<FieldTypeDef> for FieldType {
    fn from(value: FieldTypeDef) -> Self {
        match value {
            FieldTypeDef::UnsignedInt => FieldType::UnsignedInt,
            FieldTypeDef::SignedInt => FieldType::SignedInt,
            FieldTypeDef::Float => FieldType::Float,
            FieldTypeDef::Bool => FieldType::Bool,
            FieldTypeDef::RawBytes => FieldType::RawBytes,
            FieldTypeDef::Text => FieldType::Text,
            FieldTypeDef::PadZero => FieldType::PadZero,
            FieldTypeDef::PadOne => FieldType::PadOne,
        }
    }
}

impl From<FieldType> for FieldTypeDef {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::UnsignedInt => FieldTypeDef::UnsignedInt,
            FieldType::SignedInt => FieldTypeDef::SignedInt,
            FieldType::Float => FieldTypeDef::Float,
            FieldType::Bool => FieldTypeDef::Bool,
            FieldType::RawBytes => FieldTypeDef::RawBytes,
            FieldType::Text => FieldTypeDef::Text,
            FieldType::PadZero => FieldTypeDef::PadZero,
            FieldType::PadOne => FieldTypeDef::PadOne,
        }
    }
}

impl From<BitOrderDef> for BitOrder {
    fn from(value: BitOrderDef) -> Self {
        match value {
            BitOrderDef::MsbFirst => BitOrder::MsbFirst,
            BitOrderDef::LsbFirst => BitOrder::LsbFirst,
        }
    }
}

impl From<BitOrder> for BitOrderDef {
    fn from(value: BitOrder) -> Self {
        match value {
            BitOrder::MsbFirst => BitOrderDef::MsbFirst,
            BitOrder::LsbFirst => BitOrderDef::LsbFirst,
        }
    }
}

impl TryFrom<FieldDef> for FieldSpec {
    type Error = FormatError;

    fn try_from(value: FieldDef) -> Result<Self, Self::Error> {
        FieldSpec::new(value.kind.into(), value.bits, value.bit_order.into())
    }
}

impl TryFrom<FormatDef> for CompiledFormat {
    type Error = FormatError;

    fn try_from(value: FormatDef) -> Result<Self, Self::Error> {
        let fields = value
            .fields
            .into_iter()
            .map(FieldSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        CompiledFormat::from_fields(fields)
    }
}

impl From<&CompiledFormat> for FormatDef {
    fn from(value: &CompiledFormat) -> Self {
        FormatDef {
            fields: value
                .fields()
                .iter()
                .map(|field| FieldDef {
                    kind: field.kind().into(),
                    bits: field.bits(),
                    bit_order: field.bit_order().into(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_from_json() {
        let def: FormatDef = serde_json::from_str(
            r#"{
                "fields": [
                    { "type": "UnsignedInt", "bits": 1 },
                    { "type": "UnsignedInt", "bits": 3 },
                    { "type": "UnsignedInt", "bits": 4 },
                    { "type": "SignedInt", "bits": 16 }
                ]
            }"#,
        )
        .unwrap();

        let format = CompiledFormat::try_from(def).unwrap();
        assert_eq!(format, CompiledFormat::compile("u1u3u4s16").unwrap());
    }

    #[test]
    fn test_bit_order_from_json() {
        let def: FormatDef = serde_json::from_str(
            r#"{ "fields": [{ "type": "UnsignedInt", "bits": 16, "bit_order": "LsbFirst" }] }"#,
        )
        .unwrap();

        let format = CompiledFormat::try_from(def).unwrap();
        assert_eq!(format.to_string(), "<u16");
    }

    #[test]
    fn test_validation_matches_format_strings() {
        let def: FormatDef =
            serde_json::from_str(r#"{ "fields": [{ "type": "Float", "bits": 24 }] }"#).unwrap();

        assert_eq!(
            CompiledFormat::try_from(def).unwrap_err(),
            FormatError::InvalidFloatWidth { bits: 24 }
        );
    }

    #[test]
    fn test_def_from_compiled() {
        let format = CompiledFormat::compile("?1<t8P2").unwrap();
        let def = FormatDef::from(&format);

        assert_eq!(def.fields.len(), 3);
        assert_eq!(def.fields[1].bit_order, BitOrderDef::LsbFirst);
        assert_eq!(CompiledFormat::try_from(def).unwrap(), format);
    }
}
