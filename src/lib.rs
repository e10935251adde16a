//! # bitpack
//!
//! Packs values into bit-exact byte buffers described by compact format strings,
//! and unpacks them again.
//!
//! A format string is a sequence of tokens, each a type tag followed by a width
//! in bits. Fields are laid out back to back, most significant bit first, with no
//! padding unless padding is requested.
//!
//! | tag | field                                   | value          |
//! |-----|-----------------------------------------|----------------|
//! | `u` | unsigned integer, 1..=64 bits           | [Value::U64]   |
//! | `s` | two's complement integer, 1..=64 bits   | [Value::I64]   |
//! | `f` | IEEE-754 float, 16, 32 or 64 bits       | [Value::F64]   |
//! | `?` | boolean                                 | [Value::Bool]  |
//! | `b` | leading bits of a byte sequence         | [Value::Bytes] |
//! | `t` | leading bits of a UTF-8 string          | [Value::Text]  |
//! | `p` | zero padding                            |                |
//! | `P` | one padding                             |                |
//!
//! A `>` or `<` before a token switches the following fields to MSB-first
//! (the default) or LSB-first byte order.
//!
//! ## Example
//!
//! ```
//! use bitpack::Value;
//!
//! let values = [
//!     Value::U64(1),
//!     Value::U64(2),
//!     Value::U64(3),
//!     Value::I64(-4),
//! ];
//! let packed = bitpack::pack("u1u3u4s16", &values).unwrap();
//! assert_eq!(packed, vec![0xa3, 0xff, 0xfc]);
//! assert_eq!(bitpack::unpack("u1u3u4s16", &packed).unwrap(), values);
//! assert_eq!(bitpack::calcsize("u1u3u4s16").unwrap(), 24);
//! ```
//!
//! Compile a format once with [CompiledFormat::compile] (or keep a
//! [FormatCache]) when packing many buffers with the same layout.

pub mod bits;
pub mod cache;
pub mod compiled;
pub mod errors;
pub mod field;
mod pack;
#[cfg(feature = "serde")]
pub mod serde;
pub mod swap;
mod unpack;
pub mod value;

pub use cache::FormatCache;
pub use compiled::CompiledFormat;
pub use errors::{Error, FormatError, PackError, ReadError, UnpackError};
pub use field::{BitOrder, FieldSpec, FieldType};
pub use swap::{byteswap, byteswap_in_place};
pub use value::Value;

/// Number of bits described by `format`.
pub fn calcsize(format: &str) -> Result<usize, FormatError> {
    Ok(CompiledFormat::compile(format)?.total_bits())
}

/// Compiles `format` and packs `values` with it.
pub fn pack(format: &str, values: &[Value]) -> Result<Vec<u8>, Error> {
    Ok(CompiledFormat::compile(format)?.pack(values)?)
}

/// Compiles `format` and unpacks `data` with it.
pub fn unpack(format: &str, data: &[u8]) -> Result<Vec<Value>, Error> {
    Ok(CompiledFormat::compile(format)?.unpack(data)?)
}
