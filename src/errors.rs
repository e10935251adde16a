//! Error types for format compilation, packing, unpacking and bit reading.

use thiserror::Error;

use crate::{compiled::MAX_TOTAL_BITS, field::FieldType};

/// Errors produced when compiling a format string (or a swap pattern).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format string contains no tokens.
    #[error("format string is empty")]
    Empty,
    /// A character that is not a known type tag was found where a tag was expected.
    #[error("unknown type tag {tag:?} at offset {offset}")]
    UnknownType { tag: char, offset: usize },
    /// A type tag is not followed by any digits.
    #[error("missing bit width after {tag:?} at offset {offset}")]
    MissingWidth { tag: char, offset: usize },
    /// The width digits do not fit in a `usize`.
    #[error("bit width at offset {offset} is too large to represent")]
    InvalidWidth { offset: usize },
    /// A non-padding field was declared with zero bits.
    #[error("{kind} field must be at least 1 bit wide")]
    ZeroWidth { kind: FieldType },
    /// An integer field is wider than 64 bits.
    #[error("{kind} field is {bits} bits wide, at most 64 is supported")]
    IntegerTooWide { kind: FieldType, bits: usize },
    /// A float field is not 16, 32 or 64 bits wide.
    #[error("float field must be 16, 32 or 64 bits wide, got {bits}")]
    InvalidFloatWidth { bits: usize },
    /// A byte order prefix is not followed by a token.
    #[error("byte order prefix at offset {offset} is not followed by a field")]
    DanglingByteOrder { offset: usize },
    /// The sum of all field widths exceeds [MAX_TOTAL_BITS].
    #[error("total bit length of the format exceeds {} bits", MAX_TOTAL_BITS)]
    TooLong,
    /// A swap pattern character is not a digit in `1..=9`.
    #[error("invalid byte group size {ch:?} at offset {offset}")]
    InvalidGroupSize { ch: char, offset: usize },
    /// The buffer length is not a multiple of the swap pattern length.
    #[error("buffer of {len} bytes is not a multiple of the {period}-byte swap pattern")]
    SwapCoverage { period: usize, len: usize },
}

/// Errors produced when packing values into a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// The number of values differs from the number of non-padding fields.
    #[error("expected {expected} values, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    /// The value at `index` has a variant the field cannot encode.
    #[error("value {index} is {actual}, field expects {expected}")]
    TypeMismatch {
        index: usize,
        expected: FieldType,
        actual: &'static str,
    },
    /// A numeric value does not fit in its field.
    #[error("value {index} does not fit in {bits} bits")]
    Overflow { index: usize, bits: usize },
    /// A bytes or text value has fewer bits than its field.
    #[error("value {index} has {available} bits, field needs {bits}")]
    ShortPayload {
        index: usize,
        bits: usize,
        available: usize,
    },
    /// The leading bits of a text value end inside a multi-byte character.
    #[error("value {index} is cut inside a UTF-8 character")]
    SplitCharacter { index: usize },
}

/// Errors produced when reading bits from a byte slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Requested bit range is beyond the end of the data.
    #[error("bit read out of bounds")]
    OutOfBounds,
    /// More than 64 bits were requested in a single read.
    #[error("more than 64 bits requested in a single read")]
    TooManyBitsRead,
}

/// Errors produced when unpacking a buffer into values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnpackError {
    /// Input data is shorter than the format's total bit length.
    #[error("buffer holds {available} bits, format needs {required}")]
    BufferTooShort { required: usize, available: usize },
    /// A text field does not hold valid UTF-8.
    #[error("value {index} is not valid UTF-8")]
    InvalidText { index: usize },
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Any error returned by the format-string entry points at the crate root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error(transparent)]
    Unpack(#[from] UnpackError),
}
