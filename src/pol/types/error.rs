//! Custom error types for the gpo-pol-reader crate.

use std::fmt;
use thiserror::Error;

/// Which UTF-16 field of a section failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf16Field {
    KeyPath,
    ValueName,
    Data,
}

impl fmt::Display for Utf16Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utf16Field::KeyPath => write!(f, "key path"),
            Utf16Field::ValueName => write!(f, "value name"),
            Utf16Field::Data => write!(f, "value data"),
        }
    }
}

/// The primary error type for all operations in this crate.
///
/// Every variant is terminal: a policy file either decodes completely or not at all.
#[derive(Debug, Error)]
pub enum PolError {
    /// An error originating from I/O operations on the input stream.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The stream contained no bytes at all.
    #[error("invalid policy: empty file")]
    EmptyFile,

    /// The stream ended before the 8-byte file header was complete.
    #[error("invalid policy: file header truncated to {len} bytes")]
    TruncatedHeader { len: usize },

    /// The file header does not carry the `PReg` signature and version 1.
    #[error("invalid policy: file header: {signature:x}{version:x}")]
    InvalidHeader { signature: i32, version: i32 },

    /// A section was opened (or trailing bytes remain) but no section end marker follows.
    #[error("invalid policy: item at offset {offset} does not end with ']'")]
    SectionNotClosed { offset: usize },

    /// A section did not split into the five `;`-separated fields.
    #[error("invalid policy: item should contain 5 fields separated by ';', found {found}: {section}")]
    MissingField { found: usize, section: String },

    /// A key path or value name has an odd byte length.
    #[error("invalid policy: {field} {bytes} is not a valid UTF-16 string")]
    InvalidUtf16 { field: Utf16Field, bytes: String },

    /// The key path decoded to an empty string.
    #[error("invalid policy: empty key in {section}")]
    EmptyKeyPath { section: String },

    /// The value name decoded to an empty string.
    #[error("invalid policy: empty value in {section}")]
    EmptyValueName { section: String },

    /// The type field is not 2 or 4 bytes wide.
    #[error("invalid policy: invalid type field of {len} bytes")]
    InvalidType { len: usize },

    /// The value type is not one the decoder knows how to render.
    #[error("can't parse policy: {data_type} type is not supported for key {key}")]
    UnsupportedType { data_type: u8, key: String },

    /// A REG_SZ or REG_MULTI_SZ payload has an odd byte length.
    #[error("can't parse policy: invalid string value for key {key}: {bytes} is not a valid UTF-16 string")]
    InvalidStringValue { key: String, bytes: String },

    /// A DWORD payload is not exactly 4 bytes.
    #[error("can't parse policy: invalid decimal value for key {key}: expected 4 bytes, found {len}")]
    InvalidDecimalValue { key: String, len: usize },

    /// A container or single-key declaration could not be understood.
    #[error("can't parse policy: invalid default value for {path}\\{key} container: {reason}")]
    InvalidContainer {
        path: String,
        key: String,
        reason: String,
    },
}

/// A convenience `Result` type alias using the crate's `PolError` type.
pub type Result<T> = std::result::Result<T, PolError>;
