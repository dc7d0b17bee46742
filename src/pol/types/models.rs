//! Core data structures for Registry Policy files.
//!
//! This module defines the types shared by both decoding layers:
//! - The file header
//! - Registry value type tags
//! - Raw frames as they appear on disk and the semantic entries built from them

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// `PReg` magic, read as a little-endian 32-bit integer.
pub const POL_SIGNATURE: i32 = 0x67655250;

/// The only Registry Policy file version ever published.
pub const POL_VERSION: i32 = 1;

/// The 8-byte header at the start of every `.pol` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyHeader {
    pub signature: i32,
    pub version: i32,
}

impl PolicyHeader {
    pub fn is_valid(&self) -> bool {
        self.signature == POL_SIGNATURE && self.version == POL_VERSION
    }
}

/// Registry value type, as found in the first byte of a section's type field.
///
/// Values are from `winnt.h`. Tags without a named variant are kept in
/// [`DataType::Unknown`] so they can be reported rather than mis-decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// REG_NONE
    None,
    /// REG_SZ: NUL-terminated UTF-16LE string
    String,
    /// REG_EXPAND_SZ: string with unexpanded `%ENVVAR%` references
    ExpandString,
    /// REG_BINARY
    Binary,
    /// REG_DWORD: 32-bit little-endian integer
    Dword,
    /// REG_DWORD_BIG_ENDIAN
    DwordBigEndian,
    /// REG_LINK
    Link,
    /// REG_MULTI_SZ: NUL-separated strings, double NUL terminated
    MultiString,
    /// REG_QWORD: 64-bit little-endian integer
    Qword,
    Unknown(u8),
}

impl DataType {
    /// Returns the on-disk tag byte for this type.
    pub fn tag(&self) -> u8 {
        match self {
            DataType::None => 0,
            DataType::String => 1,
            DataType::ExpandString => 2,
            DataType::Binary => 3,
            DataType::Dword => 4,
            DataType::DwordBigEndian => 5,
            DataType::Link => 6,
            DataType::MultiString => 7,
            DataType::Qword => 11,
            DataType::Unknown(tag) => *tag,
        }
    }
}

impl From<u8> for DataType {
    fn from(tag: u8) -> Self {
        match tag {
            0 => Self::None,
            1 => Self::String,
            2 => Self::ExpandString,
            3 => Self::Binary,
            4 => Self::Dword,
            5 => Self::DwordBigEndian,
            6 => Self::Link,
            7 => Self::MultiString,
            11 => Self::Qword,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::None => write!(f, "REG_NONE"),
            DataType::String => write!(f, "REG_SZ"),
            DataType::ExpandString => write!(f, "REG_EXPAND_SZ"),
            DataType::Binary => write!(f, "REG_BINARY"),
            DataType::Dword => write!(f, "REG_DWORD"),
            DataType::DwordBigEndian => write!(f, "REG_DWORD_BIG_ENDIAN"),
            DataType::Link => write!(f, "REG_LINK"),
            DataType::MultiString => write!(f, "REG_MULTI_SZ"),
            DataType::Qword => write!(f, "REG_QWORD"),
            DataType::Unknown(tag) => write!(f, "unknown type {}", tag),
        }
    }
}

/// One `[path;key;type;size;data]` section, with its text fields decoded.
///
/// `path` and `key` are never empty: frames violating this are rejected
/// by the scanner instead of being turned into entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRawEntry {
    /// Backslash-delimited registry key path.
    pub path: String,
    /// Value name within `path`.
    pub key: String,
    pub data_type: DataType,
    /// Payload bytes, still in their registry encoding.
    pub data: Vec<u8>,
}

/// A decoded policy setting, ready to be applied by a policy manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyEntry {
    /// Absolute path to the setting. Ex: `Software/Ubuntu/User/dconf/wallpaper`
    pub key: String,
    pub value: String,
    pub disabled: bool,
    /// Free-form metadata declared for this option by its container.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub meta: String,
    /// Merge strategy declared for this option by its container.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub strategy: String,
}

/// Declaration for one option inside a container's `metaValues` payload.
///
/// ```json
/// {"Child": {"Empty": "default", "Meta": "foo", "Strategy": "append"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetaValue {
    /// Value used when the option is left empty.
    #[serde(rename = "Empty", alias = "Default", default)]
    pub empty: String,
    #[serde(rename = "Meta", default)]
    pub meta: String,
    #[serde(rename = "Strategy", default)]
    pub strategy: String,
}

/// Option declarations of a container, keyed by option name.
pub type MetaValues = HashMap<String, MetaValue>;
