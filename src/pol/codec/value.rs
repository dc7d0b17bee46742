//! Type-tagged value payload decoding.

use byteorder::{ByteOrder, LittleEndian};

use super::utf16;
use crate::pol::types::error::{PolError, Result, Utf16Field};
use crate::pol::types::models::DataType;

/// A payload decoded according to its registry type, before default substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// REG_SZ text.
    Text(String),
    /// REG_MULTI_SZ text, strings still separated by NUL.
    MultiText(String),
    /// REG_DWORD value.
    Dword(u32),
}

impl DecodedValue {
    /// Whether the value counts as "left empty" and may take a declared default.
    ///
    /// Integers always carry a value.
    pub fn is_empty(&self) -> bool {
        match self {
            DecodedValue::Text(s) | DecodedValue::MultiText(s) => s.is_empty(),
            DecodedValue::Dword(_) => false,
        }
    }

    /// Renders the value as text, using `default` for empty strings.
    ///
    /// Multi-line values have their NUL separators turned into newlines.
    pub fn render(self, default: Option<&str>) -> String {
        let empty = self.is_empty();
        match self {
            DecodedValue::Text(s) => match default {
                Some(d) if empty => d.to_string(),
                _ => s,
            },
            DecodedValue::MultiText(s) => {
                let s = match default {
                    Some(d) if empty => d.to_string(),
                    _ => s,
                };
                s.replace('\0', "\n")
            }
            DecodedValue::Dword(n) => n.to_string(),
        }
    }
}

/// Decodes `data` according to `data_type`.
///
/// `key` is only used to name the offending value in errors.
pub fn decode_value(data_type: DataType, data: &[u8], key: &str) -> Result<DecodedValue> {
    match data_type {
        DataType::String => Ok(DecodedValue::Text(decode_text(data, key)?)),
        DataType::MultiString => Ok(DecodedValue::MultiText(decode_text(data, key)?)),
        DataType::Dword => {
            if data.len() != 4 {
                return Err(PolError::InvalidDecimalValue {
                    key: key.to_string(),
                    len: data.len(),
                });
            }
            Ok(DecodedValue::Dword(LittleEndian::read_u32(data)))
        }
        other => Err(PolError::UnsupportedType {
            data_type: other.tag(),
            key: key.to_string(),
        }),
    }
}

fn decode_text(data: &[u8], key: &str) -> Result<String> {
    utf16::decode(data, Utf16Field::Data).map_err(|e| match e {
        PolError::InvalidUtf16 { bytes, .. } => PolError::InvalidStringValue {
            key: key.to_string(),
            bytes,
        },
        other => other,
    })
}
