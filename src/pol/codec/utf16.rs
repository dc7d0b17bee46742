//! UTF-16LE text decoding for key paths, value names and string payloads.

use encoding_rs::UTF_16LE;

use crate::pol::types::error::{PolError, Result, Utf16Field};

/// Decodes a UTF-16LE byte field, dropping one trailing NUL code unit.
///
/// Unpaired surrogates are replaced with U+FFFD. A field of odd length can't be
/// UTF-16 at all and is rejected; `field` says which part of the section it was.
pub fn decode(bytes: &[u8], field: Utf16Field) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(PolError::InvalidUtf16 {
            field,
            bytes: hex::encode(bytes),
        });
    }

    let trimmed = match bytes {
        [rest @ .., 0, 0] => rest,
        _ => bytes,
    };
    let (text, _) = UTF_16LE.decode_without_bom_handling(trimmed);
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_trailing_nul() {
        let data = [b'B', 0, b'A', 0, 0, 0];
        assert_eq!(decode(&data, Utf16Field::Data).unwrap(), "BA");
    }

    #[test]
    fn keeps_inner_nuls() {
        let data = [b'B', 0, 0, 0, b'A', 0, 0, 0, 0, 0];
        assert_eq!(decode(&data, Utf16Field::Data).unwrap(), "B\0A\0");
    }

    #[test]
    fn no_terminator() {
        let data = [b'H', 0, b'i', 0];
        assert_eq!(decode(&data, Utf16Field::KeyPath).unwrap(), "Hi");
    }

    #[test]
    fn empty_and_nul_only_decode_to_empty() {
        assert_eq!(decode(&[], Utf16Field::ValueName).unwrap(), "");
        assert_eq!(decode(&[0, 0], Utf16Field::ValueName).unwrap(), "");
    }

    #[test]
    fn odd_length_is_rejected() {
        let err = decode(&[b'A', 0, b'B'], Utf16Field::ValueName).unwrap_err();
        match err {
            PolError::InvalidUtf16 { field, bytes } => {
                assert_eq!(field, Utf16Field::ValueName);
                assert_eq!(bytes, "410042");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
