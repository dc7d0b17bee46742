//! Low-level byte scanning utilities

use encoding_rs::UTF_16LE;

/// Returns the offset of the first occurrence of `needle` in `haystack` at or after `from`.
///
/// The search moves one byte at a time: markers in a Registry Policy file are not
/// guaranteed to sit on a UTF-16 code unit boundary relative to the section start.
pub fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

/// Renders arbitrary section bytes as readable text for diagnostics.
///
/// Decodes as UTF-16LE (lossy) and drops control characters, including the
/// NUL separators between fields.
pub fn section_text(bytes: &[u8]) -> String {
    let (text, _) = UTF_16LE.decode_without_bom_handling(bytes);
    text.chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect()
}
