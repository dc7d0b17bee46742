//! # Section scanning
//!
//! The body of a Registry Policy file is a run of sections with no count or
//! length prefix:
//!
//! ```text
//! [ keyPath \0 ; valueName \0 ; type ; size ; data ]
//! ```
//!
//! Every character above is a UTF-16LE code unit. Fields are separated by the
//! byte sequence `00 00 3B 00`, which is the NUL terminator of a string followed
//! by `;`, or the zero high bytes of the 32-bit type and size fields followed by
//! `;`. A section ends at `00 00 5D 00` (`\0]`). A section whose size field is
//! zero has nothing between its last delimiter and `]`, and is closed there.
//!
//! The scanner only frames sections and decodes the two text fields; payloads are
//! interpreted by [`crate::pol::codec::value`].

use log::trace;

use crate::pol::codec::utf16;
use crate::pol::types::error::{PolError, Result, Utf16Field};
use crate::pol::types::models::{DataType, PolicyRawEntry};
use crate::pol::utils;

/// `[` in UTF-16LE.
const SECTION_START: &[u8] = &[b'[', 0];
/// `\0]` in UTF-16LE.
const SECTION_END: &[u8] = &[0, 0, b']', 0];
/// `]` in UTF-16LE.
const BRACKET_CLOSE: &[u8] = &[b']', 0];
/// `\0;` in UTF-16LE.
const FIELD_DELIMITER: &[u8] = &[0, 0, b';', 0];

const NUM_FIELDS: usize = 5;

/// Iterator over the raw bytes of each section in a file body.
///
/// Each item is the section content between `[` and `]`, still carrying the
/// NUL code unit that precedes the closing bracket. Iteration stops after the
/// first error.
pub struct Sections<'a> {
    body: &'a [u8],
    pos: usize,
    base_offset: usize,
}

impl<'a> Sections<'a> {
    /// Creates a scanner over `body`. `base_offset` is the position of `body`
    /// in the file and is only used in error reports.
    pub fn new(body: &'a [u8], base_offset: usize) -> Self {
        Self {
            body,
            pos: 0,
            base_offset,
        }
    }

    /// Finds the next complete section, starting at the current position.
    fn next_section(&mut self) -> Result<Option<&'a [u8]>> {
        let body = self.body;
        let remaining = &body[self.pos..];
        if remaining.is_empty() {
            return Ok(None);
        }

        // Bytes before the next section start are skipped. Trailing bytes without
        // any start marker can't be a section at all.
        let Some(start) = utils::find(remaining, SECTION_START, 0) else {
            return Err(PolError::SectionNotClosed {
                offset: self.base_offset + self.pos,
            });
        };

        let content_start = start + SECTION_START.len();
        let end = match (
            empty_data_end(remaining, content_start),
            utils::find(remaining, SECTION_END, content_start),
        ) {
            (Some(empty), Some(end)) if empty < end => Some(empty),
            (Some(empty), None) => Some(empty),
            (_, end) => end,
        };

        // A final, non-empty, non-terminated section.
        let Some(end) = end else {
            return Err(PolError::SectionNotClosed {
                offset: self.base_offset + self.pos + start,
            });
        };

        let section = &remaining[content_start..end + 2];
        trace!(
            "Section at offset {}: {} bytes",
            self.base_offset + self.pos + start,
            section.len()
        );
        self.pos += end + SECTION_END.len();
        Ok(Some(section))
    }
}

impl<'a> Iterator for Sections<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_section() {
            Ok(Some(section)) => Some(Ok(section)),
            Ok(None) => None,
            Err(e) => {
                self.pos = self.body.len();
                Some(Err(e))
            }
        }
    }
}

/// Position of the section end when the size field announces an empty payload.
///
/// Uses the same convention as a `\0]` match: two bytes before the closing `]`.
fn empty_data_end(remaining: &[u8], content_start: usize) -> Option<usize> {
    let mut field_start = content_start;
    let mut size_field: &[u8] = &[];
    for _ in 0..NUM_FIELDS - 1 {
        let pos = utils::find(remaining, FIELD_DELIMITER, field_start)?;
        size_field = &remaining[field_start..pos];
        field_start = pos + FIELD_DELIMITER.len();
    }

    let is_zero = !size_field.is_empty() && size_field.iter().all(|b| *b == 0);
    if is_zero && remaining[field_start..].starts_with(BRACKET_CLOSE) {
        Some(field_start - 2)
    } else {
        None
    }
}

/// Splits a section into at most five fields on `\0;`.
///
/// The last field keeps any further delimiters verbatim, so payloads may
/// contain `;`.
fn split_fields(section: &[u8]) -> Vec<&[u8]> {
    let mut fields = Vec::with_capacity(NUM_FIELDS);
    let mut rest = section;
    while fields.len() < NUM_FIELDS - 1 {
        match utils::find(rest, FIELD_DELIMITER, 0) {
            Some(pos) => {
                fields.push(&rest[..pos]);
                rest = &rest[pos + FIELD_DELIMITER.len()..];
            }
            None => break,
        }
    }
    fields.push(rest);
    fields
}

/// Parses one section into a raw entry.
pub fn parse_section(section: &[u8]) -> Result<PolicyRawEntry> {
    let fields = split_fields(section);
    if fields.len() != NUM_FIELDS {
        return Err(PolError::MissingField {
            found: fields.len(),
            section: utils::section_text(section),
        });
    }

    let path = utf16::decode(fields[0], Utf16Field::KeyPath)?;
    let key = utf16::decode(fields[1], Utf16Field::ValueName)?;

    if path.is_empty() {
        return Err(PolError::EmptyKeyPath {
            section: utils::section_text(section),
        });
    }
    if key.is_empty() {
        return Err(PolError::EmptyValueName {
            section: utils::section_text(section),
        });
    }

    let type_field = fields[2];
    if type_field.len() != 2 && type_field.len() != 4 {
        return Err(PolError::InvalidType {
            len: type_field.len(),
        });
    }
    let data_type = DataType::from(type_field[0]);

    // The size field is redundant with the framing and only kept for diagnostics.
    trace!(
        "{}\\{}: type={}, size field={}, data={} bytes",
        path,
        key,
        data_type,
        hex::encode(fields[3]),
        fields[4].len()
    );

    Ok(PolicyRawEntry {
        path,
        key,
        data_type,
        data: fields[4].to_vec(),
    })
}
