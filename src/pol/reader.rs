use std::io::Read;
use std::slice::Iter;
use log::info;

use super::decoder;
use super::format;
use super::types::error::Result;
use super::types::models::*;

/// A parsed Registry Policy file.
///
/// Holds the validated header and every raw frame of the file, in order.
/// Semantic decoding is done on demand with [`PolicyFile::decode`] or
/// [`PolicyFile::into_entries`].
#[derive(Debug, Clone)]
pub struct PolicyFile {
    header: PolicyHeader,
    raw_entries: Vec<PolicyRawEntry>,
}

impl PolicyFile {
    /// Reads a Registry Policy stream to the end and scans all of its sections.
    ///
    /// # Arguments
    /// * `reader` - Stream positioned at the start of a `.pol` file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The stream cannot be read
    /// - The stream is empty, or its header is truncated or not `PReg` version 1
    /// - A section is unterminated, lacks one of its five fields, or has an
    ///   invalid or empty key path or value name
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        info!("Parsing registry policy stream");
        let (header, raw_entries) = format::parse(reader)?;
        Ok(Self {
            header,
            raw_entries,
        })
    }

    pub fn header(&self) -> &PolicyHeader {
        &self.header
    }

    /// Returns the number of sections in the file.
    pub fn num_entries(&self) -> usize {
        self.raw_entries.len()
    }

    pub fn raw_entries(&self) -> &[PolicyRawEntry] {
        &self.raw_entries
    }

    /// Iterates over raw frames in file order.
    pub fn iter_raw(&self) -> Iter<'_, PolicyRawEntry> {
        self.raw_entries.iter()
    }

    /// Decodes all frames into policy entries, keeping the raw frames around.
    pub fn decode(&self) -> Result<Vec<PolicyEntry>> {
        decoder::decode_entries(&self.raw_entries)
    }

    /// Decodes all frames into policy entries, consuming the file.
    pub fn into_entries(self) -> Result<Vec<PolicyEntry>> {
        self.decode()
    }
}
