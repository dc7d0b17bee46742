//! Core Registry Policy decoder module
//!
//! Decoding runs in two layers:
//!
//! 1. [`format`] scans the byte stream into [`PolicyRawEntry`] frames
//! 2. [`decoder`] turns frames into [`PolicyEntry`] settings, resolving
//!    disabled markers and container defaults
//!
//! # Example
//! ```no_run
//! # use std::fs::File;
//! let mut file = File::open("Registry.pol").unwrap();
//! for entry in gpo_pol_reader::decode_policy(&mut file).unwrap() {
//!     println!("{} = {}", entry.key, entry.value);
//! }
//! ```

pub mod codec;
pub mod decoder;
pub mod format;
pub mod reader;
pub mod types;
mod utils;

use std::io::Read;

pub use reader::PolicyFile;
pub use types::error::{PolError, Result, Utf16Field};
pub use types::models::{DataType, MetaValue, PolicyEntry, PolicyHeader, PolicyRawEntry};

/// Decodes a whole Registry Policy stream into policy entries.
///
/// A header-only file yields an empty list. Any error aborts the decode and no
/// entries are returned.
pub fn decode_policy<R: Read>(reader: &mut R) -> Result<Vec<PolicyEntry>> {
    PolicyFile::parse(reader)?.into_entries()
}

/// Scans a Registry Policy stream into raw frames, without decoding values.
pub fn read_policy<R: Read>(reader: &mut R) -> Result<Vec<PolicyRawEntry>> {
    let (_, raw_entries) = format::parse(reader)?;
    Ok(raw_entries)
}
