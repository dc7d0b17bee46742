//! File format parsing layer for Registry Policy files.
//!
//! This module turns raw file bytes into [`PolicyRawEntry`] frames, without
//! interpreting their payloads.
//!
//! # Module Organization
//!
//! - [`header`]: Validates the 8-byte `PReg` header
//! - [`section`]: Frames `[...]` sections and splits them into fields
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header (8 B)   │ ← header::parse()
//! ├─────────────────┤
//! │  [section]      │ ← section::Sections
//! │  [section]      │   section::parse_section()
//! │  ...            │
//! └─────────────────┘
//! ```

pub mod header;
pub mod section;

use std::io::Read;
use log::{debug, info};

use crate::pol::types::error::Result;
use crate::pol::types::models::{PolicyHeader, PolicyRawEntry};

/// Reads a whole policy stream and returns its header and raw entries.
///
/// The format has no entry count, so the stream is always consumed to the end.
pub fn parse<R: Read>(reader: &mut R) -> Result<(PolicyHeader, Vec<PolicyRawEntry>)> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    debug!("Read {} bytes of policy data", bytes.len());

    let (header, body) = header::parse(&bytes)?;

    let entries = section::Sections::new(body, header::HEADER_LEN)
        .map(|item| item.and_then(section::parse_section))
        .collect::<Result<Vec<_>>>()?;

    info!("Policy file scanned: {} raw entries", entries.len());
    Ok((header, entries))
}
