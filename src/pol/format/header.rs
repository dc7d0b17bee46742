//! Registry Policy file header parsing.

use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;

use crate::pol::types::error::{PolError, Result};
use crate::pol::types::models::PolicyHeader;

/// Size of the file header in bytes.
pub const HEADER_LEN: usize = 8;

/// Parses and validates the file header at the start of `bytes`.
///
/// # Header Structure
/// ```text
/// [4 bytes] Signature, 0x67655250 ("PReg", little-endian i32)
/// [4 bytes] Version, always 1 (little-endian i32)
/// ```
///
/// Returns the header and the remaining body of the file.
pub fn parse(bytes: &[u8]) -> Result<(PolicyHeader, &[u8])> {
    if bytes.is_empty() {
        return Err(PolError::EmptyFile);
    }
    if bytes.len() < HEADER_LEN {
        return Err(PolError::TruncatedHeader { len: bytes.len() });
    }

    let mut reader = &bytes[..HEADER_LEN];
    let header = PolicyHeader {
        signature: reader.read_i32::<LittleEndian>()?,
        version: reader.read_i32::<LittleEndian>()?,
    };
    trace!(
        "File header: signature={:#010x}, version={}",
        header.signature, header.version
    );

    if !header.is_valid() {
        return Err(PolError::InvalidHeader {
            signature: header.signature,
            version: header.version,
        });
    }

    Ok((header, &bytes[HEADER_LEN..]))
}
