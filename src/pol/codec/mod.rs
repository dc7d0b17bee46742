//! Codec layer for text and value payloads.
//!
//! # Submodules
//!
//! - [`utf16`][]: UTF-16LE decoding shared by section fields and string payloads
//! - [`value`][]: Registry type dispatch (REG_SZ, REG_MULTI_SZ, REG_DWORD)

pub mod utf16;
pub mod value;
