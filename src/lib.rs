//! # gpo-pol-reader
//!
//! A decoder for Group Policy Registry files (`Registry.pol`), the binary format
//! GPOs use on SYSVOL to carry registry-based policy settings.
//!
//! Reading is all-or-nothing: a file either decodes completely or fails with a
//! [`PolError`] naming the offending section or key.
pub mod pol;

// Re-export the main types for convenience
pub use pol::types::models::{DataType, MetaValue, PolicyEntry, PolicyHeader, PolicyRawEntry};
pub use pol::{PolError, PolicyFile, Result, Utf16Field, decode_policy, read_policy};
