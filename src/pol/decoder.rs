//! Promotion of raw frames into policy entries.
//!
//! Three value names carry meaning beyond a plain setting:
//!
//! - `**del.<name>`: the setting `<name>` is explicitly disabled.
//! - `metaValues`: opens a container for its key path. Its REG_SZ payload is a
//!   JSON object declaring, per option name, a default used when the option is
//!   left empty (`Empty`), plus `Meta` and `Strategy` strings. Options are the
//!   other values stored under the same key path. A `DISABLED` declaration, or a
//!   `**del.` prefix, disables every option of the container.
//! - `basic`: a single-key policy. Its payload uses the same JSON format and
//!   describes the one implicit option `all`.
//!
//! Container state lives for one container occurrence only: a new `metaValues`
//! frame always starts from an empty declaration map, even for the same path.

use log::{debug, info, trace};

use crate::pol::codec::{utf16, value};
use crate::pol::types::error::{PolError, Result, Utf16Field};
use crate::pol::types::models::{DataType, MetaValue, MetaValues, PolicyEntry, PolicyRawEntry};

const DISABLED_PREFIX: &str = "**del.";
const CONTAINER_NAME: &str = "metaValues";
const SINGLE_KEY_NAME: &str = "basic";
const SINGLE_KEY_OPTION: &str = "all";
const DISABLED_MARKER: &str = "DISABLED";

/// Declarations of the container currently in effect.
#[derive(Debug)]
struct ContainerScope {
    /// Raw (backslash-delimited) key path of the container.
    path: String,
    meta_values: MetaValues,
    disabled: bool,
}

impl ContainerScope {
    fn applies_to(&self, path: &str) -> bool {
        self.path == path
    }

    fn declaration(&self, option: &str) -> Option<&MetaValue> {
        self.meta_values.get(option)
    }
}

/// Decodes raw frames, in order, into policy entries.
///
/// Any failure aborts the whole decode: an incomplete policy set is never returned.
pub fn decode_entries(raw_entries: &[PolicyRawEntry]) -> Result<Vec<PolicyEntry>> {
    let mut entries = Vec::with_capacity(raw_entries.len());
    let mut scope: Option<ContainerScope> = None;

    for raw in raw_entries {
        let (name, disabled) = match raw.key.strip_prefix(DISABLED_PREFIX) {
            Some(name) => (name, true),
            None => (raw.key.as_str(), false),
        };
        if name.is_empty() {
            return Err(PolError::EmptyValueName {
                section: format!("{}\\{}", raw.path, raw.key),
            });
        }

        match name {
            CONTAINER_NAME => {
                scope = open_container(raw, disabled)?;
            }
            SINGLE_KEY_NAME => {
                if let Some(entry) = decode_single_key(raw, disabled)? {
                    entries.push(entry);
                }
            }
            _ => {
                let current = scope.as_ref().filter(|s| s.applies_to(&raw.path));
                entries.push(decode_option(raw, name, disabled, current)?);
            }
        }
    }

    info!("Policy decoded: {} entries", entries.len());
    Ok(entries)
}

/// Starts a new container scope from a `metaValues` frame.
///
/// Returns `None` for containers written by foreign policies, which don't use a
/// string payload; they close any previous scope.
fn open_container(raw: &PolicyRawEntry, disabled: bool) -> Result<Option<ContainerScope>> {
    if disabled {
        debug!("Container {} is disabled", raw.path);
        return Ok(Some(ContainerScope {
            path: raw.path.clone(),
            meta_values: MetaValues::new(),
            disabled: true,
        }));
    }

    if raw.data_type != DataType::String {
        debug!(
            "Ignoring {}\\{} of type {}: not a container declaration",
            raw.path, raw.key, raw.data_type
        );
        return Ok(None);
    }

    let meta_values = parse_meta_values(raw)?;
    let disabled = meta_values.contains_key(DISABLED_MARKER);
    debug!(
        "Container {}: {} option declarations, disabled={}",
        raw.path,
        meta_values.len(),
        disabled
    );

    Ok(Some(ContainerScope {
        path: raw.path.clone(),
        meta_values,
        disabled,
    }))
}

/// Builds the `all` entry of a single-key policy.
fn decode_single_key(raw: &PolicyRawEntry, disabled: bool) -> Result<Option<PolicyEntry>> {
    if raw.data_type != DataType::String {
        debug!(
            "Ignoring {}\\{} of type {}: not a single-key declaration",
            raw.path, raw.key, raw.data_type
        );
        return Ok(None);
    }

    let meta_values = parse_meta_values(raw)?;
    let disabled = disabled || meta_values.contains_key(DISABLED_MARKER);
    let declaration = meta_values.get(SINGLE_KEY_OPTION).cloned().unwrap_or_default();

    let value = if disabled {
        String::new()
    } else {
        declaration.empty
    };

    Ok(Some(PolicyEntry {
        key: join_key(&raw.path, SINGLE_KEY_OPTION),
        value,
        disabled,
        meta: declaration.meta,
        strategy: declaration.strategy,
    }))
}

/// Builds a regular entry, applying the declarations of `scope` if it owns the entry.
fn decode_option(
    raw: &PolicyRawEntry,
    name: &str,
    disabled: bool,
    scope: Option<&ContainerScope>,
) -> Result<PolicyEntry> {
    let key = join_key(&raw.path, name);
    let disabled = disabled || scope.is_some_and(|s| s.disabled);
    let declaration = scope.and_then(|s| s.declaration(name));

    let value = if disabled {
        String::new()
    } else {
        value::decode_value(raw.data_type, &raw.data, &key)?
            .render(declaration.map(|d| d.empty.as_str()))
    };
    trace!("{} = {:?} (disabled={})", key, value, disabled);

    Ok(PolicyEntry {
        key,
        value,
        disabled,
        meta: declaration.map(|d| d.meta.clone()).unwrap_or_default(),
        strategy: declaration.map(|d| d.strategy.clone()).unwrap_or_default(),
    })
}

/// Parses the JSON declarations carried by a container or single-key frame.
///
/// A blank payload declares nothing.
fn parse_meta_values(raw: &PolicyRawEntry) -> Result<MetaValues> {
    let invalid = |reason: String| PolError::InvalidContainer {
        path: raw.path.clone(),
        key: raw.key.clone(),
        reason,
    };

    let text = utf16::decode(&raw.data, Utf16Field::Data).map_err(|e| invalid(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(MetaValues::new());
    }
    serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))
}

/// Translates a registry key path and value name to a `/`-separated policy key.
fn join_key(path: &str, name: &str) -> String {
    let path = path.replace('\\', "/");
    format!("{}/{}", path.trim_end_matches('/'), name)
}
