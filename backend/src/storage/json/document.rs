//! Encoding and schema versioning of the registry document.
//!
//! Two shapes are understood:
//!
//! ```text
//! version 1 (legacy):   [ {child}, ... ]
//! version 2:            { "schemaVersion": 2, "children": [ {child}, ... ] }
//! ```
//!
//! The child objects are identical in both. Decoding detects the version,
//! runs the upgrade steps up to the current version, then validates the
//! registry. Encoding writes the current version unless the legacy shape is
//! requested for compatibility with older app builds.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::Child;

use crate::domain::registry::ChildRegistry;
use crate::storage::StorageError;

pub const LEGACY_SCHEMA_VERSION: u64 = 1;
pub const CURRENT_SCHEMA_VERSION: u64 = 2;

/// Shape written by `encode`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Envelope carrying `schemaVersion`
    #[default]
    Versioned,
    /// Bare array of children, as written by the first app builds
    Legacy,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionedDocument<'a> {
    schema_version: u64,
    children: &'a [Child],
}

pub fn encode(
    registry: &ChildRegistry,
    format: DocumentFormat,
) -> Result<Vec<u8>, StorageError> {
    let encoded = match format {
        DocumentFormat::Versioned => serde_json::to_vec_pretty(&VersionedDocument {
            schema_version: CURRENT_SCHEMA_VERSION,
            children: registry.children(),
        }),
        DocumentFormat::Legacy => serde_json::to_vec_pretty(registry.children()),
    };
    encoded.map_err(StorageError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<ChildRegistry, StorageError> {
    let document: Value = serde_json::from_slice(bytes).map_err(StorageError::Decode)?;
    let (mut version, mut children) = split_document(document)?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    while version < CURRENT_SCHEMA_VERSION {
        children = upgrade(version, children);
        version += 1;
    }

    let children: Vec<Child> = serde_json::from_value(children).map_err(StorageError::Decode)?;
    Ok(ChildRegistry::from_children(children)?)
}

/// Schema version and the raw children array of a parsed document
fn split_document(document: Value) -> Result<(u64, Value), StorageError> {
    match document {
        Value::Array(_) => Ok((LEGACY_SCHEMA_VERSION, document)),
        Value::Object(mut fields) => {
            let version = fields
                .get("schemaVersion")
                .and_then(Value::as_u64)
                .ok_or_else(|| malformed("missing or invalid schemaVersion"))?;
            let children = fields
                .remove("children")
                .ok_or_else(|| malformed("missing children"))?;
            Ok((version, children))
        }
        _ => Err(malformed("expected an array or an object at the top level")),
    }
}

/// Transform the children array of `from_version` into `from_version + 1`
fn upgrade(from_version: u64, children: Value) -> Value {
    debug!("Upgrading registry document from schema version {}", from_version);
    // 1 -> 2 only introduced the envelope; child objects are unchanged
    children
}

fn malformed(message: &str) -> StorageError {
    StorageError::Decode(<serde_json::Error as serde::de::Error>::custom(message))
}
