//! Request and response bodies for export uploads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /`.
#[derive(Deserialize, Debug)]
pub struct ExportRequest {
    /// Client-supplied name for the export. Sanitized before it becomes part
    /// of the object key.
    pub filename: Option<String>,

    /// The payload. A string is stored verbatim; anything else is serialized
    /// to indented JSON. Absent and `null` differ here: `null` is a storable
    /// value, a missing field is a validation error.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub content: Option<Value>,

    /// Marks `content` as pre-formatted JSON Lines, skipping the indented
    /// re-serialization.
    #[serde(default)]
    pub jsonl: bool,

    /// Key prefix inside the bucket.
    #[serde(default = "default_folder")]
    pub folder: String,
}

impl ExportRequest {
    /// The validated `(filename, content)` pair, or `None` when either is
    /// missing. An empty filename counts as missing.
    pub fn required_fields(&self) -> Option<(&str, &Value)> {
        let filename = self.filename.as_deref().filter(|name| !name.is_empty())?;
        let content = self.content.as_ref()?;
        Some((filename, content))
    }
}

/// Success body of `POST /`: where the export landed and what was stored.
#[derive(Serialize, Debug)]
pub struct ExportReceipt {
    /// Signed download URL, valid for seven days.
    pub url: String,

    /// Stored size in bytes.
    pub size: usize,

    /// SHA-256 of the stored bytes, lowercase hex.
    pub sha256: String,

    /// Object key the export was stored under.
    pub id: String,
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Encodes `content` into the bytes that get stored.
///
/// Strings pass through verbatim, which is how callers ship pre-serialized
/// JSON or JSON Lines. Any other value is rendered as two-space-indented
/// JSON, except under `jsonl`, where it falls through to its compact form.
pub fn canonical_bytes(content: &Value, jsonl: bool) -> serde_json::Result<Vec<u8>> {
    let bytes = match content {
        Value::String(s) => s.clone().into_bytes(),
        _ if jsonl => content.to_string().into_bytes(),
        _ => serde_json::to_string_pretty(content)?.into_bytes(),
    };
    Ok(bytes)
}

fn default_folder() -> String {
    "exports".to_string()
}

/// Maps a field that is present (even as `null`) to `Some`, leaving `None`
/// only for a field that is absent.
fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
