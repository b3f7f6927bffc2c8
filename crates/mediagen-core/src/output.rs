//! Output normalization
//!
//! Different remote model families package results differently: a plain URL
//! string, a list of URLs, or a mapping keyed by `mesh`, `model_file`, or
//! `url` whose values may themselves be url-bearing file objects. The raw
//! JSON is classified into a tagged union at the adapter boundary and the
//! canonical content URL is extracted here.

use crate::error::{MediagenError, Result};
use serde_json::{Map, Value};

/// Classified shape of a remote generation output
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutput {
    /// No output was produced
    Null,
    /// A plain URL string
    Url(String),
    /// An ordered sequence; the first element is canonical
    Sequence(Vec<Value>),
    /// A mapping with a well-known key (`mesh`, `model_file`, `url`) or
    /// url-bearing values
    Mapping(Map<String, Value>),
    /// A shape we cannot interpret
    Unrecognized(Value),
}

impl RemoteOutput {
    /// Classify a raw JSON output value
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Null => RemoteOutput::Null,
            Value::String(s) => RemoteOutput::Url(s),
            Value::Array(items) => RemoteOutput::Sequence(items),
            Value::Object(map) => RemoteOutput::Mapping(map),
            other => RemoteOutput::Unrecognized(other),
        }
    }

    /// Extract the canonical content URL, if any
    pub fn url(&self) -> Result<Option<String>> {
        match self {
            RemoteOutput::Null => Ok(None),
            RemoteOutput::Url(s) => Ok(Some(s.clone())),
            RemoteOutput::Mapping(map) => extract_from_mapping(map),
            RemoteOutput::Sequence(items) => extract_from_sequence(items),
            RemoteOutput::Unrecognized(value) => Err(MediagenError::UnrecognizedOutputShape(
                format!("cannot extract URL from {}", type_name(value)),
            )),
        }
    }
}

/// Extract the canonical content URL from a raw remote output value.
///
/// Null outputs and mappings with no url-bearing value anywhere resolve
/// to `Ok(None)`; shapes we cannot interpret at all are an
/// `UnrecognizedOutputShape` error, which callers surface as a request
/// failure rather than a crash.
pub fn extract_url(output: &Value) -> Result<Option<String>> {
    RemoteOutput::classify(output.clone()).url()
}

/// Mapping resolution: well-known keys first, then a scan for any
/// url-bearing value. The key order matters because mesh-producing models
/// also include preview fields we must not pick up.
fn extract_from_mapping(map: &Map<String, Value>) -> Result<Option<String>> {
    for key in ["mesh", "model_file", "url"] {
        if let Some(value) = map.get(key) {
            if let Some(url) = url_of(value) {
                return Ok(Some(url));
            }
        }
    }

    for value in map.values() {
        if let Some(url) = url_field(value) {
            return Ok(Some(url.to_string()));
        }
    }

    // a well-formed mapping with no url anywhere means the model simply
    // produced nothing downloadable
    Ok(None)
}

fn extract_from_sequence(items: &[Value]) -> Result<Option<String>> {
    match items.first() {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(first) => {
            if let Some(url) = url_field(first) {
                Ok(Some(url.to_string()))
            } else {
                Err(MediagenError::UnrecognizedOutputShape(format!(
                    "sequence head is {}",
                    type_name(first)
                )))
            }
        }
        None => Err(MediagenError::UnrecognizedOutputShape(
            "empty sequence".to_string(),
        )),
    }
}

/// A string value, or an object exposing a string `url` field
fn url_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => url_field(value).map(|s| s.to_string()),
    }
}

/// The `url` field of a file object, when present and a string
fn url_field(value: &Value) -> Option<&str> {
    value.get("url").and_then(|u| u.as_str())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_output_is_absent() {
        assert_eq!(extract_url(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_plain_url_string() {
        let output = json!("https://example.com/out.png");
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/out.png"
        );
    }

    #[test]
    fn test_sequence_of_strings_takes_first() {
        let output = json!([
            "https://example.com/a.jpg",
            "https://example.com/b.jpg"
        ]);
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/a.jpg"
        );
    }

    #[test]
    fn test_sequence_of_file_objects() {
        let output = json!([{ "url": "https://example.com/first.mp4" }]);
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/first.mp4"
        );
    }

    #[test]
    fn test_mesh_key_with_file_object() {
        // Hunyuan3D returns {"mesh": {"url": ...}}
        let output = json!({ "mesh": { "url": "https://example.com/mesh.glb" } });
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/mesh.glb"
        );
    }

    #[test]
    fn test_mesh_key_with_plain_string() {
        let output = json!({ "mesh": "https://example.com/mesh.obj" });
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/mesh.obj"
        );
    }

    #[test]
    fn test_model_file_key() {
        // Trellis returns {"model_file": {"url": ...}, "color_video": {...}}
        let output = json!({
            "model_file": { "url": "https://example.com/model.glb" },
            "color_video": { "url": "https://example.com/preview.mp4" }
        });
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/model.glb"
        );
    }

    #[test]
    fn test_mesh_beats_model_file() {
        let output = json!({
            "model_file": "https://example.com/wrong.glb",
            "mesh": "https://example.com/right.glb"
        });
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/right.glb"
        );
    }

    #[test]
    fn test_plain_url_key() {
        let output = json!({ "url": "https://example.com/file.png" });
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/file.png"
        );
    }

    #[test]
    fn test_scan_for_url_bearing_value() {
        let output = json!({
            "something_else": { "url": "https://example.com/found.glb" }
        });
        assert_eq!(
            extract_url(&output).unwrap().unwrap(),
            "https://example.com/found.glb"
        );
    }

    #[test]
    fn test_empty_mapping_is_absent() {
        let output = json!({});
        assert_eq!(extract_url(&output).unwrap(), None);
    }

    #[test]
    fn test_mapping_without_urls_is_absent() {
        let output = json!({ "progress": 42, "status": "done" });
        assert_eq!(extract_url(&output).unwrap(), None);
    }

    #[test]
    fn test_number_is_unrecognized() {
        let output = json!(42);
        assert!(matches!(
            extract_url(&output),
            Err(MediagenError::UnrecognizedOutputShape(_))
        ));
    }

    #[test]
    fn test_classify_variants() {
        assert_eq!(RemoteOutput::classify(json!(null)), RemoteOutput::Null);
        assert!(matches!(
            RemoteOutput::classify(json!("u")),
            RemoteOutput::Url(_)
        ));
        assert!(matches!(
            RemoteOutput::classify(json!([1, 2])),
            RemoteOutput::Sequence(_)
        ));
        assert!(matches!(
            RemoteOutput::classify(json!({"a": 1})),
            RemoteOutput::Mapping(_)
        ));
        assert!(matches!(
            RemoteOutput::classify(json!(true)),
            RemoteOutput::Unrecognized(_)
        ));
    }
}
