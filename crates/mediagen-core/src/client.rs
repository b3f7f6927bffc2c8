//! Remote invocation adapter
//!
//! Wraps a single synchronous call to the remote generation service. One
//! attempt per invocation, no retry; the transport's own timeout behavior
//! applies. All upstream failures are converted to `RemoteInvocation`
//! errors carrying the upstream message.

use crate::config::MediagenConfig;
use crate::error::{MediagenError, Result};
use crate::models::BuiltRequest;
use base64::Engine;
use serde_json::{json, Value};
use std::path::Path;

/// Client for the remote generation service
pub struct RemoteClient {
    api_token: Option<String>,
    api_url: String,
}

impl RemoteClient {
    /// Create a client from resolved config
    pub fn from_config(config: &MediagenConfig) -> Self {
        Self {
            api_token: config.api_token().map(|t| t.to_string()),
            api_url: config.api_url().trim_end_matches('/').to_string(),
        }
    }

    /// True when a bearer token is configured
    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Invoke a remote model and return its raw output value.
    ///
    /// Image-like input fields that are not URLs are converted to
    /// uploadable data URIs before the call.
    pub fn invoke(&self, request: &BuiltRequest) -> Result<Value> {
        let token = self.api_token.as_deref().ok_or_else(|| {
            MediagenError::RemoteInvocation(
                "No API token configured. Set MEDIAGEN_API_TOKEN or add api_token to .mediagen/config.toml".to_string(),
            )
        })?;

        let input = prepare_image_inputs(request.input.clone())?;

        // Version-pinned requests go to the generic prediction endpoint;
        // unpinned requests address the model path directly.
        let (url, body) = match &request.version {
            Some(version) => (
                format!("{}/predictions", self.api_url),
                json!({ "version": version, "input": input }),
            ),
            None => (
                format!("{}/models/{}/predictions", self.api_url, request.model_path),
                json!({ "input": input }),
            ),
        };

        let agent: ureq::Agent = ureq::Agent::config_builder().build().into();
        let response = agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .header("Prefer", "wait")
            .send_json(&body);

        let mut ok = match response {
            Ok(ok) => ok,
            Err(e) => {
                return Err(MediagenError::RemoteInvocation(format!(
                    "{}: {}",
                    request.model_path, e
                )))
            }
        };

        let envelope: Value = ok.body_mut().read_json().map_err(|e| {
            MediagenError::RemoteInvocation(format!(
                "Failed to parse response from {}: {}",
                request.model_path, e
            ))
        })?;

        parse_prediction_output(&envelope)
    }
}

/// Extract the raw output from a prediction envelope, failing on reported
/// errors or non-succeeded terminal statuses.
pub fn parse_prediction_output(envelope: &Value) -> Result<Value> {
    if let Some(err) = envelope.get("error") {
        if !err.is_null() {
            let msg = err.as_str().map(|s| s.to_string()).unwrap_or_else(|| err.to_string());
            return Err(MediagenError::RemoteInvocation(msg));
        }
    }

    if let Some(status) = envelope.get("status").and_then(|s| s.as_str()) {
        if matches!(status, "failed" | "canceled") {
            return Err(MediagenError::RemoteInvocation(format!(
                "prediction ended with status '{}'",
                status
            )));
        }
    }

    Ok(envelope.get("output").cloned().unwrap_or(Value::Null))
}

/// Convert image-like input fields into something the remote service can
/// fetch: URLs pass through, local files become base64 data URIs, anything
/// else is an invalid reference.
pub fn prepare_image_inputs(mut input: Value) -> Result<Value> {
    if let Value::Object(map) = &mut input {
        for (key, value) in map.iter_mut() {
            if !key.contains("image") {
                continue;
            }
            if let Value::String(s) = value {
                if s.starts_with("http://") || s.starts_with("https://") {
                    continue;
                }
                *value = Value::String(file_to_data_uri(s)?);
            }
        }
    }
    Ok(input)
}

fn file_to_data_uri(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        return Err(MediagenError::InvalidImageReference(format!(
            "'{}' is neither a URL nor an existing local file",
            path
        )));
    }

    let bytes = std::fs::read(path)?;
    let mime = match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime, encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_prediction_success() {
        let envelope = json!({
            "id": "p1",
            "status": "succeeded",
            "output": ["https://example.com/out.png"]
        });
        let output = parse_prediction_output(&envelope).unwrap();
        assert_eq!(output[0], "https://example.com/out.png");
    }

    #[test]
    fn test_parse_prediction_error_field() {
        let envelope = json!({
            "status": "failed",
            "error": "NSFW content detected",
            "output": null
        });
        let err = parse_prediction_output(&envelope).unwrap_err();
        assert!(err.to_string().contains("NSFW content detected"));
    }

    #[test]
    fn test_parse_prediction_failed_status_without_error() {
        let envelope = json!({ "status": "canceled", "output": null });
        assert!(matches!(
            parse_prediction_output(&envelope),
            Err(MediagenError::RemoteInvocation(_))
        ));
    }

    #[test]
    fn test_parse_prediction_null_error_is_ok() {
        let envelope = json!({ "status": "succeeded", "error": null, "output": "u" });
        assert_eq!(parse_prediction_output(&envelope).unwrap(), "u");
    }

    #[test]
    fn test_parse_prediction_missing_output_is_null() {
        let envelope = json!({ "status": "processing" });
        assert_eq!(parse_prediction_output(&envelope).unwrap(), Value::Null);
    }

    #[test]
    fn test_prepare_url_passthrough() {
        let input = json!({ "image": "https://example.com/a.png", "prompt": "p" });
        let out = prepare_image_inputs(input.clone()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_prepare_missing_path_fails() {
        let input = json!({ "init_image": "/no/such/file.png" });
        let err = prepare_image_inputs(input).unwrap_err();
        assert!(matches!(err, MediagenError::InvalidImageReference(_)));
    }

    #[test]
    fn test_prepare_ignores_non_image_fields() {
        let input = json!({ "prompt": "not-a-url", "seed": 1 });
        let out = prepare_image_inputs(input.clone()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_prepare_local_file_becomes_data_uri() {
        let dir =
            std::env::temp_dir().join(format!("mediagen_client_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("src.png");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"\x89PNG\r\n").unwrap();

        let input = json!({ "image": path.to_str().unwrap() });
        let out = prepare_image_inputs(input).unwrap();
        let value = out["image"].as_str().unwrap();
        assert!(value.starts_with("data:image/png;base64,"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_client_without_token_fails_invoke() {
        let config = MediagenConfig::default();
        let mut client = RemoteClient::from_config(&config);
        client.api_token = None; // guard against ambient env config
        let request = crate::models::BuiltRequest {
            model_path: "owner/model".to_string(),
            version: None,
            input: json!({}),
        };
        let err = client.invoke(&request).unwrap_err();
        assert!(matches!(err, MediagenError::RemoteInvocation(_)));
    }
}
