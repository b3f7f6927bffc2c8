//! Generation results and the in-memory media store

use crate::kind::MediaKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A completed generation, ready to be returned or downloaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaResult {
    /// Kind-prefixed timestamp id, e.g. `img_20250301123045`
    pub id: String,
    pub kind: MediaKind,
    /// Artifact URL resolved from the remote output, if the model
    /// produced one
    pub url: Option<String>,
    pub prompt: String,
    pub model: String,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
    /// Extra fields carried through from the request (seed, aspect
    /// ratio, source image and the like)
    #[serde(default)]
    pub metadata: Value,
}

impl MediaResult {
    pub fn new(kind: MediaKind, model: &str, prompt: &str, url: Option<String>) -> Self {
        let created_at = Utc::now();
        let file_type = url
            .as_deref()
            .and_then(|u| infer_file_type(kind, u))
            .unwrap_or_else(|| kind.default_file_type().to_string());
        Self {
            id: media_id(kind, created_at),
            kind,
            url,
            prompt: prompt.to_string(),
            model: model.to_string(),
            file_type,
            created_at,
            metadata: Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Build a kind-prefixed id from a creation timestamp
pub fn media_id(kind: MediaKind, at: DateTime<Utc>) -> String {
    format!("{}_{}", kind.id_prefix(), at.format("%Y%m%d%H%M%S"))
}

/// Infer the artifact file type from the URL path, falling back to the
/// kind default when the suffix is missing or not a known type for that
/// kind.
pub fn infer_file_type(kind: MediaKind, url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit('/').next()?.rsplit_once('.')?.1.to_ascii_lowercase();
    if kind.known_file_types().contains(&ext.as_str()) {
        Some(ext)
    } else {
        None
    }
}

/// Thread-safe in-memory store of completed generations.
///
/// Results live for the lifetime of the process; there is no persistence.
#[derive(Debug, Clone, Default)]
pub struct MediaStore {
    inner: Arc<Mutex<HashMap<String, MediaResult>>>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, result: MediaResult) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(result.id.clone(), result);
        }
    }

    pub fn get(&self, id: &str) -> Option<MediaResult> {
        self.inner.lock().ok()?.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_media_id_format() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 45).unwrap();
        assert_eq!(media_id(MediaKind::Image, at), "img_20250301123045");
        assert_eq!(media_id(MediaKind::ThreeD, at), "3d_20250301123045");
        assert_eq!(media_id(MediaKind::Music, at), "mus_20250301123045");
    }

    #[test]
    fn test_infer_file_type_from_url() {
        assert_eq!(
            infer_file_type(MediaKind::Image, "https://x.test/a/b/out.webp?sig=1"),
            Some("webp".to_string())
        );
        assert_eq!(
            infer_file_type(MediaKind::ThreeD, "https://x.test/mesh.glb"),
            Some("glb".to_string())
        );
    }

    #[test]
    fn test_infer_file_type_rejects_foreign_suffix() {
        // an image URL ending in .glb is not a known image type
        assert_eq!(infer_file_type(MediaKind::Image, "https://x.test/a.glb"), None);
        assert_eq!(infer_file_type(MediaKind::Video, "https://x.test/a"), None);
    }

    #[test]
    fn test_result_falls_back_to_kind_default() {
        let result = MediaResult::new(
            MediaKind::Video,
            "veo2",
            "sunrise",
            Some("https://x.test/clip".to_string()),
        );
        assert_eq!(result.file_type, "mp4");
        assert!(result.id.starts_with("vid_"));
    }

    #[test]
    fn test_store_roundtrip() {
        let store = MediaStore::new();
        assert!(store.is_empty());

        let result = MediaResult::new(MediaKind::Image, "flux-schnell", "a cat", None);
        let id = result.id.clone();
        store.insert(result);

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.model, "flux-schnell");
        assert!(store.get("img_19700101000000").is_none());
    }
}
