//! Artifact download
//!
//! Streams a resolved artifact URL into the kind's subdirectory under the
//! configured output root. Files are hashed while streaming so callers get
//! a content fingerprint without a second read.

use crate::error::{MediagenError, Result};
use crate::kind::MediaKind;
use crate::result::infer_file_type;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// A downloaded artifact on disk
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    pub path: PathBuf,
    pub bytes: u64,
    /// Prefixed hex digest, e.g. `sha256:ab12...`
    pub content_hash: String,
}

/// Download an artifact URL to `<output_root>/<kind subdir>/`.
pub fn download_artifact(
    url: &str,
    output_root: &Path,
    kind: MediaKind,
) -> Result<DownloadedArtifact> {
    let dir = output_root.join(kind.output_subdir());
    std::fs::create_dir_all(&dir)?;

    let filename = artifact_filename(kind, url, Utc::now());
    let path = unique_path(&dir, &filename);

    let agent: ureq::Agent = ureq::Agent::config_builder().build().into();
    let response = agent
        .get(url)
        .call()
        .map_err(|e| MediagenError::Download(format!("{}: {}", url, e)))?;

    let mut reader = response.into_body().into_reader();

    let mut file = std::fs::File::create(&path)?;
    let mut hasher = Sha256::new();
    let mut bytes: u64 = 0;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| MediagenError::Download(format!("{}: {}", url, e)))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        file.write_all(&buf[..n])?;
        bytes += n as u64;
    }

    let digest = hasher.finalize();
    let content_hash = format!(
        "sha256:{}",
        digest.iter().map(|b| format!("{:02x}", b)).collect::<String>()
    );

    Ok(DownloadedArtifact {
        path,
        bytes,
        content_hash,
    })
}

/// Build the artifact filename: kind prefix, creation timestamp, and the
/// file type taken from the URL when it matches the kind.
pub fn artifact_filename(kind: MediaKind, url: &str, at: DateTime<Utc>) -> String {
    let ext = infer_file_type(kind, url).unwrap_or_else(|| kind.default_file_type().to_string());
    format!("{}_{}.{}", kind.id_prefix(), at.format("%Y%m%d_%H%M%S"), ext)
}

/// Avoid clobbering when several jobs finish within the same second
fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = filename.rsplit_once('.').unwrap_or((filename, ""));
    for i in 1.. {
        let candidate = dir.join(format!("{}_{}.{}", stem, i, ext));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!()
}
