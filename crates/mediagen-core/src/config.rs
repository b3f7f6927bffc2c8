//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `MEDIAGEN_API_TOKEN` (or `REPLICATE_API_TOKEN`),
//!    `MEDIAGEN_API_URL`, `MEDIAGEN_OUTPUT_ROOT`
//! 2. Project-local: `.mediagen/config.toml`
//! 3. Global: `~/.mediagen/config.toml`
//!
//! A missing API token is not an error here; requests fail downstream with
//! an authentication error instead, and binaries warn at startup.

use crate::error::{MediagenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.replicate.com/v1";
pub const DEFAULT_OUTPUT_ROOT: &str = "data/output";

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediagenConfigFile {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub output_root: Option<String>,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct MediagenConfig {
    pub api_token: Option<String>,
    pub api_url: Option<String>,
    pub output_root: Option<String>,
}

impl MediagenConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut file = MediagenConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                merge_into(&mut file, Self::load_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".mediagen/config.toml");
        if local_path.exists() {
            merge_into(&mut file, Self::load_file(&local_path)?);
        }

        apply_env_overrides(&mut file);

        Ok(Self::from_file(file))
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut file = Self::load_file(path)?;
        apply_env_overrides(&mut file);
        Ok(Self::from_file(file))
    }

    fn from_file(file: MediagenConfigFile) -> Self {
        Self {
            api_token: file.api_token,
            api_url: file.api_url,
            output_root: file.output_root,
        }
    }

    /// Bearer token for the remote generation service, if configured
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    /// Base URL of the remote generation service
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Root directory for downloaded artifacts
    pub fn output_root(&self) -> &str {
        self.output_root.as_deref().unwrap_or(DEFAULT_OUTPUT_ROOT)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mediagen").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<MediagenConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MediagenError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}

fn merge_into(base: &mut MediagenConfigFile, overlay: MediagenConfigFile) {
    if overlay.api_token.is_some() {
        base.api_token = overlay.api_token;
    }
    if overlay.api_url.is_some() {
        base.api_url = overlay.api_url;
    }
    if overlay.output_root.is_some() {
        base.output_root = overlay.output_root;
    }
}

fn apply_env_overrides(file: &mut MediagenConfigFile) {
    // MEDIAGEN_API_TOKEN wins over the legacy REPLICATE_API_TOKEN name
    if let Ok(token) = std::env::var("MEDIAGEN_API_TOKEN") {
        file.api_token = Some(token);
    } else if let Ok(token) = std::env::var("REPLICATE_API_TOKEN") {
        file.api_token = Some(token);
    }
    if let Ok(url) = std::env::var("MEDIAGEN_API_URL") {
        file.api_url = Some(url);
    }
    if let Ok(root) = std::env::var("MEDIAGEN_OUTPUT_ROOT") {
        file.output_root = Some(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("mediagen_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        std::env::remove_var("MEDIAGEN_API_TOKEN");
        std::env::remove_var("REPLICATE_API_TOKEN");

        let path = temp_config(
            r#"
api_token = "test-token-123"
api_url = "https://api.example.com/v1"
output_root = "artifacts"
"#,
        );
        let config = MediagenConfig::load_from_file(&path).unwrap();

        assert_eq!(config.api_token(), Some("test-token-123"));
        assert_eq!(config.api_url(), "https://api.example.com/v1");
        assert_eq!(config.output_root(), "artifacts");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_defaults_when_unset() {
        std::env::remove_var("MEDIAGEN_API_TOKEN");
        std::env::remove_var("REPLICATE_API_TOKEN");

        let config = MediagenConfig::default();
        assert_eq!(config.api_token(), None);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.output_root(), DEFAULT_OUTPUT_ROOT);
    }

    #[test]
    fn test_env_var_override() {
        let path = temp_config(r#"api_token = "file-token""#);

        std::env::set_var("MEDIAGEN_API_TOKEN", "env-token-override");
        let config = MediagenConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api_token(), Some("env-token-override"));
        std::env::remove_var("MEDIAGEN_API_TOKEN");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let path = temp_config("api_token = [not valid");
        let err = MediagenConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, MediagenError::Config(_)));
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }
}
