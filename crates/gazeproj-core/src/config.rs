//! Project layout and descriptor format configuration.

use crate::error::ConfigError;
use encoding_rs::Encoding;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Extension of the descriptor file, without the leading dot.
    #[serde(default = "default_descriptor_extension")]
    pub descriptor_extension: String,
    #[serde(default)]
    pub descriptor: DescriptorFormat,
}

/// Byte-level layout of the descriptor file.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorFormat {
    /// Length of the opaque binary header skipped before parsing.
    #[serde(default = "default_header_len")]
    pub header_len: usize,
    /// WHATWG label of the legacy text encoding.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Top-level key holding the per-session sequence.
    #[serde(default = "default_sessions_key")]
    pub sessions_key: String,
}

fn default_descriptor_extension() -> String {
    "prj".to_string()
}

fn default_header_len() -> usize {
    14
}

fn default_encoding() -> String {
    "windows-1251".to_string()
}

fn default_sessions_key() -> String {
    "UserData".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            descriptor_extension: default_descriptor_extension(),
            descriptor: DescriptorFormat::default(),
        }
    }
}

impl Default for DescriptorFormat {
    fn default() -> Self {
        Self {
            header_len: default_header_len(),
            encoding: default_encoding(),
            sessions_key: default_sessions_key(),
        }
    }
}

impl DescriptorFormat {
    /// Resolve the configured encoding label.
    pub fn encoding(&self) -> Result<&'static Encoding, ConfigError> {
        Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(self.encoding.clone()))
    }
}

impl ProjectConfig {
    /// Parse config from TOML text and check the encoding label.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ProjectConfig = toml::from_str(content)?;
        config.descriptor.encoding()?;
        Ok(config)
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        debug!(target: "gazeproj::config", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from config/default.toml, then the user config directory,
    /// falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(ProjectConfig::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config/default.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("gazeproj").join("config.toml"));
        }
        paths
    }
}
