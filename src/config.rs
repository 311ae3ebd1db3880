// Board configuration

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings loaded from `config.yaml`; every key is optional and CLI flags
/// override whatever is here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// URL of the shared snapshot (e.g. a raw tasks.json in the repo).
    /// Without one, the board is cache-only.
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Where the local cache lives. Defaults to the platform data dir.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

impl Config {
    /// Load from the default location; a missing file means defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("taskboard").join("config.yaml"))
    }

    /// Effective cache path, falling back to the platform data directory.
    pub fn cache_path(&self) -> PathBuf {
        self.cache_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskboard")
                .join("tasks.json")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "remote_url: https://example.test/tasks.json\ncache_path: /tmp/board/tasks.json\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.remote_url.as_deref(),
            Some("https://example.test/tasks.json")
        );
        assert_eq!(
            config.cache_path(),
            PathBuf::from("/tmp/board/tasks.json")
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "remote_url: https://example.test/tasks.json\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.cache_path.is_none());
        assert!(config.cache_path().ends_with("taskboard/tasks.json"));
    }

    #[test]
    fn test_default_config_has_no_remote() {
        let config = Config::default();
        assert!(config.remote_url.is_none());
    }
}
