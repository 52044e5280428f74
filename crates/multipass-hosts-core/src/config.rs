//! User alias configuration (`~/.multipass-hosts.json`).
//!
//! ```json
//! { "aliasses": { "vm1": ["web", "db"] } }
//! ```
//!
//! The historical `aliasses` key is what existing config files use; the
//! correctly spelled `aliases` is accepted as well.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AliasMap, HostsError, Result};

/// File name of the alias config, relative to the home directory.
pub const CONFIG_FILE_NAME: &str = ".multipass-hosts.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    #[serde(rename = "aliasses", alias = "aliases", default)]
    pub aliases: AliasMap,
}

impl AliasConfig {
    /// Load the config at `path`. A missing file yields an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no alias config, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(HostsError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self =
            serde_json::from_slice(&bytes).map_err(|source| HostsError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            targets = config.aliases.len(),
            "loaded alias config"
        );
        Ok(config)
    }
}

/// `$HOME/.multipass-hosts.json` (`%USERPROFILE%` on Windows).
pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .ok_or(HostsError::HomeDirMissing)?;
    Ok(PathBuf::from(home).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_empty() {
        let dir = tempdir().unwrap();
        let config = AliasConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_load_historical_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"aliasses": {"vm1": ["web", "db"]}}"#).unwrap();

        let config = AliasConfig::load(&path).unwrap();
        assert_eq!(config.aliases["vm1"], vec!["web", "db"]);
    }

    #[test]
    fn test_load_correctly_spelled_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"aliases": {"vm1": ["web"]}}"#).unwrap();

        let config = AliasConfig::load(&path).unwrap();
        assert_eq!(config.aliases["vm1"], vec!["web"]);
    }

    #[test]
    fn test_empty_object_is_empty_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(AliasConfig::load(&path).unwrap(), AliasConfig::default());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{not json").unwrap();

        let err = AliasConfig::load(&path).unwrap_err();
        assert!(matches!(err, HostsError::ConfigParse { .. }));
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = tempdir().unwrap();
        let err = AliasConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, HostsError::ConfigRead { .. }));
    }
}
