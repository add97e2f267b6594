use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Qubes OS keeps its VM registry here; any change to it means the domain set changed
pub const DEFAULT_STATE_FILE: &str = "/var/lib/qubes/qubes.xml";

pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "domtable.log";

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. DOMTABLE_PATH environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.domtable (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("DOMTABLE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("domtable"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".domtable"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// File whose changes trigger a table rebuild
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Domain snapshot document; `<data-dir>/domains.json` when unset
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Coalescing window for change notifications, 0 disables it
    #[serde(default)]
    pub debounce_ms: u64,
}

fn default_state_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            source: None,
            debounce_ms: 0,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Snapshot path, falling back to `domains.json` in the data directory
    pub fn source_path(&self, data_dir: &Path) -> PathBuf {
        match &self.source {
            Some(path) => expand_tilde(&path.to_string_lossy()),
            None => data_dir.join("domains.json"),
        }
    }

    pub fn state_file_path(&self) -> PathBuf {
        expand_tilde(&self.state_file.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(config.source, None);
        assert_eq!(config.debounce_ms, 0);
    }

    #[test]
    fn test_config_load_all_keys() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(
            &config_path,
            "state_file = \"/tmp/qubes.xml\"\nsource = \"/tmp/domains.json\"\ndebounce_ms = 250\n",
        )?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(
            loaded,
            Config {
                state_file: PathBuf::from("/tmp/qubes.xml"),
                source: Some(PathBuf::from("/tmp/domains.json")),
                debounce_ms: 250,
            }
        );

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(&config_path, "debounce_ms = 100\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.debounce_ms, 100);
        assert_eq!(config.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(
            config.source_path(temp_dir.path()),
            temp_dir.path().join("domains.json")
        );

        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(&config_path, "debounce_ms = \"soon\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_explicit_data_dir_wins() -> Result<()> {
        assert_eq!(
            resolve_data_dir(Some("/srv/domtable"))?,
            PathBuf::from("/srv/domtable")
        );
        Ok(())
    }
}
