// Configuration loaded from YAML

use crate::kv::{self, FileStore, KeyValueStore, MemoryStore, SqliteStore};
use crate::store::{DEFAULT_KEY, TaskStore};
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Directory name used under the platform config and data dirs
pub const APP_DIR: &str = "todostore";

/// Which persistence backend holds the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `<data_dir>/<key>.json`
    #[default]
    File,
    /// `<data_dir>/todostore.db`
    Sqlite,
    /// Nothing is written to disk
    Memory,
}

impl FromStr for Backend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "sqlite" => Ok(Backend::Sqlite),
            "memory" => Ok(Backend::Memory),
            other => Err(eyre!("Invalid backend: {} (expected file, sqlite or memory)", other)),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

const fn default_seed_samples() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,

    /// Where file and SQLite backends keep their data
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Storage key the task list is written under
    #[serde(default = "default_key")]
    pub key: String,

    /// Write the sample tasks when the list is empty at startup
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            data_dir: default_data_dir(),
            key: default_key(),
            seed_samples: default_seed_samples(),
        }
    }
}

impl Config {
    /// `<config_dir>/todostore/config.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yml"))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path) when `None`
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).context("Failed to parse YAML config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        kv::validate_key(&self.key)
    }

    /// Build the configured backend
    pub fn backend(&self) -> Result<Box<dyn KeyValueStore>> {
        let backend: Box<dyn KeyValueStore> = match self.backend {
            Backend::File => Box::new(FileStore::open(&self.data_dir)?),
            Backend::Sqlite => Box::new(SqliteStore::open(self.data_dir.join("todostore.db"))?),
            Backend::Memory => Box::new(MemoryStore::new()),
        };
        debug!(backend = ?self.backend, data_dir = %self.data_dir.display(), "Opened backend");
        Ok(backend)
    }

    /// Open the task store on the configured backend
    pub fn open_store(&self) -> Result<TaskStore<Box<dyn KeyValueStore>>> {
        self.validate()?;
        TaskStore::open_with(self.backend()?, self.key.clone(), self.seed_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::File);
        assert_eq!(config.key, "todos");
        assert!(config.seed_samples);
        assert!(config.data_dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("backend: sqlite\nseed_samples: false\n").unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert!(!config.seed_samples);
        assert_eq!(config.key, "todos");
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(Config::from_yaml("backend: floppy\n").is_err());
        assert!(Config::from_yaml("key: \"../etc\"\n").is_err());
        assert!(Config::from_yaml("backend: [").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, format!("data_dir: {}\nkey: work\n", temp.path().display())).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.key, "work");
        assert_eq!(config.data_dir, temp.path());

        assert!(Config::load(Some(&temp.path().join("missing.yml"))).is_err());
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("file".parse::<Backend>().unwrap(), Backend::File);
        assert_eq!("SQLite".parse::<Backend>().unwrap(), Backend::Sqlite);
        assert_eq!("memory".parse::<Backend>().unwrap(), Backend::Memory);
        assert!("redis".parse::<Backend>().is_err());
    }

    #[test]
    fn test_open_store_file_backend() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            backend: Backend::File,
            data_dir: temp.path().to_path_buf(),
            key: "todos".to_string(),
            seed_samples: false,
        };

        let mut store = config.open_store().unwrap();
        assert!(store.is_empty());
        store.add("Buy milk").unwrap();
        assert!(temp.path().join("todos.json").exists());

        let reopened = config.open_store().unwrap();
        assert_eq!(reopened.tasks().len(), 1);
    }

    #[test]
    fn test_open_store_sqlite_backend_seeds() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            backend: Backend::Sqlite,
            data_dir: temp.path().to_path_buf(),
            ..Config::default()
        };

        let store = config.open_store().unwrap();
        assert_eq!(store.tasks().len(), 4);
        assert!(temp.path().join("todostore.db").exists());
    }
}
