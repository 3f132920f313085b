use crate::error::{CmsError, Result};
use crate::table::MAX_RECORDS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`CmsConfig::get`] and [`CmsConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["capacity", "default-file"];

/// Configuration for cms, stored as config.json in the config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CmsConfig {
    /// Maximum number of records a table may hold (1..=1000)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// File used when a command is given no file argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_file: Option<PathBuf>,
}

fn default_capacity() -> usize {
    MAX_RECORDS
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            default_file: None,
        }
    }
}

impl CmsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config = Self::load_unchecked(config_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`CmsConfig::load`], but an out-of-range value is kept as is so
    /// it can still be inspected and corrected.
    pub fn load_unchecked<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CmsError::Io)?;
        serde_json::from_str(&content).map_err(CmsError::Serialization)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        self.validate()?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CmsError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CmsError::Serialization)?;
        fs::write(config_path, content).map_err(CmsError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        check_capacity(self.capacity)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "capacity" => Ok(self.capacity.to_string()),
            "default-file" | "default_file" => Ok(self
                .default_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            other => Err(unknown_key(other)),
        }
    }

    /// Sets one key from its string form. An empty `default-file` unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "capacity" => {
                let capacity = value.trim().parse::<usize>().map_err(|_| {
                    CmsError::Config(format!("capacity must be a number, got \"{}\"", value))
                })?;
                check_capacity(capacity)?;
                self.capacity = capacity;
            }
            "default-file" | "default_file" => {
                let value = value.trim();
                self.default_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn check_capacity(capacity: usize) -> Result<()> {
    if (1..=MAX_RECORDS).contains(&capacity) {
        Ok(())
    } else {
        Err(CmsError::Config(format!(
            "capacity must be between 1 and {}, got {}",
            MAX_RECORDS, capacity
        )))
    }
}

fn unknown_key(key: &str) -> CmsError {
    CmsError::Config(format!(
        "unknown key \"{}\" (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CmsConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.default_file, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = CmsConfig::load(dir.path().join("nested")).unwrap();
        assert_eq!(config, CmsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join("cms");

        let mut config = CmsConfig::default();
        config.set("capacity", "25").unwrap();
        config.set("default-file", "records.txt").unwrap();
        config.save(&config_dir).unwrap();

        let loaded = CmsConfig::load(&config_dir).unwrap();
        assert_eq!(loaded.capacity, 25);
        assert_eq!(loaded.default_file, Some(PathBuf::from("records.txt")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();
        assert_eq!(CmsConfig::load(dir.path()).unwrap(), CmsConfig::default());
    }

    #[test]
    fn test_out_of_range_capacity_in_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"capacity": 5000}"#).unwrap();
        assert!(matches!(
            CmsConfig::load(dir.path()),
            Err(CmsError::Config(_))
        ));
    }

    #[test]
    fn test_out_of_range_capacity_can_be_repaired() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"capacity": 5000}"#).unwrap();

        let mut config = CmsConfig::load_unchecked(dir.path()).unwrap();
        assert_eq!(config.get("capacity").unwrap(), "5000");
        config.set("capacity", "100").unwrap();
        config.save(dir.path()).unwrap();

        assert_eq!(CmsConfig::load(dir.path()).unwrap().capacity, 100);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CmsConfig::default();
        assert!(config.set("capacity", "0").is_err());
        assert!(config.set("capacity", "1001").is_err());
        assert!(config.set("capacity", "many").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, CmsConfig::default());
    }

    #[test]
    fn test_get_and_unset() {
        let mut config = CmsConfig::default();
        config.set("default-file", "a.txt").unwrap();
        assert_eq!(config.get("default-file").unwrap(), "a.txt");

        config.set("default-file", "").unwrap();
        assert_eq!(config.get("default-file").unwrap(), "");
        assert_eq!(config.get("capacity").unwrap(), "1000");
    }
}
