use crate::error::{Result, RollbookError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "students.json";

/// Configuration for rollbook, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RollbookConfig {
    /// File name of the record collection, relative to the data dir
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl Default for RollbookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl RollbookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RollbookError::Io)?;
        let mut config: RollbookConfig =
            serde_json::from_str(&content).map_err(RollbookError::Serialization)?;

        // Hand edits bypass set_data_file; a bad name could clobber config.json
        let checked = validate_data_file(&config.data_file).map(str::to_string);
        match checked {
            Ok(name) => config.data_file = name,
            Err(reason) => {
                warn!(
                    path = %config_path.display(),
                    %reason,
                    "invalid data-file in config, using {}",
                    DEFAULT_DATA_FILE
                );
                config.data_file = default_data_file();
            }
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RollbookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RollbookError::Serialization)?;
        fs::write(config_path, content).map_err(RollbookError::Io)?;
        Ok(())
    }

    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    /// Set the data file name. Must be a plain file name, not a path.
    pub fn set_data_file(&mut self, name: &str) -> std::result::Result<(), String> {
        self.data_file = validate_data_file(name)?.to_string();
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["data-file"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "data-file" => self.set_data_file(value),
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}

/// Checks a data file name and returns it trimmed.
fn validate_data_file(name: &str) -> std::result::Result<&str, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("data-file cannot be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(format!("data-file must be a file name, got: {}", name));
    }
    if name == CONFIG_FILENAME {
        return Err(format!("data-file cannot be {}", CONFIG_FILENAME));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RollbookConfig::default();
        assert_eq!(config.data_file(), "students.json");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = RollbookConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, RollbookConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = RollbookConfig::default();
        config.set("data-file", "class-7b.json").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = RollbookConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.data_file(), "class-7b.json");
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: RollbookConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.data_file(), "students.json");
    }

    #[test]
    fn test_hand_edited_bad_data_file_falls_back_to_default() {
        for bad in ["config.json", "../escape.json", "/tmp/abs.json", "   "] {
            let dir = TempDir::new().unwrap();
            let raw = serde_json::json!({ "data_file": bad }).to_string();
            fs::write(dir.path().join("config.json"), raw).unwrap();

            let config = RollbookConfig::load(dir.path()).unwrap();
            assert_eq!(config.data_file(), "students.json", "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_hand_edited_data_file_is_trimmed() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"data_file":"  grades.json "}"#,
        )
        .unwrap();

        let config = RollbookConfig::load(dir.path()).unwrap();
        assert_eq!(config.data_file(), "grades.json");
    }

    #[test]
    fn test_rejects_paths_and_unknown_keys() {
        let mut config = RollbookConfig::default();
        assert!(config.set("data-file", "../escape.json").is_err());
        assert!(config.set("data-file", "  ").is_err());
        assert!(config.set("data-file", "config.json").is_err());
        assert!(config.set("color", "red").is_err());
        assert_eq!(config.get("data-file").unwrap(), "students.json");
    }
}
