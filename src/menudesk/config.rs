use crate::error::{MenuError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORE_FILE: &str = "menudesk.json";
const DEFAULT_CURRENCY: &str = "₽";

/// Keys accepted by `menudesk config`.
pub const CONFIG_KEYS: [&str; 2] = ["store-file", "currency"];

/// Configuration for menudesk, stored in `<home>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenudeskConfig {
    /// Workbook file name, relative to the data directory
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Symbol printed after prices
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_store_file() -> String {
    DEFAULT_STORE_FILE.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for MenudeskConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            currency: default_currency(),
        }
    }
}

impl MenudeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MenuError::Io)?;
        let config: MenudeskConfig =
            serde_json::from_str(&content).map_err(MenuError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MenuError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MenuError::Serialization)?;
        fs::write(config_path, content).map_err(MenuError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        match key {
            "store-file" => Ok(&self.store_file),
            "currency" => Ok(&self.currency),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "store-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(MenuError::Api("store-file cannot be empty".to_string()));
                }
                self.store_file = value.to_string();
            }
            "currency" => self.currency = value.to_string(),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> MenuError {
    MenuError::Api(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
