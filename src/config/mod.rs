use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    auth::Credentials,
    errors::BookError,
    ledger::Amount,
    statements::SectionPolicy,
    utils::{
        paths,
        persistence::{ensure_dir, write_atomic},
        DEFAULT_LOG_LEVEL,
    },
};

/// User preferences and policy switches, stored as JSON under the app home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pre-filled company name for new statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// Refuse balance sheets missing an asset, liability or equity line.
    #[serde(default = "Config::default_require_all_sections")]
    pub require_all_sections: bool,
    #[serde(default = "Config::default_balance_tolerance_cents")]
    pub balance_tolerance_cents: i64,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_log_level")]
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company_name: None,
            currency_symbol: Self::default_currency_symbol(),
            require_all_sections: Self::default_require_all_sections(),
            balance_tolerance_cents: Self::default_balance_tolerance_cents(),
            credentials: Credentials::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            log_level: Self::default_log_level(),
            default_export_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_require_all_sections() -> bool {
        true
    }

    pub fn default_balance_tolerance_cents() -> i64 {
        1
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_log_level() -> String {
        DEFAULT_LOG_LEVEL.into()
    }

    pub fn section_policy(&self) -> SectionPolicy {
        SectionPolicy {
            require_all_sections: self.require_all_sections,
            tolerance: Amount::from_cents(self.balance_tolerance_cents.max(0)),
        }
    }

    /// Directory offered first when prompting for an export path.
    pub fn resolve_export_dir(&self) -> PathBuf {
        if let Some(path) = &self.default_export_dir {
            return path.clone();
        }
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Loads and saves [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(home: &Path) -> Result<Self, BookError> {
        let path = paths::config_file_in(home);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self { path })
    }

    /// Returns the stored configuration, or defaults when none has been saved.
    pub fn load(&self) -> Result<Config, BookError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            BookError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), BookError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| BookError::Config(err.to_string()))?;
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert!(config.section_policy().require_all_sections);
        assert_eq!(config.section_policy().tolerance, Amount::from_cents(1));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path()).unwrap();
        let config = Config {
            company_name: Some("Acme".into()),
            require_all_sections: false,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path()).unwrap();
        fs::write(manager.path(), r#"{ "require_all_sections": false }"#).unwrap();
        let config = manager.load().unwrap();
        assert!(!config.require_all_sections);
        assert_eq!(config.credentials, Credentials::default());
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path()).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(matches!(manager.load(), Err(BookError::Config(_))));
    }
}
