use crate::constants::{env_vars, storage};
use crate::error::AppError;
use crate::roster::{RosterRules, RosterRulesTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_default_data_dir, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory for games, teams and the recovery slot. Defaults to the
    /// platform data directory when not specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Whether an in-progress game is written to the recovery slot after each change.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
    /// Per-championship roster rules, keyed by championship name, applied over
    /// the built-in table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub roster_rules: BTreeMap<String, RosterRules>,
}

fn default_autosave() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: None,
            log_file_path: None,
            autosave: default_autosave(),
            roster_rules: BTreeMap::new(),
        }
    }
}

/// Accepts "true"/"false"/"1"/"0" in any case.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing file yields the defaults; nothing is written.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `RINK_TRACKER_DATA_DIR` - Override data directory
    /// - `RINK_TRACKER_LOG_FILE` - Override log file path
    /// - `RINK_TRACKER_AUTOSAVE` - Override autosave ("true"/"false"/"1"/"0")
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - Unreadable or invalid configuration
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Config::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Overrides values with the environment variables that are set.
    /// An unparseable autosave value is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var(env_vars::DATA_DIR) {
            self.data_dir = Some(data_dir);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(autosave) = std::env::var(env_vars::AUTOSAVE)
            .ok()
            .and_then(|s| parse_flag(&s))
        {
            self.autosave = autosave;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(&self.data_dir, &self.log_file_path, &self.roster_rules)
    }

    /// Built-in roster rules with this configuration's overrides applied.
    pub fn rules_table(&self) -> Result<RosterRulesTable, AppError> {
        Ok(RosterRulesTable::with_overrides(&self.roster_rules)?)
    }

    /// Directory holding all stored data.
    pub fn data_dir_path(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(get_default_data_dir)
    }

    pub fn games_dir(&self) -> PathBuf {
        self.data_dir_path().join(storage::GAMES_DIR)
    }

    pub fn teams_file(&self) -> PathBuf {
        self.data_dir_path().join(storage::TEAMS_FILE)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("(Defaults are in use)");
        }

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("Data Directory:");
        println!("{}", config.data_dir_path().display());
        if config.data_dir.is_none() {
            println!("(Default location)");
        }
        println!("────────────────────────────────────");
        println!("Autosave:");
        println!("{}", if config.autosave { "enabled" } else { "disabled" });
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", storage::LOG_FILE_NAME);
            println!("(Default location)");
        }
        if !config.roster_rules.is_empty() {
            println!("────────────────────────────────────");
            println!("Roster Rule Overrides:");
            for (name, rules) in &config.roster_rules {
                println!(
                    "{name}: {}-{} skaters, {} goalies",
                    rules.min_skaters, rules.max_skaters, rules.goalies
                );
            }
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
