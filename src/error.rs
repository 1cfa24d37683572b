use thiserror::Error;

use crate::capture::{LogError, WizardError};
use crate::models::ParseError;
use crate::roster::RosterError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    // Persistence errors
    #[error("Game not found: {id}")]
    GameNotFound { id: String },

    #[error("Team not found: {id}")]
    TeamNotFound { id: String },

    #[error("Cannot {operation} a {entity} without an id")]
    MissingId {
        entity: &'static str,
        operation: &'static str,
    },

    #[error("Team name is already taken: {name}")]
    TeamAlreadyExists { name: String },

    #[error("Storage error: {0}")]
    Storage(String),

    // Game lifecycle errors
    #[error("Game cannot end in a tie ({home}-{away}); record the deciding goal before finalizing")]
    TiedGame { home: u32, away: u32 },

    #[error("Game setup is invalid: {0}")]
    InvalidSetup(String),

    #[error("Capture error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Event log error: {0}")]
    EventLog(#[from] LogError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Import error: {0}")]
    Parse(#[from] ParseError),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a storage error with context
    pub fn storage_error(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid setup error, usually from a joined list of field errors
    pub fn invalid_setup(msg: impl Into<String>) -> Self {
        Self::InvalidSetup(msg.into())
    }

    pub fn game_not_found(id: impl Into<String>) -> Self {
        Self::GameNotFound { id: id.into() }
    }

    pub fn team_not_found(id: impl Into<String>) -> Self {
        Self::TeamNotFound { id: id.into() }
    }

    pub fn missing_id(entity: &'static str, operation: &'static str) -> Self {
        Self::MissingId { entity, operation }
    }

    /// Check if error indicates data not found (business logic, not technical error)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::GameNotFound { .. }
                | AppError::TeamNotFound { .. }
                | AppError::EventLog(LogError::UnknownEvent { .. })
        )
    }

    /// Errors the operator can fix in place without losing the current game.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::TiedGame { .. }
                | AppError::InvalidSetup(_)
                | AppError::Wizard(_)
                | AppError::Roster(_)
                | AppError::Io(_)
                | AppError::Storage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_tied_game_message() {
        let error = AppError::TiedGame { home: 2, away: 2 };
        assert_eq!(
            error.to_string(),
            "Game cannot end in a tie (2-2); record the deciding goal before finalizing"
        );
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_missing_id_message() {
        let error = AppError::missing_id("game", "update");
        assert_eq!(error.to_string(), "Cannot update a game without an id");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(AppError::game_not_found("abc").is_not_found());
        assert!(AppError::team_not_found("abc").is_not_found());
        assert!(AppError::EventLog(LogError::UnknownEvent { id: 4 }).is_not_found());
        assert!(!AppError::config_error("x").is_not_found());
        assert!(!AppError::TiedGame { home: 1, away: 1 }.is_not_found());
    }

    #[test]
    fn test_domain_errors_convert() {
        let error: AppError = WizardError::TooManyAssists { count: 3 }.into();
        assert!(matches!(error, AppError::Wizard(_)));

        let error: AppError = RosterError::GoalieCount {
            expected: 2,
            actual: 1,
        }
        .into();
        assert!(error.to_string().starts_with("Roster error: "));
    }

    #[test]
    fn test_error_display_formats() {
        let errors = vec![
            AppError::config_error("test config error"),
            AppError::log_setup_error("test log error"),
            AppError::storage_error("disk full"),
            AppError::invalid_setup("Home team must be selected"),
            AppError::game_not_found("g1"),
            AppError::team_not_found("t1"),
            AppError::missing_id("team", "delete"),
            AppError::TeamAlreadyExists {
                name: "Steaua".to_string(),
            },
            AppError::TiedGame { home: 0, away: 0 },
        ];

        for error in errors {
            let display_string = error.to_string();
            assert!(
                display_string.len() > 5,
                "Error display should be descriptive: {error:?}"
            );
        }
    }
}
