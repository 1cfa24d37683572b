use std::collections::BTreeMap;
use std::path::Path;

use crate::error::AppError;
use crate::models::Championship;
use crate::roster::RosterRules;

/// Validates the configuration settings
///
/// # Validation Rules
/// - If a data directory is provided, it cannot be empty
/// - If a log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
/// - Roster rule overrides must name a known championship, keep
///   `min_skaters <= max_skaters` and require at least one goalie
pub fn validate_config(
    data_dir: &Option<String>,
    log_file_path: &Option<String>,
    roster_rules: &BTreeMap<String, RosterRules>,
) -> Result<(), AppError> {
    if let Some(dir) = data_dir
        && dir.trim().is_empty()
    {
        return Err(AppError::config_error("Data directory cannot be empty"));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    for (name, rules) in roster_rules {
        if name.parse::<Championship>().is_err() {
            return Err(AppError::config_error(format!(
                "Roster rules given for unknown championship '{name}'"
            )));
        }
        if rules.min_skaters > rules.max_skaters {
            return Err(AppError::config_error(format!(
                "Roster rules for '{name}': min_skaters ({}) exceeds max_skaters ({})",
                rules.min_skaters, rules.max_skaters
            )));
        }
        if rules.goalies == 0 {
            return Err(AppError::config_error(format!(
                "Roster rules for '{name}' must require at least one goalie"
            )));
        }
    }

    Ok(())
}
