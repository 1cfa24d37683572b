use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::models::Championship;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the arguments change the stored configuration.
pub fn is_config_update(args: &Args) -> bool {
    args.new_data_dir.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.autosave.is_some()
}

/// Rink Tracker
///
/// Operator tools for the data recorded at the rink: finalized games, team
/// records, player statistics and the in-progress game kept for recovery.
///
/// Games are recorded on the capture screen; this command reads the stored
/// data and manages the configuration.
#[derive(Parser, Debug, Default)]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
pub struct Args {
    /// List finalized games, oldest first.
    #[arg(long = "games", help_heading = "Games")]
    pub games: bool,

    /// Only list games this team played in.
    #[arg(long = "team", value_name = "TEAM_ID", requires = "games", help_heading = "Games")]
    pub team: Option<String>,

    /// Show the record of a team, per season for regular season and playoffs.
    #[arg(long = "team-stats", value_name = "TEAM_ID", help_heading = "Statistics")]
    pub team_stats: Option<String>,

    /// Show the player table of a team: everyone who dressed for it, current roster first.
    #[arg(long = "player-stats", value_name = "TEAM_ID", help_heading = "Statistics")]
    pub player_stats: Option<String>,

    /// Restrict games and statistics to one season, e.g. 2024-2025.
    #[arg(long = "season", help_heading = "Statistics")]
    pub season: Option<String>,

    /// Restrict games and statistics to one championship, e.g. "Erste League".
    #[arg(long = "championship", help_heading = "Statistics")]
    pub championship: Option<Championship>,

    /// List teams with their player pools.
    #[arg(long = "teams", help_heading = "Teams")]
    pub teams: bool,

    /// Show the unfinished game held in the recovery slot.
    #[arg(long = "recovery", help_heading = "Recovery")]
    pub recovery: bool,

    /// Discard the unfinished game held in the recovery slot.
    #[arg(long = "clear-recovery", help_heading = "Recovery")]
    pub clear_recovery: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Update the data directory in config.
    #[arg(long = "set-data-dir", value_name = "DIR", help_heading = "Configuration")]
    pub new_data_dir: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", value_name = "PATH", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// Turn autosave of the in-progress game on or off.
    #[arg(long = "autosave", value_name = "true|false", help_heading = "Configuration")]
    pub autosave: Option<bool>,

    /// Show version information
    #[arg(short = 'V', long = "version", help_heading = "Info")]
    pub version: bool,

    /// Also write logs to the terminal, at debug level for this crate.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_with_team_filter() {
        let args = Args::try_parse_from(["rink_tracker", "--games", "--team", "t1"]).unwrap();
        assert!(args.games);
        assert_eq!(args.team.as_deref(), Some("t1"));
        assert!(!is_config_update(&args));
    }

    #[test]
    fn test_team_filter_requires_games() {
        assert!(Args::try_parse_from(["rink_tracker", "--team", "t1"]).is_err());
    }

    #[test]
    fn test_championship_is_parsed_by_name() {
        let args = Args::try_parse_from([
            "rink_tracker",
            "--team-stats",
            "t1",
            "--championship",
            "romanian cup",
        ])
        .unwrap();
        assert_eq!(args.championship, Some(Championship::RomanianCup));
        assert!(
            Args::try_parse_from(["rink_tracker", "--championship", "NHL"]).is_err()
        );
    }

    #[test]
    fn test_config_updates() {
        let args = Args::try_parse_from(["rink_tracker", "--autosave", "false"]).unwrap();
        assert_eq!(args.autosave, Some(false));
        assert!(is_config_update(&args));

        let args = Args::try_parse_from(["rink_tracker", "--clear-log-file"]).unwrap();
        assert!(is_config_update(&args));
    }
}
