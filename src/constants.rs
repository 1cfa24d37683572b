//! Application-wide constants and configuration values
//!
//! This module centralizes the clock layout of a game, roster limits and the
//! names used for files and environment variables.

/// Game clock layout in seconds
pub mod clock {
    /// Length of a regulation period and of a playoff overtime period (20 minutes)
    pub const PERIOD_SECONDS: u32 = 20 * 60;

    /// Number of regulation periods
    pub const REGULATION_PERIODS: u32 = 3;

    /// Start of regular-season overtime (60 minutes)
    pub const REGULAR_OT_START_SECONDS: u32 = 60 * 60;

    /// Start of the regular-season shootout marker (65 minutes)
    pub const REGULAR_SO_START_SECONDS: u32 = 65 * 60;

    /// Length of regular-season overtime (5 minutes)
    pub const REGULAR_OT_SECONDS: u32 = 5 * 60;
}

/// Player and team field limits
pub mod limits {
    /// Lowest jersey number a player may wear
    pub const MIN_JERSEY_NUMBER: u8 = 1;

    /// Highest jersey number a player may wear
    pub const MAX_JERSEY_NUMBER: u8 = 99;

    /// Maximum number of assists credited on one goal
    pub const MAX_ASSISTS: usize = 2;

    /// Maximum length of a team name in characters
    pub const MAX_TEAM_NAME_CHARS: usize = 200;
}

/// Placeholder player used for unattributed assists
pub mod placeholder {
    pub const PLAYER_ID: &str = "placeholder";
    pub const PLAYER_NAME: &str = "Unknown Player";
}

/// Storage file and slot names
pub mod storage {
    /// Name of the local recovery slot holding the in-progress game
    pub const RECOVERY_SLOT: &str = "unfinishedGame";

    /// Directory (under the data dir) holding one JSON document per finalized game
    pub const GAMES_DIR: &str = "games";

    /// File (under the data dir) holding every team with its player pool
    pub const TEAMS_FILE: &str = "teams.json";

    /// Application directory name under the platform config/data directories
    pub const APP_DIR: &str = "rink_tracker";

    /// Default log file name
    pub const LOG_FILE_NAME: &str = "rink_tracker.log";

    /// Team that receives the players of a deleted team
    pub const FREE_AGENT_TEAM_ID: &str = "free-agent";

    /// Display name of the free-agent team
    pub const FREE_AGENT_TEAM_NAME: &str = "Free Agents";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for data directory override
    pub const DATA_DIR: &str = "RINK_TRACKER_DATA_DIR";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "RINK_TRACKER_LOG_FILE";

    /// Environment variable for autosave override ("true"/"false"/"1"/"0")
    pub const AUTOSAVE: &str = "RINK_TRACKER_AUTOSAVE";
}
