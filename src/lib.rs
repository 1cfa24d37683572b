//! Rink-side Hockey Game Tracker Library
//!
//! This library records what happens on the ice during a hockey game (goals with
//! up to two assists, shots, hits and turnovers) through a step-by-step capture
//! wizard, keeps the running score consistent with the recorded events, and rolls
//! finalized games up into team and player statistics.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rink_tracker::capture::{GameSession, GameSetup};
//! use rink_tracker::config::Config;
//! use rink_tracker::error::AppError;
//! use rink_tracker::models::{ActionType, RinkPoint, Side};
//! use rink_tracker::storage::{FileRecoveryStore, JsonGameStore};
//!
//! async fn record(setup: GameSetup) -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let recovery = FileRecoveryStore::in_dir(config.data_dir_path());
//!     let games = JsonGameStore::new(config.games_dir());
//!
//!     let mut session = GameSession::start(setup, &config.rules_table()?, config.autosave)?;
//!
//!     // Click on the rink, pick the action, the player and the assists
//!     session.click_rink(RinkPoint::new(42.0, 61.5))?;
//!     session.select_action(ActionType::Goal, Side::Home, 1, 312)?;
//!     let scorer = session.player_choices()[0].clone();
//!     session.select_player(scorer)?;
//!     session.select_assists(Vec::new())?;
//!     session.confirm_capture()?;
//!     session.autosave(&recovery).await?;
//!
//!     let game = session.finalize(&games, &recovery).await?;
//!     println!("Saved game {}", game.id);
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod period;
pub mod roster;
pub mod stats;
pub mod storage;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use capture::{CaptureWizard, EventLog, GameSession, GameSetup, UnfinishedGame};
pub use config::Config;
pub use error::AppError;
pub use models::{ActionType, Event, Game, GameScore, Player, Team};
pub use stats::{get_player_stats, get_seasonal_stats_breakdown, get_team_stats};
pub use storage::{GameRepository, RecoveryStore, TeamRepository};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
