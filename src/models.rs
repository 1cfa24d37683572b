//! Data model shared by the capture flow, the stats engine and the stores.
//!
//! Serialized field names follow the stored document shape (camelCase, `type`,
//! `selectedImage`, upper-case enum values) so existing game documents load as-is.

pub mod action;
pub mod game;
pub mod player;
pub mod score;
pub mod team;

use thiserror::Error;

pub use action::{ActionType, Event, EventId, RinkPoint};
pub use game::{Game, GameColors, GameTeams, GameType, Season};
pub use player::{Player, Position};
pub use score::{GameScore, ScoreData, Side};
pub use team::{Championship, ColorPair, Team, TeamRef};

/// Unrecognized enumeration values met at an import boundary.
///
/// Live capture and stat aggregation never produce these; they only surface when
/// text from outside (roster files, CLI arguments) is parsed into the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown position: '{0}'")]
    UnknownPosition(String),

    #[error("Unknown action type: '{0}'")]
    UnknownActionType(String),

    #[error("Unknown game type: '{0}'")]
    UnknownGameType(String),

    #[error("Unknown championship: '{0}'")]
    UnknownChampionship(String),
}
