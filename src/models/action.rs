use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ParseError, Player, Side, TeamRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Goal,
    Shot,
    Hit,
    Turnover,
}

impl ActionType {
    pub const ALL: [ActionType; 4] = [
        ActionType::Goal,
        ActionType::Shot,
        ActionType::Hit,
        ActionType::Turnover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Goal => "GOAL",
            ActionType::Shot => "SHOT",
            ActionType::Hit => "HIT",
            ActionType::Turnover => "TURNOVER",
        }
    }

    /// Only goals go through the assist step.
    pub fn takes_assists(self) -> bool {
        self == ActionType::Goal
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GOAL" => Ok(ActionType::Goal),
            "SHOT" => Ok(ActionType::Shot),
            "HIT" => Ok(ActionType::Hit),
            "TURNOVER" => Ok(ActionType::Turnover),
            _ => Err(ParseError::UnknownActionType(s.to_string())),
        }
    }
}

/// Location on the rink diagram in percent of its width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RinkPoint {
    pub x: f64,
    pub y: f64,
}

impl RinkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        RinkPoint { x, y }
    }

    /// Converts a pointer position into percentage space of the rink image.
    ///
    /// `left`/`top` locate the image on screen and `width`/`height` are its
    /// rendered size. Returns `None` for an image with no visible area. Points are
    /// clamped to 0..=100 so a click on the border still lands on the rink.
    pub fn from_pointer(
        pointer_x: f64,
        pointer_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let x = ((pointer_x - left) / width * 100.0).clamp(0.0, 100.0);
        let y = ((pointer_y - top) / height * 100.0).clamp(0.0, 100.0);
        Some(RinkPoint { x, y })
    }
}

/// Identity of an event inside one game's log.
///
/// Assigned by the log on append and kept across edits. Not part of the stored
/// document: a log loaded from storage numbers its events in stored order.
pub type EventId = u32;

/// One recorded occurrence: goal, shot, hit or turnover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(skip)]
    pub id: EventId,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub team: TeamRef,
    pub player: Player,
    /// Only goals carry assists
    #[serde(default)]
    pub assists: Vec<Player>,
    pub period: u32,
    /// Seconds elapsed in the period
    pub time: u32,
    pub x: f64,
    pub y: f64,
}

impl Event {
    pub fn position(&self) -> RinkPoint {
        RinkPoint::new(self.x, self.y)
    }

    pub fn is_goal(&self) -> bool {
        self.action_type == ActionType::Goal
    }

    /// Side of the event relative to the game's home team.
    pub fn side(&self, home_team_id: &str) -> Side {
        if self.team.id == home_team_id {
            Side::Home
        } else {
            Side::Away
        }
    }

    pub fn is_by(&self, player_id: &str) -> bool {
        self.player.id == player_id
    }

    /// True when the player is credited with an assist on this event.
    pub fn is_assisted_by(&self, player_id: &str) -> bool {
        self.is_goal() && self.assists.iter().any(|p| p.id == player_id)
    }
}
