use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Championship, ColorPair, Event, GameScore, ParseError, Player, ScoreData, Side, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    Regular,
    Playoff,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Regular => f.pad("REGULAR"),
            GameType::Playoff => f.pad("PLAYOFF"),
        }
    }
}

impl FromStr for GameType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REGULAR" | "REGULAR SEASON" => Ok(GameType::Regular),
            "PLAYOFF" | "PLAYOFFS" => Ok(GameType::Playoff),
            _ => Err(ParseError::UnknownGameType(s.to_string())),
        }
    }
}

/// Season label such as `"2025-2026"`; labels sort chronologically.
pub type Season = String;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTeams {
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameColors {
    #[serde(default)]
    pub home: ColorPair,
    #[serde(default)]
    pub away: ColorPair,
}

/// A game document. Rosters are frozen per side inside `teams` at finalize time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub game_type: GameType,
    pub season: Season,
    pub championship: Championship,
    #[serde(default)]
    pub actions: Vec<Event>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub score: GameScore,
    pub teams: GameTeams,
    #[serde(default)]
    pub colors: GameColors,
    #[serde(default)]
    pub selected_image: String,
}

impl Game {
    pub fn home_team_id(&self) -> &str {
        &self.teams.home.id
    }

    pub fn away_team_id(&self) -> &str {
        &self.teams.away.id
    }

    /// Side the team played on in this game, if it played at all.
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if self.teams.home.id == team_id {
            Some(Side::Home)
        } else if self.teams.away.id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.teams.home,
            Side::Away => &self.teams.away,
        }
    }

    pub fn score_for(&self, side: Side) -> &ScoreData {
        self.score.side(side)
    }

    pub fn roster(&self, side: Side) -> &[Player] {
        &self.team(side).roster
    }

    /// True when the player was dressed for either side.
    pub fn dressed(&self, player_id: &str) -> bool {
        self.teams.home.in_roster(player_id) || self.teams.away.in_roster(player_id)
    }

    /// Highest period any action was recorded in; 1 when nothing was recorded.
    pub fn highest_period(&self) -> u32 {
        self.actions.iter().map(|a| a.period).max().unwrap_or(1)
    }
}
