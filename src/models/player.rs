use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseError;
use crate::constants::placeholder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Goalie,
    Defender,
    Forward,
}

impl Position {
    pub fn is_skater(self) -> bool {
        !matches!(self, Position::Goalie)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Goalie => "GOALIE",
            Position::Defender => "DEFENDER",
            Position::Forward => "FORWARD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Accepts the stored upper-case names plus the single-letter roster file codes.
impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GOALIE" | "G" => Ok(Position::Goalie),
            "DEFENDER" | "D" => Ok(Position::Defender),
            "FORWARD" | "F" => Ok(Position::Forward),
            _ => Err(ParseError::UnknownPosition(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub jersey_number: u8,
    pub position: Position,
    #[serde(default)]
    pub team_id: String,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        jersey_number: u8,
        position: Position,
        team_id: impl Into<String>,
    ) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            jersey_number,
            position,
            team_id: team_id.into(),
        }
    }

    /// The stand-in for an assist whose author was not seen.
    pub fn placeholder() -> Self {
        Player {
            id: placeholder::PLAYER_ID.to_string(),
            name: placeholder::PLAYER_NAME.to_string(),
            jersey_number: 0,
            position: Position::Forward,
            team_id: String::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == placeholder::PLAYER_ID
    }

    pub fn is_goalie(&self) -> bool {
        self.position == Position::Goalie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!("GOALIE".parse::<Position>(), Ok(Position::Goalie));
        assert_eq!("d".parse::<Position>(), Ok(Position::Defender));
        assert_eq!(" Forward ".parse::<Position>(), Ok(Position::Forward));
        assert_eq!(
            "WINGER".parse::<Position>(),
            Err(ParseError::UnknownPosition("WINGER".to_string()))
        );
    }

    #[test]
    fn test_player_serialization_uses_document_names() {
        let player = Player::new("p1", "Ion Popescu", 17, Position::Defender, "t1");
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["jerseyNumber"], 17);
        assert_eq!(json["position"], "DEFENDER");
        assert_eq!(json["teamId"], "t1");
    }

    #[test]
    fn test_placeholder_identity() {
        let placeholder = Player::placeholder();
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.name, "Unknown Player");
        assert!(!Player::new("p1", "Unknown Player", 0, Position::Forward, "").is_placeholder());
    }
}
