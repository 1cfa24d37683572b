use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ParseError, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Championship {
    #[serde(rename = "Erste League")]
    ErsteLeague,
    #[serde(rename = "Romanian Championship")]
    RomanianChampionship,
    #[serde(rename = "Romanian Cup")]
    RomanianCup,
    #[serde(rename = "Romanian SuperCup")]
    RomanianSupercup,
}

impl Championship {
    pub const ALL: [Championship; 4] = [
        Championship::ErsteLeague,
        Championship::RomanianChampionship,
        Championship::RomanianCup,
        Championship::RomanianSupercup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Championship::ErsteLeague => "Erste League",
            Championship::RomanianChampionship => "Romanian Championship",
            Championship::RomanianCup => "Romanian Cup",
            Championship::RomanianSupercup => "Romanian SuperCup",
        }
    }
}

impl fmt::Display for Championship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Championship {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Championship::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownChampionship(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPair {
    pub primary: String,
    pub secondary: String,
}

impl ColorPair {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        ColorPair {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Colors are compared as strings, ignoring ASCII case ("#FFF" == "#fff").
    pub fn primary_matches_secondary(&self) -> bool {
        self.primary.eq_ignore_ascii_case(&self.secondary)
    }

    pub fn same_as(&self, other: &ColorPair) -> bool {
        self.primary.eq_ignore_ascii_case(&other.primary)
            && self.secondary.eq_ignore_ascii_case(&other.secondary)
    }
}

/// The slice of a team an event needs: identity for scoring, name for sorting.
///
/// Stored events embed the whole team document; the extra fields are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl TeamRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        TeamRef {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub championships: Vec<Championship>,
    #[serde(default)]
    pub home_color: ColorPair,
    #[serde(default)]
    pub away_color: ColorPair,
    /// Full club pool
    #[serde(default)]
    pub players: Vec<Player>,
    /// Players dressed for one game; always a subset of `players`
    #[serde(default)]
    pub roster: Vec<Player>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Team {
            id: id.into(),
            name: name.into(),
            ..Team::default()
        }
    }

    pub fn to_ref(&self) -> TeamRef {
        TeamRef::new(self.id.clone(), self.name.clone())
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn in_roster(&self, player_id: &str) -> bool {
        self.roster.iter().any(|p| p.id == player_id)
    }

    pub fn plays_in(&self, championship: Championship) -> bool {
        self.championships.contains(&championship)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_championship_names_round_trip_through_serde() {
        let json = serde_json::to_string(&Championship::RomanianSupercup).unwrap();
        assert_eq!(json, "\"Romanian SuperCup\"");
        let parsed: Championship = serde_json::from_str("\"Erste League\"").unwrap();
        assert_eq!(parsed, Championship::ErsteLeague);
    }

    #[test]
    fn test_championship_from_str_ignores_case() {
        assert_eq!(
            "romanian cup".parse::<Championship>(),
            Ok(Championship::RomanianCup)
        );
        assert!("NHL".parse::<Championship>().is_err());
    }

    #[test]
    fn test_color_pair_comparison_is_case_insensitive() {
        let kit = ColorPair::new("#FFFFFF", "#ffffff");
        assert!(kit.primary_matches_secondary());

        let home = ColorPair::new("#000000", "#FFFFFF");
        let away = ColorPair::new("#000000", "#ffffff");
        assert!(home.same_as(&away));
        assert!(!home.same_as(&ColorPair::new("#ffffff", "#000000")));
    }

    #[test]
    fn test_team_ref_ignores_extra_team_fields() {
        let json = r#"{"id":"t1","name":"Corona","logo":"x.png","players":[]}"#;
        let team_ref: TeamRef = serde_json::from_str(json).unwrap();
        assert_eq!(team_ref, TeamRef::new("t1", "Corona"));
    }
}
