//! Sort keys for stat tables, event lists and game lists.
//!
//! Each sortable column is an enum variant mapped to a typed value, so adding a
//! column is a compile-checked change. All sorts are stable: equal values keep
//! their input order in both directions.

use std::cmp::Ordering;

use super::player_stats::PlayerStats;
use crate::models::{Event, Game, GameType, Player};
use crate::period::total_game_time;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// A comparable cell value.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Columns of the player stats tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSortKey {
    Name,
    JerseyNumber,
    Position,
    GamesPlayed,
    Goals,
    Assists,
    Points,
    Shots,
    Hits,
    Turnovers,
    ShotPercentage,
}

impl PlayerSortKey {
    pub const ALL: [PlayerSortKey; 11] = [
        PlayerSortKey::Name,
        PlayerSortKey::JerseyNumber,
        PlayerSortKey::Position,
        PlayerSortKey::GamesPlayed,
        PlayerSortKey::Goals,
        PlayerSortKey::Assists,
        PlayerSortKey::Points,
        PlayerSortKey::Shots,
        PlayerSortKey::Hits,
        PlayerSortKey::Turnovers,
        PlayerSortKey::ShotPercentage,
    ];

    /// Column heading as shown in the tables.
    pub fn label(self) -> &'static str {
        match self {
            PlayerSortKey::Name => "Name",
            PlayerSortKey::JerseyNumber => "#",
            PlayerSortKey::Position => "Pos",
            PlayerSortKey::GamesPlayed => "GP",
            PlayerSortKey::Goals => "G",
            PlayerSortKey::Assists => "A",
            PlayerSortKey::Points => "P",
            PlayerSortKey::Shots => "S",
            PlayerSortKey::Hits => "H",
            PlayerSortKey::Turnovers => "T",
            PlayerSortKey::ShotPercentage => "S%",
        }
    }

    fn value(self, row: &PlayerStatsRow) -> SortValue {
        let stats = &row.stats;
        match self {
            PlayerSortKey::Name => SortValue::Text(row.player.name.to_lowercase()),
            PlayerSortKey::JerseyNumber => SortValue::Number(f64::from(row.player.jersey_number)),
            PlayerSortKey::Position => SortValue::Text(row.player.position.as_str().to_string()),
            PlayerSortKey::GamesPlayed => SortValue::Number(f64::from(stats.games_played)),
            PlayerSortKey::Goals => SortValue::Number(f64::from(stats.goals)),
            PlayerSortKey::Assists => SortValue::Number(f64::from(stats.assists)),
            PlayerSortKey::Points => SortValue::Number(f64::from(stats.points)),
            PlayerSortKey::Shots => SortValue::Number(f64::from(stats.shots)),
            PlayerSortKey::Hits => SortValue::Number(f64::from(stats.hits)),
            PlayerSortKey::Turnovers => SortValue::Number(f64::from(stats.turnovers)),
            PlayerSortKey::ShotPercentage => SortValue::Number(stats.shot_percentage),
        }
    }
}

/// A player together with the stats shown in their table row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatsRow {
    pub player: Player,
    pub stats: PlayerStats,
}

/// Sorts table rows by a column. The placeholder player, when present, stays on
/// top whatever the key and direction.
pub fn sort_player_rows(rows: &mut [PlayerStatsRow], key: PlayerSortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        match (a.player.is_placeholder(), b.player.is_placeholder()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        direction.apply(key.value(a).compare(&key.value(b)))
    });
}

/// Columns of the event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSortKey {
    Type,
    /// Absolute game time from period and time in period
    Time,
    Team,
    Player,
}

impl ActionSortKey {
    fn value(self, event: &Event, game_type: GameType) -> SortValue {
        match self {
            ActionSortKey::Type => SortValue::Text(event.action_type.as_str().to_string()),
            ActionSortKey::Time => SortValue::Number(f64::from(total_game_time(event, game_type))),
            ActionSortKey::Team => SortValue::Text(event.team.name.to_lowercase()),
            ActionSortKey::Player => SortValue::Text(event.player.name.to_lowercase()),
        }
    }
}

pub fn sort_events<'a>(
    events: &'a [Event],
    key: ActionSortKey,
    direction: SortDirection,
    game_type: GameType,
) -> Vec<&'a Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| {
        direction.apply(key.value(a, game_type).compare(&key.value(b, game_type)))
    });
    sorted
}

/// Orders games by their stored timestamp (RFC 3339 strings sort chronologically).
pub fn sort_games(games: &mut [Game], direction: SortDirection) {
    games.sort_by(|a, b| direction.apply(a.timestamp.cmp(&b.timestamp)));
}
