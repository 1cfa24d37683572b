//! Derived numbers: running score of a game, player and team statistics over any
//! set of finalized games, and sorting of stat tables and event lists.
//!
//! Everything here is a pure function of its inputs. Missing rosters or actions
//! count as empty, never as an error.

pub mod player_stats;
pub mod sorting;
pub mod team_stats;

use crate::models::{Championship, Event, Game, GameScore, Season};

pub use player_stats::{
    GamePlayerLine, PlayerStats, game_player_line, get_participating_players, get_player_stats,
    shot_percentage,
};
pub use sorting::{
    ActionSortKey, PlayerSortKey, PlayerStatsRow, SortDirection, sort_events, sort_games,
    sort_player_rows,
};
pub use team_stats::{
    GameOutcome, OutcomeError, SeasonStats, SeasonalBreakdown, TeamStats, classify_outcome,
    get_seasonal_stats_breakdown, get_team_stats,
};

/// Score of both sides recomputed from scratch.
///
/// Events whose team is not the home team count for the away side.
pub fn score_of(actions: &[Event], home_team_id: &str) -> GameScore {
    let mut score = GameScore::default();
    for event in actions {
        score
            .side_mut(event.side(home_team_id))
            .add(event.action_type);
    }
    score
}

/// Narrowing of a team's games by season and championship; `None` means all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameQuery {
    pub season: Option<Season>,
    pub championship: Option<Championship>,
}

impl GameQuery {
    pub fn matches(&self, game: &Game) -> bool {
        self.season.as_ref().is_none_or(|s| *s == game.season)
            && self.championship.is_none_or(|c| c == game.championship)
    }

    /// No season or championship restriction.
    pub fn is_unrestricted(&self) -> bool {
        self.season.is_none() && self.championship.is_none()
    }

    /// Games of the team that match the query.
    pub fn games_of<'a>(&self, team_id: &str, games: &'a [Game]) -> Vec<&'a Game> {
        games
            .iter()
            .filter(|g| g.side_of(team_id).is_some() && self.matches(g))
            .collect()
    }
}
