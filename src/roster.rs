//! Roster composition rules and the validation that gates team, player and game
//! setup before any event can be recorded.
//!
//! Roster rules produce a typed [`RosterError`]. Form validation never fails: it
//! returns every problem found as a field-keyed [`FieldErrors`] map, empty when
//! the input is acceptable.

pub mod rules;
pub mod validation;

use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::{Player, Position};

pub use rules::{RosterRules, RosterRulesTable};
pub use validation::{
    GameSetupConfig, TeamForm, validate_game_setup, validate_player, validate_start, validate_team,
};

/// Problems keyed by the form field they belong to.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Roster must have exactly {expected} goalies (has {actual})")]
    GoalieCount { expected: u32, actual: u32 },

    #[error("Roster must have between {min} and {max} skaters (has {actual})")]
    SkaterCount { min: u32, max: u32, actual: u32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterCounts {
    pub goalies: u32,
    pub defenders: u32,
    pub forwards: u32,
}

impl RosterCounts {
    pub fn skaters(&self) -> u32 {
        self.defenders + self.forwards
    }
}

pub fn roster_counts(roster: &[Player]) -> RosterCounts {
    let mut counts = RosterCounts::default();
    for player in roster {
        match player.position {
            Position::Goalie => counts.goalies += 1,
            Position::Defender => counts.defenders += 1,
            Position::Forward => counts.forwards += 1,
        }
    }
    counts
}

/// Checks a dressed roster against the rules. The goalie count must match
/// exactly and is checked first; skaters must fall in the inclusive range.
pub fn validate_roster(roster: &[Player], rules: &RosterRules) -> Result<(), RosterError> {
    let counts = roster_counts(roster);
    if counts.goalies != rules.goalies {
        return Err(RosterError::GoalieCount {
            expected: rules.goalies,
            actual: counts.goalies,
        });
    }
    let skaters = counts.skaters();
    if !(rules.min_skaters..=rules.max_skaters).contains(&skaters) {
        return Err(RosterError::SkaterCount {
            min: rules.min_skaters,
            max: rules.max_skaters,
            actual: skaters,
        });
    }
    Ok(())
}

/// Adds the player to the roster, or removes them when already dressed.
/// Returns true when the player is in the roster afterwards.
pub fn toggle_roster_player(roster: &mut Vec<Player>, player: &Player) -> bool {
    if let Some(index) = roster.iter().position(|p| p.id == player.id) {
        roster.remove(index);
        false
    } else {
        roster.push(player.clone());
        true
    }
}

/// Splits a club's pool into players still available and players dressed, both
/// ordered by jersey number.
pub fn split_pool(pool: &[Player], roster: &[Player]) -> (Vec<Player>, Vec<Player>) {
    let mut available: Vec<Player> = pool
        .iter()
        .filter(|p| !roster.iter().any(|r| r.id == p.id))
        .cloned()
        .collect();
    let mut selected = roster.to_vec();
    available.sort_by_key(|p| p.jersey_number);
    selected.sort_by_key(|p| p.jersey_number);
    (available, selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    fn rules() -> RosterRules {
        RosterRules {
            min_skaters: 15,
            max_skaters: 19,
            goalies: 2,
        }
    }

    #[test]
    fn test_two_goalies_fifteen_skaters_is_valid() {
        let roster = TestDataBuilder::roster("t", 2, 5, 10);
        assert_eq!(
            roster_counts(&roster),
            RosterCounts {
                goalies: 2,
                defenders: 5,
                forwards: 10
            }
        );
        assert_eq!(validate_roster(&roster, &rules()), Ok(()));
    }

    #[test]
    fn test_goalie_count_must_match_exactly() {
        let roster = TestDataBuilder::roster("t", 1, 5, 10);
        assert_eq!(
            validate_roster(&roster, &rules()),
            Err(RosterError::GoalieCount {
                expected: 2,
                actual: 1
            })
        );
        let roster = TestDataBuilder::roster("t", 3, 5, 10);
        assert!(matches!(
            validate_roster(&roster, &rules()),
            Err(RosterError::GoalieCount { actual: 3, .. })
        ));
    }

    #[test]
    fn test_goalie_check_comes_before_skater_check() {
        let roster = TestDataBuilder::roster("t", 0, 1, 1);
        assert!(matches!(
            validate_roster(&roster, &rules()),
            Err(RosterError::GoalieCount { .. })
        ));
    }

    #[test]
    fn test_skater_range_is_inclusive() {
        assert!(validate_roster(&TestDataBuilder::roster("t", 2, 6, 13), &rules()).is_ok());
        assert_eq!(
            validate_roster(&TestDataBuilder::roster("t", 2, 6, 14), &rules()),
            Err(RosterError::SkaterCount {
                min: 15,
                max: 19,
                actual: 20
            })
        );
        assert!(matches!(
            validate_roster(&TestDataBuilder::roster("t", 2, 4, 10), &rules()),
            Err(RosterError::SkaterCount { actual: 14, .. })
        ));
    }

    #[test]
    fn test_toggle_roster_player() {
        let player = TestDataBuilder::skater("p1", 7, "t");
        let mut roster = Vec::new();
        assert!(toggle_roster_player(&mut roster, &player));
        assert_eq!(roster.len(), 1);
        assert!(!toggle_roster_player(&mut roster, &player));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_split_pool_orders_by_jersey() {
        let pool = vec![
            TestDataBuilder::skater("a", 30, "t"),
            TestDataBuilder::skater("b", 3, "t"),
            TestDataBuilder::goalie("c", 1, "t"),
            TestDataBuilder::skater("d", 12, "t"),
        ];
        let roster = vec![pool[0].clone(), pool[2].clone()];
        let (available, selected) = split_pool(&pool, &roster);
        let numbers = |v: &[Player]| v.iter().map(|p| p.jersey_number).collect::<Vec<_>>();
        assert_eq!(numbers(&available), vec![3, 12]);
        assert_eq!(numbers(&selected), vec![1, 30]);
    }
}
