//! Game clock model: where each period starts and how it is labelled.
//!
//! Periods are plain integers. Regular-season games use 1-3 for regulation,
//! 4 for the five-minute overtime and 5 as a zero-length shootout marker.
//! Playoff games use 1-3 for regulation and 4+ for twenty-minute overtimes.
//! Numbers outside those ranges never fail: they get a numeric label and a
//! start time extrapolated from the period length.

use crate::constants::clock::{
    PERIOD_SECONDS, REGULAR_OT_SECONDS, REGULAR_OT_START_SECONDS, REGULAR_SO_START_SECONDS,
    REGULATION_PERIODS,
};
use crate::models::{Event, GameType};

/// Regular-season overtime period number
pub const REGULAR_OT: u32 = 4;

/// Regular-season shootout period number
pub const REGULAR_SO: u32 = 5;

/// Absolute game-clock offset, in seconds, at which the period starts.
///
/// # Examples
///
/// ```
/// use rink_tracker::models::GameType;
/// use rink_tracker::period::period_start;
///
/// assert_eq!(period_start(2, GameType::Regular), 1200);
/// assert_eq!(period_start(4, GameType::Regular), 3600);
/// assert_eq!(period_start(5, GameType::Playoff), 3600 + 2 * 1200);
/// ```
pub fn period_start(period: u32, game_type: GameType) -> u32 {
    match game_type {
        GameType::Regular => match period {
            1..=REGULATION_PERIODS => (period - 1) * PERIOD_SECONDS,
            REGULAR_OT => REGULAR_OT_START_SECONDS,
            REGULAR_SO => REGULAR_SO_START_SECONDS,
            _ => period.saturating_sub(1).saturating_mul(PERIOD_SECONDS),
        },
        GameType::Playoff => match period {
            0..=REGULATION_PERIODS => period.saturating_sub(1) * PERIOD_SECONDS,
            _ => (period - REGULATION_PERIODS)
                .saturating_mul(PERIOD_SECONDS)
                .saturating_add(REGULAR_OT_START_SECONDS),
        },
    }
}

/// Absolute game time of an event. Used as a sort key and for display only.
pub fn total_game_time(event: &Event, game_type: GameType) -> u32 {
    period_start(event.period, game_type).saturating_add(event.time)
}

/// Human-readable period label ("1st", "OT", "SO", "OT2", ...).
pub fn period_label(period: u32, game_type: GameType) -> String {
    match (game_type, period) {
        (_, 1) => "1st".to_string(),
        (_, 2) => "2nd".to_string(),
        (_, 3) => "3rd".to_string(),
        (GameType::Regular, REGULAR_OT) => "OT".to_string(),
        (GameType::Regular, REGULAR_SO) => "SO".to_string(),
        (GameType::Playoff, p) if p > REGULATION_PERIODS => {
            format!("OT{}", p - REGULATION_PERIODS)
        }
        (_, p) => p.to_string(),
    }
}

/// Formats seconds as `MM:SS`; minutes keep counting past 99.
pub fn format_game_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Latest time, in seconds, that can be entered for an event in the period.
///
/// Regulation and playoff overtime run to 19:59, regular overtime to 4:59 and the
/// shootout marker has no clock at all.
pub fn max_time_in_period(period: u32, game_type: GameType) -> u32 {
    match (game_type, period) {
        (GameType::Regular, REGULAR_OT) => REGULAR_OT_SECONDS - 1,
        (GameType::Regular, REGULAR_SO) => 0,
        _ => PERIOD_SECONDS - 1,
    }
}

/// Periods an operator can pick from in a regular-season game.
pub fn regular_periods() -> [u32; 5] {
    [1, 2, 3, REGULAR_OT, REGULAR_SO]
}

/// True when the period is past regulation: regular OT or SO, or any playoff overtime.
pub fn is_overtime(period: u32, game_type: GameType) -> bool {
    match game_type {
        GameType::Regular => matches!(period, REGULAR_OT | REGULAR_SO),
        GameType::Playoff => period > REGULATION_PERIODS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionType, Player, Position, TeamRef};

    fn event_at(period: u32, time: u32) -> Event {
        Event {
            id: 0,
            action_type: ActionType::Shot,
            team: TeamRef::new("t", "Team"),
            player: Player::new("p", "Player", 1, Position::Forward, "t"),
            assists: vec![],
            period,
            time,
            x: 0.0,
            y: 0.0,
        }
    }

    #[test]
    fn test_regular_period_starts() {
        assert_eq!(period_start(1, GameType::Regular), 0);
        assert_eq!(period_start(2, GameType::Regular), 1200);
        assert_eq!(period_start(3, GameType::Regular), 2400);
        assert_eq!(period_start(4, GameType::Regular), 3600);
        assert_eq!(period_start(5, GameType::Regular), 3900);
    }

    #[test]
    fn test_regular_unknown_period_extrapolates() {
        assert_eq!(period_start(6, GameType::Regular), 5 * 1200);
        assert_eq!(period_start(0, GameType::Regular), 0);
    }

    #[test]
    fn test_playoff_overtime_periods_are_sequential_blocks() {
        assert_eq!(period_start(3, GameType::Playoff), 2400);
        assert_eq!(period_start(4, GameType::Playoff), 3600 + 1200);
        assert_eq!(period_start(6, GameType::Playoff), 3600 + 3 * 1200);
        assert_eq!(period_start(0, GameType::Playoff), 0);
    }

    #[test]
    fn test_total_game_time_in_regular_overtime() {
        let event = event_at(REGULAR_OT, 30);
        assert_eq!(total_game_time(&event, GameType::Regular), 3630);
    }

    #[test]
    fn test_corrupt_periods_and_times_saturate() {
        assert_eq!(period_start(4_000_000, GameType::Regular), u32::MAX);
        assert_eq!(period_start(4_000_000, GameType::Playoff), u32::MAX);
        assert_eq!(period_start(u32::MAX, GameType::Playoff), u32::MAX);

        let late = event_at(2, u32::MAX - 5);
        assert_eq!(total_game_time(&late, GameType::Regular), u32::MAX);
        let lost = event_at(u32::MAX, u32::MAX);
        assert_eq!(total_game_time(&lost, GameType::Playoff), u32::MAX);
        assert_eq!(period_label(4_000_000, GameType::Regular), "4000000");
    }

    #[test]
    fn test_labels() {
        assert_eq!(period_label(1, GameType::Regular), "1st");
        assert_eq!(period_label(3, GameType::Playoff), "3rd");
        assert_eq!(period_label(4, GameType::Regular), "OT");
        assert_eq!(period_label(5, GameType::Regular), "SO");
        assert_eq!(period_label(4, GameType::Playoff), "OT1");
        assert_eq!(period_label(7, GameType::Playoff), "OT4");
    }

    #[test]
    fn test_unknown_labels_degrade_to_numbers() {
        assert_eq!(period_label(9, GameType::Regular), "9");
        assert_eq!(period_label(0, GameType::Regular), "0");
        assert_eq!(period_label(0, GameType::Playoff), "0");
    }

    #[test]
    fn test_format_game_time() {
        assert_eq!(format_game_time(0), "00:00");
        assert_eq!(format_game_time(3630), "60:30");
        assert_eq!(format_game_time(6005), "100:05");
    }

    #[test]
    fn test_time_limits() {
        assert_eq!(max_time_in_period(1, GameType::Regular), 1199);
        assert_eq!(max_time_in_period(4, GameType::Regular), 299);
        assert_eq!(max_time_in_period(5, GameType::Regular), 0);
        assert_eq!(max_time_in_period(5, GameType::Playoff), 1199);
    }

    #[test]
    fn test_overtime_detection() {
        assert!(!is_overtime(3, GameType::Regular));
        assert!(is_overtime(4, GameType::Regular));
        assert!(is_overtime(5, GameType::Regular));
        assert!(!is_overtime(6, GameType::Regular));
        assert!(is_overtime(4, GameType::Playoff));
        assert!(is_overtime(9, GameType::Playoff));
        assert!(!is_overtime(3, GameType::Playoff));
    }
}
