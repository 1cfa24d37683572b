use serde::{Deserialize, Serialize};

use super::ActionType;

/// Which bench an event or a score line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Running totals for one side of a game.
///
/// A goal also counts as a shot, so `goals <= shots` holds for any score built
/// through [`ScoreData::add`] and [`ScoreData::subtract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreData {
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub shots: u32,
    #[serde(default)]
    pub turnovers: u32,
    #[serde(default)]
    pub hits: u32,
}

impl ScoreData {
    pub fn add(&mut self, action: ActionType) {
        match action {
            ActionType::Goal => {
                self.goals += 1;
                self.shots += 1;
            }
            ActionType::Shot => self.shots += 1,
            ActionType::Hit => self.hits += 1,
            ActionType::Turnover => self.turnovers += 1,
        }
    }

    /// Mirror of [`ScoreData::add`]; saturates at zero.
    pub fn subtract(&mut self, action: ActionType) {
        match action {
            ActionType::Goal => {
                self.goals = self.goals.saturating_sub(1);
                self.shots = self.shots.saturating_sub(1);
            }
            ActionType::Shot => self.shots = self.shots.saturating_sub(1),
            ActionType::Hit => self.hits = self.hits.saturating_sub(1),
            ActionType::Turnover => self.turnovers = self.turnovers.saturating_sub(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    #[serde(default)]
    pub home: ScoreData,
    #[serde(default)]
    pub away: ScoreData,
}

impl GameScore {
    pub fn side(&self, side: Side) -> &ScoreData {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut ScoreData {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn is_tied(&self) -> bool {
        self.home.goals == self.away.goals
    }
}
