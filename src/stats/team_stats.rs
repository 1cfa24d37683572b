use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;

use super::player_stats::shot_percentage;
use crate::models::{Game, GameType, Season, Team};
use crate::period::is_overtime;

/// Record and totals of one team over a set of games.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ot_wins: u32,
    pub ot_losses: u32,
    /// Games stored with equal goals; counted in totals but in no result column
    pub undecided: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub shots: u32,
    pub turnovers: u32,
    pub hits: u32,
    pub shot_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    OtWin,
    OtLoss,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutcomeError {
    #[error("Game {game_id} ended tied at {goals}")]
    Tied { game_id: String, goals: u32 },

    #[error("Team {team_id} did not play in game {game_id}")]
    NotParticipating { game_id: String, team_id: String },
}

/// Result of a game from one team's point of view.
///
/// The result is an overtime one when the highest period with an action is past
/// regulation. A game without actions counts as decided in regulation. Equal
/// goals are reported as an error instead of being booked as a loss.
pub fn classify_outcome(game: &Game, team_id: &str) -> Result<GameOutcome, OutcomeError> {
    let side = game
        .side_of(team_id)
        .ok_or_else(|| OutcomeError::NotParticipating {
            game_id: game.id.clone(),
            team_id: team_id.to_string(),
        })?;

    let own = game.score_for(side).goals;
    let opponent = game.score_for(side.opponent()).goals;
    if own == opponent {
        return Err(OutcomeError::Tied {
            game_id: game.id.clone(),
            goals: own,
        });
    }

    let overtime = is_overtime(game.highest_period(), game.game_type);
    Ok(match (own > opponent, overtime) {
        (true, false) => GameOutcome::Win,
        (true, true) => GameOutcome::OtWin,
        (false, false) => GameOutcome::Loss,
        (false, true) => GameOutcome::OtLoss,
    })
}

/// Team totals over the games it played in; other games are skipped.
pub fn get_team_stats(team: &Team, games: &[Game]) -> TeamStats {
    let mut stats = TeamStats::default();

    for game in games {
        let Some(side) = game.side_of(&team.id) else {
            continue;
        };
        let own = game.score_for(side);
        let opponent = game.score_for(side.opponent());

        stats.games_played += 1;
        stats.goals_for += own.goals;
        stats.goals_against += opponent.goals;
        stats.shots += own.shots;
        stats.turnovers += own.turnovers;
        stats.hits += own.hits;

        match classify_outcome(game, &team.id) {
            Ok(GameOutcome::Win) => stats.wins += 1,
            Ok(GameOutcome::Loss) => stats.losses += 1,
            Ok(GameOutcome::OtWin) => stats.ot_wins += 1,
            Ok(GameOutcome::OtLoss) => stats.ot_losses += 1,
            Err(e) => {
                warn!("{}; not counted as a win or loss", e);
                stats.undecided += 1;
            }
        }
    }

    stats.goal_difference = i64::from(stats.goals_for) - i64::from(stats.goals_against);
    stats.shot_percentage = shot_percentage(stats.goals_for, stats.shots);
    stats
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStats {
    pub season: Season,
    pub stats: TeamStats,
}

/// Team stats per season, separately for regular-season and playoff games.
/// Seasons are listed most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonalBreakdown {
    pub regular: Vec<SeasonStats>,
    pub playoff: Vec<SeasonStats>,
}

impl SeasonalBreakdown {
    pub fn for_type(&self, game_type: GameType) -> &[SeasonStats] {
        match game_type {
            GameType::Regular => &self.regular,
            GameType::Playoff => &self.playoff,
        }
    }
}

pub fn get_seasonal_stats_breakdown(team: &Team, games: &[Game]) -> SeasonalBreakdown {
    let bucket = |game_type: GameType| -> Vec<SeasonStats> {
        let of_type: Vec<Game> = games
            .iter()
            .filter(|g| g.game_type == game_type && g.side_of(&team.id).is_some())
            .cloned()
            .collect();

        let seasons: BTreeSet<&Season> = of_type.iter().map(|g| &g.season).collect();
        seasons
            .into_iter()
            .rev()
            .map(|season| {
                let in_season: Vec<Game> = of_type
                    .iter()
                    .filter(|g| &g.season == season)
                    .cloned()
                    .collect();
                SeasonStats {
                    season: season.clone(),
                    stats: get_team_stats(team, &in_season),
                }
            })
            .collect()
    };

    SeasonalBreakdown {
        regular: bucket(GameType::Regular),
        playoff: bucket(GameType::Playoff),
    }
}
