use std::collections::HashSet;

use crate::models::{ActionType, Event, Game, GameScore, Player, Side};

/// Totals for one player over a set of games. Always fully populated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerStats {
    pub games_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub shots: u32,
    pub turnovers: u32,
    pub hits: u32,
    pub shot_percentage: f64,
}

impl PlayerStats {
    fn count(&mut self, event: &Event, player_id: &str) {
        if event.is_by(player_id) {
            match event.action_type {
                ActionType::Goal => {
                    self.goals += 1;
                    self.shots += 1;
                }
                ActionType::Shot => self.shots += 1,
                ActionType::Hit => self.hits += 1,
                ActionType::Turnover => self.turnovers += 1,
            }
        } else if event.is_assisted_by(player_id) {
            self.assists += 1;
        }
    }

    fn finish(mut self) -> Self {
        self.points = self.goals + self.assists;
        self.shot_percentage = shot_percentage(self.goals, self.shots);
        self
    }
}

/// `goals / shots * 100`, or 0 without shots.
pub fn shot_percentage(goals: u32, shots: u32) -> f64 {
    if shots == 0 {
        0.0
    } else {
        f64::from(goals) / f64::from(shots) * 100.0
    }
}

/// Player totals over the games the player was dressed for, on either side.
///
/// Actions of games the player was not dressed for are ignored, even when the
/// player appears in them.
pub fn get_player_stats(games: &[Game], player: &Player) -> PlayerStats {
    let mut stats = PlayerStats::default();
    for game in games.iter().filter(|g| g.dressed(&player.id)) {
        stats.games_played += 1;
        for event in &game.actions {
            stats.count(event, &player.id);
        }
    }
    stats.finish()
}

/// One player's line in a single game.
///
/// Goalies also get a save percentage from the opposing side's shots and goals.
#[derive(Debug, Clone, PartialEq)]
pub struct GamePlayerLine {
    pub player: Player,
    pub stats: PlayerStats,
    pub save_percentage: Option<f64>,
}

/// Builds a single-game line from the game's actions and score.
///
/// The player's side is taken from the player's team id.
pub fn game_player_line(
    actions: &[Event],
    score: &GameScore,
    home_team_id: &str,
    player: &Player,
) -> GamePlayerLine {
    let mut stats = PlayerStats {
        games_played: 1,
        ..PlayerStats::default()
    };
    for event in actions {
        stats.count(event, &player.id);
    }

    let save_percentage = player.is_goalie().then(|| {
        let side = if player.team_id == home_team_id {
            Side::Home
        } else {
            Side::Away
        };
        let against = score.side(side.opponent());
        if against.shots == 0 {
            0.0
        } else {
            f64::from(against.shots.saturating_sub(against.goals)) / f64::from(against.shots)
                * 100.0
        }
    });

    GamePlayerLine {
        player: player.clone(),
        stats: stats.finish(),
        save_percentage,
    }
}

/// Everyone who dressed for the team in the given games, plus the current roster.
///
/// The current roster comes first, then historical players in game order. Each
/// player id appears once; the first occurrence wins.
pub fn get_participating_players(
    team_id: &str,
    games: &[Game],
    current_roster: &[Player],
) -> Vec<Player> {
    let mut seen = HashSet::new();
    let mut players = Vec::new();

    let historical = games.iter().filter_map(|g| {
        g.side_of(team_id)
            .map(|side| g.roster(side).iter())
    });

    for player in current_roster.iter().chain(historical.flatten()) {
        if seen.insert(player.id.clone()) {
            players.push(player.clone());
        }
    }
    players
}
