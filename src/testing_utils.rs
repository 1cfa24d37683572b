use crate::capture::GameSetup;
use crate::models::{
    ActionType, Championship, ColorPair, Event, Game, GameColors, GameTeams, GameType, Player,
    Position, Team, TeamRef,
};
use crate::stats::score_of;

/// Test utilities for creating players, events, setups and stored games
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a forward named after its id
    pub fn skater(id: &str, jersey_number: u8, team_id: &str) -> Player {
        Player::new(
            id,
            format!("Player {id}"),
            jersey_number,
            Position::Forward,
            team_id,
        )
    }

    /// Creates a goalie named after its id
    pub fn goalie(id: &str, jersey_number: u8, team_id: &str) -> Player {
        Player::new(
            id,
            format!("Goalie {id}"),
            jersey_number,
            Position::Goalie,
            team_id,
        )
    }

    /// Creates an event by a player of `team_id`; the team name equals its id.
    pub fn event(
        action_type: ActionType,
        team_id: &str,
        player_id: &str,
        period: u32,
        time: u32,
    ) -> Event {
        Event {
            id: 0,
            action_type,
            team: TeamRef::new(team_id, team_id),
            player: Self::skater(player_id, 10, team_id),
            assists: Vec::new(),
            period,
            time,
            x: 50.0,
            y: 50.0,
        }
    }

    /// Creates a roster with distinct jersey numbers: goalies first, then
    /// defenders, then forwards. Ids are `{team_id}-{jersey}`.
    pub fn roster(team_id: &str, goalies: u8, defenders: u8, forwards: u8) -> Vec<Player> {
        let mut players = Vec::new();
        let mut number = 1u8;
        for (count, position) in [
            (goalies, Position::Goalie),
            (defenders, Position::Defender),
            (forwards, Position::Forward),
        ] {
            for _ in 0..count {
                players.push(Player::new(
                    format!("{team_id}-{number}"),
                    format!("{position} {number}"),
                    number,
                    position,
                    team_id,
                ));
                number += 1;
            }
        }
        players
    }

    /// Creates a team whose pool and game roster are 2 goalies and 15 skaters.
    pub fn team(id: &str) -> Team {
        let roster = Self::roster(id, 2, 5, 10);
        Team {
            championships: vec![Championship::ErsteLeague],
            home_color: ColorPair::new("#000000", "#ffffff"),
            away_color: ColorPair::new("#ffffff", "#000000"),
            players: roster.clone(),
            roster,
            ..Team::new(id, id)
        }
    }

    /// Creates a setup that passes every start check.
    pub fn setup(home: &str, away: &str) -> GameSetup {
        GameSetup {
            season: "2024-2025".to_string(),
            championship: Championship::ErsteLeague,
            game_type: GameType::Regular,
            rink_image: "rink.png".to_string(),
            home_team: Self::team(home),
            away_team: Self::team(away),
            home_colors: ColorPair::new("#000000", "#ffffff"),
            away_colors: ColorPair::new("#cc0000", "#ffffff"),
        }
    }

    pub fn game(home: &str, away: &str) -> GameBuilder {
        GameBuilder::new(home, away)
    }
}

/// Builds a stored game; the score is derived from the actions on `build`.
pub struct GameBuilder {
    game: Game,
}

impl GameBuilder {
    fn new(home: &str, away: &str) -> Self {
        GameBuilder {
            game: Game {
                id: format!("game-{home}-{away}"),
                game_type: GameType::Regular,
                season: "2024-2025".to_string(),
                championship: Championship::ErsteLeague,
                actions: Vec::new(),
                timestamp: "2024-10-01T18:00:00+00:00".to_string(),
                score: Default::default(),
                teams: GameTeams {
                    home: Team::new(home, home),
                    away: Team::new(away, away),
                },
                colors: GameColors {
                    home: ColorPair::new("#000000", "#ffffff"),
                    away: ColorPair::new("#cc0000", "#ffffff"),
                },
                selected_image: "rink.png".to_string(),
            },
        }
    }

    pub fn season(mut self, season: &str) -> Self {
        self.game.season = season.to_string();
        self
    }

    pub fn championship(mut self, championship: Championship) -> Self {
        self.game.championship = championship;
        self
    }

    pub fn game_type(mut self, game_type: GameType) -> Self {
        self.game.game_type = game_type;
        self
    }

    pub fn action(mut self, event: Event) -> Self {
        self.game.actions.push(event);
        self
    }

    pub fn actions(mut self, events: Vec<Event>) -> Self {
        self.game.actions.extend(events);
        self
    }

    /// Sets the dressed home roster; the players also join the home pool.
    pub fn home_roster(mut self, roster: Vec<Player>) -> Self {
        self.game.teams.home.players = roster.clone();
        self.game.teams.home.roster = roster;
        self
    }

    pub fn away_roster(mut self, roster: Vec<Player>) -> Self {
        self.game.teams.away.players = roster.clone();
        self.game.teams.away.roster = roster;
        self
    }

    pub fn build(mut self) -> Game {
        self.game.score = score_of(&self.game.actions, &self.game.teams.home.id);
        self.game
    }
}
