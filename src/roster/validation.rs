use super::{FieldErrors, RosterRulesTable, validate_roster};
use crate::capture::GameSetup;
use crate::constants::limits::{MAX_JERSEY_NUMBER, MAX_TEAM_NAME_CHARS, MIN_JERSEY_NUMBER};
use crate::models::{Championship, ColorPair, Player, Team};

/// The start-screen choices checked before a game can begin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSetupConfig {
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_colors: ColorPair,
    pub away_colors: ColorPair,
    pub rink_image: String,
}

impl From<&GameSetup> for GameSetupConfig {
    fn from(setup: &GameSetup) -> Self {
        GameSetupConfig {
            home_team_id: setup.home_team.id.clone(),
            away_team_id: setup.away_team.id.clone(),
            home_colors: setup.home_colors.clone(),
            away_colors: setup.away_colors.clone(),
            rink_image: setup.rink_image.clone(),
        }
    }
}

fn add(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.insert(field.to_string(), message.into());
}

/// Checks team choice, kit colors and rink image. Every check runs, so the
/// result lists all problems at once.
pub fn validate_game_setup(config: &GameSetupConfig) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if config.home_team_id.is_empty() {
        add(&mut errors, "homeTeamId", "Home team must be selected");
    }
    if config.away_team_id.is_empty() {
        add(&mut errors, "awayTeamId", "Away team must be selected");
    }
    if !config.home_team_id.is_empty() && config.home_team_id == config.away_team_id {
        add(&mut errors, "sameTeams", "Home and away teams cannot be the same");
    }

    if config.home_colors.primary_matches_secondary() {
        add(
            &mut errors,
            "homeColors",
            "Home team's primary and secondary colors cannot be the same",
        );
    }
    if config.away_colors.primary_matches_secondary() {
        add(
            &mut errors,
            "awayColors",
            "Away team's primary and secondary colors cannot be the same",
        );
    }
    if config.home_colors.same_as(&config.away_colors) {
        add(&mut errors, "sameColors", "Home and away team colors cannot be identical");
    }

    if config.rink_image.is_empty() {
        add(&mut errors, "rinkImage", "You must select a rink image");
    }

    errors
}

/// Setup checks plus the roster rules of the game's championship for both sides.
pub fn validate_start(setup: &GameSetup, rules: &RosterRulesTable) -> FieldErrors {
    let mut errors = validate_game_setup(&GameSetupConfig::from(setup));
    let rules = rules.rules_for(setup.championship);

    if let Err(e) = validate_roster(&setup.home_team.roster, &rules) {
        add(&mut errors, "homeRoster", format!("Home: {e}"));
    }
    if let Err(e) = validate_roster(&setup.away_team.roster, &rules) {
        add(&mut errors, "awayRoster", format!("Away: {e}"));
    }
    errors
}

/// Checks a player form. `team_players` is the pool of the team the player joins;
/// `editing_id` is the player being edited, whose own number does not count as taken.
pub fn validate_player(
    name: &str,
    jersey_number: u32,
    team_players: &[Player],
    editing_id: Option<&str>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if name.trim().is_empty() {
        add(&mut errors, "name", "Name is required");
    }

    let range = u32::from(MIN_JERSEY_NUMBER)..=u32::from(MAX_JERSEY_NUMBER);
    if !range.contains(&jersey_number) {
        add(
            &mut errors,
            "jerseyNumber",
            format!("Jersey number must be between {MIN_JERSEY_NUMBER}-{MAX_JERSEY_NUMBER}"),
        );
    } else if team_players.iter().any(|p| {
        u32::from(p.jersey_number) == jersey_number && Some(p.id.as_str()) != editing_id
    }) {
        add(
            &mut errors,
            "jerseyNumber",
            format!("Jersey number {jersey_number} is already taken"),
        );
    }

    errors
}

/// Team form input.
#[derive(Debug, Clone, Copy)]
pub struct TeamForm<'a> {
    pub name: &'a str,
    pub home_color: &'a ColorPair,
    pub away_color: &'a ColorPair,
    pub championships: &'a [Championship],
}

/// Checks a team form against the existing teams. `editing_id` is the team being
/// edited, which may keep its own name.
pub fn validate_team(form: &TeamForm<'_>, existing: &[Team], editing_id: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        add(&mut errors, "name", "Team name cannot be empty");
    } else if form.name.chars().count() > MAX_TEAM_NAME_CHARS {
        add(
            &mut errors,
            "name",
            format!("Team name cannot exceed {MAX_TEAM_NAME_CHARS} characters"),
        );
    } else if existing.iter().any(|t| {
        t.name.trim().to_lowercase() == name.to_lowercase() && Some(t.id.as_str()) != editing_id
    }) {
        add(&mut errors, "name", "Team name is already taken");
    }

    let missing = |c: &ColorPair| c.primary.is_empty() || c.secondary.is_empty();
    if missing(form.home_color) {
        add(&mut errors, "colors", "Home colors are required");
    } else if missing(form.away_color) {
        add(&mut errors, "colors", "Away colors are required");
    } else if form.home_color.primary_matches_secondary() {
        add(
            &mut errors,
            "colors",
            "Home primary and secondary colors must be different",
        );
    } else if form.away_color.primary_matches_secondary() {
        add(
            &mut errors,
            "colors",
            "Away primary and secondary colors must be different",
        );
    }

    if form.championships.is_empty() {
        add(
            &mut errors,
            "championships",
            "At least one championship must be selected",
        );
    }

    errors
}
