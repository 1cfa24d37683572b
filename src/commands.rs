use crate::capture::UnfinishedGame;
use crate::cli::Args;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{Game, Team};
use crate::period::{format_game_time, period_label};
use crate::stats::{
    GameQuery, PlayerSortKey, PlayerStatsRow, SeasonStats, SortDirection,
    get_participating_players, get_player_stats, get_seasonal_stats_breakdown, get_team_stats,
    sort_games, sort_player_rows,
};
use crate::storage::{
    FileRecoveryStore, GameRepository, JsonGameStore, JsonTeamStore, RecoveryStore,
    TeamRepository,
};
use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::SetTitle,
};
use std::fmt::Write as _;
use std::io::stdout;
use std::path::Path;
use tracing::info;

const TITLE: &str = "Rink Tracker";

/// Prints a bold cyan heading with an underline.
fn print_heading(title: &str) -> Result<(), AppError> {
    execute!(
        stdout(),
        Print("\n"),
        SetForegroundColor(Color::Cyan),
        SetAttribute(Attribute::Bold),
        Print(title),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print(format!("\n{}\n", "─".repeat(title.chars().count()))),
    )?;
    Ok(())
}

/// Handles the --version command.
pub fn handle_version_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TITLE))?;
    print_heading(&format!("{} {}", crate::NAME, crate::VERSION))?;
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TITLE))?;
    Config::display().await
}

/// Handles configuration update commands (--set-data-dir, --set-log-file,
/// --clear-log-file, --autosave).
///
/// An unreadable config is replaced by the defaults with the requested changes.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    update_config_file(&config_path, args).await?;
    info!("Configuration updated at {}", config_path);
    println!("Config updated successfully!");

    Ok(())
}

/// Applies the `--set-*`, `--clear-log-file` and `--autosave` flags to the config
/// file at `path` and writes it back.
///
/// Starts from the file as stored, so environment overrides never end up in it.
/// A file that cannot be read or parsed is an error and is left untouched.
pub async fn update_config_file(path: &str, args: &Args) -> Result<Config, AppError> {
    let mut config = if Path::new(path).exists() {
        Config::load_from_path(path).await?
    } else {
        Config::default()
    };

    if let Some(data_dir) = &args.new_data_dir {
        config.data_dir = Some(data_dir.clone());
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    if let Some(autosave) = args.autosave {
        config.autosave = autosave;
    }

    config.validate()?;
    config.save_to_path(path).await?;
    Ok(config)
}

fn query_from(args: &Args) -> GameQuery {
    GameQuery {
        season: args.season.clone(),
        championship: args.championship,
    }
}

/// Finds a team in the team store, falling back to the team as stored in its games.
async fn find_team(
    team_id: &str,
    teams: &dyn TeamRepository,
    games: &[Game],
) -> Result<Team, AppError> {
    match teams.get(team_id).await {
        Ok(team) => Ok(team),
        Err(e) if e.is_not_found() => games
            .iter()
            .find_map(|g| g.side_of(team_id).map(|side| g.team(side).clone()))
            .ok_or_else(|| AppError::team_not_found(team_id)),
        Err(e) => Err(e),
    }
}

/// One line per game: date, competition and final score.
pub fn format_games_table(games: &[Game]) -> String {
    let mut out = String::new();
    if games.is_empty() {
        out.push_str("No games found.\n");
        return out;
    }
    for game in games {
        let date = game.timestamp.get(..10).unwrap_or(&game.timestamp);
        let _ = writeln!(
            out,
            "{date}  {:<9} {:<22} {:<7}  {} {}-{} {}  ({} actions)  {}",
            game.season,
            game.championship.name(),
            game.game_type,
            game.teams.home.name,
            game.score.home.goals,
            game.score.away.goals,
            game.teams.away.name,
            game.actions.len(),
            game.id,
        );
    }
    out
}

/// Seasonal record table for one game type.
pub fn format_season_table(seasons: &[SeasonStats]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>6}",
        "Season", "GP", "W", "L", "OTW", "OTL", "GF", "GA", "+/-", "S", "H", "T", "S%"
    );
    for season in seasons {
        let s = &season.stats;
        let _ = writeln!(
            out,
            "{:<10} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4} {:>+4} {:>4} {:>4} {:>4} {:>6.1}",
            season.season,
            s.games_played,
            s.wins,
            s.losses,
            s.ot_wins,
            s.ot_losses,
            s.goals_for,
            s.goals_against,
            s.goal_difference,
            s.shots,
            s.hits,
            s.turnovers,
            s.shot_percentage,
        );
        if s.undecided > 0 {
            let _ = writeln!(out, "{:<10} {} tied game(s) not counted", "", s.undecided);
        }
    }
    out
}

/// Player table with a column per sort key.
pub fn format_player_table(rows: &[PlayerStatsRow]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<24}", PlayerSortKey::Name.label());
    for key in &PlayerSortKey::ALL[1..] {
        let _ = write!(out, " {:>8}", key.label());
    }
    out.push('\n');

    for row in rows {
        let p = &row.player;
        let s = &row.stats;
        let _ = writeln!(
            out,
            "{:<24} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8.1}",
            p.name,
            p.jersey_number,
            p.position.as_str(),
            s.games_played,
            s.goals,
            s.assists,
            s.points,
            s.shots,
            s.hits,
            s.turnovers,
            s.shot_percentage,
        );
    }
    out
}

/// Summary of the unfinished game in the recovery slot, last events first.
pub fn format_recovery(snapshot: &UnfinishedGame) -> String {
    let setup = &snapshot.setup;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({}, {})",
        setup.championship, setup.season, setup.game_type, setup.rink_image
    );
    let _ = writeln!(
        out,
        "{} {} - {} {}",
        setup.home_team.name,
        snapshot.home_score.goals,
        snapshot.away_score.goals,
        setup.away_team.name
    );
    let _ = writeln!(
        out,
        "Shots {}-{}  Hits {}-{}  Turnovers {}-{}",
        snapshot.home_score.shots,
        snapshot.away_score.shots,
        snapshot.home_score.hits,
        snapshot.away_score.hits,
        snapshot.home_score.turnovers,
        snapshot.away_score.turnovers
    );
    let _ = writeln!(out, "{} action(s) recorded", snapshot.actions.len());
    for event in snapshot.actions.iter().rev() {
        let _ = writeln!(
            out,
            "  {:<4} {:>5}  {:<8} {:<20} #{} {}",
            period_label(event.period, setup.game_type),
            format_game_time(event.time),
            event.action_type.as_str(),
            event.team.name,
            event.player.jersey_number,
            event.player.name,
        );
    }
    out
}

/// Handles the --games command.
pub async fn handle_games_command(config: &Config, args: &Args) -> Result<(), AppError> {
    let store = JsonGameStore::new(config.games_dir());
    let query = query_from(args);
    let mut games = match &args.team {
        Some(team_id) => store.list_by_team(team_id).await?,
        None => store.list_all().await?,
    };
    games.retain(|g| query.matches(g));
    sort_games(&mut games, SortDirection::Ascending);

    print_heading("Games")?;
    print!("{}", format_games_table(&games));
    Ok(())
}

/// Handles the --team-stats command.
pub async fn handle_team_stats_command(config: &Config, args: &Args, team_id: &str) -> Result<(), AppError> {
    let games = JsonGameStore::new(config.games_dir()).list_by_team(team_id).await?;
    let teams = JsonTeamStore::new(config.teams_file());
    let team = find_team(team_id, &teams, &games).await?;

    let query = query_from(args);
    let selected: Vec<Game> = query.games_of(team_id, &games).into_iter().cloned().collect();

    let totals = get_team_stats(&team, &selected);
    print_heading(&format!("{} record", team.name))?;
    print!(
        "{}",
        format_season_table(&[SeasonStats {
            season: "All".to_string(),
            stats: totals,
        }])
    );

    let breakdown = get_seasonal_stats_breakdown(&team, &selected);
    print_heading("Regular season")?;
    print!("{}", format_season_table(&breakdown.regular));
    print_heading("Playoffs")?;
    print!("{}", format_season_table(&breakdown.playoff));
    Ok(())
}

/// Handles the --player-stats command.
pub async fn handle_player_stats_command(config: &Config, args: &Args, team_id: &str) -> Result<(), AppError> {
    let games = JsonGameStore::new(config.games_dir()).list_by_team(team_id).await?;
    let teams = JsonTeamStore::new(config.teams_file());
    let team = find_team(team_id, &teams, &games).await?;

    let query = query_from(args);
    let selected: Vec<Game> = query.games_of(team_id, &games).into_iter().cloned().collect();

    let mut rows: Vec<PlayerStatsRow> = get_participating_players(team_id, &selected, &team.players)
        .into_iter()
        .map(|player| PlayerStatsRow {
            stats: get_player_stats(&selected, &player),
            player,
        })
        .collect();
    sort_player_rows(&mut rows, PlayerSortKey::Points, SortDirection::Descending);

    print_heading(&format!("{} players", team.name))?;
    print!("{}", format_player_table(&rows));
    Ok(())
}

/// Handles the --teams command.
pub async fn handle_teams_command(config: &Config) -> Result<(), AppError> {
    let teams = JsonTeamStore::new(config.teams_file()).list().await?;
    print_heading("Teams")?;
    if teams.is_empty() {
        println!("No teams found.");
    }
    for team in teams {
        let championships: Vec<&str> = team.championships.iter().map(|c| c.name()).collect();
        println!("{}  {}  [{}]", team.id, team.name, championships.join(", "));
        for player in &team.players {
            println!(
                "    #{:<3} {:<9} {}",
                player.jersey_number,
                player.position.as_str(),
                player.name
            );
        }
    }
    Ok(())
}

/// Handles the --recovery command.
pub async fn handle_recovery_command(config: &Config) -> Result<(), AppError> {
    let store = FileRecoveryStore::in_dir(config.data_dir_path());
    print_heading("Unfinished game")?;
    match store.load().await? {
        Some(snapshot) => print!("{}", format_recovery(&snapshot)),
        None => println!("No unfinished game at {}", store.path().display()),
    }
    Ok(())
}

/// Handles the --clear-recovery command.
pub async fn handle_clear_recovery_command(config: &Config) -> Result<(), AppError> {
    FileRecoveryStore::in_dir(config.data_dir_path()).clear().await?;
    info!("Recovery slot cleared");
    println!("Unfinished game discarded.");
    Ok(())
}
