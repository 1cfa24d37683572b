// src/main.rs
use clap::Parser;
use rink_tracker::cli::{Args, is_config_update};
use rink_tracker::commands::{
    handle_clear_recovery_command, handle_config_update_command, handle_games_command,
    handle_list_config_command, handle_player_stats_command, handle_recovery_command,
    handle_team_stats_command, handle_teams_command, handle_version_command,
};
use rink_tracker::config::Config;
use rink_tracker::error::AppError;
use rink_tracker::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard flushes buffered log lines when main returns
    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.version {
        return handle_version_command();
    }

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_update(&args) {
        return handle_config_update_command(&args).await;
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;

    if args.clear_recovery {
        handle_clear_recovery_command(&config).await?;
    } else if args.recovery {
        handle_recovery_command(&config).await?;
    }

    if args.games {
        handle_games_command(&config, &args).await?;
    }

    if args.teams {
        handle_teams_command(&config).await?;
    }

    if let Some(team_id) = &args.team_stats {
        handle_team_stats_command(&config, &args, team_id).await?;
    }

    if let Some(team_id) = &args.player_stats {
        handle_player_stats_command(&config, &args, team_id).await?;
    }

    let nothing_requested = !(args.games
        || args.teams
        || args.recovery
        || args.clear_recovery
        || args.team_stats.is_some()
        || args.player_stats.is_some());
    if nothing_requested {
        println!("Nothing to show. Run with --help to list the available commands.");
    }

    Ok(())
}
