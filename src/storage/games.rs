use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{new_id, now_timestamp, read_json, remove_file_if_exists, write_json};
use crate::error::AppError;
use crate::models::Game;

/// Store of finalized games.
///
/// Games are always written whole: `update` overwrites the stored document with
/// the full action list and score the caller hands in.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Stores a new game under a fresh id and returns it with id and timestamp set.
    async fn save(&self, game: Game) -> Result<Game, AppError>;

    /// Overwrites an existing game. Fails for a game without an id.
    async fn update(&self, game: Game) -> Result<Game, AppError>;

    /// Deletes the game. A game that was never saved is ignored.
    async fn delete(&self, game: &Game) -> Result<(), AppError>;

    async fn list_all(&self) -> Result<Vec<Game>, AppError>;

    async fn get(&self, id: &str) -> Result<Game, AppError>;

    /// Games the team played in, home or away.
    async fn list_by_team(&self, team_id: &str) -> Result<Vec<Game>, AppError> {
        if team_id.is_empty() {
            return Err(AppError::missing_id("team", "list games of"));
        }
        let games = self.list_all().await?;
        Ok(games
            .into_iter()
            .filter(|g| g.side_of(team_id).is_some())
            .collect())
    }
}

fn sort_by_timestamp(games: &mut [Game]) {
    games.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}

/// One JSON document per game in `<data_dir>/games/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonGameStore {
    dir: PathBuf,
}

impl JsonGameStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonGameStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl GameRepository for JsonGameStore {
    async fn save(&self, mut game: Game) -> Result<Game, AppError> {
        game.id = new_id();
        game.timestamp = now_timestamp();
        write_json(&self.path_for(&game.id), &game).await?;
        info!(
            "Saved game {} ({} vs {}, {} actions)",
            game.id,
            game.teams.home.name,
            game.teams.away.name,
            game.actions.len()
        );
        Ok(game)
    }

    async fn update(&self, mut game: Game) -> Result<Game, AppError> {
        if game.id.is_empty() {
            return Err(AppError::missing_id("game", "update"));
        }
        let path = self.path_for(&game.id);
        if !path.exists() {
            return Err(AppError::game_not_found(&game.id));
        }
        game.timestamp = now_timestamp();
        write_json(&path, &game).await?;
        info!("Updated game {} ({} actions)", game.id, game.actions.len());
        Ok(game)
    }

    async fn delete(&self, game: &Game) -> Result<(), AppError> {
        if game.id.is_empty() {
            return Ok(());
        }
        remove_file_if_exists(&self.path_for(&game.id)).await?;
        info!("Deleted game {}", game.id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Game>, AppError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut games = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_json::<Game>(&path).await {
                Ok(Some(game)) => games.push(game),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable game file {}: {}", path.display(), e),
            }
        }

        sort_by_timestamp(&mut games);
        Ok(games)
    }

    async fn get(&self, id: &str) -> Result<Game, AppError> {
        read_json(&self.path_for(id))
            .await?
            .ok_or_else(|| AppError::game_not_found(id))
    }
}

/// Game store kept in memory; used by tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: RwLock<HashMap<String, Game>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        InMemoryGameStore::default()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameStore {
    async fn save(&self, mut game: Game) -> Result<Game, AppError> {
        game.id = new_id();
        game.timestamp = now_timestamp();
        self.games
            .write()
            .await
            .insert(game.id.clone(), game.clone());
        Ok(game)
    }

    async fn update(&self, mut game: Game) -> Result<Game, AppError> {
        if game.id.is_empty() {
            return Err(AppError::missing_id("game", "update"));
        }
        let mut games = self.games.write().await;
        if !games.contains_key(&game.id) {
            return Err(AppError::game_not_found(&game.id));
        }
        game.timestamp = now_timestamp();
        games.insert(game.id.clone(), game.clone());
        Ok(game)
    }

    async fn delete(&self, game: &Game) -> Result<(), AppError> {
        if !game.id.is_empty() {
            self.games.write().await.remove(&game.id);
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Game>, AppError> {
        let mut games: Vec<Game> = self.games.read().await.values().cloned().collect();
        sort_by_timestamp(&mut games);
        Ok(games)
    }

    async fn get(&self, id: &str) -> Result<Game, AppError> {
        self.games
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::game_not_found(id))
    }
}
