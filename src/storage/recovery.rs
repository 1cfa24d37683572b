use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{read_json, remove_file_if_exists, write_json};
use crate::capture::UnfinishedGame;
use crate::constants::storage::RECOVERY_SLOT;
use crate::error::AppError;

/// The single local slot holding the game in progress.
#[async_trait]
pub trait RecoveryStore: Send + Sync {
    async fn load(&self) -> Result<Option<UnfinishedGame>, AppError>;

    /// Overwrites whatever the slot held before.
    async fn save(&self, game: &UnfinishedGame) -> Result<(), AppError>;

    async fn clear(&self) -> Result<(), AppError>;
}

/// Recovery slot kept as `<data_dir>/unfinishedGame.json`.
#[derive(Debug, Clone)]
pub struct FileRecoveryStore {
    path: PathBuf,
}

impl FileRecoveryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRecoveryStore { path: path.into() }
    }

    /// Slot file inside a data directory.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        FileRecoveryStore::new(data_dir.as_ref().join(format!("{RECOVERY_SLOT}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecoveryStore for FileRecoveryStore {
    async fn load(&self) -> Result<Option<UnfinishedGame>, AppError> {
        let game: Option<UnfinishedGame> = read_json(&self.path).await?;
        if let Some(game) = &game {
            debug!(
                "Found unfinished game {} vs {} with {} actions",
                game.setup.home_team.name,
                game.setup.away_team.name,
                game.actions.len()
            );
        }
        Ok(game)
    }

    async fn save(&self, game: &UnfinishedGame) -> Result<(), AppError> {
        write_json(&self.path, game).await?;
        debug!("Saved unfinished game ({} actions)", game.actions.len());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        remove_file_if_exists(&self.path).await?;
        info!("Cleared unfinished game slot");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRecoveryStore {
    slot: RwLock<Option<UnfinishedGame>>,
}

impl InMemoryRecoveryStore {
    pub fn new() -> Self {
        InMemoryRecoveryStore::default()
    }
}

#[async_trait]
impl RecoveryStore for InMemoryRecoveryStore {
    async fn load(&self) -> Result<Option<UnfinishedGame>, AppError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, game: &UnfinishedGame) -> Result<(), AppError> {
        *self.slot.write().await = Some(game.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
