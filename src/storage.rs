//! Persistence collaborators: finalized games, teams with their player pools and
//! the local recovery slot for the game in progress.
//!
//! Each concern is an async trait so the capture session and the CLI can run
//! against the JSON files under the data directory or against in-memory stores in
//! tests. Callers always hand over whole documents; nothing here patches fields.

pub mod games;
pub mod recovery;
pub mod teams;

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::AppError;

pub use games::{GameRepository, InMemoryGameStore, JsonGameStore};
pub use recovery::{FileRecoveryStore, InMemoryRecoveryStore, RecoveryStore};
pub use teams::{InMemoryTeamStore, JsonTeamStore, TeamRepository};

/// Generates a 32 character lowercase hex identifier.
pub fn new_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Current time as an RFC 3339 timestamp in UTC.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Reads a JSON document, returning `None` when the file does not exist.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes a JSON document through a temporary file so a crash never leaves a
/// half-written document behind.
pub(crate) async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp_path).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    drop(file);
    fs::rename(&tmp_path, path).await?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Removes a file; a file that is already gone counts as removed.
pub(crate) async fn remove_file_if_exists(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
