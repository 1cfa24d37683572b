use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::{new_id, read_json, write_json};
use crate::constants::storage::{FREE_AGENT_TEAM_ID, FREE_AGENT_TEAM_NAME};
use crate::error::AppError;
use crate::models::{Player, Team};

/// Store of teams with their player pools.
///
/// Only `list`, `get`, `save`, `update` and `delete` touch storage; the name and
/// jersey checks are answered from `list`.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Every team, sorted by name, each with its players sorted by name.
    async fn list(&self) -> Result<Vec<Team>, AppError>;

    async fn get(&self, id: &str) -> Result<Team, AppError>;

    /// Adds a new team under a fresh id. Names are unique ignoring case.
    async fn save(&self, team: Team) -> Result<Team, AppError>;

    async fn update(&self, team: Team) -> Result<Team, AppError>;

    /// Deletes the team. Its players move to the free-agent team.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// True when another team already uses the name (case-insensitive).
    async fn is_name_taken(&self, name: &str, excluding_id: Option<&str>) -> Result<bool, AppError> {
        let wanted = name.trim().to_lowercase();
        Ok(self.list().await?.iter().any(|t| {
            t.name.trim().to_lowercase() == wanted && Some(t.id.as_str()) != excluding_id
        }))
    }

    async fn is_jersey_number_available(&self, team_id: &str, number: u8) -> Result<bool, AppError> {
        let team = self.get(team_id).await?;
        Ok(!team.players.iter().any(|p| p.jersey_number == number))
    }
}

fn sorted(mut teams: Vec<Team>) -> Vec<Team> {
    for team in &mut teams {
        team.players.sort_by_key(|p| p.name.to_lowercase());
    }
    teams.sort_by_key(|t| t.name.to_lowercase());
    teams
}

fn ensure_name_free(teams: &[Team], team: &Team) -> Result<(), AppError> {
    let wanted = team.name.trim().to_lowercase();
    if teams
        .iter()
        .any(|t| t.id != team.id && t.name.trim().to_lowercase() == wanted)
    {
        return Err(AppError::TeamAlreadyExists {
            name: team.name.clone(),
        });
    }
    Ok(())
}

fn insert_new(teams: &mut Vec<Team>, mut team: Team) -> Result<Team, AppError> {
    team.id = new_id();
    ensure_name_free(teams, &team)?;
    for player in &mut team.players {
        player.team_id = team.id.clone();
    }
    teams.push(team.clone());
    Ok(team)
}

fn replace_existing(teams: &mut [Team], team: Team) -> Result<Team, AppError> {
    if team.id.is_empty() {
        return Err(AppError::missing_id("team", "update"));
    }
    ensure_name_free(teams, &team)?;
    let slot = teams
        .iter_mut()
        .find(|t| t.id == team.id)
        .ok_or_else(|| AppError::team_not_found(&team.id))?;
    *slot = team.clone();
    Ok(team)
}

/// Removes a team and hands its players to the free-agent team, creating that
/// team when it does not exist yet.
fn remove_to_free_agents(teams: &mut Vec<Team>, id: &str) -> Result<Team, AppError> {
    if id == FREE_AGENT_TEAM_ID {
        return Err(AppError::storage_error("The free-agent team cannot be deleted"));
    }
    let index = teams
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| AppError::team_not_found(id))?;
    let removed = teams.remove(index);

    let released: Vec<Player> = removed
        .players
        .iter()
        .cloned()
        .map(|mut p| {
            p.team_id = FREE_AGENT_TEAM_ID.to_string();
            p
        })
        .collect();

    if !released.is_empty() {
        match teams.iter_mut().find(|t| t.id == FREE_AGENT_TEAM_ID) {
            Some(free_agents) => free_agents.players.extend(released),
            None => {
                let mut free_agents = Team::new(FREE_AGENT_TEAM_ID, FREE_AGENT_TEAM_NAME);
                free_agents.players = released;
                teams.push(free_agents);
            }
        }
    }
    Ok(removed)
}

/// All teams in one document at `<data_dir>/teams.json`.
#[derive(Debug)]
pub struct JsonTeamStore {
    path: PathBuf,
    // serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
}

impl JsonTeamStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonTeamStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<Team>, AppError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl TeamRepository for JsonTeamStore {
    async fn list(&self) -> Result<Vec<Team>, AppError> {
        Ok(sorted(self.read_all().await?))
    }

    async fn get(&self, id: &str) -> Result<Team, AppError> {
        self.read_all()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::team_not_found(id))
    }

    async fn save(&self, team: Team) -> Result<Team, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut teams = self.read_all().await?;
        let team = insert_new(&mut teams, team)?;
        write_json(&self.path, &teams).await?;
        info!("Created team {} ({})", team.name, team.id);
        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Team, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut teams = self.read_all().await?;
        let team = replace_existing(&mut teams, team)?;
        write_json(&self.path, &teams).await?;
        info!("Updated team {} ({})", team.name, team.id);
        Ok(team)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut teams = self.read_all().await?;
        let removed = remove_to_free_agents(&mut teams, id)?;
        write_json(&self.path, &teams).await?;
        info!(
            "Deleted team {} and released {} players",
            removed.name,
            removed.players.len()
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTeamStore {
    teams: RwLock<Vec<Team>>,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        InMemoryTeamStore::default()
    }

    /// Store pre-filled with teams that already carry ids.
    pub fn with_teams(teams: Vec<Team>) -> Self {
        InMemoryTeamStore {
            teams: RwLock::new(teams),
        }
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamStore {
    async fn list(&self) -> Result<Vec<Team>, AppError> {
        Ok(sorted(self.teams.read().await.clone()))
    }

    async fn get(&self, id: &str) -> Result<Team, AppError> {
        self.teams
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::team_not_found(id))
    }

    async fn save(&self, team: Team) -> Result<Team, AppError> {
        insert_new(&mut *self.teams.write().await, team)
    }

    async fn update(&self, team: Team) -> Result<Team, AppError> {
        replace_existing(&mut *self.teams.write().await, team)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        remove_to_free_agents(&mut *self.teams.write().await, id).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;
    use tempfile::tempdir;

    fn club(name: &str) -> Team {
        let mut team = Team::new("", name);
        team.players = vec![
            TestDataBuilder::skater("p2", 20, ""),
            TestDataBuilder::goalie("p1", 1, ""),
        ];
        team
    }

    #[tokio::test]
    async fn test_save_assigns_ids_and_rejects_duplicate_names() {
        let dir = tempdir().unwrap();
        let store = JsonTeamStore::new(dir.path().join("teams.json"));

        let saved = store.save(club("Corona Brasov")).await.unwrap();
        assert_eq!(saved.id.len(), 32);
        assert!(saved.players.iter().all(|p| p.team_id == saved.id));

        let err = store.save(club("corona brasov ")).await.unwrap_err();
        assert!(matches!(err, AppError::TeamAlreadyExists { .. }));
        assert!(store.is_name_taken("CORONA BRASOV", None).await.unwrap());
        assert!(
            !store
                .is_name_taken("Corona Brasov", Some(saved.id.as_str()))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_list_sorts_teams_and_players_by_name() {
        let store = InMemoryTeamStore::new();
        store.save(club("Steaua")).await.unwrap();
        store.save(club("Arcada")).await.unwrap();

        let teams = store.list().await.unwrap();
        assert_eq!(teams[0].name, "Arcada");
        let names: Vec<_> = teams[0].players.iter().map(|p| p.name.clone()).collect();
        let mut expected = names.clone();
        expected.sort_by_key(|n| n.to_lowercase());
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_jersey_number_availability() {
        let store = InMemoryTeamStore::new();
        let team = store.save(club("Gheorgheni")).await.unwrap();
        assert!(!store.is_jersey_number_available(&team.id, 20).await.unwrap());
        assert!(store.is_jersey_number_available(&team.id, 21).await.unwrap());
        assert!(store.is_jersey_number_available("nope", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_update_requires_existing_team() {
        let store = InMemoryTeamStore::new();
        let err = store.update(club("Nobody")).await.unwrap_err();
        assert!(matches!(err, AppError::MissingId { .. }));

        let mut ghost = club("Ghost");
        ghost.id = "ghost".to_string();
        assert!(store.update(ghost).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_moves_players_to_free_agents() {
        let dir = tempdir().unwrap();
        let store = JsonTeamStore::new(dir.path().join("teams.json"));
        let team = store.save(club("Sportul")).await.unwrap();

        store.delete(&team.id).await.unwrap();
        assert!(store.get(&team.id).await.unwrap_err().is_not_found());

        let free_agents = store.get(FREE_AGENT_TEAM_ID).await.unwrap();
        assert_eq!(free_agents.players.len(), 2);
        assert!(
            free_agents
                .players
                .iter()
                .all(|p| p.team_id == FREE_AGENT_TEAM_ID)
        );
        assert!(store.delete(FREE_AGENT_TEAM_ID).await.is_err());
    }
}
