//! One game being recorded: its setup, the event log, the capture wizard and the
//! round trips to the recovery slot and the game store.
//!
//! The in-memory log is authoritative while the game is open. Store failures are
//! returned to the caller and logged, but never undo an in-memory change.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::event_log::{EventLog, LogError};
use super::wizard::{CaptureMode, CaptureWizard, WizardError, WizardStep};
use crate::error::AppError;
use crate::models::{
    ActionType, Championship, ColorPair, Event, EventId, Game, GameColors, GameScore, GameTeams,
    GameType, Player, RinkPoint, ScoreData, Season, Side, Team,
};
use crate::roster::{RosterRulesTable, validate_start};
use crate::stats::score_of;
use crate::storage::{GameRepository, RecoveryStore, now_timestamp};

/// Everything chosen on the start screen before the first event is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    pub season: Season,
    pub championship: Championship,
    pub game_type: GameType,
    #[serde(default)]
    pub rink_image: String,
    /// Home team with `roster` holding the players dressed for this game
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub home_colors: ColorPair,
    #[serde(default)]
    pub away_colors: ColorPair,
}

impl GameSetup {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    /// Side of a team taking part in this game.
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if self.home_team.id == team_id {
            Some(Side::Home)
        } else if self.away_team.id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    fn from_game(game: &Game) -> Self {
        GameSetup {
            season: game.season.clone(),
            championship: game.championship,
            game_type: game.game_type,
            rink_image: game.selected_image.clone(),
            home_team: game.teams.home.clone(),
            away_team: game.teams.away.clone(),
            home_colors: game.colors.home.clone(),
            away_colors: game.colors.away.clone(),
        }
    }
}

/// Contents of the recovery slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfinishedGame {
    pub setup: GameSetup,
    #[serde(default)]
    pub home_score: ScoreData,
    #[serde(default)]
    pub away_score: ScoreData,
    #[serde(default)]
    pub actions: Vec<Event>,
}

impl UnfinishedGame {
    /// Snapshot with the score recomputed from `actions`.
    pub fn new(setup: GameSetup, actions: &[Event]) -> Self {
        let score = score_of(actions, &setup.home_team.id);
        UnfinishedGame {
            setup,
            home_score: score.home,
            away_score: score.away,
            actions: actions.to_vec(),
        }
    }
}

/// Where the session came from, which decides how it is written back.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOrigin {
    /// Fresh or recovered game, not yet in the game store
    New,
    /// Finalized game opened for editing
    Saved(Game),
}

#[derive(Debug)]
pub struct GameSession {
    setup: GameSetup,
    log: EventLog,
    wizard: CaptureWizard,
    origin: SessionOrigin,
    autosave: bool,
    dirty: bool,
}

impl GameSession {
    /// Opens a session for a setup that has already passed validation.
    pub fn new(setup: GameSetup, autosave: bool) -> Self {
        let log = EventLog::new(setup.home_team.id.clone());
        info!(
            "Starting game {} vs {} ({}, {}, {})",
            setup.home_team.name,
            setup.away_team.name,
            setup.season,
            setup.championship,
            setup.game_type
        );
        GameSession {
            setup,
            log,
            wizard: CaptureWizard::new(),
            origin: SessionOrigin::New,
            autosave,
            dirty: false,
        }
    }

    /// Validates the setup and rosters, then opens the session.
    ///
    /// All problems are reported together in one `InvalidSetup` error.
    pub fn start(
        setup: GameSetup,
        rules: &RosterRulesTable,
        autosave: bool,
    ) -> Result<Self, AppError> {
        let errors = validate_start(&setup, rules);
        if !errors.is_empty() {
            let message = errors.values().cloned().collect::<Vec<_>>().join("; ");
            return Err(AppError::invalid_setup(message));
        }
        Ok(GameSession::new(setup, autosave))
    }

    /// Reopens a game from the recovery slot. The score always comes from the
    /// actions; a stored score that disagrees is only reported.
    pub fn restore(snapshot: UnfinishedGame, autosave: bool) -> Self {
        let log = EventLog::from_actions(snapshot.setup.home_team.id.clone(), snapshot.actions);
        let stored = GameScore {
            home: snapshot.home_score,
            away: snapshot.away_score,
        };
        if stored != log.score() {
            warn!(
                "Recovered score {:?} did not match its actions, using {:?}",
                stored,
                log.score()
            );
        }
        info!(
            "Restored unfinished game {} vs {} with {} actions",
            snapshot.setup.home_team.name,
            snapshot.setup.away_team.name,
            log.len()
        );
        GameSession {
            setup: snapshot.setup,
            log,
            wizard: CaptureWizard::new(),
            origin: SessionOrigin::New,
            autosave,
            dirty: false,
        }
    }

    /// Opens a finalized game for editing. Autosave does not apply to saved games.
    pub fn from_saved(game: Game) -> Self {
        let setup = GameSetup::from_game(&game);
        let log = EventLog::from_actions(game.home_team_id().to_string(), game.actions.clone());
        if log.score() != game.score {
            warn!(
                "Stored score of game {} did not match its actions, using recomputed score",
                game.id
            );
        }
        GameSession {
            setup,
            log,
            wizard: CaptureWizard::new(),
            origin: SessionOrigin::Saved(game),
            autosave: false,
            dirty: false,
        }
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn wizard(&self) -> &CaptureWizard {
        &self.wizard
    }

    pub fn origin(&self) -> &SessionOrigin {
        &self.origin
    }

    pub fn score(&self) -> GameScore {
        self.log.score()
    }

    /// True when events changed since the last write to the recovery slot or store.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave
    }

    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    /// Starts capturing a new event at the clicked rink location.
    pub fn click_rink(&mut self, position: RinkPoint) -> Result<(), AppError> {
        self.wizard.begin(position)?;
        Ok(())
    }

    /// Opens an existing event in the wizard for editing.
    pub fn edit_event(&mut self, id: EventId) -> Result<(), AppError> {
        let event = self.log.get(id).ok_or(LogError::UnknownEvent { id })?;
        self.wizard.begin_edit(event)?;
        Ok(())
    }

    pub fn select_action(
        &mut self,
        action_type: ActionType,
        side: Side,
        period: u32,
        time: u32,
    ) -> Result<(), WizardError> {
        let team = self.setup.team(side).to_ref();
        self.wizard.select_action(action_type, team, period, time)
    }

    pub fn select_player(&mut self, player: Player) -> Result<(), WizardError> {
        self.wizard.select_player(player)
    }

    pub fn select_assists(&mut self, assists: Vec<Player>) -> Result<(), WizardError> {
        self.wizard.select_assists(assists)
    }

    /// Steps the wizard back one step and returns the step it landed on.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.wizard.back()
    }

    /// Jumps the wizard back to an earlier step, e.g. to change the action type
    /// or team of an event opened with [`GameSession::edit_event`].
    pub fn back_to(&mut self, target: WizardStep) -> Result<(), WizardError> {
        self.wizard.back_to(target)
    }

    /// Players that can be picked for the team chosen in the current draft.
    pub fn player_choices(&self) -> Vec<Player> {
        self.drafted_side()
            .map(|side| self.setup.team(side).roster.clone())
            .unwrap_or_default()
    }

    /// Assist choices: the placeholder first, then the drafted team's dressed
    /// players other than the scorer.
    pub fn assist_choices(&self) -> Vec<Player> {
        let scorer_id = self.wizard.draft().player.as_ref().map(|p| p.id.clone());
        let mut choices = vec![Player::placeholder()];
        choices.extend(
            self.player_choices()
                .into_iter()
                .filter(|p| Some(&p.id) != scorer_id.as_ref()),
        );
        choices
    }

    fn drafted_side(&self) -> Option<Side> {
        let team = self.wizard.draft().team.as_ref()?;
        self.setup.side_of(&team.id)
    }

    /// Applies the confirmed draft to the log.
    ///
    /// Returns the id of the added or edited event, or `None` when the draft was
    /// not ready and nothing changed.
    pub fn confirm_capture(&mut self) -> Result<Option<EventId>, AppError> {
        let Some(captured) = self.wizard.confirm() else {
            return Ok(None);
        };

        let id = match captured.mode {
            CaptureMode::Create => self.log.append(captured.event),
            CaptureMode::Edit(id) => {
                self.log.replace(id, captured.event)?;
                id
            }
        };
        self.dirty = true;
        Ok(Some(id))
    }

    pub fn cancel_capture(&mut self) -> bool {
        self.wizard.cancel()
    }

    pub fn delete_event(&mut self, id: EventId) -> Result<Event, AppError> {
        let removed = self.log.remove(id)?;
        self.dirty = true;
        Ok(removed)
    }

    pub fn snapshot(&self) -> UnfinishedGame {
        UnfinishedGame::new(self.setup.clone(), self.log.events())
    }

    /// Writes the recovery slot when autosave is on and something changed.
    /// Returns whether a write happened.
    pub async fn autosave(&mut self, store: &dyn RecoveryStore) -> Result<bool, AppError> {
        if !self.autosave || !self.dirty || matches!(self.origin, SessionOrigin::Saved(_)) {
            return Ok(false);
        }
        match store.save(&self.snapshot()).await {
            Ok(()) => {
                self.dirty = false;
                debug!("Autosaved {} actions", self.log.len());
                Ok(true)
            }
            Err(e) => {
                warn!("Autosave failed, game stays in memory: {}", e);
                Err(e)
            }
        }
    }

    /// Writes the recovery slot regardless of the autosave setting.
    pub async fn save_locally(&mut self, store: &dyn RecoveryStore) -> Result<(), AppError> {
        if let Err(e) = store.save(&self.snapshot()).await {
            warn!("Saving game locally failed: {}", e);
            return Err(e);
        }
        self.dirty = false;
        info!("Saved game locally ({} actions)", self.log.len());
        Ok(())
    }

    /// The game document as it would be stored now.
    pub fn to_game(&self) -> Game {
        let (id, timestamp) = match &self.origin {
            SessionOrigin::Saved(game) => (game.id.clone(), game.timestamp.clone()),
            SessionOrigin::New => (String::new(), now_timestamp()),
        };
        Game {
            id,
            game_type: self.setup.game_type,
            season: self.setup.season.clone(),
            championship: self.setup.championship,
            actions: self.log.to_actions(),
            timestamp,
            score: self.log.score(),
            teams: GameTeams {
                home: self.setup.home_team.clone(),
                away: self.setup.away_team.clone(),
            },
            colors: GameColors {
                home: self.setup.home_colors.clone(),
                away: self.setup.away_colors.clone(),
            },
            selected_image: self.setup.rink_image.clone(),
        }
    }

    /// Ends the game: refuses a tie, stores the full game and empties the
    /// recovery slot.
    ///
    /// A game opened from the store is overwritten in place instead of added.
    pub async fn finalize(
        &mut self,
        repo: &dyn GameRepository,
        recovery: &dyn RecoveryStore,
    ) -> Result<Game, AppError> {
        let score = self.log.score();
        if score.is_tied() {
            return Err(AppError::TiedGame {
                home: score.home.goals,
                away: score.away.goals,
            });
        }

        let game = self.to_game();
        let stored = match &self.origin {
            SessionOrigin::New => repo.save(game).await,
            SessionOrigin::Saved(_) => repo.update(game).await,
        }
        .inspect_err(|e| warn!("Finalizing game failed: {}", e))?;

        if let Err(e) = recovery.clear().await {
            warn!("Game {} saved but recovery slot not cleared: {}", stored.id, e);
        }

        info!(
            "Finalized game {}: {} {} - {} {}",
            stored.id,
            stored.teams.home.name,
            score.home.goals,
            score.away.goals,
            stored.teams.away.name
        );
        self.origin = SessionOrigin::Saved(stored.clone());
        self.dirty = false;
        Ok(stored)
    }

    /// Writes an edited saved game back with its full action list and score.
    pub async fn persist(&mut self, repo: &dyn GameRepository) -> Result<Game, AppError> {
        if !matches!(self.origin, SessionOrigin::Saved(_)) {
            return Err(AppError::missing_id("game", "update"));
        }
        let stored = repo
            .update(self.to_game())
            .await
            .inspect_err(|e| warn!("Updating saved game failed: {}", e))?;
        self.origin = SessionOrigin::Saved(stored.clone());
        self.dirty = false;
        Ok(stored)
    }
}
