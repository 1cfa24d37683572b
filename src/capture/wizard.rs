//! The capture wizard turns a rink click into one event.
//!
//! ```text
//! Idle -> ActionSelect -> PlayerSelect -> AssistSelect -> Confirm -> Idle
//!                                    \______(not a goal)_____/
//! ```
//!
//! Only one capture runs at a time. Going back discards everything collected
//! after the step returned to and keeps everything collected up to it. Editing
//! an existing event loads it whole and opens the wizard at `Confirm`.

use thiserror::Error;
use tracing::debug;

use crate::constants::limits::MAX_ASSISTS;
use crate::models::{ActionType, Event, EventId, Player, RinkPoint, TeamRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Idle,
    ActionSelect,
    PlayerSelect,
    AssistSelect,
    Confirm,
}

impl WizardStep {
    fn order(self) -> u8 {
        match self {
            WizardStep::Idle => 0,
            WizardStep::ActionSelect => 1,
            WizardStep::PlayerSelect => 2,
            WizardStep::AssistSelect => 3,
            WizardStep::Confirm => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("A capture is already in progress (at {current:?})")]
    Busy { current: WizardStep },

    #[error("Cannot {operation} at step {current:?}")]
    WrongStep {
        operation: &'static str,
        current: WizardStep,
    },

    #[error("Cannot go back to {target:?} from {current:?}")]
    InvalidBackTarget {
        target: WizardStep,
        current: WizardStep,
    },

    #[error("A goal can have at most 2 assists, got {count}")]
    TooManyAssists { count: usize },

    #[error("{name} is selected more than once as an assist")]
    DuplicateAssist { name: String },

    #[error("The scorer cannot also be credited with an assist")]
    ScorerAssist,
}

/// Fields collected so far. Everything is optional until `Confirm`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub position: Option<RinkPoint>,
    pub action_type: Option<ActionType>,
    pub team: Option<TeamRef>,
    pub period: Option<u32>,
    pub time: Option<u32>,
    pub player: Option<Player>,
    pub assists: Option<Vec<Player>>,
}

impl EventDraft {
    fn from_event(event: &Event) -> Self {
        EventDraft {
            position: Some(event.position()),
            action_type: Some(event.action_type),
            team: Some(event.team.clone()),
            period: Some(event.period),
            time: Some(event.time),
            player: Some(event.player.clone()),
            assists: Some(event.assists.clone()),
        }
    }

    fn takes_assists(&self) -> bool {
        self.action_type.is_some_and(ActionType::takes_assists)
    }

    fn clear_after(&mut self, step: WizardStep) {
        match step {
            WizardStep::Idle => *self = EventDraft::default(),
            WizardStep::ActionSelect | WizardStep::PlayerSelect => {
                self.player = None;
                self.assists = None;
            }
            WizardStep::AssistSelect => self.assists = None,
            WizardStep::Confirm => {}
        }
    }
}

/// Whether a confirmed draft adds a new event or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Create,
    Edit(EventId),
}

/// Output of a confirmed capture, ready to be applied to the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    pub mode: CaptureMode,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureWizard {
    step: WizardStep,
    draft: EventDraft,
    mode: CaptureMode,
}

impl Default for CaptureWizard {
    fn default() -> Self {
        CaptureWizard::new()
    }
}

impl CaptureWizard {
    pub fn new() -> Self {
        CaptureWizard {
            step: WizardStep::Idle,
            draft: EventDraft::default(),
            mode: CaptureMode::Create,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.step != WizardStep::Idle
    }

    /// Starts a new capture at a rink location.
    pub fn begin(&mut self, position: RinkPoint) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.draft = EventDraft {
            position: Some(position),
            ..EventDraft::default()
        };
        self.mode = CaptureMode::Create;
        self.go_to(WizardStep::ActionSelect);
        Ok(())
    }

    /// Opens an existing event for editing, straight at the confirmation step.
    pub fn begin_edit(&mut self, event: &Event) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.draft = EventDraft::from_event(event);
        self.mode = CaptureMode::Edit(event.id);
        self.go_to(WizardStep::Confirm);
        Ok(())
    }

    pub fn select_action(
        &mut self,
        action_type: ActionType,
        team: TeamRef,
        period: u32,
        time: u32,
    ) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::ActionSelect, "select an action")?;
        self.draft.action_type = Some(action_type);
        self.draft.team = Some(team);
        self.draft.period = Some(period);
        self.draft.time = Some(time);
        self.go_to(WizardStep::PlayerSelect);
        Ok(())
    }

    pub fn select_player(&mut self, player: Player) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::PlayerSelect, "select a player")?;
        self.draft.player = Some(player);
        if self.draft.takes_assists() {
            self.go_to(WizardStep::AssistSelect);
        } else {
            self.go_to(WizardStep::Confirm);
        }
        Ok(())
    }

    /// Records 0-2 assisting players.
    ///
    /// The placeholder player stands for an assist nobody saw; it is never treated
    /// as the scorer and may be picked for both assists.
    pub fn select_assists(&mut self, assists: Vec<Player>) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::AssistSelect, "select assists")?;

        if assists.len() > MAX_ASSISTS {
            return Err(WizardError::TooManyAssists {
                count: assists.len(),
            });
        }

        let scorer_id = self.draft.player.as_ref().map(|p| p.id.as_str());
        for (i, assist) in assists.iter().enumerate() {
            if assist.is_placeholder() {
                continue;
            }
            if Some(assist.id.as_str()) == scorer_id {
                return Err(WizardError::ScorerAssist);
            }
            if assists[..i].iter().any(|other| other.id == assist.id) {
                return Err(WizardError::DuplicateAssist {
                    name: assist.name.clone(),
                });
            }
        }

        self.draft.assists = Some(assists);
        self.go_to(WizardStep::Confirm);
        Ok(())
    }

    /// Steps back once. From `Confirm` that is the assist step for goals and the
    /// player step otherwise. Returns the step now shown.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let target = match self.step {
            WizardStep::PlayerSelect => WizardStep::ActionSelect,
            WizardStep::AssistSelect => WizardStep::PlayerSelect,
            WizardStep::Confirm if self.draft.takes_assists() => WizardStep::AssistSelect,
            WizardStep::Confirm => WizardStep::PlayerSelect,
            current => {
                return Err(WizardError::WrongStep {
                    operation: "go back",
                    current,
                });
            }
        };
        self.back_to(target)?;
        Ok(target)
    }

    /// Jumps back to any earlier step of the current path, discarding the fields
    /// collected after it.
    pub fn back_to(&mut self, target: WizardStep) -> Result<(), WizardError> {
        let reachable = target != WizardStep::Idle
            && target.order() < self.step.order()
            && (target != WizardStep::AssistSelect || self.draft.takes_assists());
        if !reachable {
            return Err(WizardError::InvalidBackTarget {
                target,
                current: self.step,
            });
        }

        self.draft.clear_after(target);
        self.go_to(target);
        Ok(())
    }

    /// Turns the draft into an event and closes the wizard.
    ///
    /// Outside `Confirm`, or with no location, action type, team or player, this
    /// does nothing and returns `None`.
    pub fn confirm(&mut self) -> Option<CapturedEvent> {
        if self.step != WizardStep::Confirm {
            return None;
        }

        let draft = &self.draft;
        let (Some(position), Some(action_type), Some(team), Some(player)) = (
            draft.position,
            draft.action_type,
            draft.team.clone(),
            draft.player.clone(),
        ) else {
            debug!("Ignoring confirm on incomplete draft");
            return None;
        };

        let assists = if action_type.takes_assists() {
            draft.assists.clone().unwrap_or_default()
        } else {
            Vec::new()
        };

        let event = Event {
            id: match self.mode {
                CaptureMode::Edit(id) => id,
                CaptureMode::Create => 0,
            },
            action_type,
            team,
            player,
            assists,
            period: draft.period.unwrap_or(1),
            time: draft.time.unwrap_or(0),
            x: position.x,
            y: position.y,
        };
        let captured = CapturedEvent {
            mode: self.mode,
            event,
        };
        self.reset();
        Some(captured)
    }

    /// Abandons the capture. Returns true when a draft was discarded.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            debug!("Capture cancelled at {:?}", self.step);
        }
        self.reset();
        was_active
    }

    fn reset(&mut self) {
        self.step = WizardStep::Idle;
        self.draft = EventDraft::default();
        self.mode = CaptureMode::Create;
    }

    fn go_to(&mut self, step: WizardStep) {
        debug!("Capture step {:?} -> {:?}", self.step, step);
        self.step = step;
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.is_active() {
            Err(WizardError::Busy { current: self.step })
        } else {
            Ok(())
        }
    }

    fn ensure_step(&self, step: WizardStep, operation: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                operation,
                current: self.step,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamRef;
    use crate::testing_utils::TestDataBuilder;

    fn home() -> TeamRef {
        TeamRef::new("home", "Home")
    }

    fn scorer() -> Player {
        TestDataBuilder::skater("h1", 10, "home")
    }

    fn wizard_at_player_step(action: ActionType) -> CaptureWizard {
        let mut wizard = CaptureWizard::new();
        wizard.begin(RinkPoint::new(25.0, 75.0)).unwrap();
        wizard.select_action(action, home(), 2, 125).unwrap();
        wizard
    }

    #[test]
    fn test_goal_goes_through_assist_step() {
        let mut wizard = wizard_at_player_step(ActionType::Goal);
        assert_eq!(wizard.step(), WizardStep::PlayerSelect);

        wizard.select_player(scorer()).unwrap();
        assert_eq!(wizard.step(), WizardStep::AssistSelect);
        assert!(wizard.confirm().is_none(), "cannot confirm before assists");

        wizard.select_assists(vec![]).unwrap();
        assert_eq!(wizard.step(), WizardStep::Confirm);

        let captured = wizard.confirm().unwrap();
        assert_eq!(captured.mode, CaptureMode::Create);
        assert_eq!(captured.event.action_type, ActionType::Goal);
        assert_eq!(captured.event.period, 2);
        assert_eq!(captured.event.time, 125);
        assert_eq!((captured.event.x, captured.event.y), (25.0, 75.0));
        assert!(captured.event.assists.is_empty());
        assert_eq!(wizard.step(), WizardStep::Idle);
    }

    #[test]
    fn test_shot_skips_assist_step() {
        let mut wizard = wizard_at_player_step(ActionType::Shot);
        wizard.select_player(scorer()).unwrap();
        assert_eq!(wizard.step(), WizardStep::Confirm);
        assert_eq!(
            wizard.select_assists(vec![]),
            Err(WizardError::WrongStep {
                operation: "select assists",
                current: WizardStep::Confirm
            })
        );
    }

    #[test]
    fn test_player_required_before_proceeding() {
        let mut wizard = wizard_at_player_step(ActionType::Goal);
        assert!(wizard.select_assists(vec![]).is_err());
        assert!(wizard.confirm().is_none());
        assert_eq!(wizard.step(), WizardStep::PlayerSelect);
    }

    #[test]
    fn test_only_one_capture_at_a_time() {
        let mut wizard = wizard_at_player_step(ActionType::Hit);
        assert_eq!(
            wizard.begin(RinkPoint::new(1.0, 1.0)),
            Err(WizardError::Busy {
                current: WizardStep::PlayerSelect
            })
        );
    }

    #[test]
    fn test_assist_rules() {
        let mut wizard = wizard_at_player_step(ActionType::Goal);
        wizard.select_player(scorer()).unwrap();

        let a = TestDataBuilder::skater("h2", 2, "home");
        let b = TestDataBuilder::skater("h3", 3, "home");
        let c = TestDataBuilder::skater("h4", 4, "home");

        assert_eq!(
            wizard.select_assists(vec![a.clone(), b.clone(), c]),
            Err(WizardError::TooManyAssists { count: 3 })
        );
        assert_eq!(
            wizard.select_assists(vec![scorer()]),
            Err(WizardError::ScorerAssist)
        );
        assert!(matches!(
            wizard.select_assists(vec![a.clone(), a.clone()]),
            Err(WizardError::DuplicateAssist { .. })
        ));
        assert_eq!(wizard.step(), WizardStep::AssistSelect);

        wizard.select_assists(vec![a, b]).unwrap();
        assert_eq!(wizard.confirm().unwrap().event.assists.len(), 2);
    }

    #[test]
    fn test_placeholder_assists_are_always_allowed() {
        let mut wizard = wizard_at_player_step(ActionType::Goal);
        wizard.select_player(Player::placeholder()).unwrap();
        wizard
            .select_assists(vec![Player::placeholder(), Player::placeholder()])
            .unwrap();
        let event = wizard.confirm().unwrap().event;
        assert!(event.player.is_placeholder());
        assert_eq!(event.assists.len(), 2);
    }

    #[test]
    fn test_back_from_confirm_to_player_clears_player_and_assists() {
        let mut wizard = wizard_at_player_step(ActionType::Goal);
        wizard.select_player(scorer()).unwrap();
        wizard
            .select_assists(vec![TestDataBuilder::skater("h2", 2, "home")])
            .unwrap();

        wizard.back_to(WizardStep::PlayerSelect).unwrap();
        assert_eq!(wizard.step(), WizardStep::PlayerSelect);
        assert_eq!(wizard.draft().player, None);
        assert_eq!(wizard.draft().assists, None);
        assert_eq!(wizard.draft().action_type, Some(ActionType::Goal));
        assert_eq!(wizard.draft().time, Some(125));

        wizard.select_player(scorer()).unwrap();
        assert_eq!(wizard.step(), WizardStep::AssistSelect);
    }

    #[test]
    fn test_back_follows_the_path_taken() {
        let mut wizard = wizard_at_player_step(ActionType::Goal);
        wizard.select_player(scorer()).unwrap();
        wizard.select_assists(vec![]).unwrap();
        assert_eq!(wizard.back(), Ok(WizardStep::AssistSelect));
        assert_eq!(wizard.draft().assists, None);
        assert!(wizard.draft().player.is_some());

        let mut wizard = wizard_at_player_step(ActionType::Turnover);
        wizard.select_player(scorer()).unwrap();
        assert_eq!(wizard.back(), Ok(WizardStep::PlayerSelect));
        assert_eq!(wizard.back(), Ok(WizardStep::ActionSelect));
        assert_eq!(wizard.draft().action_type, Some(ActionType::Turnover));
        assert!(wizard.back().is_err());
    }

    #[test]
    fn test_back_to_rejects_forward_and_skipped_steps() {
        let mut wizard = wizard_at_player_step(ActionType::Shot);
        wizard.select_player(scorer()).unwrap();
        assert!(matches!(
            wizard.back_to(WizardStep::AssistSelect),
            Err(WizardError::InvalidBackTarget { .. })
        ));
        assert!(wizard.back_to(WizardStep::Idle).is_err());
        assert!(wizard.back_to(WizardStep::Confirm).is_err());
    }

    #[test]
    fn test_edit_mode_opens_at_confirm() {
        let mut event = TestDataBuilder::event(ActionType::Shot, "home", "h1", 3, 600);
        event.id = 12;

        let mut wizard = CaptureWizard::new();
        wizard.begin_edit(&event).unwrap();
        assert_eq!(wizard.step(), WizardStep::Confirm);
        assert_eq!(wizard.mode(), CaptureMode::Edit(12));

        wizard.back_to(WizardStep::ActionSelect).unwrap();
        wizard
            .select_action(ActionType::Goal, TeamRef::new("away", "Away"), 3, 610)
            .unwrap();
        wizard.select_player(TestDataBuilder::skater("a1", 9, "away")).unwrap();
        wizard.select_assists(vec![]).unwrap();

        let captured = wizard.confirm().unwrap();
        assert_eq!(captured.mode, CaptureMode::Edit(12));
        assert_eq!(captured.event.id, 12);
        assert_eq!(captured.event.team.id, "away");
        assert_eq!((captured.event.x, captured.event.y), (event.x, event.y));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut wizard = wizard_at_player_step(ActionType::Goal);
        assert!(wizard.cancel());
        assert_eq!(wizard.step(), WizardStep::Idle);
        assert_eq!(wizard.draft(), &EventDraft::default());
        assert!(!wizard.cancel());
    }

    #[test]
    fn test_assists_dropped_for_non_goals_in_edit() {
        let mut event = TestDataBuilder::event(ActionType::Goal, "home", "h1", 1, 10);
        event.assists = vec![TestDataBuilder::skater("h2", 2, "home")];

        let mut wizard = CaptureWizard::new();
        wizard.begin_edit(&event).unwrap();
        wizard.back_to(WizardStep::ActionSelect).unwrap();
        wizard.select_action(ActionType::Shot, home(), 1, 10).unwrap();
        wizard.select_player(scorer()).unwrap();
        assert!(wizard.confirm().unwrap().event.assists.is_empty());
    }
}
