use thiserror::Error;
use tracing::debug;

use super::filter::ActionFilter;
use crate::models::{ActionType, Event, EventId, GameScore, GameType};
use crate::stats::score_of;
use crate::stats::sorting::{ActionSortKey, SortDirection, sort_events};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("No event with id {id} in this game")]
    UnknownEvent { id: EventId },
}

/// Ordered events of one game together with the score they add up to.
///
/// Append and remove adjust the score incrementally; replace recomputes it from
/// the whole list because the edited event may have changed type or team. After
/// every operation `score()` equals `score_of(events(), home_team_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    home_team_id: String,
    events: Vec<Event>,
    score: GameScore,
    next_id: EventId,
}

impl EventLog {
    pub fn new(home_team_id: impl Into<String>) -> Self {
        EventLog {
            home_team_id: home_team_id.into(),
            events: Vec::new(),
            score: GameScore::default(),
            next_id: 1,
        }
    }

    /// Builds a log from stored actions, numbering them in stored order.
    pub fn from_actions(home_team_id: impl Into<String>, actions: Vec<Event>) -> Self {
        let mut log = EventLog::new(home_team_id);
        for mut event in actions {
            event.id = log.next_id;
            log.next_id += 1;
            log.events.push(event);
        }
        log.score = score_of(&log.events, &log.home_team_id);
        log
    }

    pub fn home_team_id(&self) -> &str {
        &self.home_team_id
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn score(&self) -> GameScore {
        self.score
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Stored form of the log: the events in recording order.
    pub fn to_actions(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn append(&mut self, mut event: Event) -> EventId {
        let id = self.next_id;
        self.next_id += 1;
        event.id = id;

        let side = event.side(&self.home_team_id);
        self.score.side_mut(side).add(event.action_type);
        debug!(
            "Appended event {}: {} for {} ({:?})",
            id, event.action_type, event.team.name, side
        );
        self.events.push(event);
        id
    }

    pub fn remove(&mut self, id: EventId) -> Result<Event, LogError> {
        let index = self.index_of(id)?;
        let event = self.events.remove(index);

        let side = event.side(&self.home_team_id);
        self.score.side_mut(side).subtract(event.action_type);
        debug!("Removed event {}: {} ({:?})", id, event.action_type, side);
        Ok(event)
    }

    /// Puts `event` in place of the event with `id`, keeping its id and position.
    /// Returns the event that was replaced.
    pub fn replace(&mut self, id: EventId, mut event: Event) -> Result<Event, LogError> {
        let index = self.index_of(id)?;
        event.id = id;
        let old = std::mem::replace(&mut self.events[index], event);
        self.recalculate();
        debug!(
            "Replaced event {}: {} -> {}",
            id, old.action_type, self.events[index].action_type
        );
        Ok(old)
    }

    /// Recomputes the score from scratch.
    pub fn recalculate(&mut self) {
        self.score = score_of(&self.events, &self.home_team_id);
    }

    /// True when the running score matches a full recount.
    pub fn is_consistent(&self) -> bool {
        self.score == score_of(&self.events, &self.home_team_id)
    }

    pub fn sorted_by(
        &self,
        key: ActionSortKey,
        direction: SortDirection,
        game_type: GameType,
    ) -> Vec<&Event> {
        sort_events(&self.events, key, direction, game_type)
    }

    pub fn filtered(&self, filter: &ActionFilter) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| filter.matches(e, &self.home_team_id))
            .collect()
    }

    /// Distinct periods with at least one event, in first-recorded order.
    pub fn available_periods(&self) -> Vec<u32> {
        let mut periods = Vec::new();
        for event in &self.events {
            if !periods.contains(&event.period) {
                periods.push(event.period);
            }
        }
        periods
    }

    /// Distinct action types with at least one event, in first-recorded order.
    pub fn available_action_types(&self) -> Vec<ActionType> {
        let mut types = Vec::new();
        for event in &self.events {
            if !types.contains(&event.action_type) {
                types.push(event.action_type);
            }
        }
        types
    }

    fn index_of(&self, id: EventId) -> Result<usize, LogError> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or(LogError::UnknownEvent { id })
    }
}
