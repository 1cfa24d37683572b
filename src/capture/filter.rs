use crate::models::{ActionType, Event, Side};

/// Which bench's events are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamView {
    #[default]
    All,
    Home,
    Away,
}

/// Narrows a game's events for the rink overlay and the event table.
///
/// Empty period and type lists mean "no restriction". The player filter matches
/// the acting player and, on goals, the assisting players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    pub team_view: TeamView,
    pub periods: Vec<u32>,
    pub action_types: Vec<ActionType>,
    pub player_id: Option<String>,
}

impl ActionFilter {
    pub fn matches(&self, event: &Event, home_team_id: &str) -> bool {
        let side = event.side(home_team_id);
        match self.team_view {
            TeamView::Home if side != Side::Home => return false,
            TeamView::Away if side != Side::Away => return false,
            _ => {}
        }

        if !self.periods.is_empty() && !self.periods.contains(&event.period) {
            return false;
        }

        if !self.action_types.is_empty() && !self.action_types.contains(&event.action_type) {
            return false;
        }

        match &self.player_id {
            Some(player_id) => event.is_by(player_id) || event.is_assisted_by(player_id),
            None => true,
        }
    }

    pub fn toggle_period(&mut self, period: u32) {
        toggle(&mut self.periods, period);
    }

    pub fn toggle_action_type(&mut self, action_type: ActionType) {
        toggle(&mut self.action_types, action_type);
    }

    /// Selecting the selected player again clears the player filter.
    pub fn toggle_player(&mut self, player_id: &str) {
        if self.player_id.as_deref() == Some(player_id) {
            self.player_id = None;
        } else {
            self.player_id = Some(player_id.to_string());
        }
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(index) = values.iter().position(|v| *v == value) {
        values.remove(index);
    } else {
        values.push(value);
    }
}
