//! Event capture for one game: the step-by-step wizard, the event log it feeds
//! and the session that ties both to a game setup and the stores.

pub mod event_log;
pub mod filter;
pub mod session;
pub mod wizard;

pub use event_log::{EventLog, LogError};
pub use filter::{ActionFilter, TeamView};
pub use session::{GameSession, GameSetup, SessionOrigin, UnfinishedGame};
pub use wizard::{CaptureMode, CaptureWizard, CapturedEvent, EventDraft, WizardError, WizardStep};
