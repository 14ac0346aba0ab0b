//! Backend-facing core of the reading tracker client.
//!
//! Nothing in here knows about the GUI:
//! - `api` speaks the tracker backend's HTTP contract.
//! - `models` holds the wire records exactly as the backend names them.
//! - `dashboard` extracts the user's library from the dashboard page.
//! - `forms` turns raw form input into validated requests.
//! - `stopwatch` is the timed-session state machine.

pub mod api;
pub mod dashboard;
pub mod forms;
pub mod models;
pub mod stopwatch;

pub use api::TrackerClient;
pub use models::{
    CatalogBook, FinalizeSessionRequest, FinalizeSessionResponse, LibraryBook, NewBook,
    ReadingLogEntry, SessionSummary, StartSessionRequest, StartSessionResponse,
};
pub use stopwatch::{StartOutcome, Stopwatch, StopwatchError, StopwatchPhase};
