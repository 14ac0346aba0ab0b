use super::state::{AddOrigin, HistoryTarget};
use reading_tracker_core::{FinalizeSessionRequest, NewBook, ReadingLogEntry};

mod catalog;
mod core;
mod forms;
mod history;
mod session;
mod stopwatch;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Effect {
    SignIn {
        email: String,
        password: String,
    },
    LoadLibrary,
    SearchCatalog {
        request_id: u64,
        query: String,
    },
    LoadCover(String),
    AddBook {
        origin: AddOrigin,
        book: NewBook,
    },
    LogReading(ReadingLogEntry),
    OpenSession {
        run: u64,
        book_id: u64,
    },
    FinalizeSession(FinalizeSessionRequest),
    LoadHistory {
        target: HistoryTarget,
        book_id: u64,
    },
    QuitSafely,
}
