//! Timed reading session state machine.
//!
//! The stopwatch counts whole seconds while running and holds the id of the
//! backend session opened for the current run. Duration and pages read are
//! computed by the backend when the session is finalized; the elapsed
//! counter here only drives the display.
//!
//! Every `start` from idle begins a new *run*. The backend answers the
//! session-open request asynchronously, so the answer carries the run it was
//! made for and is dropped if that run was reset in the meantime.

use crate::forms::parse_page;
use crate::models::FinalizeSessionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopwatchPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl StopwatchPhase {
    pub fn status_label(self) -> &'static str {
        match self {
            StopwatchPhase::Idle => "Stopped",
            StopwatchPhase::Running => "In progress...",
            StopwatchPhase::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SessionSlot {
    #[default]
    Empty,
    Opening {
        run: u64,
    },
    Open {
        session_id: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopwatchError {
    NoBookSelected,
    AlreadyRunning,
    NoSession,
    MissingEndPage,
    InvalidEndPage,
    SessionInProgress,
}

impl std::fmt::Display for StopwatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopwatchError::NoBookSelected => write!(f, "Select a book first."),
            StopwatchError::AlreadyRunning => write!(f, "The stopwatch is already running."),
            StopwatchError::NoSession => write!(f, "Start the stopwatch first."),
            StopwatchError::MissingEndPage => write!(f, "Enter the page you stopped at."),
            StopwatchError::InvalidEndPage => write!(f, "The end page must be a whole number."),
            StopwatchError::SessionInProgress => write!(
                f,
                "Save or reset the current session before switching books."
            ),
        }
    }
}

impl std::error::Error for StopwatchError {}

/// What the caller must do after a successful `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Ask the backend for a session and report back with `session_opened(run, ..)`.
    OpenSession { run: u64, book_id: u64 },
    /// A session is already held (or being opened); just keep counting.
    Resumed,
}


#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    phase: StopwatchPhase,
    elapsed_secs: u64,
    session: SessionSlot,
    book_id: Option<u64>,
    last_run: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> StopwatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == StopwatchPhase::Running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn session_id(&self) -> Option<u64> {
        match self.session {
            SessionSlot::Open { session_id } => Some(session_id),
            _ => None,
        }
    }

    /// Book the current run belongs to, if a run is in progress.
    pub fn book_id(&self) -> Option<u64> {
        self.book_id
    }

    /// True while a run holds (or is opening) a backend session.
    pub fn holds_session(&self) -> bool {
        self.session != SessionSlot::Empty
    }

    pub fn display(&self) -> String {
        format_hms(self.elapsed_secs)
    }

    pub fn status_label(&self) -> &'static str {
        self.phase.status_label()
    }

    pub fn start(&mut self, selected_book: Option<u64>) -> Result<StartOutcome, StopwatchError> {
        if self.phase == StopwatchPhase::Running {
            return Err(StopwatchError::AlreadyRunning);
        }
        let book_id = selected_book.ok_or(StopwatchError::NoBookSelected)?;
        if self.holds_session() && self.book_id != Some(book_id) {
            return Err(StopwatchError::SessionInProgress);
        }

        self.phase = StopwatchPhase::Running;
        if self.holds_session() {
            return Ok(StartOutcome::Resumed);
        }

        self.last_run += 1;
        let run = self.last_run;
        self.session = SessionSlot::Opening { run };
        self.book_id = Some(book_id);
        Ok(StartOutcome::OpenSession { run, book_id })
    }

    /// Store the backend session id for `run`. Returns false when the run is stale.
    pub fn session_opened(&mut self, run: u64, session_id: u64) -> bool {
        match self.session {
            SessionSlot::Opening { run: pending } if pending == run => {
                self.session = SessionSlot::Open { session_id };
                true
            }
            _ => false,
        }
    }

    /// Abandon `run` after the backend refused to open its session.
    pub fn session_open_failed(&mut self, run: u64) -> bool {
        match self.session {
            SessionSlot::Opening { run: pending } if pending == run => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self) -> bool {
        if self.phase != StopwatchPhase::Running {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != StopwatchPhase::Running {
            return false;
        }
        self.phase = StopwatchPhase::Paused;
        true
    }

    pub fn reset(&mut self) {
        self.phase = StopwatchPhase::Idle;
        self.elapsed_secs = 0;
        self.session = SessionSlot::Empty;
        self.book_id = None;
    }

    /// Validate a save and pause the clock; the session stays held until
    /// the backend confirms, so a failed save can be retried.
    pub fn begin_save(&mut self, end_page_raw: &str) -> Result<FinalizeSessionRequest, StopwatchError> {
        let session_id = self.session_id().ok_or(StopwatchError::NoSession)?;
        if end_page_raw.trim().is_empty() {
            return Err(StopwatchError::MissingEndPage);
        }
        let end_page =
            parse_page(end_page_raw, "end page").map_err(|_| StopwatchError::InvalidEndPage)?;
        self.pause();
        Ok(FinalizeSessionRequest {
            session_id,
            end_page,
        })
    }

    /// Switching the bound book is only allowed with no session held.
    pub fn ensure_can_switch_book(&self, book_id: Option<u64>) -> Result<(), StopwatchError> {
        if self.holds_session() && self.book_id != book_id {
            Err(StopwatchError::SessionInProgress)
        } else {
            Ok(())
        }
    }
}

/// Zero-padded `HH:MM:SS`; hours keep growing past 99.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
