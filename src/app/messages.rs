use super::state::{AddOrigin, HistoryTarget, Tab};
use iced::keyboard::{Key, Modifiers};
use reading_tracker_core::{CatalogBook, LibraryBook, SessionSummary};

/// Messages emitted by the UI and by finished background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    SwitchTab(Tab),
    DismissNotice,
    EmailChanged(String),
    PasswordChanged(String),
    SignIn,
    SignedIn(Result<(), String>),
    RefreshLibrary,
    LibraryLoaded(Result<Vec<LibraryBook>, String>),
    SearchQueryChanged(String),
    SearchSubmit,
    SearchCompleted {
        request_id: u64,
        result: Result<Vec<CatalogBook>, String>,
    },
    CoverLoaded {
        url: String,
        bytes: Option<Vec<u8>>,
    },
    AddFromCatalog(CatalogBook),
    ManualFieldChanged(ManualField, String),
    ManualSubmit,
    BookAdded {
        origin: AddOrigin,
        title: String,
        result: Result<(), String>,
    },
    LogBookSelected(LibraryBook),
    LogFieldChanged(LogField, String),
    LogSubmit,
    ReadingLogged(Result<(), String>),
    TimerBookSelected(LibraryBook),
    StartStopwatch,
    PauseStopwatch,
    ResetStopwatch,
    ToggleStopwatch,
    EndPageChanged(String),
    SaveSession,
    SessionOpened {
        run: u64,
        result: Result<u64, String>,
    },
    SessionSaved(Result<u32, String>),
    Tick,
    OpenHistoryModal(u64),
    CloseModal,
    HistoryLoaded {
        target: HistoryTarget,
        book_id: u64,
        result: Result<Vec<SessionSummary>, String>,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    PollSystemSignals,
    SafeQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Title,
    Author,
    Isbn,
    PageCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Date,
    StartPage,
    EndPage,
}
