use iced::widget::image;
use reading_tracker_core::forms::{ManualBookInput, ReadingLogInput};
use reading_tracker_core::{CatalogBook, LibraryBook, SessionSummary, Stopwatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking message dialog; the only way the app "alerts".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub(in crate::app) kind: NoticeKind,
    pub(in crate::app) text: String,
}

pub struct AuthState {
    pub(in crate::app) email: String,
    pub(in crate::app) password: String,
    pub(in crate::app) signing_in: bool,
    pub(in crate::app) signed_in: bool,
    pub(in crate::app) error: Option<String>,
}

pub struct LibraryState {
    pub(in crate::app) books: Vec<LibraryBook>,
    pub(in crate::app) loading: bool,
    /// Set when a refresh is asked for while a load is already in flight.
    pub(in crate::app) refresh_pending: bool,
    pub(in crate::app) error: Option<String>,
}

impl LibraryState {
    pub(in crate::app) fn find(&self, book_id: u64) -> Option<&LibraryBook> {
        self.books.iter().find(|book| book.id == book_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    NotFound,
    Results(Vec<CatalogBook>),
    Failed(String),
}

pub struct CatalogState {
    pub(in crate::app) query: String,
    pub(in crate::app) status: SearchStatus,
    pub(in crate::app) request_id: u64,
    pub(in crate::app) adding: Option<String>,
}

#[derive(Debug, Clone)]
pub enum CoverState {
    Loading,
    Ready(image::Handle),
    Missing,
}

/// Which request path created a book, so the answer lands in the right form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOrigin {
    Catalog,
    Manual,
}

pub struct ManualAddState {
    pub(in crate::app) input: ManualBookInput,
    pub(in crate::app) submitting: bool,
}

pub struct ReadingLogState {
    pub(in crate::app) input: ReadingLogInput,
    pub(in crate::app) submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTarget {
    Stopwatch,
    Modal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStatus {
    Loading,
    Empty,
    Loaded(Vec<SessionSummary>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    pub(in crate::app) book_id: u64,
    pub(in crate::app) title: String,
    pub(in crate::app) status: HistoryStatus,
}

impl HistoryView {
    pub(in crate::app) fn loading(book_id: u64, title: String) -> Self {
        Self {
            book_id,
            title,
            status: HistoryStatus::Loading,
        }
    }
}

pub struct TimerState {
    pub(in crate::app) stopwatch: Stopwatch,
    pub(in crate::app) selected_book: Option<u64>,
    pub(in crate::app) last_page: Option<u32>,
    pub(in crate::app) end_page: String,
    pub(in crate::app) saving: bool,
    pub(in crate::app) history: Option<HistoryView>,
}
