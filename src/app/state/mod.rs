mod tabs;
mod ui;

use crate::config::AppConfig;
use iced::Task;
use reading_tracker_core::forms::{ManualBookInput, ReadingLogInput, today_iso};
use reading_tracker_core::{Stopwatch, TrackerClient};
use std::collections::HashMap;
use std::time::Duration;

use super::messages::Message;

pub use tabs::Tab;
pub(in crate::app) use ui::{
    AddOrigin, AuthState, CatalogState, CoverState, HistoryStatus, HistoryTarget, HistoryView,
    LibraryState, ManualAddState, Notice, NoticeKind, ReadingLogState, SearchStatus, TimerState,
};

pub(crate) const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub(crate) const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) client: Option<TrackerClient>,
    pub(super) active_tab: Tab,
    pub(super) auth: AuthState,
    pub(super) library: LibraryState,
    pub(super) catalog: CatalogState,
    pub(super) covers: HashMap<String, CoverState>,
    pub(super) manual: ManualAddState,
    pub(super) reading_log: ReadingLogState,
    pub(super) timer: TimerState,
    pub(super) history_modal: Option<HistoryView>,
    pub(super) notice: Option<Notice>,
}

impl App {
    pub(super) fn notify_info(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!(%text, "Notice");
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            text,
        });
    }

    pub(super) fn notify_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!(%text, "Error notice");
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            text,
        });
    }

    pub(super) fn book_title(&self, book_id: u64) -> String {
        self.library
            .find(book_id)
            .map(|book| book.title.clone())
            .unwrap_or_else(|| format!("Book #{book_id}"))
    }

    pub(super) fn fresh_reading_log_input() -> ReadingLogInput {
        ReadingLogInput {
            date: today_iso(),
            ..ReadingLogInput::default()
        }
    }

    pub(super) fn bootstrap(mut config: AppConfig) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let client = match TrackerClient::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        ) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::error!(base_url = %config.base_url, "Cannot create backend client: {err:#}");
                None
            }
        };
        let active_tab = Tab::from_id(&config.default_tab).unwrap_or_default();

        let mut app = App {
            auth: AuthState {
                email: config.email.clone(),
                password: config.password.clone(),
                signing_in: false,
                signed_in: false,
                error: None,
            },
            config,
            client,
            active_tab,
            library: LibraryState {
                books: Vec::new(),
                loading: false,
                refresh_pending: false,
                error: None,
            },
            catalog: CatalogState {
                query: String::new(),
                status: SearchStatus::Idle,
                request_id: 0,
                adding: None,
            },
            covers: HashMap::new(),
            manual: ManualAddState {
                input: ManualBookInput::default(),
                submitting: false,
            },
            reading_log: ReadingLogState {
                input: Self::fresh_reading_log_input(),
                submitting: false,
            },
            timer: TimerState {
                stopwatch: Stopwatch::new(),
                selected_book: None,
                last_page: None,
                end_page: String::new(),
                saving: false,
                history: None,
            },
            history_modal: None,
            notice: None,
        };

        if app.client.is_none() {
            let base_url = app.config.base_url.clone();
            app.notify_error(format!("The backend URL is not valid: {base_url}"));
            return (app, Task::none());
        }

        tracing::info!(
            tab = app.active_tab.id(),
            unattended_sign_in = app.config.has_credentials(),
            "Initialized app state"
        );
        let init_message = if app.config.has_credentials() {
            Message::SignIn
        } else {
            Message::RefreshLibrary
        };
        (app, Task::done(init_message))
    }
}

fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: &str) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback.to_string();
        } else {
            *value = normalized;
        }
    }

    config.base_url = config.base_url.trim().to_string();
    config.request_timeout_secs = config
        .request_timeout_secs
        .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
    config.window_width = config.window_width.clamp(640.0, 7680.0);
    config.window_height = config.window_height.clamp(480.0, 4320.0);
    if Tab::from_id(&config.default_tab).is_none() {
        tracing::warn!(tab = %config.default_tab, "Unknown default tab; using library");
        config.default_tab = Tab::default().id().to_string();
    }
    normalize_key_binding(&mut config.key_dismiss, "escape");
    normalize_key_binding(&mut config.key_toggle_stopwatch, "ctrl+p");
    normalize_key_binding(&mut config.key_safe_quit, "ctrl+q");
}

#[cfg(test)]
pub(in crate::app) mod test_support {
    use super::App;
    use crate::config::AppConfig;
    use reading_tracker_core::LibraryBook;

    /// App wired to an unreachable backend with a two-book library.
    pub(in crate::app) fn build_test_app() -> App {
        let config = AppConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        };
        let (mut app, _task) = App::bootstrap(config);
        app.auth.signed_in = true;
        app.library.books = vec![
            LibraryBook {
                id: 1,
                title: "Dom Casmurro".to_string(),
                last_page: 40,
            },
            LibraryBook {
                id: 2,
                title: "Iracema".to_string(),
                last_page: 0,
            },
        ];
        app
    }
}
