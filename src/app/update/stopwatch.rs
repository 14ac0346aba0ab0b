use super::super::state::{App, HistoryTarget};
use super::Effect;
use reading_tracker_core::{LibraryBook, StartOutcome, StopwatchError};
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_timer_book_selected(&mut self, book: LibraryBook, effects: &mut Vec<Effect>) {
        if let Err(err) = self.timer.stopwatch.ensure_can_switch_book(Some(book.id)) {
            self.notify_error(err.to_string());
            return;
        }
        info!(book_id = book.id, last_page = book.last_page, "Timer book selected");
        self.timer.selected_book = Some(book.id);
        self.timer.last_page = Some(book.last_page);
        self.load_history(HistoryTarget::Stopwatch, book.id, effects);
    }

    pub(super) fn handle_start_stopwatch(&mut self, effects: &mut Vec<Effect>) {
        if self.timer.saving {
            return;
        }
        match self.timer.stopwatch.start(self.timer.selected_book) {
            Ok(StartOutcome::OpenSession { run, book_id }) => {
                effects.push(Effect::OpenSession { run, book_id });
            }
            Ok(StartOutcome::Resumed) => {
                debug!(session_id = ?self.timer.stopwatch.session_id(), "Stopwatch resumed");
            }
            Err(StopwatchError::AlreadyRunning) => {
                debug!("Ignoring start while the stopwatch is running");
            }
            Err(err) => self.notify_error(err.to_string()),
        }
    }

    pub(super) fn handle_pause_stopwatch(&mut self) {
        if self.timer.stopwatch.pause() {
            debug!(elapsed_secs = self.timer.stopwatch.elapsed_secs(), "Stopwatch paused");
        }
    }

    pub(super) fn handle_reset_stopwatch(&mut self) {
        if self.timer.saving {
            return;
        }
        if self.timer.stopwatch.holds_session() {
            info!(
                session_id = ?self.timer.stopwatch.session_id(),
                "Abandoning timed session on reset"
            );
        }
        self.timer.stopwatch.reset();
    }

    pub(super) fn handle_tick(&mut self) {
        self.timer.stopwatch.tick();
    }

    pub(super) fn handle_session_opened(&mut self, run: u64, result: Result<u64, String>) {
        match result {
            Ok(session_id) => {
                if self.timer.stopwatch.session_opened(run, session_id) {
                    info!(run, session_id, "Timed session opened");
                } else {
                    debug!(run, session_id, "Ignoring session opened for a stale run");
                }
            }
            Err(err) => {
                if self.timer.stopwatch.session_open_failed(run) {
                    self.notify_error(format!("Could not start the session: {err}"));
                } else {
                    warn!(run, "Stale session open failed: {err}");
                }
            }
        }
    }

    pub(super) fn handle_save_session(&mut self, effects: &mut Vec<Effect>) {
        if self.timer.saving {
            return;
        }
        match self.timer.stopwatch.begin_save(&self.timer.end_page) {
            Ok(request) => {
                self.timer.saving = true;
                effects.push(Effect::FinalizeSession(request));
            }
            Err(err) => self.notify_error(err.to_string()),
        }
    }

    pub(super) fn handle_session_saved(
        &mut self,
        result: Result<u32, String>,
        effects: &mut Vec<Effect>,
    ) {
        self.timer.saving = false;
        match result {
            Ok(minutes) => {
                let book_id = self.timer.stopwatch.book_id().or(self.timer.selected_book);
                self.notify_info(format!("Session saved! Duration: {minutes} minutes."));
                self.timer.stopwatch.reset();
                self.timer.end_page.clear();
                self.request_library_refresh(effects);
                if let Some(book_id) = book_id {
                    self.load_history(HistoryTarget::Stopwatch, book_id, effects);
                }
            }
            Err(err) => self.notify_error(format!("Could not save the session: {err}")),
        }
    }
}
