use super::super::super::messages::Message;
use super::super::super::state::{App, Tab};
use super::super::Effect;
use tracing::{debug, info};

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::SwitchTab(tab) => self.handle_switch_tab(tab),
            Message::DismissNotice => self.notice = None,
            Message::EmailChanged(email) => self.auth.email = email,
            Message::PasswordChanged(password) => self.auth.password = password,
            Message::SignIn => self.handle_sign_in(&mut effects),
            Message::SignedIn(result) => self.handle_signed_in(result, &mut effects),
            Message::RefreshLibrary => self.handle_refresh_library(&mut effects),
            Message::LibraryLoaded(result) => self.handle_library_loaded(result, &mut effects),
            Message::SearchQueryChanged(query) => self.catalog.query = query,
            Message::SearchSubmit => self.handle_search_submit(&mut effects),
            Message::SearchCompleted { request_id, result } => {
                self.handle_search_completed(request_id, result, &mut effects)
            }
            Message::CoverLoaded { url, bytes } => self.handle_cover_loaded(url, bytes),
            Message::AddFromCatalog(book) => self.handle_add_from_catalog(book, &mut effects),
            Message::ManualFieldChanged(field, value) => {
                self.handle_manual_field_changed(field, value)
            }
            Message::ManualSubmit => self.handle_manual_submit(&mut effects),
            Message::BookAdded {
                origin,
                title,
                result,
            } => self.handle_book_added(origin, title, result, &mut effects),
            Message::LogBookSelected(book) => self.handle_log_book_selected(book),
            Message::LogFieldChanged(field, value) => self.handle_log_field_changed(field, value),
            Message::LogSubmit => self.handle_log_submit(&mut effects),
            Message::ReadingLogged(result) => self.handle_reading_logged(result, &mut effects),
            Message::TimerBookSelected(book) => {
                self.handle_timer_book_selected(book, &mut effects)
            }
            Message::StartStopwatch => self.handle_start_stopwatch(&mut effects),
            Message::PauseStopwatch => self.handle_pause_stopwatch(),
            Message::ResetStopwatch => self.handle_reset_stopwatch(),
            Message::ToggleStopwatch => {
                if self.timer.stopwatch.is_running() {
                    self.handle_pause_stopwatch();
                } else {
                    self.handle_start_stopwatch(&mut effects);
                }
            }
            Message::EndPageChanged(value) => self.timer.end_page = value,
            Message::SaveSession => self.handle_save_session(&mut effects),
            Message::SessionOpened { run, result } => self.handle_session_opened(run, result),
            Message::SessionSaved(result) => self.handle_session_saved(result, &mut effects),
            Message::Tick => self.handle_tick(),
            Message::OpenHistoryModal(book_id) => {
                self.handle_open_history_modal(book_id, &mut effects)
            }
            Message::CloseModal => self.handle_close_modal(),
            Message::HistoryLoaded {
                target,
                book_id,
                result,
            } => self.handle_history_loaded(target, book_id, result),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        effects
    }

    fn handle_switch_tab(&mut self, tab: Tab) {
        if self.active_tab == tab {
            return;
        }
        debug!(from = self.active_tab.id(), to = tab.id(), "Switching tab");
        self.active_tab = tab;
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Interrupt received; quitting");
            effects.push(Effect::QuitSafely);
        }
    }
}
