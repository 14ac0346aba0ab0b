use super::super::state::App;
use super::Effect;
use reading_tracker_core::LibraryBook;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_sign_in(&mut self, effects: &mut Vec<Effect>) {
        if self.auth.signing_in {
            return;
        }
        let email = self.auth.email.trim().to_string();
        if email.is_empty() || self.auth.password.is_empty() {
            self.notify_error("Enter your email and password to sign in.");
            return;
        }
        self.auth.signing_in = true;
        self.auth.error = None;
        effects.push(Effect::SignIn {
            email,
            password: self.auth.password.clone(),
        });
    }

    pub(super) fn handle_signed_in(&mut self, result: Result<(), String>, effects: &mut Vec<Effect>) {
        self.auth.signing_in = false;
        match result {
            Ok(()) => {
                self.auth.signed_in = true;
                self.auth.error = None;
                self.request_library_refresh(effects);
            }
            Err(err) => {
                self.auth.signed_in = false;
                self.auth.error = Some(err.clone());
                self.notify_error(format!("Sign-in failed: {err}"));
            }
        }
    }

    pub(super) fn handle_refresh_library(&mut self, effects: &mut Vec<Effect>) {
        self.request_library_refresh(effects);
    }

    /// Re-fetch the library after any change that moves a last-read page.
    /// A request made mid-load is queued and sent once the current load lands.
    pub(super) fn request_library_refresh(&mut self, effects: &mut Vec<Effect>) {
        if self.library.loading {
            self.library.refresh_pending = true;
            return;
        }
        self.library.loading = true;
        self.library.error = None;
        effects.push(Effect::LoadLibrary);
    }

    pub(super) fn handle_library_loaded(
        &mut self,
        result: Result<Vec<LibraryBook>, String>,
        effects: &mut Vec<Effect>,
    ) {
        self.library.loading = false;
        match result {
            Ok(books) => {
                info!(count = books.len(), "Library loaded");
                self.auth.signed_in = true;
                self.library.error = None;
                self.library.books = books;
                if let Some(book_id) = self.timer.selected_book {
                    self.timer.last_page = self.library.find(book_id).map(|book| book.last_page);
                }
            }
            Err(err) => {
                warn!("Failed to load library: {err}");
                self.library.error = Some(err);
            }
        }
        if std::mem::take(&mut self.library.refresh_pending) {
            debug!("Library changed during the last load; reloading");
            self.request_library_refresh(effects);
        }
    }
}
