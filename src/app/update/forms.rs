use super::super::messages::{LogField, ManualField};
use super::super::state::{AddOrigin, App};
use super::Effect;
use reading_tracker_core::LibraryBook;
use reading_tracker_core::forms::prefill_start_page;
use tracing::info;

impl App {
    pub(super) fn handle_manual_field_changed(&mut self, field: ManualField, value: String) {
        let input = &mut self.manual.input;
        match field {
            ManualField::Title => input.title = value,
            ManualField::Author => input.author = value,
            ManualField::Isbn => input.isbn = value,
            ManualField::PageCount => input.page_count = value,
        }
    }

    pub(super) fn handle_manual_submit(&mut self, effects: &mut Vec<Effect>) {
        if self.manual.submitting {
            return;
        }
        match self.manual.input.validate() {
            Ok(book) => {
                info!(title = %book.title, pages = book.page_count, "Adding manual book");
                self.manual.submitting = true;
                effects.push(Effect::AddBook {
                    origin: AddOrigin::Manual,
                    book,
                });
            }
            Err(err) => self.notify_error(err.to_string()),
        }
    }

    pub(super) fn handle_log_book_selected(&mut self, book: LibraryBook) {
        let input = &mut self.reading_log.input;
        input.book_id = Some(book.id);
        input.start_page = prefill_start_page(book.last_page).to_string();
    }

    pub(super) fn handle_log_field_changed(&mut self, field: LogField, value: String) {
        let input = &mut self.reading_log.input;
        match field {
            LogField::Date => input.date = value,
            LogField::StartPage => input.start_page = value,
            LogField::EndPage => input.end_page = value,
        }
    }

    pub(super) fn handle_log_submit(&mut self, effects: &mut Vec<Effect>) {
        if self.reading_log.submitting {
            return;
        }
        match self.reading_log.input.validate() {
            Ok(entry) => {
                info!(
                    book_id = entry.book_id,
                    start = entry.start_page,
                    end = entry.end_page,
                    "Logging reading"
                );
                self.reading_log.submitting = true;
                effects.push(Effect::LogReading(entry));
            }
            Err(err) => self.notify_error(err.to_string()),
        }
    }

    pub(super) fn handle_reading_logged(
        &mut self,
        result: Result<(), String>,
        effects: &mut Vec<Effect>,
    ) {
        self.reading_log.submitting = false;
        match result {
            Ok(()) => {
                self.notify_info("Reading logged.");
                self.reading_log.input = Self::fresh_reading_log_input();
                self.request_library_refresh(effects);
            }
            Err(err) => self.notify_error(format!("Could not log the reading: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::Message;
    use crate::app::state::NoticeKind;
    use crate::app::state::test_support::build_test_app;
    use reading_tracker_core::forms::today_iso;

    fn select_first_book(app: &mut App) {
        let book = app.library.books[0].clone();
        app.reduce(Message::LogBookSelected(book));
    }

    #[test]
    fn selecting_a_book_prefills_next_page() {
        let mut app = build_test_app();
        select_first_book(&mut app);
        assert_eq!(app.reading_log.input.book_id, Some(1));
        assert_eq!(app.reading_log.input.start_page, "41");
    }

    #[test]
    fn end_page_not_after_start_sends_nothing() {
        let mut app = build_test_app();
        select_first_book(&mut app);
        for end in ["41", "12"] {
            app.reduce(Message::LogFieldChanged(LogField::EndPage, end.into()));
            let effects = app.reduce(Message::LogSubmit);
            assert!(effects.is_empty());
            assert_eq!(
                app.notice.as_ref().map(|notice| notice.kind),
                Some(NoticeKind::Error)
            );
            app.notice = None;
        }
    }

    #[test]
    fn valid_log_is_submitted_and_form_resets_on_success() {
        let mut app = build_test_app();
        select_first_book(&mut app);
        app.reduce(Message::LogFieldChanged(LogField::EndPage, "60".into()));
        let effects = app.reduce(Message::LogSubmit);
        assert!(matches!(
            effects.as_slice(),
            [Effect::LogReading(entry)] if entry.book_id == 1 && entry.start_page == 41 && entry.end_page == 60
        ));
        assert!(app.reading_log.submitting);

        let effects = app.reduce(Message::ReadingLogged(Ok(())));
        assert!(matches!(effects.as_slice(), [Effect::LoadLibrary]));
        assert_eq!(app.reading_log.input.book_id, None);
        assert!(app.reading_log.input.end_page.is_empty());
        assert_eq!(app.reading_log.input.date, today_iso());
    }

    #[test]
    fn manual_add_validates_page_count() {
        let mut app = build_test_app();
        app.reduce(Message::ManualFieldChanged(ManualField::Title, "Helena".into()));
        app.reduce(Message::ManualFieldChanged(ManualField::PageCount, "abc".into()));
        assert!(app.reduce(Message::ManualSubmit).is_empty());
        assert!(app.notice.is_some());

        app.reduce(Message::ManualFieldChanged(ManualField::PageCount, "230".into()));
        let effects = app.reduce(Message::ManualSubmit);
        assert!(matches!(
            effects.as_slice(),
            [Effect::AddBook { origin: AddOrigin::Manual, book }]
                if book.title == "Helena" && book.page_count == 230 && book.isbn.is_none()
        ));
    }

    #[test]
    fn manual_form_clears_after_add() {
        let mut app = build_test_app();
        app.reduce(Message::ManualFieldChanged(ManualField::Title, "Helena".into()));
        app.manual.submitting = true;
        app.reduce(Message::BookAdded {
            origin: AddOrigin::Manual,
            title: "Helena".into(),
            result: Ok(()),
        });
        assert!(!app.manual.submitting);
        assert!(app.manual.input.title.is_empty());
    }
}
