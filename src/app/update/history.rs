use super::super::state::{App, HistoryStatus, HistoryTarget, HistoryView};
use super::Effect;
use reading_tracker_core::SessionSummary;
use tracing::{debug, warn};

impl App {
    pub(super) fn handle_open_history_modal(&mut self, book_id: u64, effects: &mut Vec<Effect>) {
        self.load_history(HistoryTarget::Modal, book_id, effects);
    }

    pub(super) fn handle_close_modal(&mut self) {
        self.history_modal = None;
    }

    /// Point `target` at `book_id` and fetch its sessions.
    pub(super) fn load_history(
        &mut self,
        target: HistoryTarget,
        book_id: u64,
        effects: &mut Vec<Effect>,
    ) {
        let view = HistoryView::loading(book_id, self.book_title(book_id));
        *self.history_slot(target) = Some(view);
        effects.push(Effect::LoadHistory { target, book_id });
    }

    pub(super) fn handle_history_loaded(
        &mut self,
        target: HistoryTarget,
        book_id: u64,
        result: Result<Vec<SessionSummary>, String>,
    ) {
        let Some(view) = self
            .history_slot(target)
            .as_mut()
            .filter(|view| view.book_id == book_id)
        else {
            debug!(?target, book_id, "Discarding history for a book no longer shown");
            return;
        };
        view.status = match result {
            Ok(sessions) if sessions.is_empty() => HistoryStatus::Empty,
            Ok(sessions) => HistoryStatus::Loaded(sessions),
            Err(err) => {
                warn!(?target, book_id, "Failed to load session history: {err}");
                HistoryStatus::Failed(err)
            }
        };
    }

    fn history_slot(&mut self, target: HistoryTarget) -> &mut Option<HistoryView> {
        match target {
            HistoryTarget::Stopwatch => &mut self.timer.history,
            HistoryTarget::Modal => &mut self.history_modal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::Message;
    use crate::app::state::test_support::build_test_app;

    fn session(start: &str, pages: u32) -> SessionSummary {
        SessionSummary {
            id: None,
            started_at: start.to_string(),
            duration_minutes: Some(25),
            start_page: Some(10),
            end_page: Some(10 + pages),
            pages_read: pages,
        }
    }

    #[test]
    fn modal_opens_loading_and_requests_history() {
        let mut app = build_test_app();
        let effects = app.reduce(Message::OpenHistoryModal(2));
        assert_eq!(
            effects,
            vec![Effect::LoadHistory {
                target: HistoryTarget::Modal,
                book_id: 2,
            }]
        );
        let modal = app.history_modal.as_ref().expect("modal");
        assert_eq!(modal.title, "Iracema");
        assert_eq!(modal.status, HistoryStatus::Loading);
    }

    #[test]
    fn history_rows_keep_received_order() {
        let mut app = build_test_app();
        app.reduce(Message::OpenHistoryModal(1));
        let rows = vec![session("03/05/2024 20:10", 12), session("01/05/2024 09:00", 4)];
        app.reduce(Message::HistoryLoaded {
            target: HistoryTarget::Modal,
            book_id: 1,
            result: Ok(rows.clone()),
        });
        assert_eq!(
            app.history_modal.map(|modal| modal.status),
            Some(HistoryStatus::Loaded(rows))
        );
    }

    #[test]
    fn empty_and_failed_history_render_inline() {
        let mut app = build_test_app();
        app.reduce(Message::OpenHistoryModal(1));
        app.reduce(Message::HistoryLoaded {
            target: HistoryTarget::Modal,
            book_id: 1,
            result: Ok(Vec::new()),
        });
        assert_eq!(
            app.history_modal.as_ref().map(|modal| modal.status.clone()),
            Some(HistoryStatus::Empty)
        );

        app.reduce(Message::OpenHistoryModal(2));
        app.reduce(Message::HistoryLoaded {
            target: HistoryTarget::Modal,
            book_id: 2,
            result: Err("boom".into()),
        });
        assert!(matches!(
            app.history_modal.as_ref().map(|modal| &modal.status),
            Some(HistoryStatus::Failed(_))
        ));
        assert!(app.notice.is_none());
    }

    #[test]
    fn stale_history_is_ignored_and_close_hides_modal() {
        let mut app = build_test_app();
        app.reduce(Message::OpenHistoryModal(1));
        app.reduce(Message::OpenHistoryModal(2));
        app.reduce(Message::HistoryLoaded {
            target: HistoryTarget::Modal,
            book_id: 1,
            result: Ok(vec![session("x", 1)]),
        });
        assert_eq!(
            app.history_modal.as_ref().map(|modal| modal.status.clone()),
            Some(HistoryStatus::Loading)
        );

        app.reduce(Message::CloseModal);
        assert!(app.history_modal.is_none());
    }
}
