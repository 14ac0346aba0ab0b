use super::super::state::{AddOrigin, App, CoverState, SearchStatus};
use super::Effect;
use iced::widget::image;
use reading_tracker_core::forms::normalize_query;
use reading_tracker_core::{CatalogBook, NewBook};
use std::collections::HashSet;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_search_submit(&mut self, effects: &mut Vec<Effect>) {
        let query = match normalize_query(&self.catalog.query) {
            Ok(query) => query,
            Err(err) => {
                self.notify_info(err.to_string());
                return;
            }
        };
        self.catalog.request_id += 1;
        self.catalog.status = SearchStatus::Loading;
        effects.push(Effect::SearchCatalog {
            request_id: self.catalog.request_id,
            query,
        });
    }

    pub(super) fn handle_search_completed(
        &mut self,
        request_id: u64,
        result: Result<Vec<CatalogBook>, String>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.catalog.request_id {
            debug!(
                request_id,
                current = self.catalog.request_id,
                "Discarding superseded search results"
            );
            return;
        }
        if let Ok(books) = &result {
            let current: HashSet<&str> = books.iter().filter_map(CatalogBook::cover).collect();
            self.covers.retain(|url, _| current.contains(url.as_str()));
        }
        self.catalog.status = match result {
            Ok(books) if books.is_empty() => SearchStatus::NotFound,
            Ok(books) => {
                info!(request_id, count = books.len(), "Catalog search returned");
                for url in books.iter().filter_map(CatalogBook::cover) {
                    if !self.covers.contains_key(url) {
                        self.covers.insert(url.to_string(), CoverState::Loading);
                        effects.push(Effect::LoadCover(url.to_string()));
                    }
                }
                SearchStatus::Results(books)
            }
            Err(err) => {
                warn!(request_id, "Catalog search failed: {err}");
                SearchStatus::Failed(err)
            }
        };
    }

    pub(super) fn handle_cover_loaded(&mut self, url: String, bytes: Option<Vec<u8>>) {
        let state = match bytes {
            Some(bytes) if !bytes.is_empty() => CoverState::Ready(image::Handle::from_bytes(bytes)),
            _ => CoverState::Missing,
        };
        self.covers.insert(url, state);
    }

    pub(super) fn handle_add_from_catalog(&mut self, book: CatalogBook, effects: &mut Vec<Effect>) {
        if self.catalog.adding.is_some() {
            return;
        }
        let request = NewBook::from(&book);
        info!(title = %request.title, external_id = ?request.external_id, "Adding catalog book");
        self.catalog.adding = book.external_id.clone().or_else(|| Some(book.title.clone()));
        effects.push(Effect::AddBook {
            origin: AddOrigin::Catalog,
            book: request,
        });
    }

    pub(super) fn handle_book_added(
        &mut self,
        origin: AddOrigin,
        title: String,
        result: Result<(), String>,
        effects: &mut Vec<Effect>,
    ) {
        match origin {
            AddOrigin::Catalog => self.catalog.adding = None,
            AddOrigin::Manual => self.manual.submitting = false,
        }
        match result {
            Ok(()) => {
                self.notify_info(format!("\"{title}\" was added to your library."));
                if origin == AddOrigin::Manual {
                    self.manual.input = Default::default();
                }
                self.request_library_refresh(effects);
            }
            Err(err) => self.notify_error(format!("Could not add \"{title}\": {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::Message;
    use crate::app::state::NoticeKind;
    use crate::app::state::test_support::build_test_app;

    fn record(title: &str, cover: Option<&str>) -> CatalogBook {
        CatalogBook {
            external_id: Some(format!("g-{title}")),
            title: title.to_string(),
            author: "Machado de Assis".to_string(),
            isbn: None,
            page_count: 256,
            cover_url: cover.map(str::to_string),
            description: None,
        }
    }

    #[test]
    fn blank_search_shows_notice_without_request() {
        let mut app = build_test_app();
        app.catalog.query = "   ".into();
        let effects = app.reduce(Message::SearchSubmit);
        assert!(effects.is_empty());
        assert!(app.notice.is_some());
        assert_eq!(app.catalog.status, SearchStatus::Idle);
    }

    #[test]
    fn search_sends_trimmed_query() {
        let mut app = build_test_app();
        app.catalog.query = "  dom casmurro ".into();
        let effects = app.reduce(Message::SearchSubmit);
        assert!(matches!(
            effects.as_slice(),
            [Effect::SearchCatalog { request_id: 1, query }] if query == "dom casmurro"
        ));
        assert_eq!(app.catalog.status, SearchStatus::Loading);
    }

    #[test]
    fn results_keep_response_order_and_fetch_covers_once() {
        let mut app = build_test_app();
        app.catalog.query = "machado".into();
        app.reduce(Message::SearchSubmit);
        let books = vec![
            record("Helena", Some("http://covers/1.jpg")),
            record("Iaiá Garcia", Some("")),
            record("Quincas Borba", Some("http://covers/1.jpg")),
        ];
        let effects = app.reduce(Message::SearchCompleted {
            request_id: 1,
            result: Ok(books.clone()),
        });
        assert_eq!(app.catalog.status, SearchStatus::Results(books));
        assert_eq!(effects, vec![Effect::LoadCover("http://covers/1.jpg".into())]);
    }

    #[test]
    fn empty_results_report_not_found() {
        let mut app = build_test_app();
        app.catalog.query = "zzz".into();
        app.reduce(Message::SearchSubmit);
        app.reduce(Message::SearchCompleted {
            request_id: 1,
            result: Ok(Vec::new()),
        });
        assert_eq!(app.catalog.status, SearchStatus::NotFound);
    }

    #[test]
    fn superseded_results_are_discarded() {
        let mut app = build_test_app();
        app.catalog.query = "first".into();
        app.reduce(Message::SearchSubmit);
        app.catalog.query = "second".into();
        app.reduce(Message::SearchSubmit);
        app.reduce(Message::SearchCompleted {
            request_id: 1,
            result: Ok(vec![record("Stale", None)]),
        });
        assert_eq!(app.catalog.status, SearchStatus::Loading);
    }

    #[test]
    fn failed_search_renders_inline_without_notice() {
        let mut app = build_test_app();
        app.catalog.query = "machado".into();
        app.reduce(Message::SearchSubmit);
        let effects = app.reduce(Message::SearchCompleted {
            request_id: 1,
            result: Err("HTTP 500".into()),
        });
        assert!(effects.is_empty());
        assert!(matches!(&app.catalog.status, SearchStatus::Failed(err) if err == "HTTP 500"));
        assert!(app.notice.is_none());
    }

    #[test]
    fn new_results_drop_covers_from_previous_search() {
        let mut app = build_test_app();
        app.catalog.query = "machado".into();
        app.reduce(Message::SearchSubmit);
        app.reduce(Message::SearchCompleted {
            request_id: 1,
            result: Ok(vec![
                record("Helena", Some("http://covers/1.jpg")),
                record("Quincas Borba", Some("http://covers/2.jpg")),
            ]),
        });
        app.reduce(Message::CoverLoaded {
            url: "http://covers/1.jpg".into(),
            bytes: None,
        });
        assert_eq!(app.covers.len(), 2);

        app.catalog.query = "alencar".into();
        app.reduce(Message::SearchSubmit);
        let effects = app.reduce(Message::SearchCompleted {
            request_id: 2,
            result: Ok(vec![
                record("Iracema", Some("http://covers/3.jpg")),
                record("Helena", Some("http://covers/1.jpg")),
            ]),
        });
        assert_eq!(effects, vec![Effect::LoadCover("http://covers/3.jpg".into())]);
        assert_eq!(app.covers.len(), 2);
        assert!(matches!(app.covers.get("http://covers/1.jpg"), Some(CoverState::Missing)));
        assert!(!app.covers.contains_key("http://covers/2.jpg"));
    }

    #[test]
    fn failed_add_shows_backend_message() {
        let mut app = build_test_app();
        let effects = app.reduce(Message::AddFromCatalog(record("Helena", None)));
        assert!(matches!(
            effects.as_slice(),
            [Effect::AddBook { origin: AddOrigin::Catalog, book }] if book.title == "Helena"
        ));

        let effects = app.reduce(Message::BookAdded {
            origin: AddOrigin::Catalog,
            title: "Helena".into(),
            result: Err("Livro já cadastrado".into()),
        });
        assert!(effects.is_empty());
        assert!(app.catalog.adding.is_none());
        let notice = app.notice.expect("notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("Livro já cadastrado"));
    }

    #[test]
    fn successful_add_refreshes_library() {
        let mut app = build_test_app();
        let effects = app.reduce(Message::BookAdded {
            origin: AddOrigin::Catalog,
            title: "Helena".into(),
            result: Ok(()),
        });
        assert!(matches!(effects.as_slice(), [Effect::LoadLibrary]));
        assert_eq!(app.notice.map(|notice| notice.kind), Some(NoticeKind::Info));
    }
}
