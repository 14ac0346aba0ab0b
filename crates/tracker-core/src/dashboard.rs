//! Library extraction from the backend's dashboard page.
//!
//! The backend has no JSON endpoint for the user's books; the dashboard
//! renders them as `<option value="<id>" data-ultima="<last page>">` entries
//! inside the reading-log and stopwatch selectors.

use crate::models::LibraryBook;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

static BOOK_OPTIONS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("select#select-livro option, select#livro-cronometro option")
        .expect("static selector is valid")
});

/// Parse every selectable book, de-duplicated by id in document order.
pub fn parse_library(html: &str) -> Vec<LibraryBook> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut books = Vec::new();

    for option in document.select(&BOOK_OPTIONS) {
        let Some(id) = option
            .value()
            .attr("value")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        let title = option
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        books.push(LibraryBook {
            id,
            title,
            last_page: last_page_attr(option.value().attr("data-ultima")),
        });
    }

    debug!(count = books.len(), "Parsed library from dashboard");
    books
}

/// `data-ultima` as a page number; absent or garbage means nothing read yet.
pub fn last_page_attr(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHBOARD: &str = r#"
        <html><body>
          <form id="form-registrar-leitura">
            <select id="select-livro" name="livro_id">
              <option value="">Selecione...</option>
              <option value="3" data-ultima="41">  Dom   Casmurro </option>
              <option value="7">Memórias Póstumas</option>
            </select>
          </form>
          <select id="livro-cronometro">
            <option value="">Selecione...</option>
            <option value="3" data-ultima="41">Dom Casmurro</option>
            <option value="9" data-ultima="oops">Iracema</option>
          </select>
          <select id="other"><option value="99">Not a book</option></select>
        </body></html>
    "#;

    #[test]
    fn extracts_books_once_in_document_order() {
        let books = parse_library(DASHBOARD);
        let ids: Vec<u64> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 7, 9]);
        assert_eq!(books[0].title, "Dom Casmurro");
        assert_eq!(books[0].last_page, 41);
    }

    #[test]
    fn missing_or_invalid_last_page_defaults_to_zero() {
        let books = parse_library(DASHBOARD);
        assert_eq!(books[1].last_page, 0);
        assert_eq!(books[2].last_page, 0);
    }

    #[test]
    fn page_without_selectors_yields_empty_library() {
        assert!(parse_library("<html><body><p>login</p></body></html>").is_empty());
    }
}
