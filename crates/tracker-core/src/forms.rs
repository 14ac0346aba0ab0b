use crate::models::{NewBook, ReadingLogEntry};
use chrono::Local;

/// Validation failures reported before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    EmptyQuery,
    MissingTitle,
    InvalidPageCount,
    MissingBook,
    MissingDate,
    InvalidPage(&'static str),
    EndPageNotAfterStart { start: u32, end: u32 },
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::EmptyQuery => write!(f, "Type something to search for."),
            FormError::MissingTitle => write!(f, "The title is required."),
            FormError::InvalidPageCount => {
                write!(f, "The page count must be a whole number greater than zero.")
            }
            FormError::MissingBook => write!(f, "Select a book first."),
            FormError::MissingDate => write!(f, "The date is required."),
            FormError::InvalidPage(field) => write!(f, "The {field} must be a whole number."),
            FormError::EndPageNotAfterStart { start, end } => write!(
                f,
                "The end page ({end}) must be greater than the start page ({start})."
            ),
        }
    }
}

impl std::error::Error for FormError {}

/// Trimmed catalog query, rejecting blank input.
pub fn normalize_query(raw: &str) -> Result<String, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(FormError::EmptyQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Raw text of the manual-add form.
#[derive(Debug, Clone, Default)]
pub struct ManualBookInput {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub page_count: String,
}

impl ManualBookInput {
    pub fn validate(&self) -> Result<NewBook, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        let page_count = self
            .page_count
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|pages| *pages > 0)
            .ok_or(FormError::InvalidPageCount)?;
        let isbn = self.isbn.trim();

        Ok(NewBook {
            title: title.to_string(),
            author: self.author.trim().to_string(),
            isbn: (!isbn.is_empty()).then(|| isbn.to_string()),
            page_count,
            cover_url: None,
            external_id: None,
        })
    }
}

/// Raw state of the reading-log form.
#[derive(Debug, Clone, Default)]
pub struct ReadingLogInput {
    pub book_id: Option<u64>,
    pub date: String,
    pub start_page: String,
    pub end_page: String,
}

impl ReadingLogInput {
    pub fn validate(&self) -> Result<ReadingLogEntry, FormError> {
        let book_id = self.book_id.ok_or(FormError::MissingBook)?;
        let date = self.date.trim();
        if date.is_empty() {
            return Err(FormError::MissingDate);
        }
        let start_page = parse_page(&self.start_page, "start page")?;
        let end_page = parse_page(&self.end_page, "end page")?;
        if end_page <= start_page {
            return Err(FormError::EndPageNotAfterStart {
                start: start_page,
                end: end_page,
            });
        }

        Ok(ReadingLogEntry {
            book_id,
            date: date.to_string(),
            start_page,
            end_page,
        })
    }
}

pub fn parse_page(raw: &str, field: &'static str) -> Result<u32, FormError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| FormError::InvalidPage(field))
}

/// First page of the next reading block given the last page read.
pub fn prefill_start_page(last_page: u32) -> u32 {
    last_page.saturating_add(1)
}

/// Local date in the `YYYY-MM-DD` form the backend expects.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_input(start: u32, end: u32) -> ReadingLogInput {
        ReadingLogInput {
            book_id: Some(1),
            date: "2026-03-01".into(),
            start_page: start.to_string(),
            end_page: end.to_string(),
        }
    }

    #[test]
    fn blank_queries_are_rejected() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(normalize_query(raw), Err(FormError::EmptyQuery));
        }
        assert_eq!(normalize_query("  duna ").as_deref(), Ok("duna"));
    }

    #[test]
    fn end_page_must_exceed_start_page() {
        for start in 0..25u32 {
            for end in 0..=start {
                assert_eq!(
                    log_input(start, end).validate(),
                    Err(FormError::EndPageNotAfterStart { start, end })
                );
            }
        }
        let entry = log_input(10, 11).validate().expect("valid range");
        assert_eq!((entry.start_page, entry.end_page), (10, 11));
    }

    #[test]
    fn reading_log_requires_book_and_numeric_pages() {
        let mut input = log_input(1, 2);
        input.book_id = None;
        assert_eq!(input.validate(), Err(FormError::MissingBook));

        let mut input = log_input(1, 2);
        input.end_page = "twelve".into();
        assert_eq!(input.validate(), Err(FormError::InvalidPage("end page")));
    }

    #[test]
    fn manual_book_normalizes_optional_fields() {
        let input = ManualBookInput {
            title: "  O Cortiço ".into(),
            author: String::new(),
            isbn: "   ".into(),
            page_count: "212".into(),
        };
        let book = input.validate().expect("valid book");
        assert_eq!(book.title, "O Cortiço");
        assert_eq!(book.author, "");
        assert_eq!(book.isbn, None);
        assert_eq!(book.page_count, 212);
    }

    #[test]
    fn manual_book_rejects_non_numeric_page_count() {
        for pages in ["", "abc", "0", "-3", "12.5"] {
            let input = ManualBookInput {
                title: "Title".into(),
                page_count: pages.into(),
                ..ManualBookInput::default()
            };
            assert_eq!(input.validate(), Err(FormError::InvalidPageCount));
        }
    }

    #[test]
    fn prefill_starts_after_last_page() {
        assert_eq!(prefill_start_page(0), 1);
        assert_eq!(prefill_start_page(41), 42);
    }

    #[test]
    fn today_is_iso_formatted() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
