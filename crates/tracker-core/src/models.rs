use serde::{Deserialize, Serialize};

/// One record returned by the catalog search proxy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogBook {
    #[serde(rename = "google_id", default)]
    pub external_id: Option<String>,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "autor", default)]
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(rename = "paginas", default)]
    pub page_count: u32,
    #[serde(rename = "capa_url", default)]
    pub cover_url: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
}

impl CatalogBook {
    /// Cover URL, treating the backend's empty string as "no cover".
    pub fn cover(&self) -> Option<&str> {
        self.cover_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Body of `POST /api/adicionar-livro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    pub isbn: Option<String>,
    #[serde(rename = "paginas")]
    pub page_count: u32,
    #[serde(rename = "capa_url", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(rename = "google_id", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl From<&CatalogBook> for NewBook {
    fn from(book: &CatalogBook) -> Self {
        NewBook {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            page_count: book.page_count,
            cover_url: book.cover().map(str::to_string),
            external_id: book.external_id.clone(),
        }
    }
}

/// Body of `POST /api/registrar-leitura`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingLogEntry {
    #[serde(rename = "livro_id")]
    pub book_id: u64,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "pagina_inicial")]
    pub start_page: u32,
    #[serde(rename = "pagina_final")]
    pub end_page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartSessionRequest {
    #[serde(rename = "livro_id")]
    pub book_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StartSessionResponse {
    #[serde(rename = "sessao_id")]
    pub session_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalizeSessionRequest {
    #[serde(rename = "sessao_id")]
    pub session_id: u64,
    #[serde(rename = "pagina_final")]
    pub end_page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FinalizeSessionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "duracao_minutos", default)]
    pub duration_minutes: u32,
}

/// A finished timed session as listed by `/api/historico-sessoes/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionSummary {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "inicio")]
    pub started_at: String,
    #[serde(rename = "duracao_minutos", default)]
    pub duration_minutes: Option<u32>,
    #[serde(rename = "pagina_inicial", default)]
    pub start_page: Option<u32>,
    #[serde(rename = "pagina_final", default)]
    pub end_page: Option<u32>,
    #[serde(rename = "paginas_lidas", default)]
    pub pages_read: u32,
}

impl SessionSummary {
    pub fn page_range_label(&self) -> String {
        let fmt = |page: Option<u32>| page.map(|p| p.to_string()).unwrap_or_else(|| "?".into());
        format!(
            "{} - {} ({} pages)",
            fmt(self.start_page),
            fmt(self.end_page),
            self.pages_read
        )
    }

    pub fn duration_label(&self) -> String {
        format!("{} min", self.duration_minutes.unwrap_or(0))
    }
}

/// A book already in the user's library, as offered by the dashboard selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryBook {
    pub id: u64,
    pub title: String,
    pub last_page: u32,
}

impl std::fmt::Display for LibraryBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Envelope shared by the mutating endpoints: `{success: true}` or `{error: "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MutationResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_book_tolerates_backend_defaults() {
        let raw = json!({
            "google_id": "abc123",
            "titulo": "Dom Casmurro",
            "autor": "Machado de Assis",
            "isbn": null,
            "paginas": 256,
            "capa_url": "",
            "descricao": ""
        });
        let book: CatalogBook = serde_json::from_value(raw).expect("catalog record");
        assert_eq!(book.title, "Dom Casmurro");
        assert_eq!(book.page_count, 256);
        assert_eq!(book.cover(), None);
        assert_eq!(book.external_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn new_book_from_catalog_keeps_backend_field_names() {
        let book = CatalogBook {
            external_id: Some("g-1".into()),
            title: "Quincas Borba".into(),
            author: "Machado de Assis".into(),
            isbn: Some("9788535910667".into()),
            page_count: 320,
            cover_url: Some("http://covers/q.jpg".into()),
            description: Some("ignored".into()),
        };
        let body = serde_json::to_value(NewBook::from(&book)).expect("serialize");
        assert_eq!(
            body,
            json!({
                "titulo": "Quincas Borba",
                "autor": "Machado de Assis",
                "isbn": "9788535910667",
                "paginas": 320,
                "capa_url": "http://covers/q.jpg",
                "google_id": "g-1"
            })
        );
    }

    #[test]
    fn manual_book_sends_null_isbn_and_omits_catalog_fields() {
        let body = serde_json::to_value(NewBook {
            title: "Notes".into(),
            author: String::new(),
            isbn: None,
            page_count: 90,
            cover_url: None,
            external_id: None,
        })
        .expect("serialize");
        assert_eq!(
            body,
            json!({"titulo": "Notes", "autor": "", "isbn": null, "paginas": 90})
        );
    }

    #[test]
    fn session_summary_labels_handle_missing_pages() {
        let summary: SessionSummary = serde_json::from_value(json!({
            "id": 4,
            "inicio": "01/02/2026 20:15",
            "duracao_minutos": null,
            "pagina_inicial": 10,
            "pagina_final": null,
            "paginas_lidas": 0
        }))
        .expect("summary");
        assert_eq!(summary.duration_label(), "0 min");
        assert_eq!(summary.page_range_label(), "10 - ? (0 pages)");
    }
}
