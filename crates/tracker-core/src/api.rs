//! HTTP client for the tracker backend.
//!
//! The backend authenticates with a cookie session created by its form login,
//! so the client keeps a cookie store. Protected routes answer an expired or
//! missing session by redirecting to the login page; that redirect is reported
//! as "not signed in" instead of a JSON parse failure.

use crate::dashboard::parse_library;
use crate::models::{
    CatalogBook, FinalizeSessionRequest, FinalizeSessionResponse, LibraryBook, MutationResponse,
    NewBook, ReadingLogEntry, SessionSummary, StartSessionRequest, StartSessionResponse,
};
use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("reading-tracker/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct TrackerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TrackerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim())
            .with_context(|| format!("Invalid backend URL: {base_url}"))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid endpoint path: {path}"))
    }

    /// Form login; the backend redirects back to the login page on bad credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("login")?)
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .context("Failed to reach the backend")?;
        if is_login_url(response.url()) {
            bail!("Sign-in rejected; check the email and password");
        }
        response
            .error_for_status()
            .context("Sign-in request failed")?;
        info!(base_url = %self.base_url, "Signed in to backend");
        Ok(())
    }

    pub async fn load_library(&self) -> Result<Vec<LibraryBook>> {
        let response = self
            .http
            .get(self.endpoint("dashboard")?)
            .send()
            .await
            .context("Failed to load the dashboard")?;
        ensure_signed_in(&response)?;
        let html = response
            .error_for_status()
            .context("Dashboard request failed")?
            .text()
            .await
            .context("Failed to read the dashboard")?;
        Ok(parse_library(&html))
    }

    pub async fn search_catalog(&self, query: &str) -> Result<Vec<CatalogBook>> {
        debug!(%query, "Searching catalog");
        let response = self
            .http
            .get(self.endpoint("api/buscar-livros")?)
            .query(&[("q", query)])
            .send()
            .await
            .context("Failed to reach the catalog search")?;
        read_json(response, "catalog search").await
    }

    pub async fn add_book(&self, book: &NewBook) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("api/adicionar-livro")?)
            .json(book)
            .send()
            .await
            .context("Failed to send the book")?;
        expect_success(response, "add book").await
    }

    pub async fn log_reading(&self, entry: &ReadingLogEntry) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("api/registrar-leitura")?)
            .json(entry)
            .send()
            .await
            .context("Failed to send the reading log")?;
        expect_success(response, "log reading").await
    }

    /// Opens a timed session for `book_id` and returns the backend's session id.
    pub async fn start_session(&self, book_id: u64) -> Result<u64> {
        let response = self
            .http
            .post(self.endpoint("api/iniciar-sessao")?)
            .json(&StartSessionRequest { book_id })
            .send()
            .await
            .context("Failed to start the session")?;
        let started: StartSessionResponse = read_json(response, "start session").await?;
        Ok(started.session_id)
    }

    /// Closes a timed session; returns the duration in minutes computed by the backend.
    pub async fn finalize_session(&self, request: FinalizeSessionRequest) -> Result<u32> {
        let response = self
            .http
            .post(self.endpoint("api/finalizar-sessao")?)
            .json(&request)
            .send()
            .await
            .context("Failed to save the session")?;
        let finished: FinalizeSessionResponse = read_json(response, "finalize session").await?;
        if !finished.success {
            bail!("The backend did not confirm the session");
        }
        Ok(finished.duration_minutes)
    }

    pub async fn session_history(&self, book_id: u64) -> Result<Vec<SessionSummary>> {
        let response = self
            .http
            .get(self.endpoint(&format!("api/historico-sessoes/{book_id}"))?)
            .send()
            .await
            .context("Failed to load session history")?;
        read_json(response, "session history").await
    }

    /// Raw bytes of a cover image; covers live on the catalog provider, not the backend.
    pub async fn fetch_cover(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch cover {url}"))?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

fn is_login_url(url: &Url) -> bool {
    url.path().trim_end_matches('/').ends_with("/login")
}

fn ensure_signed_in(response: &Response) -> Result<()> {
    if is_login_url(response.url()) {
        bail!("Not signed in to the backend; sign in again");
    }
    Ok(())
}

/// `{"error": "..."}` bodies carry a message worth showing as-is.
fn backend_error(body: &str) -> Option<String> {
    serde_json::from_str::<MutationResponse>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    ensure_signed_in(&response)?;
    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read the {what} response"))?;
    if !status.is_success() {
        let message =
            backend_error(&body).unwrap_or_else(|| format!("{what} failed with HTTP {status}"));
        warn!(%status, what, "Backend rejected request: {message}");
        return Err(anyhow!(message));
    }
    serde_json::from_str(&body).with_context(|| format!("Unexpected {what} response"))
}

async fn expect_success(response: Response, what: &str) -> Result<()> {
    let parsed: MutationResponse = read_json(response, what).await?;
    match (parsed.success, parsed.error) {
        (Some(true), _) => Ok(()),
        (_, Some(message)) if !message.trim().is_empty() => Err(anyhow!(message)),
        _ => Err(anyhow!("The backend did not confirm the {what} request")),
    }
}
