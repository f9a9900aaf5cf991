//! HTTP client wrapper for fetching edition pages.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// Browser user agent; the portal rejects unknown clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const ACCEPT_LANGUAGES: &str = "lt-LT,lt;q=0.9,en-US;q=0.8,en;q=0.7";

const PORTAL_REFERER: &str = "https://e-seimas.lrs.lt/";

/// Source of raw edition page markup.
pub trait PageFetcher {
    /// Fetch the markup at `url`.
    ///
    /// # Errors
    /// Fails on timeout, network failure or a non-success status.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` with the fixed timeout and browser headers.
pub fn create_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGES));
    headers.insert(REFERER, HeaderValue::from_static(PORTAL_REFERER));

    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Fetcher backed by a blocking HTTP client.
///
/// Each page is requested once; failures are not retried.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default client.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client()?,
        })
    }

    /// Create a fetcher around an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let fetch_error = |source| HarvesterError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_error)?;

        tracing::debug!(url = %url, status = %response.status(), "Fetched page");

        response.text().map_err(fetch_error)
    }
}
