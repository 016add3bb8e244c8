//! HTTP retrieval of the menu page and per-page outline pages.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use nodedocs_shared::{NodeDocsError, Result};

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Default timeout in seconds for a page request.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum response size we accept (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// User-Agent string for all requests.
const USER_AGENT: &str = concat!("nodedocs/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Timeout for HTTP requests in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Fetches pages relative to the API base URI.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    base: Url,
}

impl PageFetcher {
    /// Create a fetcher for `base_uri`.
    ///
    /// Page names are appended to the base, so a missing trailing `/` is added.
    pub fn new(base_uri: &str, opts: &FetchOptions) -> Result<Self> {
        let mut base = Url::parse(base_uri)
            .map_err(|e| NodeDocsError::parse(format!("invalid base URI '{base_uri}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| NodeDocsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    /// The base URI every page is resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of a page such as `fs.html`.
    pub fn page_url(&self, pathname: &str) -> Result<Url> {
        self.base
            .join(pathname)
            .map_err(|e| NodeDocsError::parse(format!("invalid page name '{pathname}': {e}")))
    }

    /// Fetch the index page that carries the top-level menu.
    pub async fn fetch_menu(&self) -> Result<String> {
        self.fetch_text(&self.base).await
    }

    /// Fetch one API page (its HTML carries the outline).
    pub async fn fetch_page(&self, pathname: &str) -> Result<String> {
        let url = self.page_url(pathname)?;
        self.fetch_text(&url).await
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| NodeDocsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NodeDocsError::Network(format!("{url}: HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(NodeDocsError::validation(format!(
                    "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| NodeDocsError::Network(format!("{url}: failed to read body: {e}")))?;

        debug!(bytes = body.len(), "page fetched");
        Ok(body)
    }
}
