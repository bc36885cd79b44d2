//! High-level client tying the mirror race to the page parsers.
//!
//! [`FlibustaClient`] owns the shared HTTP client (proxy, timeouts,
//! compression) and the mirror registry, and exposes the three catalogue
//! operations: search, info, download.

mod error;
mod filename;

pub use error::ClientError;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{CONTENT_DISPOSITION, HeaderMap};
use reqwest::{Client, Proxy};
use tracing::{info, instrument};

use crate::config::Config;
use crate::mirror::MirrorRegistry;
use crate::parse::{self, InfoResult, ListItem};
use crate::paths;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// The closed set of formats a book can be downloaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFormat {
    Fb2,
    Epub,
    Mobi,
}

impl BookFormat {
    /// All supported formats, in canonical order.
    pub const ALL: [Self; 3] = [Self::Fb2, Self::Epub, Self::Mobi];

    /// The lowercase name used in download paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fb2 => "fb2",
            Self::Epub => "epub",
            Self::Mobi => "mobi",
        }
    }
}

impl FromStr for BookFormat {
    type Err = ClientError;

    /// Exact-match parsing; case variants and aliases are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fb2" => Ok(Self::Fb2),
            "epub" => Ok(Self::Epub),
            "mobi" => Ok(Self::Mobi),
            other => Err(ClientError::invalid_format(other)),
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw bytes of a downloaded book plus the server-supplied file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// Sanitized file name from the Content-Disposition header; empty
    /// when the header carried none.
    pub name: String,
    /// The book bytes exactly as served.
    pub data: Vec<u8>,
}

/// High-level client for the three catalogue operations.
#[derive(Debug, Clone)]
pub struct FlibustaClient {
    http: Client,
    registry: MirrorRegistry,
}

impl FlibustaClient {
    /// Builds a client from configuration: the shared HTTP client plus
    /// the default mirror registry, extended with the configured extra
    /// host.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Init`] when the HTTP client cannot be
    /// constructed, e.g. when `reqwest` rejects the proxy URL.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Self::with_registry(config, MirrorRegistry::new(config.extra_host.clone()))
    }

    /// Builds a client that races across an explicit registry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Init`] when the HTTP client cannot be
    /// constructed.
    pub fn with_registry(config: &Config, registry: MirrorRegistry) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .gzip(true);

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(ClientError::init)?;
            builder = builder.proxy(proxy);
        }

        let http = builder.build().map_err(ClientError::init)?;
        Ok(Self { http, registry })
    }

    /// Searches the catalogue for `query` and returns the result rows.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fetch`] when no mirror answered, and
    /// [`ClientError::Parse`] when the winning page carried no result
    /// list.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<ListItem>, ClientError> {
        let path = paths::search_path(query);
        let response = self
            .registry
            .fetch(&self.http, &path, &HeaderMap::new())
            .await?;
        let body = response.text().await.map_err(ClientError::body)?;
        Ok(parse::parse_search(&body)?)
    }

    /// Fetches the metadata page for one book.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fetch`] when no mirror answered, and
    /// [`ClientError::Parse`] when the winning page was not a book page.
    #[instrument(skip(self))]
    pub async fn info(&self, id: &str) -> Result<InfoResult, ClientError> {
        let path = paths::info_path(id);
        let response = self
            .registry
            .fetch(&self.http, &path, &HeaderMap::new())
            .await?;
        let body = response.text().await.map_err(ClientError::body)?;
        Ok(parse::parse_info(&body)?)
    }

    /// Downloads one book in `format`.
    ///
    /// The format is validated before any network attempt; with an
    /// unsupported format no mirror is contacted at all.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidFormat`] for formats outside the
    /// supported set and [`ClientError::Fetch`] when no mirror answered.
    #[instrument(skip(self))]
    pub async fn download(&self, id: &str, format: &str) -> Result<DownloadResult, ClientError> {
        let format = BookFormat::from_str(format)?;
        let path = paths::download_path(id, format.as_str());
        let response = self
            .registry
            .fetch(&self.http, &path, &HeaderMap::new())
            .await?;

        let name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename::parse_content_disposition)
            .map(|name| filename::sanitize_filename(&name))
            .unwrap_or_default();
        let data = response.bytes().await.map_err(ClientError::body)?.to_vec();

        info!(id, format = %format, bytes = data.len(), "book downloaded");
        Ok(DownloadResult { name, data })
    }
}
