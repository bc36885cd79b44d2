//! Mirror registry and first-success fetching.
//!
//! Every mirror serves the same catalogue, so callers never pick one:
//! the registry carries the candidate hosts and [`MirrorRegistry::fetch`]
//! races a single logical request across all of them, returning whichever
//! answers first.

mod error;
mod race;
mod request;

pub use error::{FetchError, TOR_PROXY_SUGGESTION};
pub use request::BROWSER_USER_AGENT;

use reqwest::header::HeaderMap;
use reqwest::{Client, Response};

/// Hosts tried when no explicit mirror is configured.
pub const DEFAULT_MIRRORS: [&str; 3] = [
    "flibusta.is",
    "flibusta.site",
    "flibustahezeous3.onion",
];

/// The set of mirror hosts a fetch races across.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRegistry {
    hosts: Vec<String>,
}

impl MirrorRegistry {
    /// Builds the default registry, optionally fronted by an extra host.
    ///
    /// The extra host joins the race alongside the defaults, it does not
    /// replace them.
    #[must_use]
    pub fn new(extra_host: Option<String>) -> Self {
        let mut hosts = Vec::with_capacity(DEFAULT_MIRRORS.len() + 1);
        if let Some(host) = extra_host {
            hosts.push(host);
        }
        hosts.extend(DEFAULT_MIRRORS.iter().map(|host| (*host).to_string()));
        Self { hosts }
    }

    /// Builds a registry from an explicit host list, defaults excluded.
    #[must_use]
    pub fn from_hosts(hosts: Vec<String>) -> Self {
        Self { hosts }
    }

    /// The registered hosts. Order carries no priority; arrival order
    /// decides the winner.
    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Fetches `path` from whichever mirror answers first with HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::AllMirrorsFailed`] when every attempt failed
    /// or no registered host was usable.
    pub async fn fetch(
        &self,
        client: &Client,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<Response, FetchError> {
        race::race(client, &self.hosts, path, headers).await
    }
}
