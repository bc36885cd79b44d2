//! Error types for the mirror module.

use thiserror::Error;

/// Docker one-liner that starts a local Tor proxy able to reach the
/// onion mirror when the clearnet mirrors are blocked.
pub const TOR_PROXY_SUGGESTION: &str =
    "docker run -it -p 8118:8118 -p 9050:9050 -d dperson/torproxy";

/// Errors that can occur while racing a request across mirrors.
///
/// Individual mirror failures are logged and swallowed by the race;
/// only the terminal outcomes surface here.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The mirror host string does not look like a host.
    #[error("cannot parse host {host:?}")]
    HostUnparsable {
        /// The rejected host string.
        host: String,
    },

    /// Every attempted mirror failed at transport level or answered
    /// with a non-200 status.
    #[error(
        "all mirrors failed after {attempted} attempt(s); if the mirrors are blocked on your network, route traffic through a local Tor proxy: {TOR_PROXY_SUGGESTION}"
    )]
    AllMirrorsFailed {
        /// Number of mirrors that were actually attempted.
        attempted: usize,
    },
}

impl FetchError {
    /// Creates a host parse error.
    pub fn host_unparsable(host: impl Into<String>) -> Self {
        Self::HostUnparsable { host: host.into() }
    }

    /// Creates the terminal all-mirrors-failed error.
    #[must_use]
    pub fn all_mirrors_failed(attempted: usize) -> Self {
        Self::AllMirrorsFailed { attempted }
    }
}
