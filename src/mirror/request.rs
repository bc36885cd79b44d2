//! Mirror host parsing and per-mirror request construction.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::{Client, RequestBuilder};

use super::error::FetchError;

/// Browser User-Agent sent with every mirror request.
///
/// The mirrors reject obvious non-browser clients, so the racer always
/// identifies as a desktop browser.
pub const BROWSER_USER_AGENT: &str = "Safari: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_0) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3770.100 Safari/537.36";

/// Accepted mirror host shape: optional `http`/`https` scheme, a
/// hostname of lowercase letters, digits and dots, an optional port and
/// an optional trailing slash.
static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_host_regex(r"^(?:(?P<scheme>https?)://)?(?P<host>[0-9a-z.]+)(?::(?P<port>[0-9]+))?/?$")
});

#[allow(clippy::unwrap_used)]
fn compile_host_regex(pattern: &'static str) -> Regex {
    // The pattern is a compile-time literal and always compiles.
    Regex::new(pattern).unwrap()
}

const DEFAULT_SCHEME: &str = "http";

/// Normalizes a mirror host string into a `scheme://authority` base URL.
///
/// The scheme defaults to `http` when absent; an explicit port is kept.
///
/// # Errors
///
/// Returns [`FetchError::HostUnparsable`] when the string does not match
/// the accepted host shape.
pub(crate) fn mirror_base_url(host: &str) -> Result<String, FetchError> {
    let caps = HOST_RE
        .captures(host)
        .ok_or_else(|| FetchError::host_unparsable(host))?;
    let scheme = caps.name("scheme").map_or(DEFAULT_SCHEME, |m| m.as_str());
    let hostname = &caps["host"];
    Ok(match caps.name("port") {
        Some(port) => format!("{scheme}://{hostname}:{}", port.as_str()),
        None => format!("{scheme}://{hostname}"),
    })
}

/// Builds the GET request for one mirror: base URL plus the logical
/// request path, browser User-Agent, then any caller headers on top.
pub(crate) fn build_request(
    client: &Client,
    host: &str,
    path: &str,
    headers: &HeaderMap,
) -> Result<RequestBuilder, FetchError> {
    let base = mirror_base_url(host)?;
    Ok(client
        .get(format!("{base}{path}"))
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .headers(headers.clone()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_base_url_bare_host_gets_default_scheme() {
        assert_eq!(mirror_base_url("example.com").unwrap(), "http://example.com");
    }

    #[test]
    fn test_mirror_base_url_keeps_explicit_scheme() {
        assert_eq!(
            mirror_base_url("https://example.com/").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            mirror_base_url("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_mirror_base_url_keeps_port() {
        assert_eq!(
            mirror_base_url("127.0.0.1:8118").unwrap(),
            "http://127.0.0.1:8118"
        );
        assert_eq!(
            mirror_base_url("http://127.0.0.1:45123").unwrap(),
            "http://127.0.0.1:45123"
        );
    }

    #[test]
    fn test_mirror_base_url_accepts_onion_host() {
        assert_eq!(
            mirror_base_url("flibustahezeous3.onion").unwrap(),
            "http://flibustahezeous3.onion"
        );
    }

    #[test]
    fn test_mirror_base_url_accepts_hosts_with_nine() {
        assert_eq!(mirror_base_url("mirror9.example").unwrap(), "http://mirror9.example");
    }

    #[test]
    fn test_mirror_base_url_rejects_empty_host() {
        assert!(matches!(
            mirror_base_url(""),
            Err(FetchError::HostUnparsable { .. })
        ));
    }

    #[test]
    fn test_mirror_base_url_rejects_garbage() {
        for host in ["}{", "not a host", "exa_mple.com", "http://", "EXAMPLE.COM"] {
            assert!(
                matches!(mirror_base_url(host), Err(FetchError::HostUnparsable { .. })),
                "Expected rejection for {host:?}"
            );
        }
    }

    #[test]
    fn test_mirror_base_url_rejects_trailing_path() {
        assert!(matches!(
            mirror_base_url("example.com/books"),
            Err(FetchError::HostUnparsable { .. })
        ));
    }

    #[test]
    fn test_build_request_sets_browser_user_agent_and_url() {
        let client = Client::new();
        let request = build_request(&client, "flibustahezeous3.onion", "/b/175105", &HeaderMap::new())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.url().as_str(), "http://flibustahezeous3.onion/b/175105");
        assert_eq!(
            request.headers().get(USER_AGENT).unwrap(),
            BROWSER_USER_AGENT
        );
    }

    #[test]
    fn test_build_request_applies_caller_headers() {
        let client = Client::new();
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "text/html".parse().unwrap());
        let request = build_request(&client, "example.com", "/booksearch?ask=x&chb=on", &headers)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.headers().get(reqwest::header::ACCEPT).unwrap(), "text/html");
        assert_eq!(
            request.url().as_str(),
            "http://example.com/booksearch?ask=x&chb=on"
        );
    }

    #[test]
    fn test_build_request_propagates_host_error() {
        let client = Client::new();
        let result = build_request(&client, "", "/b/1", &HeaderMap::new());
        assert!(matches!(result, Err(FetchError::HostUnparsable { .. })));
    }
}
