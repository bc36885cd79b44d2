//! First-success racing of one logical request across all mirrors.
//!
//! Every mirror serves identical content, so the race sends the same GET
//! to all of them concurrently and returns whichever answers first with
//! HTTP 200. Attempts communicate with the coordinator only through a
//! bounded channel; losing attempts are never cancelled, their responses
//! are simply dropped, which releases the connections.

use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use super::error::FetchError;
use super::request::build_request;

/// Outcome of one mirror attempt, reported through the aggregation
/// channel.
struct Attempt {
    host: String,
    outcome: Result<Response, AttemptFailure>,
}

/// Why a single mirror attempt did not qualify.
enum AttemptFailure {
    Transport(reqwest::Error),
    Status(StatusCode),
}

/// Races `path` across `hosts` and returns the first HTTP 200 response.
///
/// Hosts that fail shape parsing are skipped with a warning and do not
/// count as attempts; duplicates are each attempted. Per-mirror failures
/// are logged and swallowed.
///
/// # Errors
///
/// Returns [`FetchError::AllMirrorsFailed`] when no attempt produced an
/// HTTP 200 response, including the case of zero parsable hosts.
#[instrument(level = "debug", skip(client, headers), fields(mirrors = hosts.len()))]
pub(crate) async fn race(
    client: &Client,
    hosts: &[String],
    path: &str,
    headers: &HeaderMap,
) -> Result<Response, FetchError> {
    let mut runnable = Vec::new();
    for host in hosts {
        match build_request(client, host, path, headers) {
            Ok(request) => runnable.push((host.clone(), request)),
            Err(error) => warn!(host = %host, error = %error, "skipping mirror"),
        }
    }

    let attempted = runnable.len();
    if attempted == 0 {
        return Err(FetchError::all_mirrors_failed(0));
    }

    // Capacity covers every attempt so senders never block, even after
    // the coordinator has returned with a winner.
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Attempt>(attempted);
    for (host, request) in runnable {
        let outcome_tx = outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = match request.send().await {
                Ok(response) if response.status() == StatusCode::OK => Ok(response),
                Ok(response) => Err(AttemptFailure::Status(response.status())),
                Err(error) => Err(AttemptFailure::Transport(error)),
            };
            // Send fails once another mirror has won; the loser's
            // response is dropped either way.
            let _ = outcome_tx.send(Attempt { host, outcome }).await;
        });
    }
    drop(outcome_tx);

    while let Some(attempt) = outcome_rx.recv().await {
        match attempt.outcome {
            Ok(response) => {
                debug!(host = %attempt.host, "mirror answered first");
                return Ok(response);
            }
            Err(AttemptFailure::Transport(error)) => {
                warn!(host = %attempt.host, error = %error, "mirror transport error");
            }
            Err(AttemptFailure::Status(status)) => {
                warn!(host = %attempt.host, status = %status, "mirror answered with unexpected status");
            }
        }
    }

    Err(FetchError::all_mirrors_failed(attempted))
}
