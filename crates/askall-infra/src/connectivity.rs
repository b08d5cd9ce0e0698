//! Internet reachability probe for the `status` command.

use std::time::Duration;

/// Returns 204 with an empty body when the network is open.
pub const PROBE_URL: &str = "http://clients3.google.com/generate_204";

pub const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Whether `PROBE_URL` answers 204 within the probe timeout.
pub async fn is_online() -> bool {
    probe(PROBE_URL, PROBE_TIMEOUT).await
}

pub async fn probe(url: &str, timeout: Duration) -> bool {
    let client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "failed to build probe client");
            return false;
        }
    };

    match client.get(url).send().await {
        Ok(response) => response.status() == reqwest::StatusCode::NO_CONTENT,
        Err(e) => {
            tracing::debug!(url, error = %e, "connectivity probe failed");
            false
        }
    }
}
