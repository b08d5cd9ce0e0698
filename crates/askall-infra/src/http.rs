//! Shared HTTP plumbing for the vendor adapters.

use std::time::Duration;

use askall_types::error::{ConfigError, ProviderError};

/// Generous ceiling for long generations.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub fn build_client() -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("askall/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Send a request and return the body text of a successful response.
///
/// Non-2xx statuses become the matching [`ProviderError`].
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<String, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Transport(format!("HTTP request failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Transport(format!("failed to read response body: {e}")))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(status_error(status.as_u16(), body))
    }
}

pub(crate) fn status_error(status: u16, body: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::AuthenticationFailed,
        429 => ProviderError::RateLimited,
        _ => ProviderError::Vendor {
            status,
            message: body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(401, String::new()),
            ProviderError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error(429, String::new()),
            ProviderError::RateLimited
        ));
        match status_error(503, "overloaded".to_string()) {
            ProviderError::Vendor { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_maps_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/x")
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let client = build_client().unwrap();
        let err = send(client.get(format!("{}/x", server.url())))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited));
    }
}
