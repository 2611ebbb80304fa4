//! HTTP client construction and response handling shared by the lookups.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ServiceError;

pub(crate) const USER_AGENT: &str = concat!("greenguide/", env!("CARGO_PKG_VERSION"));

/// Client with transport-default timeouts.
pub(crate) fn default_client() -> Result<Client, ServiceError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ServiceError::Client(e.to_string()))
}

/// Client that gives up after `timeout`.
pub(crate) fn client_with_timeout(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ServiceError::Client(e.to_string()))
}

/// Client for the places and geocoding services.
///
/// `allow_invalid_certs` only takes effect in debug builds.
pub(crate) fn lenient_tls_client(
    service: &str,
    allow_invalid_certs: bool,
) -> Result<Client, ServiceError> {
    let builder = Client::builder().user_agent(USER_AGENT);

    #[cfg(debug_assertions)]
    let builder = if allow_invalid_certs {
        tracing::warn!(
            "Certificate verification disabled for {} (http.allow_invalid_certs)",
            service
        );
        builder.danger_accept_invalid_certs(true)
    } else {
        builder
    };

    #[cfg(not(debug_assertions))]
    if allow_invalid_certs {
        tracing::warn!(
            "Ignoring http.allow_invalid_certs for {} in a release build",
            service
        );
    }

    builder
        .build()
        .map_err(|e| ServiceError::Client(e.to_string()))
}

/// Check the status and decode a JSON body.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ServiceError> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(format!("JSON parse error: {}", e)))
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Unauthorized {
            status: status.as_u16(),
            body,
        })
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Join a base URL and a path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("https://trefle.io/", "/api/v1/plants/search"),
            "https://trefle.io/api/v1/plants/search"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:1234", "/query"),
            "http://127.0.0.1:1234/query"
        );
    }

    #[test]
    fn test_clients_build() {
        assert!(default_client().is_ok());
        assert!(client_with_timeout(Duration::from_secs(10)).is_ok());
        assert!(lenient_tls_client("test", false).is_ok());
        assert!(lenient_tls_client("test", true).is_ok());
    }
}
