//! SoilGrids texture and pH lookup.
//!
//! Failures are [`FailurePolicy::Silent`]: callers fall back to
//! `SoilSample::default()` ("Unknown", pH 7.0) and only log the cause.

use greenguide_core::Config;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

use crate::error::ServiceError;
use crate::http::{client_with_timeout, endpoint, handle_response};
use crate::lookup::{FailurePolicy, Lookup, Service};
use crate::types::{value_text, Coordinates, SoilSample, NEUTRAL_PH, UNKNOWN};

#[derive(Debug, Deserialize)]
struct SoilResponse {
    properties: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct SoilClient {
    client: Client,
    base_url: String,
}

impl Service for SoilClient {
    const NAME: &'static str = "soil";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::Silent;
}

impl SoilClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            client: client_with_timeout(Duration::from_secs(config.http.soil_timeout_secs))?,
            base_url: config.endpoints.soilgrids.clone(),
        })
    }

    /// Soil at `coords`. A response without `properties` is `Empty`.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup(&self, coords: Coordinates) -> Lookup<SoilSample> {
        self.fetch(coords).await.into()
    }

    async fn fetch(&self, coords: Coordinates) -> Result<Option<SoilSample>, ServiceError> {
        let url = endpoint(&self.base_url, "/query");

        let response = self
            .client
            .get(&url)
            .query(&[("lon", coords.longitude), ("lat", coords.latitude)])
            .send()
            .await?;

        let body: SoilResponse = handle_response(response).await?;

        let Some(properties) = body.properties else {
            return Ok(None);
        };
        if !properties.is_object() {
            return Err(ServiceError::Parse("soil properties is not an object".into()));
        }

        Ok(Some(SoilSample {
            texture: value_text(properties.get("soil_texture"), UNKNOWN),
            ph: properties
                .get("ph")
                .and_then(Value::as_f64)
                .unwrap_or(NEUTRAL_PH),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenguide_core::EndpointsConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MUMBAI: Coordinates = Coordinates {
        latitude: 19.076,
        longitude: 72.8777,
    };

    fn soil_client(base_url: &str) -> SoilClient {
        let mut config = Config::default();
        config.endpoints = EndpointsConfig::all(base_url);
        config.http.soil_timeout_secs = 1;
        SoilClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_properties_are_read() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("lat", "19.076"))
            .and(query_param("lon", "72.8777"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {"soil_texture": "Clay loam", "ph": 6.4}
            })))
            .mount(&mock_server)
            .await;

        let sample = soil_client(&mock_server.uri())
            .lookup(MUMBAI)
            .await
            .found()
            .unwrap();
        assert_eq!(sample.texture, "Clay loam");
        assert_eq!(sample.ph, 6.4);
    }

    #[tokio::test]
    async fn test_each_property_defaults_individually() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {"ph": 5.5}
            })))
            .mount(&mock_server)
            .await;

        let sample = soil_client(&mock_server.uri())
            .lookup(MUMBAI)
            .await
            .found()
            .unwrap();
        assert_eq!(sample.texture, "Unknown");
        assert_eq!(sample.ph, 5.5);
    }

    #[tokio::test]
    async fn test_missing_properties_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = soil_client(&mock_server.uri());
        assert!(client.lookup(MUMBAI).await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        // Nothing listens on port 9 locally
        let client = soil_client("http://127.0.0.1:9");
        assert!(client.lookup(MUMBAI).await.is_failed());
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = soil_client(&mock_server.uri()).lookup(MUMBAI).await;
        assert!(matches!(
            result,
            Lookup::Failed(ServiceError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn test_soil_failures_are_silent() {
        assert_eq!(SoilClient::FAILURE_POLICY, FailurePolicy::Silent);
    }
}
