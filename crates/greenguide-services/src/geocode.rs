//! Forward geocoding: city name to coordinates via OpenCage.

use greenguide_core::Config;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ServiceError;
use crate::http::{endpoint, handle_response, lenient_tls_client};
use crate::lookup::{FailurePolicy, Lookup, Service};
use crate::types::Coordinates;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Service for Geocoder {
    const NAME: &'static str = "geocoding";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::Visible;
}

impl Geocoder {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            client: lenient_tls_client(Self::NAME, config.http.allow_invalid_certs)?,
            base_url: config.endpoints.opencage.clone(),
            api_key: config.credentials.opencage().to_string(),
        })
    }

    /// Resolve `city` to the coordinates of the best match.
    ///
    /// Zero results is `Empty`; a body without a `results` array is a failure.
    #[instrument(skip(self), level = "info")]
    pub async fn coordinates(&self, city: &str) -> Lookup<Coordinates> {
        self.fetch(city).await.into()
    }

    async fn fetch(&self, city: &str) -> Result<Option<Coordinates>, ServiceError> {
        let url = endpoint(&self.base_url, "/geocode/v1/json");

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let body: GeocodeResponse = handle_response(response).await?;

        let Some(first) = body.results.into_iter().next() else {
            tracing::debug!("No geocoding results for {}", city);
            return Ok(None);
        };

        let result: GeocodeResult = serde_json::from_value(first)
            .map_err(|e| ServiceError::Parse(format!("geocoding result: {}", e)))?;

        tracing::debug!(
            "Geocoded {} to ({:.4}, {:.4})",
            city,
            result.geometry.lat,
            result.geometry.lng
        );

        Ok(Some(Coordinates {
            latitude: result.geometry.lat,
            longitude: result.geometry.lng,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenguide_core::EndpointsConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder(server: &MockServer) -> Geocoder {
        let mut config = Config::default();
        config.endpoints = EndpointsConfig::all(&server.uri());
        config.credentials.opencage = Some("oc-key".to_string());
        Geocoder::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_first_result_wins() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("q", "Mumbai"))
            .and(query_param("key", "oc-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"geometry": {"lat": 19.0760, "lng": 72.8777}},
                    {"geometry": {"lat": 1.0, "lng": 2.0}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let coords = geocoder(&mock_server).coordinates("Mumbai").await.found().unwrap();
        assert_eq!(coords.latitude, 19.0760);
        assert_eq!(coords.longitude, 72.8777);
    }

    #[tokio::test]
    async fn test_zero_results_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
            )
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).coordinates("Atlantis").await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_missing_results_key_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": {}})),
            )
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).coordinates("Mumbai").await;
        assert!(matches!(result, Lookup::Failed(ServiceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_bad_key_is_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).coordinates("Mumbai").await;
        assert!(matches!(
            result.error(),
            Some(ServiceError::Unauthorized { status: 401, .. })
        ));
    }
}
