//! Foursquare places search for parks near a city.

use greenguide_core::Config;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::instrument;

use crate::error::ServiceError;
use crate::http::{endpoint, handle_response, lenient_tls_client};
use crate::lookup::{FailurePolicy, Lookup, Service};
use crate::types::Location;

const PLACE_QUERY: &str = "parks";

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: String,
    location: PlaceAddress,
}

#[derive(Debug, Deserialize)]
struct PlaceAddress {
    formatted_address: String,
}

impl From<Place> for Location {
    fn from(place: Place) -> Self {
        Self {
            name: place.name,
            address: place.location.formatted_address,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Service for PlacesClient {
    const NAME: &'static str = "places search";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::Visible;
}

impl PlacesClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            client: lenient_tls_client(Self::NAME, config.http.allow_invalid_certs)?,
            base_url: config.endpoints.foursquare.clone(),
            api_key: config.credentials.foursquare().to_string(),
        })
    }

    /// Parks near `city`, in the order the service ranks them.
    ///
    /// Every result must carry a name and a formatted address; one malformed
    /// entry fails the whole lookup.
    #[instrument(skip(self), level = "info")]
    pub async fn planting_locations(&self, city: &str) -> Lookup<Vec<Location>> {
        self.fetch(city)
            .await
            .map(|locations| (!locations.is_empty()).then_some(locations))
            .into()
    }

    async fn fetch(&self, city: &str) -> Result<Vec<Location>, ServiceError> {
        let url = endpoint(&self.base_url, "/v3/places/search");

        let response = self
            .client
            .get(&url)
            .query(&[("query", PLACE_QUERY), ("near", city)])
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, &self.api_key)
            .send()
            .await?;

        let body: PlacesResponse = handle_response(response).await?;
        let locations: Vec<Location> = body.results.into_iter().map(Location::from).collect();

        tracing::info!("Found {} planting locations near {}", locations.len(), city);
        Ok(locations)
    }
}
