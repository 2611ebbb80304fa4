//! Trefle plant search, first match only.

use greenguide_core::Config;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ServiceError;
use crate::http::{default_client, endpoint, handle_response};
use crate::lookup::{FailurePolicy, Lookup, Service};
use crate::types::{value_text, PlantDetail, NOT_AVAILABLE, UNKNOWN};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Option<Vec<Value>>,
}

impl PlantDetail {
    /// Pull the guide fields out of one search hit. Absent or `null` fields
    /// (including whole missing sub-objects) take their defaults; the common
    /// name defaults to the name that was searched for.
    pub fn from_search_hit(hit: &Value, searched_name: &str) -> Self {
        Self {
            scientific_name: value_text(hit.get("scientific_name"), NOT_AVAILABLE),
            family: value_text(hit.get("family"), NOT_AVAILABLE),
            common_name: value_text(hit.get("common_name"), searched_name),
            growth_conditions: value_text(hit.get("growth_habit"), UNKNOWN),
            watering: value_text(
                hit.pointer("/main_species/specifications/water_requirement"),
                UNKNOWN,
            ),
            sunlight: value_text(hit.pointer("/main_species/growth/light"), UNKNOWN),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlantClient {
    client: Client,
    base_url: String,
    token: String,
}

impl Service for PlantClient {
    const NAME: &'static str = "plant database";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::Visible;
}

impl PlantClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            client: default_client()?,
            base_url: config.endpoints.trefle.clone(),
            token: config.credentials.trefle().to_string(),
        })
    }

    /// Details for the best match of `plant_name`; `Empty` when nothing matches.
    #[instrument(skip(self), level = "info")]
    pub async fn details(&self, plant_name: &str) -> Lookup<PlantDetail> {
        self.fetch(plant_name).await.into()
    }

    async fn fetch(&self, plant_name: &str) -> Result<Option<PlantDetail>, ServiceError> {
        let url = endpoint(&self.base_url, "/api/v1/plants/search");

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str()), ("q", plant_name)])
            .send()
            .await?;

        let body: SearchResponse = handle_response(response).await?;

        let detail = body
            .data
            .as_ref()
            .and_then(|hits| hits.first())
            .map(|hit| PlantDetail::from_search_hit(hit, plant_name));

        if detail.is_none() {
            tracing::debug!("No plant database match for {}", plant_name);
        }
        Ok(detail)
    }
}
