//! Current weather from Weatherbit, mapped onto a fixed plant list.

use greenguide_core::Config;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ServiceError;
use crate::http::{default_client, endpoint, handle_response};
use crate::lookup::{FailurePolicy, Lookup, Service};

pub const RAINY_WARM_PLANTS: [&str; 3] = ["Neem Tree", "Tulsi Plant", "Curry Leaf Plant"];
pub const CLEAR_HOT_PLANTS: [&str; 3] = ["Aloe Vera", "Cactus", "Bamboo"];
pub const DEFAULT_PLANTS: [&str; 3] = ["Money Plant", "Snake Plant", "Areca Palm"];

/// Current conditions reduced to what the decision table reads
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    /// Lower-cased weather description
    pub description: String,
    /// Temperature in Celsius
    pub temperature: f64,
}

impl Conditions {
    pub fn new(description: &str, temperature: f64) -> Self {
        Self {
            description: description.to_lowercase(),
            temperature,
        }
    }

    /// Decision table, first match wins.
    pub fn recommended_plants(&self) -> Vec<String> {
        let picks = if self.description.contains("rain") && self.temperature > 20.0 {
            RAINY_WARM_PLANTS
        } else if self.description.contains("clear") && self.temperature > 25.0 {
            CLEAR_HOT_PLANTS
        } else {
            DEFAULT_PLANTS
        };
        picks.iter().map(|p| p.to_string()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    data: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    temp: f64,
    weather: ObservationWeather,
}

#[derive(Debug, Deserialize)]
struct ObservationWeather {
    description: String,
}

#[derive(Debug, Clone)]
pub struct WeatherRecommender {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Service for WeatherRecommender {
    const NAME: &'static str = "weather";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::Visible;
}

impl WeatherRecommender {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            client: default_client()?,
            base_url: config.endpoints.weatherbit.clone(),
            api_key: config.credentials.weatherbit().to_string(),
        })
    }

    /// Current conditions in `city`; `Empty` when the service reports no data.
    #[instrument(skip(self), level = "info")]
    pub async fn current_conditions(&self, city: &str) -> Lookup<Conditions> {
        self.fetch(city).await.into()
    }

    /// Three plants suited to the current weather in `city`.
    ///
    /// When the response carries no observation the table is not consulted and
    /// the result is `Empty`, not the default list.
    pub async fn recommend(&self, city: &str) -> Lookup<Vec<String>> {
        let lookup = self.current_conditions(city).await;
        if let Lookup::Found(conditions) = &lookup {
            tracing::debug!(
                "Weather in {}: {} at {:.1}°C",
                city,
                conditions.description,
                conditions.temperature
            );
        }
        lookup.map(|conditions| conditions.recommended_plants())
    }

    async fn fetch(&self, city: &str) -> Result<Option<Conditions>, ServiceError> {
        let url = endpoint(&self.base_url, "/v2.0/current");

        let response = self
            .client
            .get(&url)
            .query(&[("city", city), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let body: CurrentResponse = handle_response(response).await?;

        let Some(first) = body.data.and_then(|data| data.into_iter().next()) else {
            return Ok(None);
        };

        let observation: Observation = serde_json::from_value(first)
            .map_err(|e| ServiceError::Parse(format!("weather observation: {}", e)))?;

        Ok(Some(Conditions::new(
            &observation.weather.description,
            observation.temp,
        )))
    }
}
