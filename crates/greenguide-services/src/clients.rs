use greenguide_core::Config;

use crate::error::ServiceError;
use crate::{ChatClient, Geocoder, PlacesClient, PlantClient, SoilClient, WeatherRecommender};

/// Every external client, built once from the startup config.
#[derive(Debug, Clone)]
pub struct Clients {
    pub places: PlacesClient,
    pub geocoder: Geocoder,
    pub soil: SoilClient,
    pub weather: WeatherRecommender,
    pub plants: PlantClient,
    pub chat: ChatClient,
}

impl Clients {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let clients = Self {
            places: PlacesClient::new(config)?,
            geocoder: Geocoder::new(config)?,
            soil: SoilClient::new(config)?,
            weather: WeatherRecommender::new(config)?,
            plants: PlantClient::new(config)?,
            chat: ChatClient::new(config)?,
        };
        tracing::debug!("External clients ready (chat model {})", clients.chat.model());
        Ok(clients)
    }
}
