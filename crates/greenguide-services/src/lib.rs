//! External lookups behind Green Guide.
//!
//! One client per service (places, geocoding, soil, weather, plants, chat),
//! each answering with a [`Lookup`].

pub mod chat;
pub mod clients;
pub mod error;
pub mod geocode;
mod http;
pub mod lookup;
pub mod places;
pub mod plants;
pub mod soil;
pub mod types;
pub mod weather;

pub use chat::{gardening_prompt, ChatClient};
pub use clients::Clients;
pub use error::ServiceError;
pub use geocode::Geocoder;
pub use lookup::{FailurePolicy, Lookup, Service};
pub use places::PlacesClient;
pub use plants::PlantClient;
pub use soil::SoilClient;
pub use types::{ChatAnswer, Coordinates, Location, PlantDetail, SoilSample};
pub use weather::{Conditions, WeatherRecommender};
