use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A park returned by the places search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
}

/// Geographic position from the geocoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Soil texture and pH at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub texture: String,
    pub ph: f64,
}

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NEUTRAL_PH: f64 = 7.0;

impl Default for SoilSample {
    fn default() -> Self {
        Self {
            texture: UNKNOWN.to_string(),
            ph: NEUTRAL_PH,
        }
    }
}

/// Fields pulled from the first plant-database match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDetail {
    pub scientific_name: String,
    pub family: String,
    pub common_name: String,
    pub growth_conditions: String,
    pub watering: String,
    pub sunlight: String,
}

/// Reply from the generative-text model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub text: String,
}

/// Render a loosely-typed JSON field as text; `None` and `null` fall back to
/// `default`.
pub(crate) fn value_text(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
