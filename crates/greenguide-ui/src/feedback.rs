//! Maps lookup failures to page output.
//!
//! Each client gets a [`Feedback`] impl carrying the prefix its failures are
//! rendered with. Whether a failure is rendered at all comes from the
//! client's [`FailurePolicy`].

use greenguide_services::{
    ChatClient, FailurePolicy, Geocoder, Lookup, PlacesClient, PlantClient, Service, ServiceError,
    SoilClient, WeatherRecommender,
};

use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// How a component's failures are worded on the page.
pub trait Feedback: Service {
    const FAILURE_PREFIX: &'static str;
    const SEVERITY: Severity = Severity::Error;
}

impl Feedback for PlacesClient {
    const FAILURE_PREFIX: &'static str = "Error fetching planting locations: ";
}

impl Feedback for Geocoder {
    const FAILURE_PREFIX: &'static str = "Error in geocoding: ";
    const SEVERITY: Severity = Severity::Warning;
}

impl Feedback for SoilClient {
    const FAILURE_PREFIX: &'static str = "Error fetching soil data: ";
}

impl Feedback for WeatherRecommender {
    const FAILURE_PREFIX: &'static str = "Error fetching weather data: ";
}

impl Feedback for PlantClient {
    const FAILURE_PREFIX: &'static str = "Error fetching plant details: ";
}

impl Feedback for ChatClient {
    const FAILURE_PREFIX: &'static str = "Error generating response: ";
}

pub fn failure_message<S: Feedback>(error: &ServiceError) -> String {
    format!("{}{}", S::FAILURE_PREFIX, error)
}

/// Unwrap a lookup for rendering.
///
/// Empty and failed lookups both come back as `None`. A failure is rendered
/// when `S` is [`FailurePolicy::Visible`], followed by the error's hint if it
/// has one; silent components only log it.
pub fn settle<S: Feedback, T>(surface: &mut dyn Surface, lookup: Lookup<T>) -> Option<T> {
    let error = match lookup {
        Lookup::Found(value) => return Some(value),
        Lookup::Empty => {
            tracing::debug!(service = S::NAME, "Lookup returned nothing");
            return None;
        }
        Lookup::Failed(error) => error,
    };

    match S::FAILURE_POLICY {
        FailurePolicy::Silent => {
            tracing::debug!(service = S::NAME, "Lookup failed, not shown: {}", error);
        }
        FailurePolicy::Visible => {
            tracing::warn!(service = S::NAME, "Lookup failed: {}", error);
            let message = failure_message::<S>(&error);
            match S::SEVERITY {
                Severity::Warning => surface.warning(&message),
                Severity::Error => surface.error(&message),
            }
            if let Some(hint) = error.hint() {
                surface.warning(hint);
            }
        }
    }

    None
}
