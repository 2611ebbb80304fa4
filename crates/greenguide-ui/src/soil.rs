//! Soil view for a city: geocode it, then look up the soil there.

use greenguide_services::{Clients, Geocoder, SoilClient};
use tracing::instrument;

use crate::feedback::settle;
use crate::surface::Surface;

pub const TITLE: &str = "🌍 Soil Check";

#[derive(Debug, Clone, Copy)]
pub struct SoilView<'a> {
    clients: &'a Clients,
}

impl<'a> SoilView<'a> {
    pub fn new(clients: &'a Clients) -> Self {
        Self { clients }
    }

    /// Geocoding failures show up as a warning and an unknown city renders
    /// nothing more. Soil problems never show; the default sample is rendered.
    #[instrument(skip(self, surface), level = "info")]
    pub async fn render(&self, surface: &mut dyn Surface, city: &str) {
        if city.is_empty() {
            return;
        }

        surface.title(TITLE);

        let Some(coords) =
            settle::<Geocoder, _>(surface, self.clients.geocoder.coordinates(city).await)
        else {
            tracing::info!("No coordinates for {}", city);
            return;
        };

        let sample = settle::<SoilClient, _>(surface, self.clients.soil.lookup(coords).await)
            .unwrap_or_default();

        surface.write(&format!("### Soil near {}:", city));
        surface.write(&format!(
            "- Coordinates: {:.4}, {:.4}",
            coords.latitude, coords.longitude
        ));
        surface.write(&format!("- Texture: {}", sample.texture));
        surface.write(&format!("- pH: {:.1}", sample.ph));
    }
}
