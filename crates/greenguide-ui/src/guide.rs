//! Guide page: planting locations, weather-based plant picks, and a planting
//! guide for the first pick.

use greenguide_services::{Clients, Location, PlacesClient, PlantClient, PlantDetail, WeatherRecommender};
use tracing::instrument;

use crate::feedback::settle;
use crate::surface::Surface;

pub const TITLE: &str = "🌱 Urban Green Guide";
pub const DESCRIPTION: &str =
    "Find the best places to plant trees, get plant recommendations, and learn how to grow them.";
pub const NO_LOCATIONS: &str = "No planting locations found.";
pub const NO_DETAILS: &str = "No additional details available.";

#[derive(Debug, Clone, Copy)]
pub struct GuidePage<'a> {
    clients: &'a Clients,
}

impl<'a> GuidePage<'a> {
    pub fn new(clients: &'a Clients) -> Self {
        Self { clients }
    }

    /// Render the page. The lookups only run when "Find Planting Options" was
    /// pressed, one after another, and each stage renders whatever it got.
    #[instrument(skip(self, surface), level = "info")]
    pub async fn render(&self, surface: &mut dyn Surface, city: &str, find_clicked: bool) {
        surface.title(TITLE);
        surface.write(DESCRIPTION);

        if !find_clicked {
            return;
        }

        let locations = settle::<PlacesClient, _>(
            surface,
            self.clients.places.planting_locations(city).await,
        )
        .unwrap_or_default();
        render_locations(surface, &locations);

        let plants = settle::<WeatherRecommender, _>(surface, self.clients.weather.recommend(city).await)
            .unwrap_or_default();
        let Some(first) = plants.first() else {
            return;
        };

        surface.write("### 🌿 Recommended Plants:");
        for plant in &plants {
            surface.write(&format!("- {}", plant));
        }

        // Only the first recommendation gets a guide
        let detail = settle::<PlantClient, _>(surface, self.clients.plants.details(first).await);
        render_detail(surface, first, detail.as_ref());
    }
}

fn render_locations(surface: &mut dyn Surface, locations: &[Location]) {
    if locations.is_empty() {
        surface.warning(NO_LOCATIONS);
        return;
    }

    surface.write("### 🏞 Suitable Planting Locations:");
    for location in locations {
        surface.write(&format!("- {}: {}", location.name, location.address));
    }
}

fn render_detail(surface: &mut dyn Surface, plant: &str, detail: Option<&PlantDetail>) {
    let Some(detail) = detail else {
        surface.write(NO_DETAILS);
        return;
    };

    surface.write(&format!("### 📖 Planting Guide for {}:", plant));
    surface.write(&format!("- Scientific Name: {}", detail.scientific_name));
    surface.write(&format!("- Family: {}", detail.family));
    surface.write(&format!("- Growth Conditions: {}", detail.growth_conditions));
    surface.write(&format!("- Watering: {}", detail.watering));
    surface.write(&format!("- Sunlight: {}", detail.sunlight));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, Rendered};

    #[test]
    fn test_locations_render_as_list() {
        let mut surface = RecordingSurface::new();
        let locations = vec![
            Location {
                name: "Shivaji Park".into(),
                address: "Dadar West, Mumbai".into(),
            },
            Location {
                name: "Joggers Park".into(),
                address: "Bandra West, Mumbai".into(),
            },
        ];
        render_locations(&mut surface, &locations);
        assert_eq!(
            surface.texts(),
            vec![
                "### 🏞 Suitable Planting Locations:",
                "- Shivaji Park: Dadar West, Mumbai",
                "- Joggers Park: Bandra West, Mumbai",
            ]
        );
    }

    #[test]
    fn test_no_locations_is_a_warning() {
        let mut surface = RecordingSurface::new();
        render_locations(&mut surface, &[]);
        assert_eq!(surface.items, vec![Rendered::Warning(NO_LOCATIONS.into())]);
    }

    #[test]
    fn test_detail_lines() {
        let mut surface = RecordingSurface::new();
        let detail = PlantDetail {
            scientific_name: "Aloe vera".into(),
            family: "N/A".into(),
            common_name: "Aloe".into(),
            growth_conditions: "Succulent".into(),
            watering: "Unknown".into(),
            sunlight: "8".into(),
        };
        render_detail(&mut surface, "Aloe Vera", Some(&detail));
        assert_eq!(
            surface.texts(),
            vec![
                "### 📖 Planting Guide for Aloe Vera:",
                "- Scientific Name: Aloe vera",
                "- Family: N/A",
                "- Growth Conditions: Succulent",
                "- Watering: Unknown",
                "- Sunlight: 8",
            ]
        );
    }

    #[test]
    fn test_missing_detail() {
        let mut surface = RecordingSurface::new();
        render_detail(&mut surface, "Cactus", None);
        assert_eq!(surface.texts(), vec![NO_DETAILS]);
    }
}
