//! Application shell: city and page selector in, one page rendered out.
//!
//! Every evaluation starts from scratch. Nothing is carried between runs
//! except what the caller puts in [`ShellInput`].

use std::fmt;
use std::str::FromStr;

use greenguide_services::{Clients, PlacesClient};

use crate::chatbot::ChatbotPage;
use crate::feedback::settle;
use crate::guide::GuidePage;
use crate::session::CommandError;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Guide,
    Chatbot,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Guide => write!(f, "Guide"),
            Page::Chatbot => write!(f, "Chatbot"),
        }
    }
}

impl FromStr for Page {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guide" => Ok(Page::Guide),
            "chatbot" | "chat" => Ok(Page::Chatbot),
            other => Err(CommandError::UnknownPage(other.to_string())),
        }
    }
}

/// Button pressed during this evaluation, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Action {
    #[default]
    None,
    FindPlantingOptions,
    SendQuestion(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInput {
    pub city: String,
    pub page: Page,
    pub action: Action,
}

impl ShellInput {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            page: Page::default(),
            action: Action::None,
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Shell<'a> {
    clients: &'a Clients,
}

impl<'a> Shell<'a> {
    pub fn new(clients: &'a Clients) -> Self {
        Self { clients }
    }

    /// One full evaluation.
    ///
    /// An empty city renders nothing. Otherwise planting locations are looked
    /// up first on every run, whichever page is selected, and handed to the
    /// chatbot page.
    pub async fn evaluate(&self, surface: &mut dyn Surface, input: &ShellInput) {
        if input.city.is_empty() {
            tracing::debug!("No city entered, nothing to render");
            return;
        }

        tracing::info!(city = %input.city, page = %input.page, "Evaluating page");

        let locations = settle::<PlacesClient, _>(
            surface,
            self.clients.places.planting_locations(&input.city).await,
        )
        .unwrap_or_default();

        match input.page {
            Page::Guide => {
                let find_clicked = input.action == Action::FindPlantingOptions;
                GuidePage::new(self.clients)
                    .render(surface, &input.city, find_clicked)
                    .await;
            }
            Page::Chatbot => {
                let question = match &input.action {
                    Action::SendQuestion(q) => Some(q.as_str()),
                    _ => None,
                };
                ChatbotPage::new(self.clients)
                    .render(surface, &locations, question)
                    .await;
            }
        }
    }
}
