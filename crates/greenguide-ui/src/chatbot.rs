//! Chatbot page: one question in, one gardening-flavoured answer out.

use greenguide_services::{gardening_prompt, ChatClient, Clients, Location};
use tracing::instrument;

use crate::feedback::settle;
use crate::surface::Surface;

pub const TITLE: &str = "💬 Chatbot";
pub const QUESTION_LABEL: &str = "Ask your question about plants, soil, or planting locations:";

#[derive(Debug, Clone, Copy)]
pub struct ChatbotPage<'a> {
    clients: &'a Clients,
}

impl<'a> ChatbotPage<'a> {
    pub fn new(clients: &'a Clients) -> Self {
        Self { clients }
    }

    /// Render the page, answering `question` when "Send Question" was pressed.
    ///
    /// `_locations` is what the shell found for the current city. The page
    /// takes it but does not use it in the answer.
    #[instrument(skip_all, level = "info")]
    pub async fn render(
        &self,
        surface: &mut dyn Surface,
        _locations: &[Location],
        question: Option<&str>,
    ) {
        surface.title(TITLE);

        let Some(question) = question.filter(|q| !q.is_empty()) else {
            return;
        };

        let prompt = gardening_prompt(question);
        if let Some(answer) = settle::<ChatClient, _>(surface, self.clients.chat.generate(&prompt).await)
        {
            surface.write(&format!("💡 Chatbot: {}", answer.text));
        }
    }
}
