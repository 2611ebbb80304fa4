//! One-shot prompts to the Gemini generateContent endpoint.

use greenguide_core::Config;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ServiceError;
use crate::http::{default_client, endpoint, handle_response};
use crate::lookup::{FailurePolicy, Lookup, Service};
use crate::types::ChatAnswer;

/// Wrap a user question so the answer leans towards gardening.
pub fn gardening_prompt(question: &str) -> String {
    format!(
        "Answer the following question: {}, and add some stuff about gardening and greenery in the response.",
        question
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts joined.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl Service for ChatClient {
    const NAME: &'static str = "chat";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::Visible;
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            client: default_client()?,
            base_url: config.endpoints.gemini.clone(),
            api_key: config.credentials.gemini().to_string(),
            model: config.chat.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submit `prompt` verbatim and return the model's reply.
    ///
    /// A reply without any text (e.g. a blocked prompt) is a failure, never
    /// `Empty`.
    #[instrument(skip(self, prompt), fields(model = %self.model), level = "info")]
    pub async fn generate(&self, prompt: &str) -> Lookup<ChatAnswer> {
        match self.fetch(prompt).await {
            Ok(answer) => Lookup::Found(answer),
            Err(e) => Lookup::Failed(e),
        }
    }

    async fn fetch(&self, prompt: &str) -> Result<ChatAnswer, ServiceError> {
        let url = endpoint(
            &self.base_url,
            &format!("/v1beta/models/{}:generateContent", self.model),
        );

        let request = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let body: GenerateResponse = handle_response(response).await?;
        let text = body
            .into_text()
            .ok_or_else(|| ServiceError::Parse("response contained no text".into()))?;

        Ok(ChatAnswer { text })
    }
}
