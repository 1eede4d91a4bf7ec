use crate::domain::error::CsError;
use crate::domain::traits::Generator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Gemini generateContent request/response structures
#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize, Debug)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    parts: Option<Vec<AnswerPart>>,
}

#[derive(Deserialize, Debug)]
struct AnswerPart {
    text: Option<String>,
}

/// Gemini-style text generation client (API-key header auth).
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    temperature: f64,
}

impl GeminiGenerator {
    pub fn new(client: Client, endpoint: String, api_key: String, temperature: f64) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            temperature,
        }
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, CsError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        debug!(endpoint = %self.endpoint, "generative request");
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        Ok(answer_text(response))
    }
}

/// Text of the first part of the first candidate.
///
/// `None` when there is no candidate, no content, or an empty parts list.
fn answer_text(response: GenerateResponse) -> Option<String> {
    let candidate = response.candidates?.into_iter().next()?;
    let parts = candidate.content?.parts?;
    parts.into_iter().next()?.text
}
