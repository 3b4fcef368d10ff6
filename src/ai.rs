use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GenerationError;

// --- Provider trait ---

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
    fn model_name(&self) -> &str;
}

// --- Gemini provider ---

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiCandidateContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeminiResponsePart {
    text: String,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.trim())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug)]
pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    model_id: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model_id: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            base_url: base_url.into(),
            model_id: model_id.into(),
            client,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_id
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(api_key) = &self.api_key else {
            return Err(GenerationError::MissingCredential);
        };

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
            });
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        body.first_text()
            .map(str::to_string)
            .ok_or(GenerationError::Empty)
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}

// --- Confirmation messages ---

pub fn confirmation_prompt(title: &str, company: &str) -> String {
    format!(
        "Generate a professional and encouraging email message for a job application. \
        The job title is \"{title}\" at company \"{company}\".\n\n\
        The message should:\n\
        - Be warm and professional\n\
        - Congratulate on submitting the application\n\
        - Mention the specific job title\n\
        - Express enthusiasm about the opportunity\n\
        - Be 2-3 sentences maximum\n\n\
        Return only the message text, no subject line or extra formatting."
    )
}

/// Canned confirmation used in place of generated text.
pub fn fallback_message(error: &GenerationError, title: &str, company: &str) -> String {
    match error {
        GenerationError::Status { .. } => format!(
            "Great! Your application for {title} at {company} has been submitted successfully. \
            Our team will review it and contact you soon."
        ),
        GenerationError::Empty => {
            format!("Your application for {title} at {company} has been submitted successfully!")
        }
        GenerationError::MissingCredential
        | GenerationError::Transport(_)
        | GenerationError::Malformed(_) => format!(
            "Congratulations! Your application for {title} at {company} has been submitted successfully. \
            We'll review your profile and get back to you soon."
        ),
    }
}

/// Asks the generator for a confirmation message, substituting canned text on any failure.
pub async fn generate_confirmation(
    generator: &dyn TextGenerator,
    title: &str,
    company: &str,
) -> String {
    let prompt = confirmation_prompt(title, company);
    match generator.complete(&prompt).await {
        Ok(text) => {
            debug!(model = generator.model_name(), "generated confirmation message");
            text
        }
        Err(GenerationError::MissingCredential) => {
            debug!("no generation credential; using canned confirmation");
            fallback_message(&GenerationError::MissingCredential, title, company)
        }
        Err(e) => {
            warn!(error = %e, model = generator.model_name(), "confirmation generation failed");
            fallback_message(&e, title, company)
        }
    }
}
