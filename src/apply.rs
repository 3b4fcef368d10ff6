use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::ai::{TextGenerator, generate_confirmation};
use crate::error::SubmissionError;
use crate::models::JobListing;

pub const SUBMITTED_TITLE: &str = "Application Submitted";
pub const GENERATING_MESSAGE: &str = "Generating your confirmation message...";

/// JSON body posted to the application webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub title: String,
    pub company_name: String,
    pub company_description: String,
    pub location: String,
    pub description_text: String,
}

impl From<&JobListing> for ApplicationPayload {
    fn from(job: &JobListing) -> Self {
        Self {
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            company_description: job.company_description.clone().unwrap_or_default(),
            location: job.location.clone(),
            description_text: job.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
}

// --- Webhook seam ---

#[async_trait]
pub trait ApplicationWebhook: Send + Sync {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<(), SubmissionError>;
}

#[derive(Debug, Clone)]
pub struct HttpWebhook {
    client: reqwest::Client,
    url: String,
}

impl HttpWebhook {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ApplicationWebhook for HttpWebhook {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<(), SubmissionError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

// --- Apply flow ---

/// Submits the application and produces the confirmation to show. Never fails:
/// a rejected submission skips generation and uses the canned submission text.
pub async fn submit_and_confirm(
    webhook: &dyn ApplicationWebhook,
    generator: &dyn TextGenerator,
    job: &JobListing,
) -> Confirmation {
    let payload = ApplicationPayload::from(job);

    if let Err(e) = webhook.submit(&payload).await {
        warn!(error = %e, title = %job.title, company = %job.company_name, "application submission failed");
        return Confirmation {
            title: SUBMITTED_TITLE.to_string(),
            message: format!(
                "Your application for {} at {} has been submitted successfully!",
                job.title, job.company_name
            ),
        };
    }

    info!(title = %job.title, company = %job.company_name, "application submitted");
    let message = generate_confirmation(generator, &job.title, &job.company_name).await;

    Confirmation {
        title: format!("✨ {}", job.title),
        message,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ai::tests::StubGenerator;
    use crate::error::GenerationError;
    use std::sync::Mutex;

    pub(crate) struct RecordingWebhook {
        pub result: Result<(), SubmissionError>,
        pub received: Mutex<Vec<ApplicationPayload>>,
    }

    impl RecordingWebhook {
        pub(crate) fn with(result: Result<(), SubmissionError>) -> Self {
            Self {
                result,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApplicationWebhook for RecordingWebhook {
        async fn submit(&self, payload: &ApplicationPayload) -> Result<(), SubmissionError> {
            self.received.lock().unwrap().push(payload.clone());
            self.result.clone()
        }
    }

    fn job() -> JobListing {
        JobListing {
            id: "0-1".into(),
            company_name: "Green Energy".into(),
            logo_url: String::new(),
            title: "Project Coordinator".into(),
            location: "Berlin, Germany".into(),
            website_url: "https://example.com".into(),
            time_posted: "Just now".into(),
            description: "Coordinate renewable energy projects across Europe.".into(),
            company_description: None,
        }
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let value = serde_json::to_value(ApplicationPayload::from(&job())).unwrap();
        assert_eq!(value["title"], "Project Coordinator");
        assert_eq!(value["companyName"], "Green Energy");
        assert_eq!(value["companyDescription"], "");
        assert_eq!(value["location"], "Berlin, Germany");
        assert_eq!(
            value["descriptionText"],
            "Coordinate renewable energy projects across Europe."
        );
    }

    #[tokio::test]
    async fn test_submission_failure_uses_canned_text() {
        let webhook = RecordingWebhook::with(Err(SubmissionError::Status { status: 404 }));
        let generator = StubGenerator {
            result: Ok("should not be used".into()),
        };

        let confirmation = submit_and_confirm(&webhook, &generator, &job()).await;

        assert_eq!(confirmation.title, "Application Submitted");
        assert!(confirmation.message.contains("Project Coordinator"));
        assert!(confirmation.message.contains("Green Energy"));
        assert_ne!(confirmation.message, "should not be used");
    }

    #[tokio::test]
    async fn test_generation_failure_uses_canned_text() {
        let webhook = RecordingWebhook::with(Ok(()));
        let generator = StubGenerator {
            result: Err(GenerationError::Malformed("eof".into())),
        };

        let confirmation = submit_and_confirm(&webhook, &generator, &job()).await;

        assert_eq!(confirmation.title, "✨ Project Coordinator");
        assert!(!confirmation.message.is_empty());
        assert!(confirmation.message.starts_with("Congratulations!"));
    }

    #[tokio::test]
    async fn test_success_uses_generated_text_and_submits_job() {
        let webhook = RecordingWebhook::with(Ok(()));
        let generator = StubGenerator {
            result: Ok("Best of luck with Green Energy!".into()),
        };

        let confirmation = submit_and_confirm(&webhook, &generator, &job()).await;

        assert_eq!(confirmation.message, "Best of luck with Green Energy!");
        let received = webhook.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], ApplicationPayload::from(&job()));
    }
}
