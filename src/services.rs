use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::ai::{GeminiProvider, TextGenerator};
use crate::apply::{ApplicationWebhook, HttpWebhook};
use crate::config::Config;
use crate::search::{HttpJobSource, JobSource};

/// The three external collaborators, shared by the UI runtime and the CLI commands.
#[derive(Clone)]
pub struct Services {
    pub source: Arc<dyn JobSource>,
    pub webhook: Arc<dyn ApplicationWebhook>,
    pub generator: Arc<dyn TextGenerator>,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = config.http_client()?;

        let generator = GeminiProvider::new(
            client.clone(),
            config.generation_url.clone(),
            config.model.clone(),
            config.api_key.clone(),
        );
        info!(
            jobs_url = %config.jobs_url,
            webhook_url = %config.webhook_url,
            model = %config.model,
            generation_enabled = generator.has_credential(),
            "services configured"
        );

        Ok(Self {
            source: Arc::new(HttpJobSource::new(
                client.clone(),
                config.jobs_url.clone(),
                config.forward_query,
            )),
            webhook: Arc::new(HttpWebhook::new(client, config.webhook_url.clone())),
            generator: Arc::new(generator),
        })
    }
}
