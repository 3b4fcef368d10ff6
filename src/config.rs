use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::{DEFAULT_MODEL, GEMINI_API_URL};

pub const DEFAULT_JOBS_URL: &str =
    "http://localhost:5678/webhook-test/670ed34a-1626-4135-b89a-25b47fb52571";
pub const DEFAULT_WEBHOOK_URL: &str =
    "http://localhost:5678/webhook-test/c918d23e-9d13-4667-bc41-f23317018908";

/// Runtime settings. Every option can also come from the environment or a `.env` file.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Job source endpoint (GET)
    #[arg(long, env = "DREAMJOB_JOBS_URL", default_value = DEFAULT_JOBS_URL)]
    pub jobs_url: String,

    /// Application webhook endpoint (POST)
    #[arg(long, env = "DREAMJOB_WEBHOOK_URL", default_value = DEFAULT_WEBHOOK_URL)]
    pub webhook_url: String,

    /// Base URL of the text-generation API
    #[arg(long, env = "DREAMJOB_GENERATION_URL", default_value = GEMINI_API_URL)]
    pub generation_url: String,

    /// Text-generation model
    #[arg(long, env = "DREAMJOB_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key for the text-generation service; canned confirmations are used without one
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Send the search text to the job source as `?q=`
    #[arg(long, env = "DREAMJOB_FORWARD_QUERY")]
    pub forward_query: bool,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "DREAMJOB_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Directory for the preference file and the log
    #[arg(long, env = "DREAMJOB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. `info` or `dreamjob=debug`
    #[arg(long, env = "DREAMJOB_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "dreamjob") {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(concat!("dreamjob/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn test_explicit_flags() {
        let cli = TestCli::parse_from([
            "dreamjob",
            "--jobs-url",
            "http://jobs.test/list",
            "--forward-query",
            "--timeout-secs",
            "5",
            "--data-dir",
            "/tmp/dreamjob-test",
        ]);
        let config = cli.config;

        assert_eq!(config.jobs_url, "http://jobs.test/list");
        assert!(config.forward_query);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/dreamjob-test"));
        assert!(config.http_client().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let cli = TestCli::parse_from(["dreamjob", "--timeout-secs", "0"]);
        assert_eq!(cli.config.timeout(), Duration::from_secs(1));
    }
}
