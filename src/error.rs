use thiserror::Error;

/// Failures of the search flow. The `Display` text is what the error banner shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("API request failed with status {status}")]
    Fetch { status: u16 },

    #[error("No jobs found. Please try again.")]
    EmptyResult,

    #[error("An error occurred while fetching jobs: {0}")]
    Transport(String),

    #[error("Unexpected response from the job source: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Application submission failed with status {status}")]
    Status { status: u16 },

    #[error("Application submission failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no API key configured for the generation service")]
    MissingCredential,

    #[error("generation request failed with status {status}")]
    Status { status: u16 },

    #[error("failed to reach the generation service: {0}")]
    Transport(String),

    #[error("malformed generation response: {0}")]
    Malformed(String),

    #[error("generation response contained no text")]
    Empty,
}
