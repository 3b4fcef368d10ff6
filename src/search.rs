use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::models::{ExternalJobRecord, JobListing};

/// Number of listings shown in the "best matches" grid.
pub const BEST_PICKS: usize = 3;

// --- Job source seam ---

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<ExternalJobRecord>, SearchError>;
}

/// Decodes the job source body: a bare list, or an object carrying the list in
/// `data`. A `data` that is missing or `null`, and any scalar body, count as no
/// records.
pub fn decode_payload(body: &str) -> Result<Vec<ExternalJobRecord>, SearchError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut fields) => match fields.remove("data") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(data) => data,
        },
        _ => return Ok(Vec::new()),
    };
    serde_json::from_value(list).map_err(|e| SearchError::Decode(e.to_string()))
}

// --- HTTP job source ---

#[derive(Debug, Clone)]
pub struct HttpJobSource {
    client: reqwest::Client,
    url: String,
    forward_query: bool,
}

impl HttpJobSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>, forward_query: bool) -> Self {
        Self {
            client,
            url: url.into(),
            forward_query,
        }
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch(&self, query: &str) -> Result<Vec<ExternalJobRecord>, SearchError> {
        let mut request = self.client.get(&self.url);
        let query = query.trim();
        if self.forward_query && !query.is_empty() {
            request = request.query(&[("q", query)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        debug!(bytes = body.len(), "job source responded");

        decode_payload(&body)
    }
}

// --- Search flow ---

/// Fetches and adapts listings. An empty result set is an error of its own.
pub async fn run_search(
    source: &dyn JobSource,
    query: &str,
) -> Result<Vec<JobListing>, SearchError> {
    let records = source.fetch(query).await.inspect_err(|e| {
        warn!(error = %e, "job search failed");
    })?;

    if records.is_empty() {
        info!("job source returned no records");
        return Err(SearchError::EmptyResult);
    }

    let stamp = chrono::Utc::now().timestamp_millis();
    let jobs: Vec<JobListing> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| JobListing::from_external(record, index, stamp))
        .collect();

    info!(count = jobs.len(), "job search completed");
    Ok(jobs)
}

/// Splits a result set into the first `BEST_PICKS` listings and the remainder.
pub fn partition(mut jobs: Vec<JobListing>) -> (Vec<JobListing>, Vec<JobListing>) {
    let split = jobs.len().min(BEST_PICKS);
    let other = jobs.split_off(split);
    (jobs, other)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    pub(crate) fn record(n: usize) -> ExternalJobRecord {
        ExternalJobRecord {
            title: format!("Job {}", n),
            company_name: format!("Company {}", n),
            location: format!("City {}", n),
            description_text: format!("Description {}", n),
            ..Default::default()
        }
    }

    pub(crate) struct StubSource {
        pub result: Result<Vec<ExternalJobRecord>, SearchError>,
        pub queries: Mutex<Vec<String>>,
    }

    impl StubSource {
        pub(crate) fn with(result: Result<Vec<ExternalJobRecord>, SearchError>) -> Self {
            Self {
                result,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl JobSource for StubSource {
        async fn fetch(&self, query: &str) -> Result<Vec<ExternalJobRecord>, SearchError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.result.clone()
        }
    }

    #[test]
    fn test_decode_bare_list() {
        let records = decode_payload(r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "B");
    }

    #[test]
    fn test_decode_wrapped_list() {
        let records = decode_payload(r#"{"data": [{"title": "A", "companyName": "Acme"}]}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_name, "Acme");
    }

    #[test]
    fn test_decode_object_without_data_is_empty() {
        let records = decode_payload(r#"{"status": "ok"}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_null_fields_keep_the_record() {
        let records = decode_payload(
            r#"[{"title": "A", "companyWebsite": null, "companyLogo": null}, {"title": "B"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "A");
        assert!(records[0].company_website.is_empty());
        assert!(records[0].company_logo.is_empty());
    }

    #[test]
    fn test_decode_null_data_is_empty() {
        let records = decode_payload(r#"{"data": null}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_scalar_body_is_empty() {
        assert!(decode_payload(r#""ok""#).unwrap().is_empty());
        assert!(decode_payload("42").unwrap().is_empty());
        assert!(decode_payload("null").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_data() {
        let result = decode_payload(r#"{"data": "not a list"}"#);
        assert!(matches!(result, Err(SearchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_run_search_null_data_is_empty_result() {
        let records = decode_payload(r#"{"data": null}"#).unwrap();
        let source = StubSource::with(Ok(records));
        assert_eq!(run_search(&source, "").await, Err(SearchError::EmptyResult));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let result = decode_payload("<html>gateway timeout</html>");
        assert!(matches!(result, Err(SearchError::Decode(_))));
    }

    #[test]
    fn test_partition_sizes_and_order() {
        for n in 0..10 {
            let jobs: Vec<JobListing> = (0..n)
                .map(|i| JobListing::from_external(record(i), i, 0))
                .collect();
            let (best, other) = partition(jobs.clone());

            assert_eq!(best.len(), n.min(3));
            assert_eq!(other.len(), n.saturating_sub(3));

            let rejoined: Vec<JobListing> = best.into_iter().chain(other).collect();
            assert_eq!(rejoined, jobs);
        }
    }

    #[tokio::test]
    async fn test_run_search_adapts_records_in_order() {
        let source = StubSource::with(Ok((0..7).map(record).collect()));
        let jobs = run_search(&source, "designer").await.unwrap();

        assert_eq!(jobs.len(), 7);
        assert_eq!(jobs[0].title, "Job 0");
        assert_eq!(jobs[6].company_name, "Company 6");
        assert!(jobs[3].id.starts_with("3-"));
        assert_eq!(source.queries.lock().unwrap().as_slice(), ["designer"]);
    }

    #[tokio::test]
    async fn test_run_search_empty_result() {
        let source = StubSource::with(Ok(Vec::new()));
        let result = run_search(&source, "").await;
        assert_eq!(result, Err(SearchError::EmptyResult));
    }

    #[tokio::test]
    async fn test_run_search_propagates_fetch_error() {
        let source = StubSource::with(Err(SearchError::Fetch { status: 500 }));
        let result = run_search(&source, "").await;
        assert_eq!(result, Err(SearchError::Fetch { status: 500 }));
    }
}
