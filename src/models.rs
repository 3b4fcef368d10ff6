use serde::{Deserialize, Deserializer, Serialize};

pub const POSTED_LABEL: &str = "Just now";

/// Raw record as returned by the job source. Every field is optional on the wire
/// and an explicit `null` reads the same as a missing field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalJobRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company_linkedin_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company_logo: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description_text: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub job_function: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company_website: String,
    pub company_description: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub company_name: String,
    pub logo_url: String,
    pub title: String,
    pub location: String,
    pub website_url: String,
    pub time_posted: String,
    pub description: String,
    pub company_description: Option<String>,
}

impl JobListing {
    pub fn from_external(record: ExternalJobRecord, index: usize, stamp_ms: i64) -> Self {
        let company_description = record
            .company_description
            .filter(|text| !text.trim().is_empty());

        Self {
            id: format!("{}-{}", index, stamp_ms),
            company_name: record.company_name,
            logo_url: record.company_logo,
            title: record.title,
            location: record.location,
            website_url: record.company_website,
            time_posted: POSTED_LABEL.to_string(),
            description: record.description_text,
            company_description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub is_open: bool,
    pub title: String,
    pub message: String,
    pub is_generating: bool,
}
