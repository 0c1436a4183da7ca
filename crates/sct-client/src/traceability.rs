//! Typed client for the traceability service activity API.
//!
//! Context path: `/traceability-service`
//!
//! | Method | Path (relative to context) | Operation |
//! |--------|----------------------------|-----------|
//! | POST   | `/activitiesBulk?activityType=..&commentFilter=..&offset=..` | Activities for a set of concepts, one page per call |
//!
//! Every request carries the configured `Cookie` header and
//! `Accept: application/json`. The body is the JSON array of numeric
//! concept identifiers; it is identical for every page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use sct_core::{classify, ComponentType, Sctid};

use crate::config::{ConfigError, TraceabilityConfig};
use crate::error::TraceabilityError;

/// Context path of the traceability service.
const CONTEXT_PATH: &str = "traceability-service";

// -- Typed enums matching service values --------------------------------------

/// Kind of authoring event recorded by the traceability service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    ContentChange,
    ClassificationSave,
    Rebase,
    Promotion,
    CreateCodeSystemVersion,
    /// Forward-compatible catch-all for types added after this client.
    #[serde(other)]
    Unknown,
}

impl ActivityType {
    /// Wire name, as used in the `activityType` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContentChange => "CONTENT_CHANGE",
            Self::ClassificationSave => "CLASSIFICATION_SAVE",
            Self::Rebase => "REBASE",
            Self::Promotion => "PROMOTION",
            Self::CreateCodeSystemVersion => "CREATE_CODE_SYSTEM_VERSION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "CONTENT_CHANGE" => Ok(Self::ContentChange),
            "CLASSIFICATION_SAVE" => Ok(Self::ClassificationSave),
            "REBASE" => Ok(Self::Rebase),
            "PROMOTION" => Ok(Self::Promotion),
            "CREATE_CODE_SYSTEM_VERSION" => Ok(Self::CreateCodeSystemVersion),
            other => Err(format!("unknown activity type: {other}")),
        }
    }
}

/// What happened to a component within an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Create,
    Update,
    Inactivate,
    Delete,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

// -- Response types -----------------------------------------------------------

/// One authoring event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub highest_promoted_branch: Option<String>,
    /// Accepts RFC 3339 text or epoch milliseconds.
    #[serde(default, deserialize_with = "flexible_date")]
    pub commit_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub activity_type: Option<ActivityType>,
    #[serde(default)]
    pub commit_comment: Option<String>,
    #[serde(default)]
    pub concept_changes: Vec<ConceptChange>,
}

/// Changes to one concept and its dependent components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptChange {
    #[serde(default)]
    pub concept_id: Option<u64>,
    #[serde(default)]
    pub component_changes: Vec<ComponentChange>,
}

/// A change to a single component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentChange {
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub change_type: Option<ChangeType>,
    #[serde(default)]
    pub effective_time_null: bool,
}

impl ComponentChange {
    /// Type of the changed component, derived from its identifier.
    /// Reference set members carry UUIDs and classify as `Unknown`.
    pub fn component_type(&self) -> ComponentType {
        classify(self.component_id.as_deref())
    }
}

/// One page of the paginated activity response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPage {
    #[serde(default)]
    pub content: Vec<Activity>,
    /// A page without the flag is treated as the final page.
    #[serde(default = "final_page")]
    pub last: bool,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

fn final_page() -> bool {
    true
}

fn flexible_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(DateTime<Utc>),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Text(dt)) => Ok(Some(dt)),
        Some(Raw::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
    }
}

// -- Client -------------------------------------------------------------------

/// Client for the traceability service.
#[derive(Debug, Clone)]
pub struct TraceabilityClient {
    http: reqwest::Client,
    base_url: url::Url,
    max_retries: u32,
}

impl TraceabilityClient {
    /// Build a client whose every request carries the configured cookie and
    /// `Accept: application/json`.
    pub fn new(config: TraceabilityConfig) -> Result<Self, TraceabilityError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut cookie = reqwest::header::HeaderValue::from_str(config.cookie.as_str())
            .map_err(|_| ConfigError::InvalidCookie)?;
        cookie.set_sensitive(true);
        headers.insert(reqwest::header::COOKIE, cookie);
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| TraceabilityError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_retries: config.max_retries,
        })
    }

    /// All activities of `activity_type` touching any of `concept_ids`.
    ///
    /// Requests pages until the service reports the last one and returns
    /// their contents concatenated in page order. Every identifier must be a
    /// concept; anything else fails before a request is sent.
    pub async fn concept_activity(
        &self,
        concept_ids: &[Sctid],
        comment_filter: Option<&str>,
        activity_type: ActivityType,
    ) -> Result<Vec<Activity>, TraceabilityError> {
        let ids = numeric_concept_ids(concept_ids)?;

        let mut activities = Vec::new();
        let mut offset: u64 = 0;
        loop {
            let page = self
                .activity_page(&ids, comment_filter, activity_type, offset)
                .await?;
            let received = page.content.len();
            tracing::debug!(
                offset,
                received,
                last = page.last,
                total = ?page.total_elements,
                "received activity page"
            );
            activities.extend(page.content);

            if page.last {
                break;
            }
            if received == 0 {
                tracing::warn!(offset, "empty activity page not flagged last, stopping");
                break;
            }
            offset += received as u64;
        }

        tracing::info!(
            concepts = ids.len(),
            activities = activities.len(),
            %activity_type,
            "fetched concept activity"
        );
        Ok(activities)
    }

    /// Fetch a single page starting at `offset`.
    ///
    /// Calls `POST {base_url}/traceability-service/activitiesBulk`.
    pub async fn activity_page(
        &self,
        concept_ids: &[u64],
        comment_filter: Option<&str>,
        activity_type: ActivityType,
        offset: u64,
    ) -> Result<ActivityPage, TraceabilityError> {
        let endpoint = "POST /activitiesBulk";
        let url = format!(
            "{}/{}/activitiesBulk",
            self.base_url.as_str().trim_end_matches('/'),
            CONTEXT_PATH
        );

        let offset = offset.to_string();
        let mut query: Vec<(&str, &str)> = vec![("activityType", activity_type.as_str())];
        if let Some(filter) = comment_filter {
            query.push(("commentFilter", filter));
        }
        query.push(("offset", offset.as_str()));

        let resp = crate::retry::retry_send(self.max_retries, || {
            self.http.post(&url).query(&query).json(concept_ids).send()
        })
        .await
        .map_err(|e| TraceabilityError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TraceabilityError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| TraceabilityError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

fn numeric_concept_ids(concept_ids: &[Sctid]) -> Result<Vec<u64>, TraceabilityError> {
    concept_ids
        .iter()
        .map(|id| match id.component_type() {
            ComponentType::Concept => Ok(id.as_u64()),
            found => Err(TraceabilityError::NotAConcept {
                id: id.clone(),
                found,
            }),
        })
        .collect()
}
