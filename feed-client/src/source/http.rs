//! HTTP feed source for the listings backend.
//!
//! Decodes the backend's paged JSON shape leniently: every field except the
//! id may be null or missing, unknown keys are ignored, and records without
//! an id are skipped.

use super::{FeedSource, FeedSourceError};
use async_trait::async_trait;
use feed_types::{Job, JobId, PageToken};
use serde::Deserialize;
use std::time::Duration;

/// Default endpoint of the listings backend.
pub const DEFAULT_ENDPOINT: &str = "https://testapi.getlokalapp.com/common/jobs";

/// Configuration for [`HttpFeedSource`].
#[derive(Debug, Clone)]
pub struct HttpFeedConfig {
    /// Endpoint of the paged listings resource.
    pub endpoint: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl HttpFeedConfig {
    /// Create a configuration for the given endpoint.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for HttpFeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Feed source backed by the HTTP listings backend.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    http: reqwest::Client,
    config: HttpFeedConfig,
}

impl HttpFeedSource {
    /// Create a source from the given configuration.
    pub fn new(config: HttpFeedConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

impl From<reqwest::Error> for FeedSourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FeedSourceError::Parse(e.to_string())
        } else {
            FeedSourceError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_page(&self, page: PageToken) -> Result<Vec<Job>, FeedSourceError> {
        tracing::debug!("Fetching page {} from {}", page, self.config.endpoint);

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[("page", page.value())])
            .timeout(self.config.request_timeout)
            .send()
            .await?
            .error_for_status()?;

        let body: JobsPage = response.json().await?;
        let total = body.results.len();
        let jobs = body.into_jobs();
        if jobs.len() < total {
            tracing::warn!(
                "Page {}: skipped {} listings without an id",
                page,
                total - jobs.len()
            );
        }
        Ok(jobs)
    }
}

/// One page of the backend's listings resource.
#[derive(Debug, Deserialize)]
struct JobsPage {
    #[serde(default)]
    results: Vec<JobRecord>,
}

impl JobsPage {
    fn into_jobs(self) -> Vec<Job> {
        self.results
            .into_iter()
            .filter_map(JobRecord::into_job)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct JobRecord {
    id: Option<u64>,
    title: Option<String>,
    primary_details: Option<PrimaryDetails>,
    description: Option<String>,
    requirements: Option<Vec<String>>,
    custom_link: Option<String>,
}

/// Nested detail block; the backend capitalizes these keys.
#[derive(Debug, Default, Deserialize)]
struct PrimaryDetails {
    #[serde(rename = "Place")]
    place: Option<String>,
    #[serde(rename = "Salary")]
    salary: Option<String>,
}

impl JobRecord {
    /// Map to the domain type. Records without an id carry nothing the
    /// feed can address, so they are dropped.
    fn into_job(self) -> Option<Job> {
        let id = self.id?;
        let details = self.primary_details.unwrap_or_default();
        Some(Job {
            id: JobId::new(id),
            title: self.title,
            place: details.place,
            salary: details.salary,
            description: self.description,
            custom_link: self.custom_link,
            requirements: self.requirements,
        })
    }
}
