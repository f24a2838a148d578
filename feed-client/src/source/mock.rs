//! Mock feed source for testing.
//!
//! Allows queueing pages and capturing fetched tokens for verification.

use super::{FeedSource, FeedSourceError};
use async_trait::async_trait;
use feed_types::{Job, PageToken};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock feed source for testing.
///
/// Allows queueing pages and capturing fetched tokens for verification.
/// An exhausted queue yields an empty page (end-of-data).
#[derive(Debug, Default)]
pub struct MockFeedSource {
    inner: Arc<Mutex<MockFeedSourceInner>>,
}

#[derive(Debug, Default)]
struct MockFeedSourceInner {
    pages: VecDeque<Vec<Job>>,
    fetched_pages: Vec<PageToken>,
    fail_next_network: Option<String>,
    fail_next_parse: Option<String>,
}

impl MockFeedSource {
    /// Create a new mock feed source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page to be returned by the next `fetch_page()` call.
    pub fn queue_page(&self, jobs: Vec<Job>) {
        let mut inner = self.inner.lock().unwrap();
        inner.pages.push_back(jobs);
    }

    /// Get all page tokens that were fetched.
    pub fn fetched_pages(&self) -> Vec<PageToken> {
        let inner = self.inner.lock().unwrap();
        inner.fetched_pages.clone()
    }

    /// Cause the next fetch to fail with a network error.
    pub fn fail_next_fetch(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_network = Some(error.to_string());
    }

    /// Cause the next fetch to fail with a parse error.
    pub fn fail_next_parse(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_parse = Some(error.to_string());
    }

    /// Clear all state (queued pages, recorded fetches, failures).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockFeedSourceInner::default();
    }
}

impl Clone for MockFeedSource {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch_page(&self, page: PageToken) -> Result<Vec<Job>, FeedSourceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetched_pages.push(page);

        // Check for forced failures
        if let Some(error) = inner.fail_next_network.take() {
            return Err(FeedSourceError::Network(error));
        }
        if let Some(error) = inner.fail_next_parse.take() {
            return Err(FeedSourceError::Parse(error));
        }

        Ok(inner.pages.pop_front().unwrap_or_default())
    }
}
