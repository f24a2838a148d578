//! Remote feed source abstraction for jobfeed.
//!
//! This module provides a pluggable source layer that abstracts the paged
//! remote listing endpoint (HTTP backend, mock for testing).
//!
//! # Design
//!
//! The source trait is async and stateless from the caller's view:
//! - `fetch_page()` requests one page by token
//! - an empty page signals end-of-data, never an error
//!
//! # Example
//!
//! ```ignore
//! let source = MockFeedSource::new();
//! source.queue_page(vec![job]);
//! let jobs = source.fetch_page(PageToken::first()).await?;
//! ```

mod http;
mod mock;

pub use http::{HttpFeedConfig, HttpFeedSource};
pub use mock::MockFeedSource;

use async_trait::async_trait;
use feed_types::{Job, PageToken};
use thiserror::Error;

/// Feed source errors.
#[derive(Debug, Error)]
pub enum FeedSourceError {
    /// The request could not reach the backend or came back non-2xx.
    #[error("network error: {0}")]
    Network(String),

    /// The response arrived but could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Source trait for fetching pages of the remote feed.
///
/// Implementations handle the underlying endpoint (HTTP backend, mock, etc).
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch one page of listings.
    ///
    /// Returns the page's items in backend order. An empty vec means
    /// end-of-data; implementations must not turn "no more pages" into an
    /// error.
    async fn fetch_page(&self, page: PageToken) -> Result<Vec<Job>, FeedSourceError>;
}
