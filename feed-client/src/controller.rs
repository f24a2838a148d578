//! FeedController - incremental retrieval of the paged feed.
//!
//! This module provides [`FeedController`], the primary API for driving
//! "load more" pagination against a [`FeedSource`].
//!
//! # Architecture
//!
//! FeedController uses a pure state machine (from feed-core) for pagination
//! logic and interprets the actions to perform actual I/O via the
//! FeedSource trait.
//!
//! ```text
//! Application → FeedController → FeedSource → Backend
//!                     ↓
//!                feed-core (pure state machine)
//! ```
//!
//! Every transition is published as one atomic [`FeedState`] snapshot
//! through a watch channel; observers always see the latest snapshot and a
//! slow observer can never stall the controller.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};

use crate::source::{FeedSource, FeedSourceError};
use feed_core::{Action, FeedEvent, FeedSignal, FeedState};
use feed_types::{Job, JobId, PageToken};

/// Client errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Feed source error.
    #[error("feed source error: {0}")]
    Source(#[from] FeedSourceError),

    /// A listing was not found, neither loaded nor on the first page.
    #[error("job {id} not found")]
    JobNotFound {
        /// The id that was looked up.
        id: JobId,
    },
}

/// Drives incremental retrieval of a paged feed.
///
/// Owns one feed session: a monotonically growing item list plus the
/// loading / error / exhaustion signaling around it. Create one per
/// feed screen instance and discard it on session end; the state is
/// never persisted.
pub struct FeedController<S: FeedSource> {
    source: S,
    state: Arc<Mutex<FeedState>>,
    publisher: watch::Sender<FeedState>,
}

impl<S: FeedSource> FeedController<S> {
    /// Create a controller with an empty feed session.
    pub fn new(source: S) -> Self {
        let initial = FeedState::new();
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            source,
            state: Arc::new(Mutex::new(initial)),
            publisher,
        }
    }

    /// Request the next page.
    ///
    /// A silent no-op while a fetch is outstanding or after the feed is
    /// exhausted, so rapid repeated calls (scroll-threshold triggers) are
    /// safe. Success, end-of-data, and failure are all observable through
    /// the published [`FeedState`]; after a failure the next call retries
    /// the same page.
    pub async fn load_more(&self) {
        // Check-then-act under the state lock: at most one fetch can win.
        let page = {
            let mut state = self.state.lock().await;
            let (next, actions) = state.clone().on_event(FeedEvent::LoadRequested);
            *state = next;

            let page = actions.iter().find_map(|action| match action {
                Action::FetchPage { page } => Some(*page),
                _ => None,
            });
            match page {
                Some(page) => {
                    self.publisher.send_replace(state.clone());
                    page
                }
                // Gated: already loading, or exhausted.
                None => return,
            }
        };

        let event = match self.source.fetch_page(page).await {
            Ok(jobs) => FeedEvent::PageReceived { jobs },
            Err(e) => FeedEvent::FetchFailed {
                error: e.to_string(),
            },
        };

        let mut state = self.state.lock().await;
        let (next, actions) = state.clone().on_event(event);
        *state = next;
        self.publisher.send_replace(state.clone());

        for action in actions {
            if let Action::Emit(signal) = action {
                match signal {
                    FeedSignal::PageAppended { count } => {
                        tracing::debug!("Page {}: appended {} items", page, count);
                    }
                    FeedSignal::Exhausted => {
                        tracing::debug!("Feed exhausted at page {}", page);
                    }
                    FeedSignal::LoadFailed { error } => {
                        tracing::warn!("Page {} failed: {}", page, error);
                    }
                }
            }
        }
    }

    /// The current feed snapshot.
    pub fn state(&self) -> FeedState {
        self.publisher.borrow().clone()
    }

    /// Subscribe to feed snapshots.
    ///
    /// The receiver always holds the latest snapshot; every mutation is a
    /// single atomic transition.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.publisher.subscribe()
    }

    /// Resolve a single listing by id.
    ///
    /// Checks the already-loaded items first, then falls back to fetching
    /// the first page and scanning it. Read-only: the pagination state is
    /// not touched either way.
    pub async fn job_detail(&self, id: JobId) -> Result<Job, FeedError> {
        let loaded = {
            let state = self.publisher.borrow();
            state.items().iter().find(|job| job.id == id).cloned()
        };
        if let Some(job) = loaded {
            return Ok(job);
        }

        let jobs = self.source.fetch_page(PageToken::first()).await?;
        jobs.into_iter()
            .find(|job| job.id == id)
            .ok_or(FeedError::JobNotFound { id })
    }

    /// Get a reference to the underlying source (for testing).
    pub fn source(&self) -> &S {
        &self.source
    }
}
