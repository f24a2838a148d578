//! Derived view composition for jobfeed.
//!
//! Merges a feed snapshot with the favorite-id set into a single structure
//! for presentation code. Owns no state, performs no I/O, and is recomputed
//! on demand.

use crate::state::FeedState;
use feed_types::{Job, JobId};
use std::collections::BTreeSet;

/// One feed row paired with its favorite flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    /// The listing.
    pub job: Job,
    /// Whether the listing is currently favorited.
    pub is_favorite: bool,
}

/// A merged snapshot of the feed and favorite membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedViewState {
    /// Feed rows in arrival order, each with its favorite flag.
    pub rows: Vec<JobRowView>,
    /// True while a page fetch is outstanding.
    pub is_loading: bool,
    /// False once the feed reached end-of-data.
    pub has_more: bool,
    /// The last fetch error, if any.
    pub error: Option<String>,
}

impl FeedViewState {
    /// Compose the view from a feed snapshot and the favorite-id set.
    pub fn compose(feed: &FeedState, favorites: &BTreeSet<JobId>) -> Self {
        Self {
            rows: feed
                .items()
                .iter()
                .map(|job| JobRowView {
                    job: job.clone(),
                    is_favorite: favorites.contains(&job.id),
                })
                .collect(),
            is_loading: feed.is_loading(),
            has_more: feed.has_more(),
            error: feed.error().map(str::to_string),
        }
    }
}
