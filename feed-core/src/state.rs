//! Pagination state machine for jobfeed.
//!
//! This module provides a pure, side-effect-free state machine for driving
//! incremental retrieval of a paged feed. The state machine takes events as
//! input and produces a new state plus a list of actions to execute.
//!
//! The actual I/O (fetching pages) is performed by feed-client, not by this
//! module. This enables instant unit testing without network mocks.

use feed_types::{Job, PageToken};

/// Phase of the pagination state machine - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    /// No fetch outstanding; more pages may exist.
    Idle,
    /// A page fetch is outstanding.
    Loading,
    /// The last fetch failed; the same page will be retried on the next
    /// load request.
    Failed {
        /// Human-readable description of the failure.
        error: String,
    },
    /// The feed returned an empty page. Terminal: no further fetch is ever
    /// attempted.
    Exhausted,
}

/// Accumulated feed state plus the machine's current phase.
///
/// `items` is append-only within a session: it never shrinks and never
/// reorders. Duplicate ids across pages are *not* deduplicated here —
/// the contract documents insertion order only, and deduplication is a
/// presentation-layer concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    items: Vec<Job>,
    next_page: PageToken,
    phase: FeedPhase,
}

impl FeedState {
    /// Create an empty feed state ready to load the first page.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_page: PageToken::first(),
            phase: FeedPhase::Idle,
        }
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (feed-client)
    /// is responsible for executing the returned actions.
    pub fn on_event(mut self, event: FeedEvent) -> (Self, Vec<Action>) {
        match (self.phase.clone(), event) {
            // A load request is honored only when no fetch is outstanding
            // and the feed is not exhausted. Any prior error is cleared.
            (FeedPhase::Idle | FeedPhase::Failed { .. }, FeedEvent::LoadRequested) => {
                self.phase = FeedPhase::Loading;
                let page = self.next_page;
                (self, vec![Action::FetchPage { page }])
            }

            // Non-empty page: append in received order, advance the token.
            (FeedPhase::Loading, FeedEvent::PageReceived { jobs }) if !jobs.is_empty() => {
                let count = jobs.len();
                self.items.extend(jobs);
                self.next_page = self.next_page.next();
                self.phase = FeedPhase::Idle;
                (self, vec![Action::Emit(FeedSignal::PageAppended { count })])
            }

            // Empty page is the end-of-data sentinel, not an error.
            (FeedPhase::Loading, FeedEvent::PageReceived { .. }) => {
                self.phase = FeedPhase::Exhausted;
                (self, vec![Action::Emit(FeedSignal::Exhausted)])
            }

            // Failure leaves items and next_page untouched so the next load
            // request retries the same page.
            (FeedPhase::Loading, FeedEvent::FetchFailed { error }) => {
                self.phase = FeedPhase::Failed {
                    error: error.clone(),
                };
                (self, vec![Action::Emit(FeedSignal::LoadFailed { error })])
            }

            // Everything else is a silent no-op: a load request while
            // loading or after exhaustion, or a stray result outside Loading.
            (_, _) => (self, vec![]),
        }
    }

    /// The accumulated items, in arrival order.
    pub fn items(&self) -> &[Job] {
        &self.items
    }

    /// The token of the next page to request.
    pub fn next_page(&self) -> PageToken {
        self.next_page
    }

    /// The machine's current phase.
    pub fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    /// True while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FeedPhase::Loading)
    }

    /// False once an empty page has been received.
    pub fn has_more(&self) -> bool {
        !matches!(self.phase, FeedPhase::Exhausted)
    }

    /// The last fetch error, if the machine is in the failed phase.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            FeedPhase::Failed { error } => Some(error),
            _ => None,
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that drive the pagination state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A consumer asked for the next page ("load more").
    LoadRequested,
    /// The outstanding fetch returned a page (possibly empty).
    PageReceived {
        /// Items of the page, in received order.
        jobs: Vec<Job>,
    },
    /// The outstanding fetch failed.
    FetchFailed {
        /// Human-readable description of the failure.
        error: String,
    },
}

/// Actions to be executed by feed-client.
///
/// These are instructions, not side effects. feed-client interprets these
/// and performs the actual I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch the given page from the remote feed source.
    FetchPage {
        /// The page to request.
        page: PageToken,
    },
    /// Emit a signal to the application.
    Emit(FeedSignal),
}

/// Signals emitted to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSignal {
    /// A non-empty page was appended to the feed.
    PageAppended {
        /// Number of items appended.
        count: usize,
    },
    /// The feed reached end-of-data.
    Exhausted,
    /// The outstanding fetch failed.
    LoadFailed {
        /// Human-readable description of the failure.
        error: String,
    },
}
