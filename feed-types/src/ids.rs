//! Identity and paging types for jobfeed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The backend-assigned identifier of a listing.
///
/// Unique within a feed session. The backend may legitimately repeat an id
/// across pages; this layer does not deduplicate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(u64);

impl JobId {
    /// Create a JobId with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of this JobId.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JobId({})", self.0)
    }
}

/// An opaque cursor identifying the next page to fetch.
///
/// Here a 1-based page counter. The token is assigned by the feed layer,
/// not by callers; callers only ever hand it back unchanged.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageToken(u64);

impl PageToken {
    /// The token for the first page of a feed session.
    pub fn first() -> Self {
        Self(1)
    }

    /// Create a PageToken with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of this PageToken.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The token for the page after this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageToken {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageToken({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_roundtrip() {
        let id = JobId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id, JobId::new(42));
    }

    #[test]
    fn job_id_ordering() {
        assert!(JobId::new(1) < JobId::new(2));
    }

    #[test]
    fn job_id_serializes_as_number() {
        let json = serde_json::to_string(&JobId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn page_token_starts_at_one() {
        assert_eq!(PageToken::first().value(), 1);
        assert_eq!(PageToken::default(), PageToken::first());
    }

    #[test]
    fn page_token_next_increments() {
        let page = PageToken::first();
        assert_eq!(page.next().value(), 2);
        assert_eq!(page.next().next().value(), 3);
    }

    #[test]
    fn page_token_saturating_next() {
        let page = PageToken::new(u64::MAX);
        assert_eq!(page.next().value(), u64::MAX); // Saturates, doesn't wrap
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(JobId::new(5).to_string(), "5");
        assert_eq!(PageToken::new(3).to_string(), "3");
    }
}
