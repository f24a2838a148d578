//! Listing and favorite-snapshot types.

use crate::JobId;
use serde::{Deserialize, Serialize};

/// One listing as delivered by the remote feed.
///
/// All display fields are optional: absence means the backend did not
/// provide the field ("not specified"), which is distinct from an empty
/// string and must be preserved as such. `requirements` distinguishes
/// "not listed" (`None`) from "explicitly none" (`Some(vec![])`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Backend-assigned identifier.
    pub id: JobId,
    /// Listing title.
    pub title: Option<String>,
    /// Work location.
    pub place: Option<String>,
    /// Salary description (free-form text from the backend).
    pub salary: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Outbound link (application form, phone link, etc).
    pub custom_link: Option<String>,
    /// Ordered requirement lines.
    pub requirements: Option<Vec<String>>,
}

impl Job {
    /// Create a listing with the given id and no other fields.
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            title: None,
            place: None,
            salary: None,
            description: None,
            custom_link: None,
            requirements: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the place.
    pub fn with_place(mut self, place: &str) -> Self {
        self.place = Some(place.to_string());
        self
    }

    /// Set the salary text.
    pub fn with_salary(mut self, salary: &str) -> Self {
        self.salary = Some(salary.to_string());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the outbound link.
    pub fn with_custom_link(mut self, link: &str) -> Self {
        self.custom_link = Some(link.to_string());
        self
    }

    /// Set the requirement lines.
    pub fn with_requirements(mut self, requirements: Vec<String>) -> Self {
        self.requirements = Some(requirements);
        self
    }
}

/// The persisted snapshot of a favorited [`Job`].
///
/// A copy of the displayable fields taken at favorite-time, so the
/// favorites list can be rebuilt without a network round-trip. It is not a
/// live reference: later changes to the source listing do not propagate.
/// One record exists per id; re-inserting the same id replaces the prior
/// snapshot. Requirement lines are not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Id of the favorited listing.
    pub id: JobId,
    /// Title at favorite-time.
    pub title: Option<String>,
    /// Place at favorite-time.
    pub place: Option<String>,
    /// Salary text at favorite-time.
    pub salary: Option<String>,
    /// Description at favorite-time.
    pub description: Option<String>,
    /// Outbound link at favorite-time.
    pub custom_link: Option<String>,
}

impl FavoriteRecord {
    /// Take a snapshot of a listing's displayable fields.
    pub fn snapshot_of(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            place: job.place.clone(),
            salary: job.salary.clone(),
            description: job.description.clone(),
            custom_link: job.custom_link.clone(),
        }
    }

    /// Rebuild a [`Job`] from this snapshot for offline rendering.
    ///
    /// Requirements come back as `None` — they were never persisted.
    pub fn into_job(self) -> Job {
        Job {
            id: self.id,
            title: self.title,
            place: self.place,
            salary: self.salary,
            description: self.description,
            custom_link: self.custom_link,
            requirements: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job::new(JobId::new(5))
            .with_title("Delivery Driver")
            .with_place("Bengaluru")
            .with_salary("₹15,000 - ₹20,000")
            .with_description("Two-wheeler required")
            .with_custom_link("tel:+911234567890")
            .with_requirements(vec!["License".into(), "Own vehicle".into()])
    }

    #[test]
    fn builder_sets_fields() {
        let job = sample_job();
        assert_eq!(job.id, JobId::new(5));
        assert_eq!(job.title.as_deref(), Some("Delivery Driver"));
        assert_eq!(job.requirements.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let job = Job::new(JobId::new(1));
        assert!(job.title.is_none());
        assert!(job.requirements.is_none());
    }

    #[test]
    fn empty_requirements_differ_from_absent() {
        let explicit_none = Job::new(JobId::new(1)).with_requirements(vec![]);
        let not_listed = Job::new(JobId::new(1));
        assert_ne!(explicit_none, not_listed);
    }

    #[test]
    fn snapshot_copies_display_fields() {
        let job = sample_job();
        let record = FavoriteRecord::snapshot_of(&job);
        assert_eq!(record.id, job.id);
        assert_eq!(record.title, job.title);
        assert_eq!(record.place, job.place);
        assert_eq!(record.salary, job.salary);
        assert_eq!(record.description, job.description);
        assert_eq!(record.custom_link, job.custom_link);
    }

    #[test]
    fn snapshot_is_independent_of_source() {
        let mut job = sample_job();
        let record = FavoriteRecord::snapshot_of(&job);
        job.title = Some("Renamed".into());
        assert_eq!(record.title.as_deref(), Some("Delivery Driver"));
    }

    #[test]
    fn into_job_drops_requirements() {
        let record = FavoriteRecord::snapshot_of(&sample_job());
        let rebuilt = record.into_job();
        assert!(rebuilt.requirements.is_none());
        assert_eq!(rebuilt.title.as_deref(), Some("Delivery Driver"));
    }
}
