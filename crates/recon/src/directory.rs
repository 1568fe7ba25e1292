use std::fmt;

use chrono::NaiveDate;

use crate::matcher::normalize_site;

// ---------------------------------------------------------------------------
// Seam types
// ---------------------------------------------------------------------------

/// Site creation payload. Address fields come from the configured
/// placeholders; the real values arrive later through manual data entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    pub name: String,
    pub address: String,
    pub city: String,
}

/// Lookup key for an existing cohort: site identity plus normalized course
/// plus start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortKey {
    pub site_id: i64,
    pub normalized_course: String,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewCohort {
    pub site_id: i64,
    pub course_name: String,
    pub normalized_course: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub enrolled: i64,
    pub graduated: i64,
    pub total_seats: i64,
    pub occupied_seats: i64,
    pub available_seats: i64,
}

#[derive(Debug)]
pub struct DirectoryError(pub String);

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for DirectoryError {}

/// The backing store, treated as a black box.
///
/// Contract for idempotence: `find_*` must be stable for unchanged data, and
/// the engine always calls it immediately before any `create_*`. The store's
/// own transaction semantics are outside this crate.
pub trait CohortDirectory {
    /// Case-insensitive substring lookup on the normalized site name.
    /// When several sites qualify, the lowest id wins (stable).
    fn find_site(&self, name: &str) -> Option<i64>;

    fn create_site(&mut self, site: &NewSite) -> Result<i64, DirectoryError>;

    fn find_cohort(&self, key: &CohortKey) -> Option<i64>;

    fn create_cohort(&mut self, cohort: &NewCohort) -> Result<i64, DirectoryError>;
}

// ---------------------------------------------------------------------------
// In-memory directory
// ---------------------------------------------------------------------------

/// In-memory [`CohortDirectory`], used by tests and dry-run callers that do
/// not want a real store behind the seam.
#[derive(Debug)]
pub struct MemoryDirectory {
    sites: Vec<(i64, NewSite)>,
    cohorts: Vec<(i64, CohortKey)>,
    next_site_id: i64,
    next_cohort_id: i64,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            sites: Vec::new(),
            cohorts: Vec::new(),
            next_site_id: 1,
            next_cohort_id: 1,
        }
    }

    /// Seed an existing site, returning its id.
    pub fn add_site(&mut self, name: &str) -> i64 {
        let id = self.next_site_id;
        self.next_site_id += 1;
        self.sites.push((
            id,
            NewSite {
                name: name.to_string(),
                address: String::new(),
                city: String::new(),
            },
        ));
        id
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn cohort_count(&self) -> usize {
        self.cohorts.len()
    }
}

impl CohortDirectory for MemoryDirectory {
    fn find_site(&self, name: &str) -> Option<i64> {
        let needle = normalize_site(name);
        if needle.is_empty() {
            return None;
        }
        self.sites
            .iter()
            .find(|(_, site)| normalize_site(&site.name).contains(&needle))
            .map(|(id, _)| *id)
    }

    fn create_site(&mut self, site: &NewSite) -> Result<i64, DirectoryError> {
        let id = self.next_site_id;
        self.next_site_id += 1;
        self.sites.push((id, site.clone()));
        Ok(id)
    }

    fn find_cohort(&self, key: &CohortKey) -> Option<i64> {
        self.cohorts
            .iter()
            .find(|(_, existing)| existing == key)
            .map(|(id, _)| *id)
    }

    fn create_cohort(&mut self, cohort: &NewCohort) -> Result<i64, DirectoryError> {
        let id = self.next_cohort_id;
        self.next_cohort_id += 1;
        self.cohorts.push((
            id,
            CohortKey {
                site_id: cohort.site_id,
                normalized_course: cohort.normalized_course.clone(),
                start_date: cohort.start_date,
            },
        ));
        Ok(id)
    }
}
