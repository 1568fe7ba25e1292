use chrono::NaiveDate;
use qualidados_taxonomy::NormalizedCourse;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// The cohort shape both sources share. Missing/unparseable dates are `None`:
/// such records are excluded from matching, never rejected.
#[derive(Debug, Clone, Default)]
pub struct CohortFields {
    pub site_name: String,
    pub course_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub enrolled: i64,
    pub graduated: i64,
    pub total_seats: i64,
    pub occupied_seats: i64,
    pub available_seats: i64,
}

/// A cohort description from one of the two source systems.
#[derive(Debug, Clone)]
pub enum SourceRecord {
    /// Legacy spreadsheet extract row (1-based row for notes).
    Csv { row: usize, fields: CohortFields },
    /// Live relational record with its persisted id.
    Db { id: i64, fields: CohortFields },
}

impl SourceRecord {
    pub fn fields(&self) -> &CohortFields {
        match self {
            Self::Csv { fields, .. } | Self::Db { fields, .. } => fields,
        }
    }

    /// Whether the record carries both dates and can participate in matching.
    pub fn matchable(&self) -> bool {
        let f = self.fields();
        f.start_date.is_some() && f.end_date.is_some()
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Which source system(s) contributed to a reconciled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub from_csv: bool,
    pub from_db: bool,
}

/// Find-or-create outcome for a referenced entity.
///
/// Replaces the legacy "-1 means would-create" sentinel with an explicit
/// tagged result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Resolution {
    /// An existing entity was reused.
    Found(i64),
    /// A new entity was created (dry-run off).
    Created(i64),
    /// A create is needed but dry-run suppressed the write.
    WouldCreate,
}

impl Resolution {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Found(id) | Self::Created(id) => Some(*id),
            Self::WouldCreate => None,
        }
    }
}

/// One merged cohort. Identity and operational counts come from the DB side
/// when matched; the CSV side's diverging graduate count is retained as
/// metadata and never written back.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledCohort {
    /// Persisted id: the DB record's id on match, the resolved id on the
    /// CSV-only path, `None` when dry-run suppressed creation.
    pub id: Option<i64>,
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_resolution: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort_resolution: Option<Resolution>,
    pub course: NormalizedCourse,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub enrolled: i64,
    pub graduated: i64,
    pub total_seats: i64,
    pub occupied_seats: i64,
    pub available_seats: i64,
    /// CSV-side graduate count on a matched pair, kept for delta inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_graduated: Option<i64>,
    pub provenance: Provenance,
    /// Manual-review flag: CSV reports more graduates than the DB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_note: Option<String>,
    /// Informational notes (e.g. exclusion from matching for missing dates).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub total: usize,
    pub matched: usize,
    pub csv_only: usize,
    pub db_only: usize,
    pub conflicts: usize,
    pub excluded_from_matching: usize,
    pub sites_created: usize,
    pub cohorts_created: usize,
    pub would_create: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub summary: ReconSummary,
    pub cohorts: Vec<ReconciledCohort>,
}
