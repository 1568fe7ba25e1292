use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// A raw course name resolved against the taxonomy.
///
/// Immutable value object: pure function of the input string plus the static
/// rule table, safe to cache by raw-string key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCourse {
    pub original: String,
    pub normalized: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Input row for aggregation: a raw course name and its volume.
#[derive(Debug, Clone)]
pub struct CourseTotal {
    pub course: String,
    pub total: i64,
}

/// One normalized course with totals summed across all raw variants.
#[derive(Debug, Clone, Serialize)]
pub struct CourseVolume {
    pub course: NormalizedCourse,
    pub total: i64,
}

/// Totals for one category (or one "category - subcategory") bucket.
///
/// `courses` lists each distinct normalized name at most once, no matter how
/// many raw variants mapped to it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryBucket {
    pub total: i64,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseAggregation {
    pub per_course: Vec<CourseVolume>,
    pub per_category: BTreeMap<String, CategoryBucket>,
    pub per_subcategory: BTreeMap<String, CategoryBucket>,
}
