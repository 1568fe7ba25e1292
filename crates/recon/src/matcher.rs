use chrono::NaiveDate;
use qualidados_taxonomy::Taxonomy;

use crate::model::CohortFields;

/// Site names compare trimmed and case-insensitive.
pub fn normalize_site(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The four-condition match rule. Symmetric: `matches(a, b) == matches(b, a)`.
///
/// A record missing either date fails conditions 3/4 and therefore never
/// matches; the engine surfaces that exclusion as a note.
pub fn matches(a: &CohortFields, b: &CohortFields, taxonomy: &Taxonomy, window_days: i64) -> bool {
    if normalize_site(&a.site_name) != normalize_site(&b.site_name) {
        return false;
    }

    if taxonomy.classify(&a.course_name).normalized != taxonomy.classify(&b.course_name).normalized
    {
        return false;
    }

    within_window(a.start_date, b.start_date, window_days)
        && within_window(a.end_date, b.end_date, window_days)
}

fn within_window(a: Option<NaiveDate>, b: Option<NaiveDate>, window_days: i64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).num_days().abs() <= window_days,
        _ => false,
    }
}
