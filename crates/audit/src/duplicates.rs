use std::collections::BTreeMap;

use crate::model::EnrollmentRecord;

/// Enrollment rows sharing one (student, cohort) pair.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub student_id: i64,
    pub cohort_id: i64,
    pub enrollments: Vec<EnrollmentRecord>,
}

/// Group all enrollment rows by (student, cohort); every group with more
/// than one row is a duplicate-registration candidate, regardless of status.
/// The underlying invariant is at most one *active* enrollment per pair, but
/// finalized duplicates still distort completion counts and are reported.
pub fn duplicate_groups(enrollments: &[EnrollmentRecord]) -> Vec<DuplicateGroup> {
    let mut groups: BTreeMap<(i64, i64), Vec<EnrollmentRecord>> = BTreeMap::new();

    for enrollment in enrollments {
        groups
            .entry((enrollment.student_id, enrollment.cohort_id))
            .or_default()
            .push(enrollment.clone());
    }

    groups
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|((student_id, cohort_id), enrollments)| DuplicateGroup {
            student_id,
            cohort_id,
            enrollments,
        })
        .collect()
}
