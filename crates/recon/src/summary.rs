use crate::model::{ReconSummary, ReconciledCohort, Resolution};

/// Compute summary statistics from a reconciled record set.
pub fn compute_summary(cohorts: &[ReconciledCohort]) -> ReconSummary {
    let mut summary = ReconSummary {
        total: cohorts.len(),
        ..ReconSummary::default()
    };

    for cohort in cohorts {
        match (cohort.provenance.from_csv, cohort.provenance.from_db) {
            (true, true) => summary.matched += 1,
            (true, false) => summary.csv_only += 1,
            (false, true) => summary.db_only += 1,
            (false, false) => {}
        }

        if cohort.conflict_note.is_some() {
            summary.conflicts += 1;
        }

        // Matched records always carry both dates, so this counts exactly
        // the single-source records that sat out the matching phase.
        if cohort.start_date.is_none() || cohort.end_date.is_none() {
            summary.excluded_from_matching += 1;
        }

        if matches!(cohort.site_resolution, Some(Resolution::Created(_))) {
            summary.sites_created += 1;
        }
        if matches!(cohort.cohort_resolution, Some(Resolution::Created(_))) {
            summary.cohorts_created += 1;
        }
        if matches!(cohort.site_resolution, Some(Resolution::WouldCreate))
            || matches!(cohort.cohort_resolution, Some(Resolution::WouldCreate))
        {
            summary.would_create += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Provenance;
    use qualidados_taxonomy::NormalizedCourse;

    fn cohort(from_csv: bool, from_db: bool) -> ReconciledCohort {
        ReconciledCohort {
            id: None,
            site_name: "Lab Centro".into(),
            site_resolution: None,
            cohort_resolution: None,
            course: NormalizedCourse {
                original: "Python".into(),
                normalized: "Python".into(),
                category: "Lógica e Programação".into(),
                subcategory: None,
            },
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1),
            enrolled: 0,
            graduated: 0,
            total_seats: 0,
            occupied_seats: 0,
            available_seats: 0,
            csv_graduated: None,
            provenance: Provenance { from_csv, from_db },
            conflict_note: None,
            notes: Vec::new(),
        }
    }

    #[test]
    fn provenance_buckets_are_counted() {
        let cohorts = vec![cohort(true, true), cohort(true, false), cohort(false, true)];
        let summary = compute_summary(&cohorts);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.csv_only, 1);
        assert_eq!(summary.db_only, 1);
    }

    #[test]
    fn resolutions_and_conflicts_are_counted() {
        let mut created = cohort(true, false);
        created.site_resolution = Some(Resolution::Created(1));
        created.cohort_resolution = Some(Resolution::Created(2));

        let mut dry = cohort(true, false);
        dry.site_resolution = Some(Resolution::WouldCreate);
        dry.cohort_resolution = Some(Resolution::WouldCreate);

        let mut conflicted = cohort(true, true);
        conflicted.conflict_note = Some("delta".into());

        let mut undated = cohort(false, true);
        undated.end_date = None;

        let summary = compute_summary(&[created, dry, conflicted, undated]);
        assert_eq!(summary.sites_created, 1);
        assert_eq!(summary.cohorts_created, 1);
        assert_eq!(summary.would_create, 1);
        assert_eq!(summary.conflicts, 1);
        assert_eq!(summary.excluded_from_matching, 1);
    }
}
