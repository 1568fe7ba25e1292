use qualidados_taxonomy::Taxonomy;

use crate::config::ReconcilerConfig;
use crate::directory::{CohortDirectory, CohortKey, NewCohort, NewSite};
use crate::error::ReconError;
use crate::matcher::matches;
use crate::model::{
    CohortFields, Provenance, ReconReport, ReconciledCohort, Resolution, SourceRecord,
};
use crate::summary::compute_summary;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// When set, find-or-create resolves to `WouldCreate` instead of writing.
    pub dry_run: bool,
}

/// Merge the legacy extract with the live store records.
///
/// Each CSV record matches at most one DB record; the scan runs in DB list
/// order and the first satisfying record wins. That tie-break is arbitrary
/// but documented: when several DB cohorts fall inside the date windows the
/// earliest listed one is taken. A consumed DB record is not offered to later
/// CSV records.
pub fn reconcile(
    config: &ReconcilerConfig,
    taxonomy: &Taxonomy,
    directory: &mut dyn CohortDirectory,
    csv_records: &[SourceRecord],
    db_records: &[SourceRecord],
    opts: &ReconcileOptions,
) -> Result<ReconReport, ReconError> {
    let mut cohorts = Vec::with_capacity(csv_records.len() + db_records.len());
    let mut db_taken = vec![false; db_records.len()];

    for csv in csv_records {
        let mut matched_idx = None;
        if csv.matchable() {
            for (i, db) in db_records.iter().enumerate() {
                if db_taken[i] {
                    continue;
                }
                if matches(csv.fields(), db.fields(), taxonomy, config.date_window_days) {
                    matched_idx = Some(i);
                    break;
                }
            }
        }

        match matched_idx {
            Some(i) => {
                db_taken[i] = true;
                cohorts.push(merge_pair(csv.fields(), &db_records[i], taxonomy));
            }
            None => cohorts.push(resolve_csv_only(config, taxonomy, directory, csv, opts)?),
        }
    }

    for (i, db) in db_records.iter().enumerate() {
        if !db_taken[i] {
            cohorts.push(pass_through_db(db, taxonomy));
        }
    }

    let summary = compute_summary(&cohorts);
    Ok(ReconReport { summary, cohorts })
}

fn persisted_id(record: &SourceRecord) -> Option<i64> {
    match record {
        SourceRecord::Db { id, .. } => Some(*id),
        SourceRecord::Csv { .. } => None,
    }
}

/// Matched pair: DB identity and operational counts win. The CSV graduate
/// count is retained as metadata, and a CSV count above the DB's raises a
/// manual-review conflict note, never an automatic write-back.
fn merge_pair(csv: &CohortFields, db: &SourceRecord, taxonomy: &Taxonomy) -> ReconciledCohort {
    let db_fields = db.fields();

    let conflict_note = if csv.graduated > db_fields.graduated {
        Some(format!(
            "Extrato legado registra {} concluintes; a base registra {}. \
             Diferença mantida para conferência manual.",
            csv.graduated, db_fields.graduated
        ))
    } else {
        None
    };

    ReconciledCohort {
        id: persisted_id(db),
        site_name: db_fields.site_name.trim().to_string(),
        site_resolution: None,
        cohort_resolution: None,
        course: taxonomy.classify(&db_fields.course_name),
        start_date: db_fields.start_date,
        end_date: db_fields.end_date,
        enrolled: db_fields.enrolled,
        graduated: db_fields.graduated,
        total_seats: db_fields.total_seats,
        occupied_seats: db_fields.occupied_seats,
        available_seats: db_fields.available_seats,
        csv_graduated: Some(csv.graduated),
        provenance: Provenance { from_csv: true, from_db: true },
        conflict_note,
        notes: Vec::new(),
    }
}

/// CSV-only record: creation candidate. Site and cohort resolve through
/// find-or-create; the find runs immediately before any create, so an
/// unchanged store never gains duplicates across runs.
fn resolve_csv_only(
    config: &ReconcilerConfig,
    taxonomy: &Taxonomy,
    directory: &mut dyn CohortDirectory,
    csv: &SourceRecord,
    opts: &ReconcileOptions,
) -> Result<ReconciledCohort, ReconError> {
    let fields = csv.fields();
    let course = taxonomy.classify(&fields.course_name);

    let mut notes = Vec::new();
    if !csv.matchable() {
        let origin = match csv {
            SourceRecord::Csv { row, .. } => format!("linha {row} do extrato"),
            SourceRecord::Db { id, .. } => format!("registro {id} da base"),
        };
        notes.push(format!(
            "Registro ({origin}) sem data de início ou término; excluído do pareamento."
        ));
    }

    let site_resolution = match directory.find_site(&fields.site_name) {
        Some(id) => Resolution::Found(id),
        None if opts.dry_run => Resolution::WouldCreate,
        None => {
            let id = directory
                .create_site(&NewSite {
                    name: fields.site_name.trim().to_string(),
                    address: config.placeholder.address.clone(),
                    city: config.placeholder.city.clone(),
                })
                .map_err(|e| ReconError::Directory(e.to_string()))?;
            Resolution::Created(id)
        }
    };

    let cohort_resolution = match site_resolution.id() {
        // Site unresolved under dry-run: the cohort cannot be keyed either.
        None => Resolution::WouldCreate,
        Some(site_id) => {
            let key = CohortKey {
                site_id,
                normalized_course: course.normalized.clone(),
                start_date: fields.start_date,
            };
            match directory.find_cohort(&key) {
                Some(id) => Resolution::Found(id),
                None if opts.dry_run => Resolution::WouldCreate,
                None => {
                    let id = directory
                        .create_cohort(&NewCohort {
                            site_id,
                            course_name: fields.course_name.clone(),
                            normalized_course: course.normalized.clone(),
                            start_date: fields.start_date,
                            end_date: fields.end_date,
                            enrolled: fields.enrolled,
                            graduated: fields.graduated,
                            total_seats: fields.total_seats,
                            occupied_seats: fields.occupied_seats,
                            available_seats: fields.available_seats,
                        })
                        .map_err(|e| ReconError::Directory(e.to_string()))?;
                    Resolution::Created(id)
                }
            }
        }
    };

    Ok(ReconciledCohort {
        id: cohort_resolution.id(),
        site_name: fields.site_name.trim().to_string(),
        site_resolution: Some(site_resolution),
        cohort_resolution: Some(cohort_resolution),
        course,
        start_date: fields.start_date,
        end_date: fields.end_date,
        enrolled: fields.enrolled,
        graduated: fields.graduated,
        total_seats: fields.total_seats,
        occupied_seats: fields.occupied_seats,
        available_seats: fields.available_seats,
        csv_graduated: None,
        provenance: Provenance { from_csv: true, from_db: false },
        conflict_note: None,
        notes,
    })
}

/// DB-only record: passed through unchanged.
fn pass_through_db(db: &SourceRecord, taxonomy: &Taxonomy) -> ReconciledCohort {
    let fields = db.fields();

    let mut notes = Vec::new();
    if !db.matchable() {
        let origin = match db {
            SourceRecord::Db { id, .. } => format!("registro {id} da base"),
            SourceRecord::Csv { row, .. } => format!("linha {row} do extrato"),
        };
        notes.push(format!(
            "Registro ({origin}) sem data de início ou término; excluído do pareamento."
        ));
    }

    ReconciledCohort {
        id: persisted_id(db),
        site_name: fields.site_name.trim().to_string(),
        site_resolution: None,
        cohort_resolution: None,
        course: taxonomy.classify(&fields.course_name),
        start_date: fields.start_date,
        end_date: fields.end_date,
        enrolled: fields.enrolled,
        graduated: fields.graduated,
        total_seats: fields.total_seats,
        occupied_seats: fields.occupied_seats,
        available_seats: fields.available_seats,
        csv_graduated: None,
        provenance: Provenance { from_csv: false, from_db: true },
        conflict_note: None,
        notes,
    }
}
