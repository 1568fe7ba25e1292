use qualidados_audit::EnrollmentRecord;
use qualidados_recon::model::{CohortFields, SourceRecord};

use crate::error::StoreError;
use crate::store::{parse_iso_date, Store};

/// Load every persisted cohort as a `SourceRecord::Db`, joined with its
/// site. A dangling site reference loads with an empty site name; the
/// downstream engines render that as a sentinel instead of failing.
pub fn load_db_records(store: &Store) -> Result<Vec<SourceRecord>, StoreError> {
    let mut stmt = store.connection().prepare(
        "SELECT c.id, COALESCE(s.name, ''), c.course_name, c.start_date, c.end_date,
                c.enrolled, c.graduated, c.total_seats, c.occupied_seats, c.available_seats
         FROM cohorts c
         LEFT JOIN sites s ON s.id = c.site_id
         ORDER BY c.id",
    )?;

    let records = stmt
        .query_map([], |row| {
            Ok(SourceRecord::Db {
                id: row.get(0)?,
                fields: CohortFields {
                    site_name: row.get(1)?,
                    course_name: row.get(2)?,
                    start_date: parse_iso_date(row.get(3)?),
                    end_date: parse_iso_date(row.get(4)?),
                    enrolled: row.get(5)?,
                    graduated: row.get(6)?,
                    total_seats: row.get(7)?,
                    occupied_seats: row.get(8)?,
                    available_seats: row.get(9)?,
                },
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Load enrollment relations for the auditor.
pub fn load_enrollments(store: &Store) -> Result<Vec<EnrollmentRecord>, StoreError> {
    let mut stmt = store
        .connection()
        .prepare("SELECT id, student_id, cohort_id, status FROM enrollments ORDER BY id")?;

    let enrollments = stmt
        .query_map([], |row| {
            Ok(EnrollmentRecord {
                id: row.get(0)?,
                student_id: row.get(1)?,
                cohort_id: row.get(2)?,
                status: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(enrollments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use qualidados_recon::directory::{CohortDirectory, NewCohort, NewSite};

    fn seed(store: &mut Store) -> (i64, i64) {
        let site_id = store
            .create_site(&NewSite {
                name: "Lab Boa Viagem".into(),
                address: String::new(),
                city: String::new(),
            })
            .unwrap();
        let cohort_id = store
            .create_cohort(&NewCohort {
                site_id,
                course_name: "Curso de Python".into(),
                normalized_course: "Python".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 1),
                enrolled: 20,
                graduated: 5,
                total_seats: 25,
                occupied_seats: 20,
                available_seats: 5,
            })
            .unwrap();
        (site_id, cohort_id)
    }

    #[test]
    fn db_records_load_with_site_names_and_dates() {
        let mut store = Store::open_in_memory().unwrap();
        let (_, cohort_id) = seed(&mut store);

        let records = load_db_records(&store).unwrap();
        assert_eq!(records.len(), 1);
        match &records[0] {
            SourceRecord::Db { id, fields } => {
                assert_eq!(*id, cohort_id);
                assert_eq!(fields.site_name, "Lab Boa Viagem");
                assert_eq!(fields.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
                assert_eq!(fields.graduated, 5);
            }
            other => panic!("expected Db record, got {other:?}"),
        }
    }

    #[test]
    fn enrollments_load_in_id_order() {
        let mut store = Store::open_in_memory().unwrap();
        let (_, cohort_id) = seed(&mut store);
        store.insert_enrollment(7, cohort_id, "ativa").unwrap();
        store.insert_enrollment(7, cohort_id, "ativa").unwrap();
        store.insert_enrollment(8, cohort_id, "concluida").unwrap();

        let enrollments = load_enrollments(&store).unwrap();
        assert_eq!(enrollments.len(), 3);
        assert_eq!(enrollments[0].student_id, 7);
        assert_eq!(enrollments[2].status, "concluida");
    }
}
