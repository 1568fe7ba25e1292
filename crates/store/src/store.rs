use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use qualidados_recon::directory::{
    CohortDirectory, CohortKey, DirectoryError, NewCohort, NewSite,
};
use qualidados_recon::matcher::normalize_site;

use crate::error::StoreError;
use crate::schema;

/// SQLite-backed store. Implements the reconciler's [`CohortDirectory`]
/// seam; the engine's find-before-create calling pattern gives best-effort
/// idempotence without claiming transactional guarantees.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Fixture/seed helper for enrollment relations.
    pub fn insert_enrollment(
        &mut self,
        student_id: i64,
        cohort_id: i64,
        status: &str,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO enrollments (student_id, cohort_id, status) VALUES (?1, ?2, ?3)",
            params![student_id, cohort_id, status],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_site_impl(&self, name: &str) -> Result<Option<i64>, StoreError> {
        let needle = normalize_site(name);
        if needle.is_empty() {
            return Ok(None);
        }

        // Unicode-aware case folding happens here, not in SQL: SQLite's
        // lower() only folds ASCII.
        let mut stmt = self.conn.prepare("SELECT id, name FROM sites ORDER BY id")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let stored: String = row.get(1)?;
            if normalize_site(&stored).contains(&needle) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    fn create_site_impl(&mut self, site: &NewSite) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO sites (name, address, city) VALUES (?1, ?2, ?3)",
            params![site.name, site.address, site.city],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_cohort_impl(&self, key: &CohortKey) -> Result<Option<i64>, StoreError> {
        let start = key.start_date.map(iso_date);
        let id = self
            .conn
            .query_row(
                "SELECT id FROM cohorts
                 WHERE site_id = ?1 AND normalized_course = ?2 AND start_date IS ?3
                 ORDER BY id LIMIT 1",
                params![key.site_id, key.normalized_course, start],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(id)
    }

    fn create_cohort_impl(&mut self, cohort: &NewCohort) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO cohorts (site_id, course_name, normalized_course, start_date, end_date,
                                  enrolled, graduated, total_seats, occupied_seats, available_seats)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                cohort.site_id,
                cohort.course_name,
                cohort.normalized_course,
                cohort.start_date.map(iso_date),
                cohort.end_date.map(iso_date),
                cohort.enrolled,
                cohort.graduated,
                cohort.total_seats,
                cohort.occupied_seats,
                cohort.available_seats,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

impl CohortDirectory for Store {
    fn find_site(&self, name: &str) -> Option<i64> {
        self.find_site_impl(name).unwrap_or(None)
    }

    fn create_site(&mut self, site: &NewSite) -> Result<i64, DirectoryError> {
        self.create_site_impl(site)
            .map_err(|e| DirectoryError(e.to_string()))
    }

    fn find_cohort(&self, key: &CohortKey) -> Option<i64> {
        self.find_cohort_impl(key).unwrap_or(None)
    }

    fn create_cohort(&mut self, cohort: &NewCohort) -> Result<i64, DirectoryError> {
        self.create_cohort_impl(cohort)
            .map_err(|e| DirectoryError(e.to_string()))
    }
}

pub(crate) fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_iso_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_site(name: &str) -> NewSite {
        NewSite {
            name: name.into(),
            address: "Endereço não informado".into(),
            city: "Não informado".into(),
        }
    }

    fn new_cohort(site_id: i64, course: &str, start: Option<NaiveDate>) -> NewCohort {
        NewCohort {
            site_id,
            course_name: course.into(),
            normalized_course: course.into(),
            start_date: start,
            end_date: start.map(|d| d + chrono::Duration::days(120)),
            enrolled: 20,
            graduated: 0,
            total_seats: 25,
            occupied_seats: 20,
            available_seats: 5,
        }
    }

    #[test]
    fn site_find_or_create_round_trip() {
        let mut store = Store::open_in_memory().unwrap();
        assert_eq!(store.find_site("Boa Viagem"), None);

        let id = store.create_site(&new_site("Laboratório Boa Viagem")).unwrap();
        assert_eq!(store.find_site("boa viagem"), Some(id));
        assert_eq!(store.find_site("BOA VIAGEM"), Some(id));
        assert_eq!(store.find_site("Casa Amarela"), None);
    }

    #[test]
    fn site_lookup_is_stable_by_lowest_id() {
        let mut store = Store::open_in_memory().unwrap();
        let first = store.create_site(&new_site("Lab Centro I")).unwrap();
        store.create_site(&new_site("Lab Centro II")).unwrap();
        assert_eq!(store.find_site("lab centro"), Some(first));
    }

    #[test]
    fn cohort_find_matches_null_start_dates() {
        let mut store = Store::open_in_memory().unwrap();
        let site_id = store.create_site(&new_site("Lab Centro")).unwrap();

        let undated = store.create_cohort(&new_cohort(site_id, "Python", None)).unwrap();
        let key = CohortKey {
            site_id,
            normalized_course: "Python".into(),
            start_date: None,
        };
        assert_eq!(store.find_cohort(&key), Some(undated));

        // A dated key does not match the undated cohort.
        let dated_key = CohortKey {
            site_id,
            normalized_course: "Python".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        assert_eq!(store.find_cohort(&dated_key), None);
    }

    #[test]
    fn cohort_dates_round_trip_through_text() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1);
        let mut store = Store::open_in_memory().unwrap();
        let site_id = store.create_site(&new_site("Lab Centro")).unwrap();
        let id = store.create_cohort(&new_cohort(site_id, "Python", start)).unwrap();

        let key = CohortKey {
            site_id,
            normalized_course: "Python".into(),
            start_date: start,
        };
        assert_eq!(store.find_cohort(&key), Some(id));
    }
}
