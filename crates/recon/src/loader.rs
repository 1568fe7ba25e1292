use chrono::NaiveDate;

use crate::config::ColumnMapping;
use crate::error::ReconError;
use crate::model::{CohortFields, SourceRecord};

/// Load legacy-extract rows into `SourceRecord::Csv`, applying the header
/// mapping.
///
/// Malformed *data* degrades instead of failing: blank or unparseable dates
/// become `None` (the record is later excluded from matching with a note)
/// and unparseable counts read as 0. Structural problems, such as a mapped
/// column missing from the header, are errors.
pub fn load_csv_records(
    data: &str,
    columns: &ColumnMapping,
) -> Result<Vec<SourceRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn { column: name.into() })
    };

    let site_idx = idx(&columns.site)?;
    let course_idx = idx(&columns.course)?;
    let start_idx = idx(&columns.start_date)?;
    let end_idx = idx(&columns.end_date)?;
    let enrolled_idx = idx(&columns.enrolled)?;
    let graduated_idx = idx(&columns.graduated)?;
    let total_idx = idx(&columns.total_seats)?;
    let occupied_idx = idx(&columns.occupied_seats)?;
    let available_idx = idx(&columns.available_seats)?;

    let mut records = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let get = |idx: usize| record.get(idx).unwrap_or("").trim();

        records.push(SourceRecord::Csv {
            // Header occupies line 1.
            row: i + 2,
            fields: CohortFields {
                site_name: get(site_idx).to_string(),
                course_name: get(course_idx).to_string(),
                start_date: parse_date(get(start_idx)),
                end_date: parse_date(get(end_idx)),
                enrolled: parse_count(get(enrolled_idx)),
                graduated: parse_count(get(graduated_idx)),
                total_seats: parse_count(get(total_idx)),
                occupied_seats: parse_count(get(occupied_idx)),
                available_seats: parse_count(get(available_idx)),
            },
        });
    }

    Ok(records)
}

/// Both date formats seen in the legacy extracts.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

fn parse_count(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}
