use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReconcilerConfig {
    pub name: String,
    /// Start/end dates may differ by at most this many days for a match.
    #[serde(default = "default_window")]
    pub date_window_days: i64,
    pub columns: ColumnMapping,
    #[serde(default)]
    pub placeholder: PlaceholderSite,
}

fn default_window() -> i64 {
    30
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names of the legacy extract.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub site: String,
    pub course: String,
    pub start_date: String,
    pub end_date: String,
    pub enrolled: String,
    pub graduated: String,
    pub total_seats: String,
    pub occupied_seats: String,
    pub available_seats: String,
}

impl ColumnMapping {
    fn names(&self) -> [(&str, &str); 9] {
        [
            ("site", &self.site),
            ("course", &self.course),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("enrolled", &self.enrolled),
            ("graduated", &self.graduated),
            ("total_seats", &self.total_seats),
            ("occupied_seats", &self.occupied_seats),
            ("available_seats", &self.available_seats),
        ]
    }
}

// ---------------------------------------------------------------------------
// Placeholder site fields
// ---------------------------------------------------------------------------

/// Address fields used when find-or-create has to create a site the legacy
/// extract references but the store does not know.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderSite {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_city")]
    pub city: String,
}

fn default_address() -> String {
    "Endereço não informado".to_string()
}

fn default_city() -> String {
    "Não informado".to_string()
}

impl Default for PlaceholderSite {
    fn default() -> Self {
        Self {
            address: default_address(),
            city: default_city(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconcilerConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconcilerConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.date_window_days <= 0 {
            return Err(ReconError::ConfigValidation(format!(
                "date_window_days must be positive, got {}",
                self.date_window_days
            )));
        }

        for (field, name) in self.columns.names() {
            if name.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "column mapping '{field}' must not be empty"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
