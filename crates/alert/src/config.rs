use std::fmt;

use serde::Deserialize;

/// Canonical alert thresholds. Boundaries are strict inequalities: exactly
/// 60% attendance or exactly 20%/40% dropout raises nothing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AlertThresholds {
    /// Attendance below this raises a vermelho alert.
    #[serde(default = "default_min_attendance")]
    pub min_attendance_pct: f64,
    /// Dropout above this raises an amarelo alert.
    #[serde(default = "default_dropout_warn")]
    pub dropout_warn_pct: f64,
    /// Dropout above this raises a critico alert, superseding the amarelo.
    #[serde(default = "default_dropout_critical")]
    pub dropout_critical_pct: f64,
}

fn default_min_attendance() -> f64 {
    60.0
}

fn default_dropout_warn() -> f64 {
    20.0
}

fn default_dropout_critical() -> f64 {
    40.0
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            min_attendance_pct: default_min_attendance(),
            dropout_warn_pct: default_dropout_warn(),
            dropout_critical_pct: default_dropout_critical(),
        }
    }
}

#[derive(Debug)]
pub enum AlertConfigError {
    Parse(String),
    Validation(String),
}

impl fmt::Display for AlertConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for AlertConfigError {}

impl AlertThresholds {
    pub fn from_toml(input: &str) -> Result<Self, AlertConfigError> {
        let thresholds: AlertThresholds =
            toml::from_str(input).map_err(|e| AlertConfigError::Parse(e.to_string()))?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), AlertConfigError> {
        for (name, value) in [
            ("min_attendance_pct", self.min_attendance_pct),
            ("dropout_warn_pct", self.dropout_warn_pct),
            ("dropout_critical_pct", self.dropout_critical_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(AlertConfigError::Validation(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }

        if self.dropout_warn_pct >= self.dropout_critical_pct {
            return Err(AlertConfigError::Validation(format!(
                "dropout_warn_pct ({}) must be below dropout_critical_pct ({})",
                self.dropout_warn_pct, self.dropout_critical_pct
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_canonical_table() {
        let t = AlertThresholds::default();
        assert_eq!(t.min_attendance_pct, 60.0);
        assert_eq!(t.dropout_warn_pct, 20.0);
        assert_eq!(t.dropout_critical_pct, 40.0);
        t.validate().unwrap();
    }

    #[test]
    fn toml_override() {
        let t = AlertThresholds::from_toml("min_attendance_pct = 75.0\n").unwrap();
        assert_eq!(t.min_attendance_pct, 75.0);
        assert_eq!(t.dropout_warn_pct, 20.0);
    }

    #[test]
    fn reject_out_of_range_percentage() {
        let err = AlertThresholds::from_toml("min_attendance_pct = 140.0\n").unwrap_err();
        assert!(err.to_string().contains("min_attendance_pct"));
    }

    #[test]
    fn reject_inverted_dropout_bands() {
        let err =
            AlertThresholds::from_toml("dropout_warn_pct = 50.0\ndropout_critical_pct = 40.0\n")
                .unwrap_err();
        assert!(err.to_string().contains("below"));
    }
}
