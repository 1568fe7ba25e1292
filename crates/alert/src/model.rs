use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// Ordinal alert level: verde < amarelo < vermelho < critico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Verde,
    Amarelo,
    Vermelho,
    Critico,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verde => write!(f, "verde"),
            Self::Amarelo => write!(f, "amarelo"),
            Self::Vermelho => write!(f, "vermelho"),
            Self::Critico => write!(f, "critico"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: String,
    pub level: AlertLevel,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

// ---------------------------------------------------------------------------
// Metric summaries
// ---------------------------------------------------------------------------
//
// All fields default to zero: absent data reads as 0 and the engine never
// panics on partial input.

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LabMetrics {
    #[serde(default)]
    pub attendance_pct: f64,
    #[serde(default)]
    pub dropout_pct: f64,
    /// Cohorts with zero attendance recorded in the lookback window.
    #[serde(default)]
    pub zero_attendance_cohorts: i64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WorkMetrics {
    #[serde(default)]
    pub dropout_pct: f64,
    /// Companies missing a required report or implementation step.
    #[serde(default)]
    pub companies_missing_report: i64,
    /// Habilitada companies with no posted vacancy after the enrollment
    /// window.
    #[serde(default)]
    pub enabled_companies_without_vacancy: i64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EduMetrics {
    #[serde(default)]
    pub attendance_pct: f64,
    #[serde(default)]
    pub dropout_pct: f64,
    #[serde(default)]
    pub zero_attendance_classes: i64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TrilhasMetrics {
    #[serde(default)]
    pub attendance_pct: f64,
    #[serde(default)]
    pub dropout_pct: f64,
}

/// All four program modules together, for `evaluate_all`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProgramMetrics {
    #[serde(default)]
    pub lab: LabMetrics,
    #[serde(default)]
    pub work: WorkMetrics,
    #[serde(default)]
    pub edu: EduMetrics,
    #[serde(default)]
    pub trilhas: TrilhasMetrics,
}
