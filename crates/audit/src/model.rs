use serde::Serialize;

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Ordinal finding severity: baixa < media < alta < critica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Baixa,
    Media,
    Alta,
    Critica,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baixa => write!(f, "baixa"),
            Self::Media => write!(f, "media"),
            Self::Alta => write!(f, "alta"),
            Self::Critica => write!(f, "critica"),
        }
    }
}

/// Review workflow status. Findings are born `Pendente`; the other states
/// belong to the manual triage that happens outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    Pendente,
    EmAnalise,
    Resolvido,
    FalsoPositivo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    SeatMath,
    Overbooked,
    EnrollmentOverflow,
    DuplicateEnrollment,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditFinding {
    pub id: String,
    pub severity: Severity,
    pub category: FindingCategory,
    /// Human-readable reference to the offending entity.
    pub entity: String,
    pub evidence: Vec<String>,
    pub recommendation: String,
    pub status: FindingStatus,
}

// ---------------------------------------------------------------------------
// Enrollments
// ---------------------------------------------------------------------------

/// Raw enrollment relation as supplied by the collaborator.
#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub student_id: i64,
    pub cohort_id: i64,
    pub status: String,
}

impl EnrollmentRecord {
    /// Coarse status split: anything not finalized counts as active.
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status.trim().to_lowercase().as_str(),
            "concluida" | "concluída" | "cancelada" | "evadida" | "transferida"
        )
    }
}

// ---------------------------------------------------------------------------
// Stats + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditStats {
    pub cohorts_scanned: usize,
    pub cohorts_with_invalid_seat_math: usize,
    pub cohorts_with_enrollment_overflow: usize,
    pub duplicate_enrollment_groups: usize,
    pub total_enrollments: usize,
    pub active_enrollments: usize,
    pub finalized_enrollments: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub findings: Vec<AuditFinding>,
    pub stats: AuditStats,
}
