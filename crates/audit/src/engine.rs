use std::collections::HashMap;

use qualidados_recon::ReconciledCohort;

use crate::checks::{check_cohort, composite_score, severity_for};
use crate::duplicates::duplicate_groups;
use crate::model::{
    AuditFinding, AuditReport, AuditStats, EnrollmentRecord, FindingCategory, FindingStatus,
    Severity,
};

/// Scan reconciled cohorts and raw enrollment relations for invariant
/// violations. Infallible: malformed data produces findings, not errors.
///
/// Findings are ranked by the composite score (overbooked 1000, enrollment
/// overflow 500, seat math 100, summed per cohort); the sort is stable so
/// ties keep input order.
pub fn audit(cohorts: &[ReconciledCohort], enrollments: &[EnrollmentRecord]) -> AuditReport {
    let mut active_per_cohort: HashMap<i64, i64> = HashMap::new();
    let mut active_enrollments = 0;
    for enrollment in enrollments {
        if enrollment.is_active() {
            active_enrollments += 1;
            *active_per_cohort.entry(enrollment.cohort_id).or_insert(0) += 1;
        }
    }

    let mut stats = AuditStats {
        cohorts_scanned: cohorts.len(),
        total_enrollments: enrollments.len(),
        active_enrollments,
        finalized_enrollments: enrollments.len() - active_enrollments,
        ..AuditStats::default()
    };

    // (score, finding) pairs; the score never leaves the engine.
    let mut ranked: Vec<(i64, AuditFinding)> = Vec::new();

    for cohort in cohorts {
        // Unpersisted cohorts have no enrollment relations yet.
        let enrollment_count = cohort
            .id
            .and_then(|id| active_per_cohort.get(&id).copied())
            .unwrap_or(0);

        let violations = check_cohort(cohort, enrollment_count);
        if !violations.any() {
            continue;
        }

        let severity = severity_for(&violations);
        let score = composite_score(&violations);
        let entity = entity_label(cohort);

        if violations.seat_math {
            stats.cohorts_with_invalid_seat_math += 1;
            ranked.push((score, finding(
                severity,
                FindingCategory::SeatMath,
                &entity,
                vec![
                    format!("vagas ocupadas: {}", cohort.occupied_seats),
                    format!("vagas disponíveis: {}", cohort.available_seats),
                    format!("vagas totais: {}", cohort.total_seats),
                ],
                "Corrigir a contagem de vagas da turma no cadastro.",
            )));
        }

        if violations.overbooked {
            ranked.push((score, finding(
                severity,
                FindingCategory::Overbooked,
                &entity,
                vec![
                    format!("vagas ocupadas: {}", cohort.occupied_seats),
                    format!("vagas totais: {}", cohort.total_seats),
                ],
                "Reduzir a ocupação ou ampliar a capacidade da turma.",
            )));
        }

        if violations.enrollment_overflow {
            stats.cohorts_with_enrollment_overflow += 1;
            ranked.push((score, finding(
                severity,
                FindingCategory::EnrollmentOverflow,
                &entity,
                vec![
                    format!("matrículas ativas: {enrollment_count}"),
                    format!("vagas totais: {}", cohort.total_seats),
                ],
                "Verificar as matrículas registradas além da capacidade da turma.",
            )));
        }
    }

    for group in duplicate_groups(enrollments) {
        stats.duplicate_enrollment_groups += 1;

        let active = group.enrollments.iter().filter(|e| e.is_active()).count();
        let severity = if active > 1 { Severity::Media } else { Severity::Baixa };

        let evidence = group
            .enrollments
            .iter()
            .map(|e| format!("matrícula {}: {}", e.id, e.status))
            .collect();

        ranked.push((0, finding(
            severity,
            FindingCategory::DuplicateEnrollment,
            &format!("Aluno {} na turma {}", group.student_id, group.cohort_id),
            evidence,
            "Revisar possível matrícula duplicada antes de contabilizar a conclusão.",
        )));
    }

    // Stable: equal scores keep their emission (input) order.
    ranked.sort_by_key(|(score, _)| std::cmp::Reverse(*score));

    let findings = ranked
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut finding))| {
            finding.id = format!("AUD-{:03}", i + 1);
            finding
        })
        .collect();

    AuditReport { findings, stats }
}

fn finding(
    severity: Severity,
    category: FindingCategory,
    entity: &str,
    evidence: Vec<String>,
    recommendation: &str,
) -> AuditFinding {
    AuditFinding {
        id: String::new(),
        severity,
        category,
        entity: entity.to_string(),
        evidence,
        recommendation: recommendation.to_string(),
        status: FindingStatus::Pendente,
    }
}

/// Missing linked entities degrade to sentinel labels, never abort the scan.
fn entity_label(cohort: &ReconciledCohort) -> String {
    let site = if cohort.site_name.trim().is_empty() {
        "Sem laboratório"
    } else {
        cohort.site_name.trim()
    };

    match cohort.id {
        Some(id) => format!("Turma {id}: {} em {site}", cohort.course.normalized),
        None => format!("Turma não persistida: {} em {site}", cohort.course.normalized),
    }
}
