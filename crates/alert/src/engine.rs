use crate::config::AlertThresholds;
use crate::model::{
    Alert, AlertLevel, EduMetrics, LabMetrics, ProgramMetrics, TrilhasMetrics, WorkMetrics,
};
use crate::rules::{evaluate, AlertRule};

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------
//
// The amarelo dropout band is bounded above by the critical threshold, so
// the critico rule supersedes it for the same entity and each rule still
// appends at most one alert.

fn lab_rules() -> Vec<AlertRule<LabMetrics>> {
    vec![
        AlertRule {
            id: "lab_frequencia_baixa",
            applies: |m, t| m.attendance_pct < t.min_attendance_pct,
            build: |m, t| Alert {
                id: "lab_frequencia_baixa".into(),
                level: AlertLevel::Vermelho,
                title: "Frequência média abaixo do mínimo no Lab".into(),
                description: format!(
                    "Frequência média de {:.1}% nas turmas do Lab; o mínimo operacional é {:.0}%.",
                    m.attendance_pct, t.min_attendance_pct
                ),
                recommended_action: Some(
                    "Acionar os educadores das turmas com menor frequência.".into(),
                ),
                link: Some("/lab/turmas".into()),
            },
        },
        AlertRule {
            id: "lab_evasao_alta",
            applies: |m, t| m.dropout_pct > t.dropout_warn_pct && m.dropout_pct <= t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "lab_evasao_alta".into(),
                level: AlertLevel::Amarelo,
                title: "Evasão acima do esperado no Lab".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% no Lab, acima do limite de {:.0}%.",
                    m.dropout_pct, t.dropout_warn_pct
                ),
                recommended_action: Some(
                    "Levantar os motivos de evasão junto às turmas ativas.".into(),
                ),
                link: None,
            },
        },
        AlertRule {
            id: "lab_evasao_critica",
            applies: |m, t| m.dropout_pct > t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "lab_evasao_critica".into(),
                level: AlertLevel::Critico,
                title: "Evasão crítica no Lab".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% no Lab, acima do limite crítico de {:.0}%.",
                    m.dropout_pct, t.dropout_critical_pct
                ),
                recommended_action: Some(
                    "Plano de retenção imediato com a coordenação do módulo.".into(),
                ),
                link: None,
            },
        },
        AlertRule {
            id: "lab_turmas_sem_frequencia",
            applies: |m, _| m.zero_attendance_cohorts > 0,
            build: |m, _| Alert {
                id: "lab_turmas_sem_frequencia".into(),
                level: AlertLevel::Amarelo,
                title: "Turmas sem frequência registrada".into(),
                description: format!(
                    "{} turma(s) do Lab sem nenhuma frequência registrada no período.",
                    m.zero_attendance_cohorts
                ),
                recommended_action: Some(
                    "Confirmar com os educadores o registro de presença.".into(),
                ),
                link: Some("/lab/turmas?frequencia=zero".into()),
            },
        },
    ]
}

fn work_rules() -> Vec<AlertRule<WorkMetrics>> {
    vec![
        AlertRule {
            id: "work_evasao_alta",
            applies: |m, t| m.dropout_pct > t.dropout_warn_pct && m.dropout_pct <= t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "work_evasao_alta".into(),
                level: AlertLevel::Amarelo,
                title: "Evasão acima do esperado no Work".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% no Work, acima do limite de {:.0}%.",
                    m.dropout_pct, t.dropout_warn_pct
                ),
                recommended_action: Some(
                    "Levantar os motivos de desligamento com as empresas.".into(),
                ),
                link: None,
            },
        },
        AlertRule {
            id: "work_evasao_critica",
            applies: |m, t| m.dropout_pct > t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "work_evasao_critica".into(),
                level: AlertLevel::Critico,
                title: "Evasão crítica no Work".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% no Work, acima do limite crítico de {:.0}%.",
                    m.dropout_pct, t.dropout_critical_pct
                ),
                recommended_action: Some(
                    "Plano de retenção imediato com a coordenação do módulo.".into(),
                ),
                link: None,
            },
        },
        AlertRule {
            id: "work_empresas_sem_relatorio",
            applies: |m, _| m.companies_missing_report > 0,
            build: |m, _| Alert {
                id: "work_empresas_sem_relatorio".into(),
                level: AlertLevel::Amarelo,
                title: "Empresas com pendência de implantação".into(),
                description: format!(
                    "{} empresa(s) sem relatório ou etapa de implantação concluída.",
                    m.companies_missing_report
                ),
                recommended_action: Some(
                    "Cobrar o envio dos relatórios pendentes.".into(),
                ),
                link: Some("/work/empresas?pendencia=relatorio".into()),
            },
        },
        AlertRule {
            id: "work_habilitadas_sem_vaga",
            applies: |m, _| m.enabled_companies_without_vacancy > 0,
            build: |m, _| Alert {
                id: "work_habilitadas_sem_vaga".into(),
                level: AlertLevel::Amarelo,
                title: "Empresas habilitadas sem vaga publicada".into(),
                description: format!(
                    "{} empresa(s) habilitada(s) sem vaga publicada após o período de inscrição.",
                    m.enabled_companies_without_vacancy
                ),
                recommended_action: Some(
                    "Contatar as empresas habilitadas para publicação de vagas.".into(),
                ),
                link: Some("/work/empresas?vagas=nenhuma".into()),
            },
        },
    ]
}

fn edu_rules() -> Vec<AlertRule<EduMetrics>> {
    vec![
        AlertRule {
            id: "edu_frequencia_baixa",
            applies: |m, t| m.attendance_pct < t.min_attendance_pct,
            build: |m, t| Alert {
                id: "edu_frequencia_baixa".into(),
                level: AlertLevel::Vermelho,
                title: "Frequência média abaixo do mínimo no Edu".into(),
                description: format!(
                    "Frequência média de {:.1}% nas aulas do Edu; o mínimo operacional é {:.0}%.",
                    m.attendance_pct, t.min_attendance_pct
                ),
                recommended_action: Some(
                    "Acionar os professores das escolas com menor frequência.".into(),
                ),
                link: Some("/edu/aulas".into()),
            },
        },
        AlertRule {
            id: "edu_evasao_alta",
            applies: |m, t| m.dropout_pct > t.dropout_warn_pct && m.dropout_pct <= t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "edu_evasao_alta".into(),
                level: AlertLevel::Amarelo,
                title: "Evasão acima do esperado no Edu".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% no Edu, acima do limite de {:.0}%.",
                    m.dropout_pct, t.dropout_warn_pct
                ),
                recommended_action: Some(
                    "Levantar os motivos de evasão junto às escolas.".into(),
                ),
                link: None,
            },
        },
        AlertRule {
            id: "edu_evasao_critica",
            applies: |m, t| m.dropout_pct > t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "edu_evasao_critica".into(),
                level: AlertLevel::Critico,
                title: "Evasão crítica no Edu".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% no Edu, acima do limite crítico de {:.0}%.",
                    m.dropout_pct, t.dropout_critical_pct
                ),
                recommended_action: Some(
                    "Plano de retenção imediato com a coordenação do módulo.".into(),
                ),
                link: None,
            },
        },
        AlertRule {
            id: "edu_aulas_sem_frequencia",
            applies: |m, _| m.zero_attendance_classes > 0,
            build: |m, _| Alert {
                id: "edu_aulas_sem_frequencia".into(),
                level: AlertLevel::Amarelo,
                title: "Aulas sem frequência registrada".into(),
                description: format!(
                    "{} aula(s) do Edu sem nenhuma frequência registrada no período.",
                    m.zero_attendance_classes
                ),
                recommended_action: Some(
                    "Confirmar com os professores o registro de presença.".into(),
                ),
                link: Some("/edu/aulas?frequencia=zero".into()),
            },
        },
    ]
}

fn trilhas_rules() -> Vec<AlertRule<TrilhasMetrics>> {
    vec![
        AlertRule {
            id: "trilhas_frequencia_baixa",
            applies: |m, t| m.attendance_pct < t.min_attendance_pct,
            build: |m, t| Alert {
                id: "trilhas_frequencia_baixa".into(),
                level: AlertLevel::Vermelho,
                title: "Frequência média abaixo do mínimo nas Trilhas".into(),
                description: format!(
                    "Frequência média de {:.1}% nas Trilhas; o mínimo operacional é {:.0}%.",
                    m.attendance_pct, t.min_attendance_pct
                ),
                recommended_action: Some(
                    "Acionar os tutores das trilhas com menor frequência.".into(),
                ),
                link: Some("/trilhas".into()),
            },
        },
        AlertRule {
            id: "trilhas_evasao_alta",
            applies: |m, t| m.dropout_pct > t.dropout_warn_pct && m.dropout_pct <= t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "trilhas_evasao_alta".into(),
                level: AlertLevel::Amarelo,
                title: "Evasão acima do esperado nas Trilhas".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% nas Trilhas, acima do limite de {:.0}%.",
                    m.dropout_pct, t.dropout_warn_pct
                ),
                recommended_action: Some(
                    "Levantar os motivos de evasão com os participantes.".into(),
                ),
                link: None,
            },
        },
        AlertRule {
            id: "trilhas_evasao_critica",
            applies: |m, t| m.dropout_pct > t.dropout_critical_pct,
            build: |m, t| Alert {
                id: "trilhas_evasao_critica".into(),
                level: AlertLevel::Critico,
                title: "Evasão crítica nas Trilhas".into(),
                description: format!(
                    "Taxa de evasão de {:.1}% nas Trilhas, acima do limite crítico de {:.0}%.",
                    m.dropout_pct, t.dropout_critical_pct
                ),
                recommended_action: Some(
                    "Plano de retenção imediato com a coordenação do módulo.".into(),
                ),
                link: None,
            },
        },
    ]
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

pub fn evaluate_lab(metrics: &LabMetrics, thresholds: &AlertThresholds) -> Vec<Alert> {
    evaluate(&lab_rules(), metrics, thresholds)
}

pub fn evaluate_work(metrics: &WorkMetrics, thresholds: &AlertThresholds) -> Vec<Alert> {
    evaluate(&work_rules(), metrics, thresholds)
}

pub fn evaluate_edu(metrics: &EduMetrics, thresholds: &AlertThresholds) -> Vec<Alert> {
    evaluate(&edu_rules(), metrics, thresholds)
}

pub fn evaluate_trilhas(metrics: &TrilhasMetrics, thresholds: &AlertThresholds) -> Vec<Alert> {
    evaluate(&trilhas_rules(), metrics, thresholds)
}

/// Evaluate every module in fixed order: Lab, Work, Edu, Trilhas.
pub fn evaluate_all(metrics: &ProgramMetrics, thresholds: &AlertThresholds) -> Vec<Alert> {
    let mut alerts = evaluate_lab(&metrics.lab, thresholds);
    alerts.extend(evaluate_work(&metrics.work, thresholds));
    alerts.extend(evaluate_edu(&metrics.edu, thresholds));
    alerts.extend(evaluate_trilhas(&metrics.trilhas, thresholds));
    alerts
}
