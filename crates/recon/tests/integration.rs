use qualidados_recon::engine::{reconcile, ReconcileOptions};
use qualidados_recon::loader::load_csv_records;
use qualidados_recon::model::Resolution;
use qualidados_recon::{MemoryDirectory, ReconcilerConfig};
use qualidados_taxonomy::Taxonomy;

const CONFIG: &str = r#"
name = "Importação extrato legado"
date_window_days = 30

[columns]
site            = "laboratorio"
course          = "curso"
start_date      = "inicio"
end_date        = "termino"
enrolled        = "matriculados"
graduated       = "concluintes"
total_seats     = "vagas_total"
occupied_seats  = "vagas_ocupadas"
available_seats = "vagas_disponiveis"
"#;

const EXTRACT: &str = "\
laboratorio,curso,inicio,termino,matriculados,concluintes,vagas_total,vagas_ocupadas,vagas_disponiveis
Lab Boa Viagem,Iforáica Básica,2024-02-05,2024-06-28,20,18,25,20,5
Lab Boa Viagem,Curso de Pyho,2024-03-01,2024-07-01,15,0,20,15,5
Lab Santo Amaro,Design Gráfico,,2024-08-10,12,0,15,12,3
Lab Nova Descoberta,Excel Básico,2024-04-01,2024-08-01,10,0,15,10,5
";

fn setup() -> (ReconcilerConfig, Taxonomy) {
    (ReconcilerConfig::from_toml(CONFIG).unwrap(), Taxonomy::builtin())
}

fn db_record(
    id: i64,
    site: &str,
    course: &str,
    start: &str,
    end: &str,
    graduated: i64,
) -> qualidados_recon::SourceRecord {
    qualidados_recon::SourceRecord::Db {
        id,
        fields: qualidados_recon::model::CohortFields {
            site_name: site.into(),
            course_name: course.into(),
            start_date: chrono::NaiveDate::parse_from_str(start, "%Y-%m-%d").ok(),
            end_date: chrono::NaiveDate::parse_from_str(end, "%Y-%m-%d").ok(),
            enrolled: 20,
            graduated,
            total_seats: 25,
            occupied_seats: 20,
            available_seats: 5,
        },
    }
}

#[test]
fn extract_reconciles_against_live_records() {
    let (config, tax) = setup();
    let mut dir = MemoryDirectory::new();
    dir.add_site("Lab Boa Viagem - Zona Sul");

    let csv_records = load_csv_records(EXTRACT, &config.columns).unwrap();
    let db_records = vec![
        // OCR-corrupted extract name and a two-week shifted start still match.
        db_record(1, "lab boa viagem ", "Informática Básica", "2024-02-19", "2024-07-05", 15),
        db_record(2, "LAB BOA VIAGEM", "Python", "2024-03-10", "2024-07-08", 0),
        db_record(3, "Lab Casa Amarela", "Robótica", "2024-05-01", "2024-09-01", 0),
    ];

    let report = reconcile(
        &config,
        &tax,
        &mut dir,
        &csv_records,
        &db_records,
        &ReconcileOptions { dry_run: true },
    )
    .unwrap();

    assert_eq!(report.summary.total, 5);
    assert_eq!(report.summary.matched, 2);
    assert_eq!(report.summary.csv_only, 2);
    assert_eq!(report.summary.db_only, 1);
    // Extract claims 18 graduates, the base knows 15.
    assert_eq!(report.summary.conflicts, 1);
    // The Design Gráfico row has no start date.
    assert_eq!(report.summary.excluded_from_matching, 1);

    let conflicted = report
        .cohorts
        .iter()
        .find(|c| c.conflict_note.is_some())
        .unwrap();
    assert_eq!(conflicted.id, Some(1));
    assert_eq!(conflicted.graduated, 15);
    assert_eq!(conflicted.csv_graduated, Some(18));
}

#[test]
fn dry_run_then_live_run_then_rerun_is_stable() {
    let (config, tax) = setup();
    let mut dir = MemoryDirectory::new();
    dir.add_site("Lab Boa Viagem - Zona Sul");

    let csv_records = load_csv_records(EXTRACT, &config.columns).unwrap();

    // Dry run: nothing written, creations reported as WouldCreate.
    let dry = reconcile(&config, &tax, &mut dir, &csv_records, &[], &ReconcileOptions { dry_run: true })
        .unwrap();
    assert_eq!(dir.site_count(), 1);
    assert_eq!(dry.summary.sites_created, 0);
    assert!(dry.summary.would_create >= 2);

    // Live run: the two unknown sites and all four cohorts are created.
    let live = reconcile(&config, &tax, &mut dir, &csv_records, &[], &ReconcileOptions { dry_run: false })
        .unwrap();
    assert_eq!(live.summary.sites_created, 2);
    assert_eq!(live.summary.cohorts_created, 4);
    assert_eq!(dir.site_count(), 3);
    assert_eq!(dir.cohort_count(), 4);

    // Re-run against the now-populated store: pure finds, no duplicates.
    let rerun = reconcile(&config, &tax, &mut dir, &csv_records, &[], &ReconcileOptions { dry_run: false })
        .unwrap();
    assert_eq!(rerun.summary.sites_created, 0);
    assert_eq!(rerun.summary.cohorts_created, 0);
    assert_eq!(dir.site_count(), 3);
    assert_eq!(dir.cohort_count(), 4);
    assert!(rerun
        .cohorts
        .iter()
        .all(|c| !matches!(c.cohort_resolution, Some(Resolution::Created(_)))));
}

#[test]
fn reconciled_report_serializes_to_plain_json() {
    let (config, tax) = setup();
    let mut dir = MemoryDirectory::new();

    let csv_records = load_csv_records(EXTRACT, &config.columns).unwrap();
    let report = reconcile(&config, &tax, &mut dir, &csv_records, &[], &ReconcileOptions { dry_run: true })
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["total"], 4);
    assert!(json["cohorts"].as_array().unwrap().len() == 4);
    // Dry-run resolutions surface as tagged values, not sentinel ids.
    assert_eq!(json["cohorts"][0]["site_resolution"]["kind"], "would_create");
}
