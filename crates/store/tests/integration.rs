//! End-to-end against a real SQLite file: reconcile the legacy extract into
//! the store twice and verify nothing duplicates, then audit the result.

use qualidados_audit::audit;
use qualidados_recon::engine::{reconcile, ReconcileOptions};
use qualidados_recon::loader::load_csv_records;
use qualidados_recon::ReconcilerConfig;
use qualidados_store::load::{load_db_records, load_enrollments};
use qualidados_store::Store;
use qualidados_taxonomy::Taxonomy;

const CONFIG: &str = r#"
name = "Importação extrato legado"

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
Lab Boa Viagem,Informática Básica,2024-02-05,2024-06-28,20,18,25,20,5
Lab Casa Amarela,Curso de Pyho,2024-03-01,2024-07-01,15,0,20,15,5
";

#[test]
fn reconcile_into_sqlite_is_idempotent_across_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qualidados.db");

    let config = ReconcilerConfig::from_toml(CONFIG).unwrap();
    let tax = Taxonomy::builtin();
    let csv_records = load_csv_records(EXTRACT, &config.columns).unwrap();
    let opts = ReconcileOptions { dry_run: false };

    let first = {
        let mut store = Store::open_file(&path).unwrap();
        reconcile(&config, &tax, &mut store, &csv_records, &[], &opts).unwrap()
    };
    assert_eq!(first.summary.sites_created, 2);
    assert_eq!(first.summary.cohorts_created, 2);

    // Reopen the same file: every find must hit, nothing is created.
    let mut store = Store::open_file(&path).unwrap();
    let db_records = load_db_records(&store).unwrap();
    assert_eq!(db_records.len(), 2);

    let second = reconcile(&config, &tax, &mut store, &csv_records, &[], &opts).unwrap();
    assert_eq!(second.summary.sites_created, 0);
    assert_eq!(second.summary.cohorts_created, 0);
    assert_eq!(load_db_records(&store).unwrap().len(), 2);
}

#[test]
fn persisted_records_match_their_own_extract_rows() {
    let config = ReconcilerConfig::from_toml(CONFIG).unwrap();
    let tax = Taxonomy::builtin();
    let csv_records = load_csv_records(EXTRACT, &config.columns).unwrap();
    let opts = ReconcileOptions { dry_run: false };

    let mut store = Store::open_in_memory().unwrap();
    reconcile(&config, &tax, &mut store, &csv_records, &[], &opts).unwrap();

    // Feed the now-persisted records back as the DB side: every extract row
    // pairs with its own persisted cohort.
    let db_records = load_db_records(&store).unwrap();
    let report = reconcile(
        &config,
        &tax,
        &mut store,
        &csv_records,
        &db_records,
        &ReconcileOptions { dry_run: true },
    )
    .unwrap();

    assert_eq!(report.summary.matched, 2);
    assert_eq!(report.summary.csv_only, 0);
    assert_eq!(report.summary.db_only, 0);
}

#[test]
fn stored_enrollments_drive_the_auditor() {
    let config = ReconcilerConfig::from_toml(CONFIG).unwrap();
    let tax = Taxonomy::builtin();
    let csv_records = load_csv_records(EXTRACT, &config.columns).unwrap();

    let mut store = Store::open_in_memory().unwrap();
    reconcile(
        &config,
        &tax,
        &mut store,
        &csv_records,
        &[],
        &ReconcileOptions { dry_run: false },
    )
    .unwrap();

    let db_records = load_db_records(&store).unwrap();
    let first_cohort = match &db_records[0] {
        qualidados_recon::SourceRecord::Db { id, .. } => *id,
        _ => unreachable!(),
    };
    store.insert_enrollment(7, first_cohort, "ativa").unwrap();
    store.insert_enrollment(7, first_cohort, "ativa").unwrap();

    let report = reconcile(
        &config,
        &tax,
        &mut store,
        &[],
        &db_records,
        &ReconcileOptions { dry_run: true },
    )
    .unwrap();
    let audit_report = audit(&report.cohorts, &load_enrollments(&store).unwrap());

    assert_eq!(audit_report.stats.duplicate_enrollment_groups, 1);
    assert_eq!(audit_report.stats.total_enrollments, 2);
    let dupe = &audit_report.findings[0];
    assert_eq!(dupe.evidence.len(), 2);
    assert!(dupe.entity.contains(&format!("turma {first_cohort}")));
}
