mod common;

use retina_core::error::RetinaError;
use retina_core::report::Trend;
use retina_core::repository::{JsonScanStore, ScanRepository, Session, ValidationRequest};
use retina_core::scan::{PatientId, ScanId, ScanStatus};
use retina_core::severity::SeverityLevel;

use common::{day, progressing_history, scan, session};

fn mixed_store() -> JsonScanStore {
    let mut scans = progressing_history();
    scans.push(scan(4, 2, Some("Rétinopathie Sévère"), day(2024, 5, 1)));
    scans.push(scan(5, 2, None, day(2024, 5, 2)));
    scans.push(scan(6, 3, Some("Rétinopathie Légère"), day(2024, 5, 3)));
    let mut validated = scan(7, 3, Some("Rétinopathie Proliférante"), day(2024, 5, 4));
    validated.status = ScanStatus::Validated;
    scans.push(validated);
    JsonScanStore::from_scans(scans)
}

#[test]
fn test_queue_is_pending_and_urgent_first() {
    let store = mixed_store();
    let queue = store.fetch_queue(&session()).unwrap();
    let ids: Vec<u64> = queue.iter().map(|s| s.id.0).collect();
    // Proliférante, Sévère, Modérée, Légère, Sain, unlabelled. Scan 7 is validated.
    assert_eq!(ids, vec![3, 4, 2, 6, 1, 5]);
}

#[test]
fn test_empty_token_is_rejected() {
    let store = mixed_store();
    let anonymous = Session::new("guest", "");
    assert!(matches!(
        store.fetch_queue(&anonymous),
        Err(RetinaError::Unauthorized(_))
    ));
}

#[test]
fn test_history_is_chronological_per_patient() {
    let mut scans = progressing_history();
    scans.reverse();
    let store = JsonScanStore::from_scans(scans);
    let history = store.fetch_patient_history(&session(), PatientId(1)).unwrap();
    let ids: Vec<u64> = history.iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    assert!(matches!(
        store.fetch_patient_history(&session(), PatientId(9)),
        Err(RetinaError::PatientNotFound(_))
    ));
}

#[test]
fn test_validation_replaces_label_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scans.json");
    mixed_store().save_to(&path).unwrap();

    let mut store = JsonScanStore::open(&path).unwrap();
    let updated = store
        .submit_validation(
            &session(),
            &ValidationRequest {
                scan_id: ScanId(2),
                notes: "Contrôle dans 3 mois".into(),
                final_diagnosis: "Rétinopathie Sévère".into(),
            },
        )
        .unwrap();
    assert_eq!(updated.status, ScanStatus::Validated);
    assert_eq!(updated.diagnosis_label.as_deref(), Some("Rétinopathie Sévère"));

    let reopened = JsonScanStore::open(&path).unwrap();
    let scan = reopened.scan(ScanId(2)).unwrap();
    assert_eq!(scan.status, ScanStatus::Validated);
    assert_eq!(scan.doctor_notes.as_deref(), Some("Contrôle dans 3 mois"));
    assert!(!reopened
        .fetch_queue(&session())
        .unwrap()
        .iter()
        .any(|s| s.id == ScanId(2)));
}

#[test]
fn test_blank_diagnosis_keeps_ai_label() {
    let mut store = mixed_store();
    let updated = store
        .submit_validation(
            &session(),
            &ValidationRequest {
                scan_id: ScanId(6),
                notes: String::new(),
                final_diagnosis: "  ".into(),
            },
        )
        .unwrap();
    assert_eq!(updated.diagnosis_label.as_deref(), Some("Rétinopathie Légère"));
    assert_eq!(updated.status, ScanStatus::Validated);
}

#[test]
fn test_validating_unknown_scan_fails() {
    let mut store = mixed_store();
    let err = store
        .submit_validation(
            &session(),
            &ValidationRequest {
                scan_id: ScanId(404),
                notes: String::new(),
                final_diagnosis: String::new(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, RetinaError::ScanNotFound(ScanId(404))));
}

#[test]
fn test_report_describes_trend() {
    let store = mixed_store();
    let report = store.request_report(&session(), ScanId(3)).unwrap();
    assert!(report.contains("Rétinopathie Proliférante"));
    assert!(report.contains("Aggravation"));
    assert!(report.contains("Examens au dossier : 3"));

    let first = store.request_report(&session(), ScanId(1)).unwrap();
    assert!(first.contains("Premier examen"));
}

#[test]
fn test_scan_json_uses_service_field_names() {
    let json = serde_json::to_value(scan(1, 1, Some("Rétinopathie Légère"), day(2024, 1, 1))).unwrap();
    assert_eq!(json["aiPrediction"], "Rétinopathie Légère");
    assert_eq!(json["status"], "PENDING");
    assert!(json.get("imageData").is_some());
    assert!(json.get("createdAt").is_some());
}

#[test]
fn test_typed_ordinal_outranks_label_in_queue() {
    let mut typed = scan(1, 1, Some("Pas de Rétinopathie (Sain)"), day(2024, 1, 1));
    typed.severity_level = Some(4);
    let labelled = scan(2, 2, Some("Rétinopathie Modérée"), day(2024, 1, 2));
    let store = JsonScanStore::from_scans(vec![labelled, typed]);

    let queue = store.fetch_queue(&session()).unwrap();
    let ids: Vec<u64> = queue.iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_trend_between_levels() {
    use SeverityLevel::*;
    assert_eq!(Trend::between(None, Moderate), Trend::FirstExam);
    assert_eq!(Trend::between(Some(Mild), Severe), Trend::Worsening);
    assert_eq!(Trend::between(Some(Severe), Mild), Trend::Improving);
    assert_eq!(Trend::between(Some(Moderate), Moderate), Trend::Stable);
}
