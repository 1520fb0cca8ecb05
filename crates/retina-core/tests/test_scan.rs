mod common;

use approx::assert_relative_eq;
use retina_core::scan::{PatientId, PatientRef, ScanStatus};

use common::{day, scan};

#[test]
fn test_probabilities_sorted_descending() {
    let mut s = scan(1, 1, Some("Rétinopathie Modérée"), day(2024, 1, 1));
    s.details = Some(r#"{"Sain": 0.05, "Modérée": 0.7, "Légère": 0.2, "Sévère": 0.05}"#.into());

    let dist = s.probability_distribution();
    assert_eq!(dist.len(), 4);
    assert_eq!(dist[0].0, "Modérée");
    assert_relative_eq!(dist[0].1, 0.7);
    assert_eq!(dist[1].0, "Légère");
    assert!(dist.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn test_top_probabilities_truncates() {
    let mut s = scan(1, 1, None, day(2024, 1, 1));
    s.details = Some(r#"{"a": 0.1, "b": 0.4, "c": 0.2, "d": 0.3}"#.into());

    let top = s.top_probabilities(3);
    let names: Vec<&str> = top.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["b", "d", "c"]);
    assert_eq!(s.top_probabilities(10).len(), 4);
}

#[test]
fn test_non_numeric_probabilities_are_empty() {
    let mut s = scan(1, 1, None, day(2024, 1, 1));
    s.details = Some(r#"{"a": "x"}"#.into());
    assert!(s.probability_distribution().is_empty());
    assert!(s.top_probabilities(3).is_empty());
}

#[test]
fn test_non_json_details_are_empty() {
    let mut s = scan(1, 1, None, day(2024, 1, 1));
    s.details = Some("Analyse en cours".into());
    assert!(s.probability_distribution().is_empty());

    s.details = None;
    assert!(s.probability_distribution().is_empty());
}

#[test]
fn test_full_name_falls_back_to_id() {
    let patient = PatientRef {
        id: PatientId(7),
        firstname: String::new(),
        lastname: String::new(),
    };
    assert_eq!(patient.full_name(), "P7");
}

#[test]
fn test_status_uses_uppercase_on_the_wire() {
    assert_eq!(serde_json::to_string(&ScanStatus::Validated).unwrap(), "\"VALIDATED\"");
    let status: ScanStatus = serde_json::from_str("\"PENDING\"").unwrap();
    assert_eq!(status, ScanStatus::Pending);
}

#[test]
fn test_typed_ordinal_sets_queue_rank() {
    let mut s = scan(1, 1, Some("Pas de Rétinopathie (Sain)"), day(2024, 1, 1));
    assert_eq!(s.queue_priority(), 5);
    s.severity_level = Some(4);
    assert_eq!(s.queue_priority(), 1);
    // An out-of-range ordinal falls back to the label.
    s.severity_level = Some(9);
    assert_eq!(s.queue_priority(), 5);
    s.diagnosis_label = None;
    assert_eq!(s.queue_priority(), 10);
}
