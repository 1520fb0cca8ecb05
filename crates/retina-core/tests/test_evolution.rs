mod common;

use approx::assert_relative_eq;

use retina_core::evolution::{build_evolution, build_evolution_bounded, level_y, Evolution};
use retina_core::scan::ScanId;
use retina_core::severity::SeverityLevel;

use common::{day, progressing_history, scan};

#[test]
fn test_levels_map_to_chart_coordinates() {
    let evolution = build_evolution(&progressing_history());
    let line = evolution.line();
    assert_eq!(line.len(), 3);
    let xs: Vec<f32> = line.iter().map(|p| p.0).collect();
    let ys: Vec<f32> = line.iter().map(|p| p.1).collect();
    for (got, want) in xs.iter().zip([0.0, 50.0, 100.0]) {
        assert_relative_eq!(*got, want);
    }
    for (got, want) in ys.iter().zip([100.0, 50.0, 0.0]) {
        assert_relative_eq!(*got, want);
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let mut history = progressing_history();
    history.reverse();
    let evolution = build_evolution(&history);
    let ids: Vec<ScanId> = evolution.points().iter().map(|p| p.scan_id).collect();
    assert_eq!(ids, vec![ScanId(1), ScanId(2), ScanId(3)]);
}

#[test]
fn test_single_scan_is_insufficient() {
    let history = vec![scan(1, 1, Some("Rétinopathie Légère"), day(2024, 1, 1))];
    assert_eq!(
        build_evolution(&history),
        Evolution::InsufficientData { available: 1 }
    );
    assert_eq!(
        build_evolution(&[]),
        Evolution::InsufficientData { available: 0 }
    );
}

#[test]
fn test_keeps_ten_most_recent() {
    let history: Vec<_> = (1..=12)
        .map(|i| scan(i, 1, Some("Rétinopathie Légère"), day(2024, 1, i as u32)))
        .collect();
    let evolution = build_evolution(&history);
    let points = evolution.points();
    assert_eq!(points.len(), 10);
    assert_eq!(points[0].scan_id, ScanId(3));
    assert_eq!(points[9].scan_id, ScanId(12));
    assert_relative_eq!(points[9].x, 100.0);
}

#[test]
fn test_custom_point_budget() {
    let evolution = build_evolution_bounded(&progressing_history(), 2);
    let points = evolution.points();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].level, SeverityLevel::Moderate);
}

#[test]
fn test_area_polygon_closes_on_baseline() {
    let evolution = build_evolution(&progressing_history());
    let polygon = evolution.area_polygon();
    assert_eq!(polygon.len(), 5);
    assert_eq!(polygon.first(), Some(&(0.0, 100.0)));
    assert_eq!(polygon.last(), Some(&(100.0, 100.0)));
}

#[test]
fn test_tooltip_shows_date_and_label() {
    let evolution = build_evolution(&progressing_history());
    assert_eq!(
        evolution.points()[1].tooltip(),
        "2024-04-10 : Rétinopathie Modérée"
    );
}

#[test]
fn test_level_y_extremes() {
    assert_relative_eq!(level_y(SeverityLevel::Healthy), 100.0);
    assert_relative_eq!(level_y(SeverityLevel::Proliferative), 0.0);
}

#[test]
fn test_point_budget_is_capped() {
    let history: Vec<_> = (1..=12)
        .map(|i| scan(i, 1, Some("Rétinopathie Légère"), day(2024, 1, i as u32)))
        .collect();
    let evolution = build_evolution_bounded(&history, 50);
    let points = evolution.points();
    assert_eq!(points.len(), 10);
    assert_eq!(points[0].scan_id, ScanId(3));
}
