mod common;

use approx::assert_relative_eq;
use image::Rgba;

use retina_core::annotation::Tool;
use retina_core::config::ViewerConfig;
use retina_core::geometry::{Point, Size};
use retina_core::error::RetinaError;
use retina_core::scan::{ScanId, ScanStatus};
use retina_core::session::{GestureState, ViewerSession};
use retina_core::severity::SeverityLevel;
use retina_core::viewport::ColorFilter;

use common::{day, progressing_history, scan, scan_sized};

const BG: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Session showing a 200x100 scan in a 400x400 pane (1:1 at zoom 1).
fn session_with_scan() -> ViewerSession {
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.set_container(Size::new(400.0, 400.0));
    session
        .select_scan(scan_sized(1, 1, Some("Rétinopathie Modérée"), day(2024, 1, 1), 200, 100))
        .unwrap();
    session
}

#[test]
fn test_select_scan_sizes_ink_to_native() {
    let session = session_with_scan();
    assert_eq!(session.surface().dimensions(), (200, 100));
    assert_eq!(session.native_image().map(|i| i.dimensions()), Some((200, 100)));
}

#[test]
fn test_select_scan_resets_everything() {
    let mut session = session_with_scan();
    session.viewport_mut().set_zoom(3.0);
    session.viewport_mut().set_brightness(180.0);
    session.viewport_mut().set_filter(ColorFilter::Negative);
    session.select_tool(Tool::Pen);
    session.pointer_down(Point::new(150.0, 200.0));
    session.pointer_move(Point::new(250.0, 200.0));
    session.pointer_up();
    assert!(!session.surface().committed().is_blank());
    session.set_final_diagnosis("Rétinopathie Sévère");

    session
        .select_scan(scan(2, 1, None, day(2024, 2, 1)))
        .unwrap();

    assert!(session.viewport().is_default());
    assert_eq!(session.tool(), Tool::None);
    assert_eq!(session.gesture(), GestureState::Idle);
    assert!(session.surface().committed().is_blank());
    assert_eq!(session.surface().dimensions(), (40, 20));
    assert_eq!(session.final_diagnosis(), SeverityLevel::Healthy.label());
}

#[test]
fn test_final_diagnosis_defaults_to_label() {
    let session = session_with_scan();
    assert_eq!(session.final_diagnosis(), "Rétinopathie Modérée");
}

#[test]
fn test_undecodable_scan_keeps_previous_selection() {
    let mut session = session_with_scan();
    let mut broken = scan(9, 1, None, day(2024, 3, 1));
    broken.image_data = "not base64 !!".into();
    assert!(session.select_scan(broken).is_err());
    assert_eq!(session.scan().map(|s| s.id), Some(ScanId(1)));
}

#[test]
fn test_drag_without_tool_pans() {
    let mut session = session_with_scan();
    session.pointer_down(Point::new(200.0, 200.0));
    assert!(matches!(session.gesture(), GestureState::Panning(_)));
    session.pointer_move(Point::new(230.0, 180.0));
    session.pointer_up();
    assert_eq!(session.viewport().offset(), Point::new(30.0, -20.0));
    assert!(session.surface().committed().is_blank());
}

#[test]
fn test_drag_with_tool_draws_in_native_space() {
    let mut session = session_with_scan();
    session.viewport_mut().set_zoom(2.0);
    session.select_tool(Tool::Circle);

    // Pane centre is the image centre at any zoom.
    let centre = session.to_native(Point::new(200.0, 200.0));
    assert_relative_eq!(centre.x, 100.0, epsilon = 1e-3);
    assert_relative_eq!(centre.y, 50.0, epsilon = 1e-3);

    session.pointer_down(Point::new(200.0, 200.0));
    assert_eq!(session.gesture(), GestureState::Drawing(Tool::Circle));
    // 20 display pixels at zoom 2 is a 10 pixel native radius.
    session.pointer_move(Point::new(220.0, 200.0));
    session.pointer_up();

    let committed = session.surface().committed();
    assert!(committed.is_inked(110, 50) || committed.is_inked(109, 50));
    assert!(!committed.is_inked(120, 50));
    assert_eq!(session.viewport().offset(), Point::ZERO);
}

#[test]
fn test_reset_view_clears_ink_and_transform() {
    let mut session = session_with_scan();
    session.select_tool(Tool::Pen);
    session.pointer_down(Point::new(150.0, 200.0));
    session.pointer_move(Point::new(250.0, 200.0));
    session.pointer_up();
    session.viewport_mut().set_contrast(150.0);

    session.reset_view();
    assert!(session.viewport().is_default());
    assert!(session.surface().committed().is_blank());
}

#[test]
fn test_toggling_compare_preserves_view() {
    let mut session = session_with_scan();
    session.viewport_mut().set_zoom(2.5);
    session.viewport_mut().set_offset(Point::new(14.0, -3.0));

    assert!(session.toggle_compare());
    assert!(session.comparison_view().is_empty_state());
    assert!(!session.toggle_compare());

    assert_eq!(session.viewport().zoom(), 2.5);
    assert_eq!(session.viewport().offset(), Point::new(14.0, -3.0));
}

#[test]
fn test_history_for_stale_selection_is_dropped() {
    let mut session = session_with_scan();
    session.load_history(ScanId(77), progressing_history());
    assert!(session.history().is_empty());
}

#[test]
fn test_compare_render_is_side_by_side() {
    let history = progressing_history();
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.set_container(Size::new(60.0, 40.0));
    session.select_scan(history[2].clone()).unwrap();
    session.load_history(ScanId(3), history);
    session.toggle_compare();

    let out = session.render(BG).unwrap().unwrap();
    assert_eq!(out.dimensions(), (120, 40));
    // Both panes show a grey scan in their centre.
    assert_eq!(out.get_pixel(30, 20).0, [128, 128, 128, 255]);
    assert_eq!(out.get_pixel(90, 20).0, [128, 128, 128, 255]);
}

#[test]
fn test_evolution_uses_loaded_history() {
    let history = progressing_history();
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.select_scan(history[2].clone()).unwrap();
    session.load_history(ScanId(3), history);
    assert_eq!(session.evolution().points().len(), 3);
}

#[test]
fn test_export_report_excludes_ink_and_uses_final_diagnosis() {
    let mut session = session_with_scan();
    session.set_final_diagnosis("Rétinopathie Sévère");
    session.set_notes("Laser à discuter");
    let export = session.export_report().unwrap();
    assert_eq!(export.severity, SeverityLevel::Severe);
    assert_eq!(export.notes, "Laser à discuter");
    assert_eq!(export.advice.len(), 3);
    let json = export.to_json().unwrap();
    assert!(json.contains("finalDiagnosis"));
    assert!(!json.contains("annotation"));
}

#[test]
fn test_pointer_events_without_scan_are_ignored() {
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.select_tool(Tool::Pen);
    session.pointer_down(Point::new(10.0, 10.0));
    session.pointer_move(Point::new(30.0, 30.0));
    assert_eq!(session.gesture(), GestureState::Idle);
    session.pointer_up();
    assert!(session.surface().committed().is_blank());
}

#[test]
fn test_validation_needs_a_scan() {
    let session = ViewerSession::new(ViewerConfig::default());
    assert!(matches!(
        session.validation_request(),
        Err(RetinaError::NoScanSelected)
    ));
    assert!(matches!(
        session.export_report(),
        Err(RetinaError::NoScanSelected)
    ));
}

#[test]
fn test_validated_scan_refreshes_history_views() {
    let history = progressing_history();
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.select_scan(history[2].clone()).unwrap();
    session.load_history(ScanId(3), history);

    let mut updated = session.scan().unwrap().clone();
    updated.diagnosis_label = Some("Rétinopathie Légère".into());
    updated.status = ScanStatus::Validated;
    session.apply_validated(updated);

    let evolution = session.evolution();
    let last = evolution.points().last().unwrap();
    assert_eq!(session.scan().unwrap().severity(), SeverityLevel::Mild);
    assert_eq!(last.level, session.scan().unwrap().severity());
    assert_eq!(session.history()[2].status, ScanStatus::Validated);
}

#[test]
fn test_validated_older_scan_refreshes_comparison() {
    let history = progressing_history();
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.select_scan(history[2].clone()).unwrap();
    session.load_history(ScanId(3), history.clone());

    let mut older = history[1].clone();
    older.diagnosis_label = Some("Rétinopathie Sévère".into());
    older.status = ScanStatus::Validated;
    session.apply_validated(older);

    let target = session.comparison().target().unwrap();
    assert_eq!(target.id, ScanId(2));
    assert_eq!(target.severity(), SeverityLevel::Severe);
    // The selected scan is untouched.
    assert_eq!(session.scan().unwrap().severity(), SeverityLevel::Proliferative);
}

#[test]
fn test_evolution_budget_is_capped() {
    let history: Vec<_> = (1..=12)
        .map(|i| scan(i, 1, Some("Rétinopathie Légère"), day(2024, 1, i as u32)))
        .collect();
    let mut config = ViewerConfig::default();
    config.evolution.max_points = 50;
    let mut session = ViewerSession::new(config);
    session.select_scan(history[11].clone()).unwrap();
    session.load_history(ScanId(12), history);
    assert_eq!(session.evolution().points().len(), 10);
}
