use approx::assert_relative_eq;

use retina_core::annotation::map_to_native;
use retina_core::annotation::raster::distance_to_segment;
use retina_core::annotation::shapes::{arrow_barbs, shaft_angle};
use retina_core::annotation::{AnnotationSurface, ArrowHead, InkLayer, Shape, StrokeStyle, Tool};
use retina_core::geometry::{Point, Size};

const HEAD: ArrowHead = ArrowHead {
    length: 20.0,
    angle_deg: 30.0,
};

fn surface(width: u32, height: u32) -> AnnotationSurface {
    AnnotationSurface::new(width, height, StrokeStyle::default(), HEAD)
}

/// Every inked pixel centre, as points.
fn inked_points(layer: &InkLayer) -> Vec<Point> {
    let (w, h) = layer.dimensions();
    let mut out = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if layer.is_inked(x, y) {
                out.push(Point::new(x as f32 + 0.5, y as f32 + 0.5));
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

#[test]
fn test_selecting_active_tool_deselects() {
    let mut s = surface(10, 10);
    assert_eq!(s.tool(), Tool::None);
    assert_eq!(s.select_tool(Tool::Circle), Tool::Circle);
    assert_eq!(s.select_tool(Tool::Arrow), Tool::Arrow);
    assert_eq!(s.select_tool(Tool::Arrow), Tool::None);
}

#[test]
fn test_no_tool_starts_no_gesture() {
    let mut s = surface(10, 10);
    assert!(!s.begin_gesture(Point::new(1.0, 1.0)));
    assert!(!s.is_drawing());
}

// ---------------------------------------------------------------------------
// Circle
// ---------------------------------------------------------------------------

#[test]
fn test_circle_radius_from_drag() {
    let shape = Shape::circle(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    match shape {
        Shape::Circle { center, radius } => {
            assert_eq!(center, Point::ZERO);
            assert_relative_eq!(radius, 5.0);
        }
        other => panic!("expected a circle, got {other:?}"),
    }
}

#[test]
fn test_circle_commits_only_the_final_outline() {
    let mut s = surface(100, 100);
    s.select_tool(Tool::Circle);
    let center = Point::new(50.0, 50.0);
    assert!(s.begin_gesture(center));
    s.move_gesture(Point::new(80.0, 50.0));
    s.move_gesture(Point::new(60.0, 50.0));
    s.move_gesture(Point::new(53.0, 54.0));
    assert!(s.committed().is_blank());
    s.end_gesture();

    assert!(s.preview().is_blank());
    let half_width = StrokeStyle::default().width / 2.0;
    let inked = inked_points(s.committed());
    assert!(!inked.is_empty());
    for p in inked {
        let d = p.distance_to(center);
        assert!(
            (d - 5.0).abs() <= half_width + 1e-4,
            "pixel at {p:?} is {d} from the centre"
        );
    }
    assert!(!s.committed().is_inked(79, 50));
    assert!(!s.committed().is_inked(59, 50));
}

#[test]
fn test_preview_is_visible_during_gesture() {
    let mut s = surface(60, 60);
    s.select_tool(Tool::Circle);
    s.begin_gesture(Point::new(30.0, 30.0));
    s.move_gesture(Point::new(40.0, 30.0));
    assert!(s.committed().is_blank());
    assert!(!s.preview().is_blank());
    let composite = s.composite();
    assert!(composite.pixels().any(|p| p.0[3] > 0));
}

#[test]
fn test_press_release_without_move_commits_nothing() {
    let mut s = surface(20, 20);
    s.select_tool(Tool::Circle);
    s.begin_gesture(Point::new(10.0, 10.0));
    s.end_gesture();
    assert!(s.committed().is_blank());
}

#[test]
fn test_tool_change_abandons_preview() {
    let mut s = surface(60, 60);
    s.select_tool(Tool::Circle);
    s.begin_gesture(Point::new(30.0, 30.0));
    s.move_gesture(Point::new(40.0, 30.0));
    s.select_tool(Tool::Pen);
    assert!(!s.is_drawing());
    assert!(s.preview().is_blank());
    assert!(s.committed().is_blank());
}

// ---------------------------------------------------------------------------
// Arrow
// ---------------------------------------------------------------------------

#[test]
fn test_horizontal_arrow_head() {
    let start = Point::new(0.0, 0.0);
    let end = Point::new(10.0, 0.0);
    assert_relative_eq!(shaft_angle(start, end), 0.0);

    let barbs = arrow_barbs(start, end, HEAD);
    let back = 10.0 - 20.0 * 30f32.to_radians().cos();
    assert_relative_eq!(barbs[0].x, back, epsilon = 1e-4);
    assert_relative_eq!(barbs[0].y, 10.0, epsilon = 1e-4);
    assert_relative_eq!(barbs[1].x, back, epsilon = 1e-4);
    assert_relative_eq!(barbs[1].y, -10.0, epsilon = 1e-4);
    for barb in barbs {
        assert_relative_eq!(barb.distance_to(end), 20.0, epsilon = 1e-4);
    }
}

#[test]
fn test_arrow_gesture_draws_shaft_and_head() {
    let mut s = surface(100, 100);
    s.select_tool(Tool::Arrow);
    s.begin_gesture(Point::new(10.0, 50.0));
    s.move_gesture(Point::new(90.0, 50.0));
    match s.current_shape() {
        Some(Shape::Arrow { end, .. }) => assert_eq!(end, Point::new(90.0, 50.0)),
        other => panic!("expected an arrow, got {other:?}"),
    }
    s.end_gesture();
    // Shaft midpoint and the two barb tips.
    assert!(s.committed().is_inked(50, 49) || s.committed().is_inked(50, 50));
    assert!(s.committed().is_inked(72, 59) || s.committed().is_inked(72, 60));
    assert!(s.committed().is_inked(72, 39) || s.committed().is_inked(72, 40));
}

// ---------------------------------------------------------------------------
// Pen
// ---------------------------------------------------------------------------

#[test]
fn test_pen_strokes_accumulate() {
    let mut s = surface(30, 30);
    s.select_tool(Tool::Pen);

    s.begin_gesture(Point::new(5.0, 5.0));
    s.move_gesture(Point::new(25.0, 5.0));
    s.end_gesture();
    let after_first = s.committed().inked_count();
    assert!(after_first > 0);

    s.begin_gesture(Point::new(5.0, 20.0));
    s.move_gesture(Point::new(25.0, 20.0));
    s.end_gesture();

    assert!(s.committed().inked_count() > after_first);
    assert!(s.committed().is_inked(15, 5) || s.committed().is_inked(15, 4));
    assert!(s.committed().is_inked(15, 20) || s.committed().is_inked(15, 19));
}

#[test]
fn test_pen_press_alone_leaves_no_ink() {
    let mut s = surface(30, 30);
    s.select_tool(Tool::Pen);
    s.begin_gesture(Point::new(5.0, 5.0));
    s.end_gesture();
    assert!(s.committed().is_blank());
}

#[test]
fn test_clear_erases_everything() {
    let mut s = surface(30, 30);
    s.select_tool(Tool::Pen);
    s.begin_gesture(Point::new(5.0, 5.0));
    s.move_gesture(Point::new(25.0, 25.0));
    s.end_gesture();
    s.clear();
    assert!(s.committed().is_blank());
    assert_eq!(s.tool(), Tool::Pen);
}

#[test]
fn test_resize_matches_native_dimensions() {
    let mut s = surface(10, 10);
    s.resize(640, 480);
    assert_eq!(s.dimensions(), (640, 480));
    assert_eq!(s.preview().dimensions(), (640, 480));
}

#[test]
fn test_segment_distance() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_relative_eq!(distance_to_segment(Point::new(5.0, 5.0), a, b), 5.0);
    // Beyond the end the distance is measured to the endpoint.
    assert_relative_eq!(distance_to_segment(Point::new(13.0, 4.0), a, b), 5.0);
    // Degenerate segment.
    assert_relative_eq!(distance_to_segment(Point::new(3.0, 4.0), a, a), 5.0);
}

#[test]
fn test_stroke_outside_layer_is_ignored() {
    let mut layer = InkLayer::new(10, 10);
    layer.stroke_segment(
        Point::new(-50.0, -50.0),
        Point::new(-40.0, -40.0),
        &StrokeStyle::default(),
    );
    assert!(layer.is_blank());
}

#[test]
fn test_empty_display_maps_to_origin() {
    let at = map_to_native(Point::new(12.0, 7.0), Size::new(400.0, 200.0), Size::new(0.0, 0.0));
    assert_eq!(at, Point::ZERO);
}

#[test]
fn test_display_maps_proportionally() {
    let at = map_to_native(Point::new(50.0, 25.0), Size::new(400.0, 200.0), Size::new(100.0, 50.0));
    assert_eq!(at, Point::new(200.0, 100.0));
}
