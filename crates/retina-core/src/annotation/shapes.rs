use crate::annotation::raster::{InkLayer, StrokeStyle};
use crate::geometry::Point;

/// Arrowhead size, fixed in native pixels regardless of zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
    pub length: f32,
    pub angle_deg: f32,
}

/// A shape sketched from a drag start to the current pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { center: Point, radius: f32 },
    Arrow {
        start: Point,
        end: Point,
        /// Endpoints of the two head segments; both start at `end`.
        barbs: [Point; 2],
    },
}

impl Shape {
    /// Circle centred on `start` passing through `current`.
    pub fn circle(start: Point, current: Point) -> Self {
        Self::Circle {
            center: start,
            radius: start.distance_to(current),
        }
    }

    pub fn arrow(start: Point, current: Point, head: ArrowHead) -> Self {
        Self::Arrow {
            start,
            end: current,
            barbs: arrow_barbs(start, current, head),
        }
    }

    pub fn draw(&self, layer: &mut InkLayer, style: &StrokeStyle) {
        match *self {
            Self::Circle { center, radius } => layer.stroke_circle(center, radius, style),
            Self::Arrow { start, end, barbs } => {
                layer.stroke_segment(start, end, style);
                for barb in barbs {
                    layer.stroke_segment(end, barb, style);
                }
            }
        }
    }
}

/// Shaft angle in radians, `atan2(dy, dx)`.
pub fn shaft_angle(start: Point, end: Point) -> f32 {
    (end.y - start.y).atan2(end.x - start.x)
}

/// Barb endpoints for an arrow ending at `end`.
///
/// Each barb points back along the shaft, rotated by `±angle_deg`.
pub fn arrow_barbs(start: Point, end: Point, head: ArrowHead) -> [Point; 2] {
    let angle = shaft_angle(start, end);
    let spread = head.angle_deg.to_radians();
    let barb = |theta: f32| {
        Point::new(
            end.x - head.length * theta.cos(),
            end.y - head.length * theta.sin(),
        )
    };
    [barb(angle - spread), barb(angle + spread)]
}
