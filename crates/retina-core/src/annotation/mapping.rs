use crate::geometry::{Point, Size};

/// Map a pointer position to native raster pixels.
///
/// `pointer` is relative to the displayed image's top-left corner;
/// `displayed` is the image's current on-screen size, which changes with zoom,
/// so callers recompute it for every gesture event.
pub fn map_to_native(pointer: Point, native: Size, displayed: Size) -> Point {
    if displayed.is_empty() {
        return Point::ZERO;
    }
    Point::new(
        pointer.x * (native.width / displayed.width),
        pointer.y * (native.height / displayed.height),
    )
}
