use crate::annotation::mapping::map_to_native;
use crate::consts::DEFAULT_FIT_FRACTION;
use crate::geometry::{Point, Rect, Size};
use crate::viewport::ViewportState;

/// Places a native-sized image inside a display container.
///
/// At zoom 1 the image is shrunk to fit `fit_fraction` of the container
/// (never enlarged), centred. Zoom scales about the container centre and the
/// pan offset translates the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayTransform {
    pub container: Size,
    pub native: Size,
    pub fit_fraction: f32,
}

impl DisplayTransform {
    pub fn new(container: Size, native: Size) -> Self {
        Self {
            container,
            native,
            fit_fraction: DEFAULT_FIT_FRACTION,
        }
    }

    pub fn with_fit_fraction(mut self, fit_fraction: f32) -> Self {
        self.fit_fraction = fit_fraction.clamp(0.05, 1.0);
        self
    }

    /// Displayed image size at zoom 1.
    pub fn base_size(&self) -> Size {
        if self.native.is_empty() {
            return Size::default();
        }
        let max_w = self.container.width * self.fit_fraction;
        let max_h = self.container.height * self.fit_fraction;
        let scale = (max_w / self.native.width)
            .min(max_h / self.native.height)
            .min(1.0);
        self.native.scaled(scale)
    }

    /// On-screen rectangle of the image under the given viewport.
    pub fn image_rect(&self, viewport: &ViewportState) -> Rect {
        let center = Point::new(self.container.width / 2.0, self.container.height / 2.0)
            + viewport.offset();
        Rect::from_center_size(center, self.base_size().scaled(viewport.zoom()))
    }

    /// Container point to native image pixel.
    pub fn to_native(&self, viewport: &ViewportState, pointer: Point) -> Point {
        let rect = self.image_rect(viewport);
        map_to_native(pointer - rect.min, self.native, rect.size)
    }

    /// Native image pixel to container point.
    pub fn to_display(&self, viewport: &ViewportState, native: Point) -> Point {
        let rect = self.image_rect(viewport);
        if self.native.is_empty() {
            return rect.min;
        }
        Point::new(
            rect.min.x + native.x * rect.size.width / self.native.width,
            rect.min.y + native.y * rect.size.height / self.native.height,
        )
    }
}
