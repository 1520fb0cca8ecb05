//! Zoom, pan and colour adjustments applied to the displayed scan.

pub mod render;
pub mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEVEL_PERCENT, MAX_ZOOM, MIN_LEVEL_PERCENT, MIN_ZOOM, NEUTRAL_LEVEL_PERCENT};
use crate::geometry::Point;

pub use render::{filter_stages, render_filtered};
pub use transform::DisplayTransform;

/// Colour filter applied after brightness and contrast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorFilter {
    #[default]
    None,
    Negative,
    /// Red-free view: green channel on all three outputs.
    GreenChannel,
}

impl ColorFilter {
    pub const ALL: &'static [Self] = &[Self::None, Self::GreenChannel, Self::Negative];
}

impl fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "RGB"),
            Self::Negative => write!(f, "Negative"),
            Self::GreenChannel => write!(f, "Green Channel"),
        }
    }
}

/// Drag anchor of an active pan gesture: pointer position minus offset at press time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanDrag {
    anchor: Point,
}

impl PanDrag {
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// Transform state of the viewer. Every setter clamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    zoom: f32,
    /// Pan offset in display pixels.
    offset: Point,
    /// Percent, 100 = unchanged.
    brightness: f32,
    /// Percent, 100 = unchanged.
    contrast: f32,
    filter: ColorFilter,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            offset: Point::ZERO,
            brightness: NEUTRAL_LEVEL_PERCENT,
            contrast: NEUTRAL_LEVEL_PERCENT,
            filter: ColorFilter::None,
        }
    }
}

fn clamp_level(v: f32) -> f32 {
    v.clamp(MIN_LEVEL_PERCENT, MAX_LEVEL_PERCENT)
}

impl ViewportState {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn filter(&self) -> ColorFilter {
        self.filter
    }

    /// Set the zoom factor, clamped to [1, 5]. NaN is ignored.
    pub fn set_zoom(&mut self, v: f32) {
        if v.is_nan() {
            return;
        }
        self.zoom = v.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiply the zoom factor, keeping the pointer's image point under the pointer.
    ///
    /// `center` is the container centre in display pixels.
    pub fn zoom_about(&mut self, factor: f32, pointer: Point, center: Point) {
        let old = self.zoom;
        self.set_zoom(old * factor);
        let scale_change = self.zoom / old;
        let rel = pointer - (center + self.offset);
        self.offset = self.offset + Point::new(rel.x * (1.0 - scale_change), rel.y * (1.0 - scale_change));
    }

    /// Set brightness in percent, clamped to [50, 200]. NaN is ignored.
    pub fn set_brightness(&mut self, v: f32) {
        if v.is_nan() {
            return;
        }
        self.brightness = clamp_level(v);
    }

    /// Set contrast in percent, clamped to [50, 200]. NaN is ignored.
    pub fn set_contrast(&mut self, v: f32) {
        if v.is_nan() {
            return;
        }
        self.contrast = clamp_level(v);
    }

    pub fn set_filter(&mut self, filter: ColorFilter) {
        self.filter = filter;
    }

    /// Place the offset directly (e.g. replaying a saved view).
    pub fn set_offset(&mut self, offset: Point) {
        if offset.x.is_finite() && offset.y.is_finite() {
            self.offset = offset;
        }
    }

    /// Start a pan drag at `pointer` (display pixels).
    pub fn begin_pan(&self, pointer: Point) -> PanDrag {
        PanDrag {
            anchor: pointer - self.offset,
        }
    }

    /// Follow the pointer during a pan drag: `offset = pointer - anchor`.
    pub fn update_pan(&mut self, drag: &PanDrag, pointer: Point) {
        self.set_offset(pointer - drag.anchor);
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
