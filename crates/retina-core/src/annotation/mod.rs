//! Ephemeral annotation ink drawn over the displayed scan.
//!
//! Marks live only for the current viewing session and are never exported.

pub mod mapping;
pub mod raster;
pub mod shapes;
pub mod surface;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use mapping::map_to_native;
pub use raster::{InkLayer, StrokeStyle};
pub use shapes::{ArrowHead, Shape};
pub use surface::AnnotationSurface;

/// Active annotation tool. `None` means pointer drags pan the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    None,
    Pen,
    Circle,
    Arrow,
}

impl Tool {
    pub const DRAWING: &'static [Self] = &[Self::Pen, Self::Circle, Self::Arrow];
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "Pan"),
            Self::Pen => write!(f, "Pen"),
            Self::Circle => write!(f, "Circle"),
            Self::Arrow => write!(f, "Arrow"),
        }
    }
}
