use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::annotation::{ArrowHead, StrokeStyle};
use crate::consts::{
    DEFAULT_ARROW_HEAD_ANGLE_DEG, DEFAULT_ARROW_HEAD_LENGTH, DEFAULT_FIT_FRACTION,
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, EVOLUTION_MAX_POINTS,
};
use crate::error::Result;

/// Workstation settings, stored as TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub annotation: AnnotationConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// RGBA stroke colour.
    pub stroke_color: [u8; 4],
    /// Stroke width in native pixels.
    pub stroke_width: f32,
    /// Arrowhead segment length in native pixels.
    pub arrow_head_length: f32,
    /// Angle between shaft and each arrowhead segment, in degrees.
    pub arrow_head_angle_deg: f32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR,
            stroke_width: DEFAULT_STROKE_WIDTH,
            arrow_head_length: DEFAULT_ARROW_HEAD_LENGTH,
            arrow_head_angle_deg: DEFAULT_ARROW_HEAD_ANGLE_DEG,
        }
    }
}

impl AnnotationConfig {
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color,
            width: self.stroke_width,
        }
    }

    pub fn arrow_head(&self) -> ArrowHead {
        ArrowHead {
            length: self.arrow_head_length,
            angle_deg: self.arrow_head_angle_deg,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Fraction of the container the image fills at zoom 1.
    pub fit_fraction: f32,
    /// Zoom multiplier per scroll notch.
    pub zoom_step: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fit_fraction: DEFAULT_FIT_FRACTION,
            zoom_step: 1.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Scans plotted in the evolution chart; values above 10 are capped.
    pub max_points: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            max_points: EVOLUTION_MAX_POINTS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON scan store opened at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
