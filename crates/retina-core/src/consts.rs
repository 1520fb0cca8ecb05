/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Lower bound of the viewport zoom factor.
pub const MIN_ZOOM: f32 = 1.0;

/// Upper bound of the viewport zoom factor.
pub const MAX_ZOOM: f32 = 5.0;

/// Lower bound for brightness and contrast, in percent.
pub const MIN_LEVEL_PERCENT: f32 = 50.0;

/// Upper bound for brightness and contrast, in percent.
pub const MAX_LEVEL_PERCENT: f32 = 200.0;

/// Neutral brightness/contrast value, in percent.
pub const NEUTRAL_LEVEL_PERCENT: f32 = 100.0;

/// Fraction of the container the image may occupy at zoom 1.
pub const DEFAULT_FIT_FRACTION: f32 = 0.9;

/// Arrowhead segment length, in native image pixels.
pub const DEFAULT_ARROW_HEAD_LENGTH: f32 = 20.0;

/// Angle between the shaft and each arrowhead segment, in degrees.
pub const DEFAULT_ARROW_HEAD_ANGLE_DEG: f32 = 30.0;

/// Annotation stroke width, in native image pixels.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

/// Annotation stroke colour (RGBA). Bright yellow stays visible on fundus images.
pub const DEFAULT_STROKE_COLOR: [u8; 4] = [255, 235, 59, 255];

/// Maximum number of scans plotted in the evolution chart.
pub const EVOLUTION_MAX_POINTS: usize = 10;

/// Chart x-coordinate used when the series holds a single point.
pub const EVOLUTION_SINGLE_X: f32 = 50.0;

/// Vertical distance between two severity levels on the 0..100 chart scale.
pub const EVOLUTION_LEVEL_STEP: f32 = 25.0;

/// Number of AI class probabilities shown next to a scan.
pub const TOP_PROBABILITIES: usize = 3;
