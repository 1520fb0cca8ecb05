use crate::filters::color_matrix::ColorMatrix;

/// Brightness stage: every channel is multiplied by `percent / 100`.
///
/// 100 = no change, 200 = twice as bright.
pub fn brightness_matrix(percent: f32) -> ColorMatrix {
    ColorMatrix::diagonal(percent / 100.0, 0.0)
}

/// Contrast stage, pivoting around the 0.5 midpoint.
///
/// `out = (in - 0.5) * percent / 100 + 0.5`; 100 = no change.
pub fn contrast_matrix(percent: f32) -> ColorMatrix {
    let c = percent / 100.0;
    ColorMatrix::diagonal(c, 0.5 - 0.5 * c)
}
