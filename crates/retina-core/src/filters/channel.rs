use crate::filters::color_matrix::ColorMatrix;

/// Photographic negative: `out = 1 - in`.
pub fn invert_matrix() -> ColorMatrix {
    ColorMatrix::diagonal(-1.0, 1.0)
}

/// Red-free view: the green channel copied to R, G and B.
///
/// Vessels and haemorrhages stand out best in green light.
pub fn green_isolate_matrix() -> ColorMatrix {
    ColorMatrix::from_rows([
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
    ])
}
