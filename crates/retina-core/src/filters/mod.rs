pub mod channel;
pub mod color_matrix;
pub mod levels;
