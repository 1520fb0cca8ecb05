mod textures;
mod ui;

pub use textures::TextureCache;
pub use ui::{ReportState, UIState};
