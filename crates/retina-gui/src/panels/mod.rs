pub mod details;
mod helpers;
pub mod menu_bar;
pub mod queue;
pub mod status;
pub mod toolbar;
pub mod viewport;

pub(crate) use helpers::{section_header, severity_badge, tier_color};
