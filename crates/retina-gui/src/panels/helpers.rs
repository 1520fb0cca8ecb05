use retina_core::severity::{ColorTier, SeverityLevel};

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

pub(crate) fn tier_color(tier: ColorTier) -> egui::Color32 {
    let [r, g, b] = tier.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Filled pill with the severity label, coloured by tier.
pub(crate) fn severity_badge(ui: &mut egui::Ui, level: SeverityLevel) -> egui::Response {
    let tier = level.profile().color_tier;
    let text_color = match tier {
        ColorTier::Warning | ColorTier::Info => egui::Color32::BLACK,
        ColorTier::Success | ColorTier::Danger => egui::Color32::WHITE,
    };
    egui::Frame::NONE
        .fill(tier_color(tier))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .corner_radius(8.0)
        .show(ui, |ui| {
            ui.label(egui::RichText::new(level.label()).small().color(text_color));
        })
        .response
}
