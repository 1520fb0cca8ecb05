use retina_core::annotation::Tool;
use retina_core::consts::{MAX_LEVEL_PERCENT, MAX_ZOOM, MIN_LEVEL_PERCENT, MIN_ZOOM};
use retina_core::scan::ScanId;
use retina_core::viewport::ColorFilter;

use crate::app::RetinaApp;

/// Viewer controls: levels, filter, tools and compare mode.
pub fn show(ctx: &egui::Context, app: &mut RetinaApp) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_enabled_ui(app.session.scan().is_some(), |ui| {
            ui.horizontal_wrapped(|ui| {
                levels_section(ui, app);
                ui.separator();
                tools_section(ui, app);
                ui.separator();
                compare_section(ui, app);
            });
        });
    });
}

fn levels_section(ui: &mut egui::Ui, app: &mut RetinaApp) {
    let viewport = app.session.viewport();
    let (mut zoom, mut brightness, mut contrast, mut filter) = (
        viewport.zoom(),
        viewport.brightness(),
        viewport.contrast(),
        viewport.filter(),
    );

    if ui
        .add(egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM).text("Zoom").fixed_decimals(1))
        .changed()
    {
        app.session.viewport_mut().set_zoom(zoom);
    }
    if ui
        .add(egui::Slider::new(&mut brightness, MIN_LEVEL_PERCENT..=MAX_LEVEL_PERCENT).text("Brightness").suffix("%"))
        .changed()
    {
        app.session.viewport_mut().set_brightness(brightness);
    }
    if ui
        .add(egui::Slider::new(&mut contrast, MIN_LEVEL_PERCENT..=MAX_LEVEL_PERCENT).text("Contrast").suffix("%"))
        .changed()
    {
        app.session.viewport_mut().set_contrast(contrast);
    }
    for &choice in ColorFilter::ALL {
        if ui.selectable_value(&mut filter, choice, choice.to_string()).clicked() {
            app.session.viewport_mut().set_filter(filter);
        }
    }

    if ui
        .button("Reset")
        .on_hover_text("Restore the default view and erase annotations")
        .clicked()
    {
        app.session.reset_view();
        app.textures.mark_ink_dirty();
    }
}

fn tools_section(ui: &mut egui::Ui, app: &mut RetinaApp) {
    let active = app.session.tool();
    for &tool in Tool::DRAWING {
        if ui.selectable_label(active == tool, tool.to_string()).clicked() {
            app.session.select_tool(tool);
            app.textures.mark_ink_dirty();
        }
    }
    if ui.button("Clear").clicked() {
        app.session.clear_annotations();
        app.textures.mark_ink_dirty();
    }
}

fn compare_section(ui: &mut egui::Ui, app: &mut RetinaApp) {
    let enabled = app.session.comparison().is_enabled();
    if ui.selectable_label(enabled, "Compare").clicked() {
        app.session.toggle_compare();
    }
    if !enabled {
        return;
    }

    let comparison = app.session.comparison();
    if !comparison.has_candidates() {
        ui.small("No other scan for this patient");
        return;
    }

    let current = comparison.target().map(|s| s.id);
    let selected_text = comparison
        .target()
        .map(|s| s.created_at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Choose a scan".into());
    let mut choice: Option<ScanId> = None;
    egui::ComboBox::from_label("Compare with")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for scan in comparison.candidates() {
                let text = format!(
                    "{} {}",
                    scan.created_at.format("%Y-%m-%d"),
                    scan.label_or_default()
                );
                if ui.selectable_label(current == Some(scan.id), text).clicked() {
                    choice = Some(scan.id);
                }
            }
        });

    if let Some(scan_id) = choice {
        if let Err(e) = app.session.set_comparison_target(scan_id) {
            app.ui_state.show_error(e.to_string());
        }
    }
}
