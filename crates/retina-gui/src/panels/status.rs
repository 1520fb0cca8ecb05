use crate::app::RetinaApp;

pub fn show(ctx: &egui::Context, app: &mut RetinaApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 3 empty lines to prevent layout jump.
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!("User: {}", app.auth.user));
            ui.separator();
            match &app.ui_state.store_path {
                Some(path) => ui.label(path.display().to_string()),
                None => ui.label("No store"),
            };
            if let Some(img) = app.session.native_image() {
                ui.separator();
                ui.label(format!("{}x{}", img.width(), img.height()));
                let viewport = app.session.viewport();
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", viewport.zoom() * 100.0));
                ui.separator();
                ui.label(format!(
                    "B {:.0}% / C {:.0}% / {}",
                    viewport.brightness(),
                    viewport.contrast(),
                    viewport.filter()
                ));
                ui.separator();
                ui.label(format!("Tool: {}", app.session.tool()));
            }
        });

        ui.add_space(2.0);
    });
}
