use std::path::Path;

use tracing::{error, info};

use crate::app::RetinaApp;
use crate::messages::WorkerCommand;

pub fn show(ctx: &egui::Context, app: &mut RetinaApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let refresh_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::R);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open Store...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_store(app);
                }

                let has_store = app.ui_state.store_path.is_some();
                if ui
                    .add_enabled(has_store, egui::Button::new("Refresh Queue").shortcut_text(ctx.format_shortcut(&refresh_shortcut)))
                    .clicked()
                {
                    ui.close();
                    app.refresh_queue();
                }

                ui.separator();

                let has_scan = app.session.scan().is_some();
                if ui.add_enabled(has_scan, egui::Button::new("Export Report...")).clicked() {
                    ui.close();
                    export_report(app);
                }

                ui.separator();

                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_store(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&refresh_shortcut)) && app.ui_state.store_path.is_some() {
            app.refresh_queue();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_store(app: &RetinaApp) {
    let cmd_tx = app.cmd_tx.clone();
    let session = app.auth.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Scan store", &["json"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::OpenStore { path, session });
        }
    });
}

/// Save the report as JSON or plain text, chosen by the file extension.
fn export_report(app: &mut RetinaApp) {
    let report = match app.session.export_report() {
        Ok(report) => report,
        Err(e) => {
            app.ui_state.show_error(e.to_string());
            return;
        }
    };
    let file_name = format!("rapport_{}.txt", report.scan_id.0);

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text", &["txt"])
            .add_filter("JSON", &["json"])
            .set_file_name(&file_name)
            .save_file()
        else {
            return;
        };
        let content = if has_extension(&path, "json") {
            report.to_json()
        } else {
            Ok(report.to_text())
        };
        match content.map_err(anyhow::Error::from).and_then(|c| Ok(std::fs::write(&path, c)?)) {
            Ok(()) => info!(path = %path.display(), scan = %report.scan_id, "Report exported"),
            Err(e) => error!(path = %path.display(), error = %e, "Report export failed"),
        }
    });
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
