use crate::app::RetinaApp;
use crate::panels::{section_header, severity_badge};

const QUEUE_PANEL_WIDTH: f32 = 260.0;

/// Pending scans, most urgent first. Clicking one selects it.
pub fn show(ctx: &egui::Context, app: &mut RetinaApp) {
    egui::SidePanel::left("queue")
        .default_width(QUEUE_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            let count = app.ui_state.queue.len().to_string();
            section_header(ui, "Review Queue", Some(&count));
            ui.separator();

            if app.ui_state.queue.is_empty() {
                ui.label(
                    egui::RichText::new(if app.ui_state.store_path.is_some() {
                        "No scans awaiting review"
                    } else {
                        "Open a scan store to begin"
                    })
                    .color(egui::Color32::from_gray(120)),
                );
                return;
            }

            let selected = app.session.scan().map(|s| s.id);
            let mut clicked = None;

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(QUEUE_PANEL_WIDTH - 20.0);
                for scan in &app.ui_state.queue {
                    let is_selected = selected == Some(scan.id);
                    let response = egui::Frame::NONE
                        .inner_margin(4.0)
                        .fill(if is_selected {
                            ui.visuals().selection.bg_fill
                        } else {
                            egui::Color32::TRANSPARENT
                        })
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.strong(scan.patient.full_name());
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| ui.small(scan.id.to_string()),
                                );
                            });
                            ui.horizontal(|ui| {
                                severity_badge(ui, scan.severity());
                                ui.small(format!("{:.0}%", scan.confidence * 100.0));
                                ui.small(scan.created_at.format("%Y-%m-%d").to_string());
                            });
                        })
                        .response
                        .interact(egui::Sense::click());

                    if response.clicked() && !is_selected {
                        clicked = Some(scan.clone());
                    }
                    ui.separator();
                }
            });

            if let Some(scan) = clicked {
                app.select_scan(scan);
            }
        });
}
