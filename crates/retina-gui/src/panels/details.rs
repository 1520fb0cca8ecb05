use egui_plot::{Line, MarkerShape, Plot, Points};
use retina_core::consts::TOP_PROBABILITIES;
use retina_core::evolution::{Evolution, EvolutionPoint};
use retina_core::scan::{Scan, ScanStatus};
use retina_core::severity::SeverityLevel;

use crate::app::RetinaApp;
use crate::panels::{section_header, severity_badge, tier_color};

const DETAILS_PANEL_WIDTH: f32 = 340.0;
const CHART_HEIGHT: f64 = 140.0;
/// Horizontal distance (chart units) within which the pointer picks a point.
const HOVER_RADIUS: f64 = 6.0;

pub fn show(ctx: &egui::Context, app: &mut RetinaApp) {
    egui::SidePanel::right("details")
        .default_width(DETAILS_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            let Some(scan) = app.session.scan().cloned() else {
                ui.label(
                    egui::RichText::new("No scan selected").color(egui::Color32::from_gray(120)),
                );
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(DETAILS_PANEL_WIDTH - 20.0);

                patient_section(ui, &scan);
                ui.separator();
                diagnosis_section(ui, &scan);
                ui.separator();
                recommendation_section(ui, scan.severity());
                ui.separator();
                evolution_section(ui, app);
                ui.separator();
                validation_section(ui, app, &scan);
                ui.separator();
                report_section(ui, app, &scan);
            });
        });
}

fn patient_section(ui: &mut egui::Ui, scan: &Scan) {
    section_header(ui, "Patient", Some(&scan.id.to_string()));
    ui.add_space(4.0);
    ui.strong(scan.patient.full_name());
    ui.small(format!(
        "Examen du {} | {}",
        scan.created_at.format("%Y-%m-%d %H:%M"),
        scan.status
    ));

    if let Some(anamnesis) = non_empty(scan.anamnesis.as_deref()) {
        ui.add_space(4.0);
        ui.label(egui::RichText::new("Antécédents").small().strong());
        ui.label(anamnesis);
    }
    if let Some(symptoms) = non_empty(scan.symptoms.as_deref()) {
        ui.add_space(4.0);
        ui.label(egui::RichText::new("Symptômes").small().strong());
        ui.label(symptoms);
    }
}

fn diagnosis_section(ui: &mut egui::Ui, scan: &Scan) {
    section_header(ui, "Diagnostic IA", None);
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        severity_badge(ui, scan.severity());
        ui.small(format!("confiance {:.0}%", scan.confidence * 100.0));
    });
    ui.label(scan.label_or_default());

    let top = scan.top_probabilities(TOP_PROBABILITIES);
    if !top.is_empty() {
        ui.add_space(4.0);
        for (class, probability) in top {
            ui.add(
                egui::ProgressBar::new(probability.clamp(0.0, 1.0))
                    .text(format!("{class} {:.0}%", probability * 100.0)),
            );
        }
    }
}

fn recommendation_section(ui: &mut egui::Ui, level: SeverityLevel) {
    let profile = level.profile();
    section_header(ui, "Recommandation", None);
    ui.add_space(4.0);
    ui.colored_label(tier_color(profile.color_tier), profile.follow_up);
    for advice in profile.advice {
        ui.small(format!("- {advice}"));
    }
}

fn evolution_section(ui: &mut egui::Ui, app: &RetinaApp) {
    section_header(ui, "Évolution", None);
    ui.add_space(4.0);
    match app.session.evolution() {
        Evolution::InsufficientData { available } => {
            ui.small(format!(
                "Historique insuffisant pour tracer une évolution ({available} examen)"
            ));
        }
        evolution @ Evolution::Series(_) => evolution_chart(ui, &evolution),
    }
}

/// Severity over time. The chart plane is flipped so higher severity sits higher.
fn evolution_chart(ui: &mut egui::Ui, evolution: &Evolution) {
    let flip = |(x, y): (f32, f32)| [f64::from(x), 100.0 - f64::from(y)];
    let line: Vec<[f64; 2]> = evolution.line().into_iter().map(flip).collect();
    let accent = egui::Color32::from_rgb(13, 110, 253);

    let response = Plot::new("evolution_chart")
        .height(CHART_HEIGHT as f32)
        .include_x(0.0)
        .include_x(100.0)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .show_axes([false, false])
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Sévérité", line)
                    .color(accent)
                    .width(2.0)
                    .fill(0.0),
            );
            for point in evolution.points() {
                let color = tier_color(point.level.profile().color_tier);
                plot_ui.points(
                    Points::new(point.label.clone(), vec![flip((point.x, point.y))])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0)
                        .color(color),
                );
            }
            plot_ui
                .pointer_coordinate()
                .and_then(|p| nearest_point(evolution.points(), p.x))
                .map(EvolutionPoint::tooltip)
        });

    if let Some(tooltip) = response.inner {
        response.response.on_hover_text(tooltip);
    }
}

fn nearest_point(points: &[EvolutionPoint], x: f64) -> Option<&EvolutionPoint> {
    points
        .iter()
        .map(|p| ((f64::from(p.x) - x).abs(), p))
        .filter(|(d, _)| *d <= HOVER_RADIUS)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)
}

fn validation_section(ui: &mut egui::Ui, app: &mut RetinaApp, scan: &Scan) {
    let status = (scan.status == ScanStatus::Validated).then_some("validé");
    section_header(ui, "Validation", status);
    ui.add_space(4.0);

    let mut diagnosis = app.session.final_diagnosis().to_string();
    egui::ComboBox::from_label("Diagnostic final")
        .selected_text(diagnosis.clone())
        .show_ui(ui, |ui| {
            for level in SeverityLevel::ALL {
                ui.selectable_value(&mut diagnosis, level.label().to_string(), level.label());
            }
        });
    if diagnosis != app.session.final_diagnosis() {
        app.session.set_final_diagnosis(diagnosis);
    }

    let mut notes = app.session.notes().to_string();
    if ui
        .add(
            egui::TextEdit::multiline(&mut notes)
                .hint_text("Notes du médecin")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        app.session.set_notes(notes);
    }

    let can_submit = app.ui_state.store_path.is_some();
    let label = if scan.is_pending() { "Valider" } else { "Mettre à jour" };
    if ui
        .add_enabled(can_submit, egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 28.0)))
        .clicked()
    {
        app.submit_validation();
    }
}

fn report_section(ui: &mut egui::Ui, app: &mut RetinaApp, scan: &Scan) {
    section_header(ui, "Rapport IA", None);
    ui.add_space(4.0);

    let can_request = app.ui_state.store_path.is_some() && !app.ui_state.report.is_pending();
    if ui
        .add_enabled(can_request, egui::Button::new("Générer le rapport"))
        .clicked()
    {
        app.request_report();
    }

    if let Some(text) = app.ui_state.report_text(scan.id) {
        ui.add_space(4.0);
        egui::Frame::NONE
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(6.0)
            .corner_radius(2.0)
            .show(ui, |ui| {
                ui.label(text);
            });
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use retina_core::scan::ScanId;

    fn point(x: f32, id: u64) -> EvolutionPoint {
        EvolutionPoint {
            x,
            y: 50.0,
            level: SeverityLevel::Moderate,
            date: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            scan_id: ScanId(id),
            label: "Rétinopathie Modérée".into(),
        }
    }

    #[test]
    fn nearest_point_within_radius() {
        let points = [point(0.0, 1), point(50.0, 2), point(100.0, 3)];
        assert_eq!(nearest_point(&points, 47.0).map(|p| p.scan_id), Some(ScanId(2)));
        assert_eq!(nearest_point(&points, 98.5).map(|p| p.scan_id), Some(ScanId(3)));
        assert!(nearest_point(&points, 25.0).is_none());
    }
}
