use retina_core::geometry::{Point, Rect, Size};
use retina_core::viewport::DisplayTransform;

use crate::app::RetinaApp;

/// Scroll distance, in points, counted as one zoom notch.
const SCROLL_NOTCH: f32 = 50.0;
const PANE_GAP: f32 = 4.0;

pub fn show(ctx: &egui::Context, app: &mut RetinaApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        if app.session.scan().is_none() {
            show_placeholder(ui, "Select a scan from the queue");
            return;
        }

        // Compare mode: target on the left, current scan on the right, one shared viewport.
        let (target_pane, current_pane) = if app.session.comparison().is_enabled() {
            let half = (rect.width() - PANE_GAP) / 2.0;
            let left = egui::Rect::from_min_size(rect.min, egui::vec2(half, rect.height()));
            let right = egui::Rect::from_min_size(
                egui::pos2(left.max.x + PANE_GAP, rect.min.y),
                egui::vec2(half, rect.height()),
            );
            (Some(left), right)
        } else {
            (None, rect)
        };

        app.session
            .set_container(Size::new(current_pane.width(), current_pane.height()));

        if let Some(pane) = target_pane {
            show_target_pane(ui, app, pane);
        }
        show_current_pane(ui, app, current_pane);
    });
}

fn show_current_pane(ui: &mut egui::Ui, app: &mut RetinaApp, pane: egui::Rect) {
    let response = ui.allocate_rect(pane, egui::Sense::click_and_drag());
    handle_zoom(ui, &response, app, pane);
    handle_gesture(ui, &response, app, pane);

    let img_rect = to_screen(
        app.session.transform().image_rect(app.session.viewport()),
        pane.min,
    );
    let painter = ui.painter_at(pane);
    if let Some(texture) = app.textures.current(ui.ctx(), &app.session) {
        draw_image(&painter, texture, img_rect);
    }
    // Ink sits on its own texture at the same rect, so it scales with the scan.
    if let Some(ink) = app.textures.ink(ui.ctx(), &app.session) {
        draw_image(&painter, ink, img_rect);
    }

    if let Some(scan) = app.session.scan() {
        let label = format!("Actuel : {}", scan.created_at.format("%Y-%m-%d"));
        draw_pane_label(&painter, pane, &label);
    }
}

fn show_target_pane(ui: &mut egui::Ui, app: &mut RetinaApp, pane: egui::Rect) {
    let response = ui.allocate_rect(pane, egui::Sense::click_and_drag());
    handle_zoom(ui, &response, app, pane);
    handle_target_pan(ui, &response, app, pane);

    let painter = ui.painter_at(pane);
    if app.session.comparison_view().is_empty_state() {
        draw_centered_text(&painter, pane, "Aucun examen antérieur pour ce patient");
        return;
    }

    match app.textures.target(ui.ctx(), &mut app.session) {
        Ok(Some((texture, [w, h]))) => {
            let transform = DisplayTransform::new(
                app.session.container(),
                Size::new(w as f32, h as f32),
            )
            .with_fit_fraction(app.session.config().viewport.fit_fraction);
            let img_rect = to_screen(transform.image_rect(app.session.viewport()), pane.min);
            draw_image(&painter, texture, img_rect);
        }
        Ok(None) => draw_centered_text(&painter, pane, "Chargement de l'historique..."),
        Err(e) => draw_centered_text(&painter, pane, &format!("Image indisponible : {e}")),
    }

    if let Some(target) = app.session.comparison().target() {
        let label = format!("Comparaison : {}", target.created_at.format("%Y-%m-%d"));
        draw_pane_label(&painter, pane, &label);
    }
}

fn pane_point(pos: egui::Pos2, pane: egui::Rect) -> Point {
    Point::new(pos.x - pane.min.x, pos.y - pane.min.y)
}

fn to_screen(rect: Rect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(rect.min.x, rect.min.y),
        egui::vec2(rect.size.width, rect.size.height),
    )
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut RetinaApp, pane: egui::Rect) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    if let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) {
        app.session
            .zoom_by_steps(scroll_delta / SCROLL_NOTCH, pane_point(mouse_pos, pane));
    }
}

/// Route a primary drag on the current pane to the session: pan without a
/// tool, draw with one. Leaving the pane ends the gesture.
fn handle_gesture(ui: &egui::Ui, response: &egui::Response, app: &mut RetinaApp, pane: egui::Rect) {
    let mut touched = false;

    if response.drag_started_by(egui::PointerButton::Primary) {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(pos) = origin {
            app.session.pointer_down(pane_point(pos, pane));
            touched = true;
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            if pane.contains(pos) {
                app.session.pointer_move(pane_point(pos, pane));
            } else {
                app.session.pointer_up();
            }
            touched = true;
        }
    }

    if response.drag_stopped() {
        app.session.pointer_up();
        touched = true;
    }

    if touched && app.session.tool() != retina_core::annotation::Tool::None {
        app.textures.mark_ink_dirty();
    }
}

/// The comparison pane only pans; it shares the current scan's viewport.
fn handle_target_pan(ui: &egui::Ui, response: &egui::Response, app: &mut RetinaApp, pane: egui::Rect) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        app.target_pan = origin.map(|pos| app.session.viewport().begin_pan(pane_point(pos, pane)));
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let (Some(drag), Some(pos)) = (app.target_pan, response.interact_pointer_pos()) {
            app.session
                .viewport_mut()
                .update_pan(&drag, pane_point(pos, pane));
        }
    }

    if response.drag_stopped() {
        app.target_pan = None;
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(20));
}

fn draw_image(painter: &egui::Painter, texture_id: egui::TextureId, img_rect: egui::Rect) {
    painter.image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_pane_label(painter: &egui::Painter, pane: egui::Rect, label: &str) {
    painter.text(
        pane.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn draw_centered_text(painter: &egui::Painter, pane: egui::Rect, text: &str) {
    painter.text(
        pane.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(120),
    );
}

fn show_placeholder(ui: &mut egui::Ui, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
