use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};

use crate::annotation::{AnnotationSurface, Tool};
use crate::comparison::{ComparisonController, ComparisonView};
use crate::config::ViewerConfig;
use crate::error::{RetinaError, Result};
use crate::evolution::{build_evolution_bounded, Evolution};
use crate::geometry::{Point, Size};
use crate::report::ReportExport;
use crate::repository::ValidationRequest;
use crate::scan::{Scan, ScanId};
use crate::viewport::render::{composite_over, render_view};
use crate::viewport::{render_filtered, DisplayTransform, PanDrag, ViewportState};

/// What a pointer drag on the viewer currently does.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Panning(PanDrag),
    Drawing(Tool),
}

/// Everything the workstation shows for the selected scan.
///
/// Pointer positions are in display pixels relative to the current scan's
/// pane; in compare mode both panes share this session's viewport.
pub struct ViewerSession {
    config: ViewerConfig,
    container: Size,
    scan: Option<Scan>,
    native: Option<RgbaImage>,
    history: Vec<Scan>,
    target_image: Option<(ScanId, RgbaImage)>,
    viewport: ViewportState,
    surface: AnnotationSurface,
    gesture: GestureState,
    comparison: ComparisonController,
    final_diagnosis: String,
    notes: String,
}

impl ViewerSession {
    pub fn new(config: ViewerConfig) -> Self {
        let surface = AnnotationSurface::new(
            0,
            0,
            config.annotation.stroke_style(),
            config.annotation.arrow_head(),
        );
        Self {
            config,
            container: Size::default(),
            scan: None,
            native: None,
            history: Vec::new(),
            target_image: None,
            viewport: ViewportState::default(),
            surface,
            gesture: GestureState::Idle,
            comparison: ComparisonController::new(),
            final_diagnosis: String::new(),
            notes: String::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Make `scan` the current scan.
    ///
    /// Viewport, ink, tool, gesture and comparison state are replaced in one
    /// step. If the image payload cannot be decoded the previous selection is
    /// left untouched.
    pub fn select_scan(&mut self, scan: Scan) -> Result<()> {
        let native = scan.decode_image()?;
        let (w, h) = native.dimensions();
        info!(scan = %scan.id, patient = %scan.patient.id, width = w, height = h, "Scan selected");

        self.viewport.reset();
        self.surface.resize(w, h);
        self.surface.deselect_tool();
        self.gesture = GestureState::Idle;
        self.comparison.reset_for(scan.id);
        self.history.clear();
        self.target_image = None;
        self.final_diagnosis = scan.label_or_default();
        self.notes = scan.doctor_notes.clone().unwrap_or_default();
        self.native = Some(native);
        self.scan = Some(scan);
        Ok(())
    }

    pub fn scan(&self) -> Option<&Scan> {
        self.scan.as_ref()
    }

    pub fn native_image(&self) -> Option<&RgbaImage> {
        self.native.as_ref()
    }

    /// Size of the current scan's pane, in display pixels.
    pub fn set_container(&mut self, container: Size) {
        self.container = container;
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Direct access to zoom, levels and filter. Every setter clamps.
    pub fn viewport_mut(&mut self) -> &mut ViewportState {
        &mut self.viewport
    }

    pub fn surface(&self) -> &AnnotationSurface {
        &self.surface
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn transform(&self) -> DisplayTransform {
        let native = self
            .native
            .as_ref()
            .map(|img| Size::from_dimensions(img.dimensions()))
            .unwrap_or_default();
        DisplayTransform::new(self.container, native).with_fit_fraction(self.config.viewport.fit_fraction)
    }

    /// Container point to native pixel of the current scan.
    pub fn to_native(&self, pointer: Point) -> Point {
        self.transform().to_native(&self.viewport, pointer)
    }

    // --- gestures ---

    pub fn tool(&self) -> Tool {
        self.surface.tool()
    }

    /// Toggle a drawing tool. Returns the active tool afterwards.
    pub fn select_tool(&mut self, tool: Tool) -> Tool {
        if matches!(self.gesture, GestureState::Drawing(_)) {
            self.gesture = GestureState::Idle;
        }
        self.surface.select_tool(tool)
    }

    /// Press: start panning with no tool, drawing otherwise.
    pub fn pointer_down(&mut self, pointer: Point) {
        if self.native.is_none() {
            return;
        }
        self.gesture = match self.surface.tool() {
            Tool::None => GestureState::Panning(self.viewport.begin_pan(pointer)),
            tool => {
                let at = self.to_native(pointer);
                if self.surface.begin_gesture(at) {
                    GestureState::Drawing(tool)
                } else {
                    GestureState::Idle
                }
            }
        };
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        match self.gesture {
            GestureState::Idle => {}
            GestureState::Panning(drag) => self.viewport.update_pan(&drag, pointer),
            GestureState::Drawing(_) => {
                let at = self.to_native(pointer);
                self.surface.move_gesture(at);
            }
        }
    }

    /// Release or pointer leaving the pane: finish whatever gesture is active.
    pub fn pointer_up(&mut self) {
        if let GestureState::Drawing(_) = std::mem::take(&mut self.gesture) {
            self.surface.end_gesture();
        }
    }

    /// Scroll zoom by `steps` notches about the pointer.
    pub fn zoom_by_steps(&mut self, steps: f32, pointer: Point) {
        let factor = self.config.viewport.zoom_step.powf(steps);
        let center = Point::new(self.container.width / 2.0, self.container.height / 2.0);
        self.viewport.zoom_about(factor, pointer, center);
    }

    pub fn clear_annotations(&mut self) {
        if matches!(self.gesture, GestureState::Drawing(_)) {
            self.gesture = GestureState::Idle;
        }
        self.surface.clear();
    }

    /// Restore the default view and erase all ink. The tool stays selected.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.clear_annotations();
    }

    // --- comparison ---

    pub fn comparison(&self) -> &ComparisonController {
        &self.comparison
    }

    pub fn toggle_compare(&mut self) -> bool {
        self.comparison.toggle_compare()
    }

    pub fn set_comparison_target(&mut self, scan_id: ScanId) -> Result<()> {
        self.comparison.set_comparison_target(scan_id)
    }

    pub fn comparison_view(&self) -> ComparisonView<'_> {
        self.comparison.view()
    }

    /// Install the patient history fetched for `for_scan`.
    ///
    /// Ignored when another scan has been selected since the request was made.
    pub fn load_history(&mut self, for_scan: ScanId, history: Vec<Scan>) {
        let Some(current) = self.scan.as_ref().filter(|s| s.id == for_scan) else {
            debug!(scan = %for_scan, "Dropping history for a stale selection");
            return;
        };
        self.comparison.load_history(current, history.clone());
        self.history = history;
        self.target_image = None;
    }

    pub fn history(&self) -> &[Scan] {
        &self.history
    }

    pub fn evolution(&self) -> Evolution {
        build_evolution_bounded(&self.history, self.config.evolution.max_points)
    }

    // --- rendering ---

    /// Current scan at native resolution with colour adjustments and ink.
    pub fn composite_image(&self) -> Option<RgbaImage> {
        let native = self.native.as_ref()?;
        let mut out = render_filtered(native, &self.viewport);
        composite_over(&mut out, &self.surface.composite());
        Some(out)
    }

    /// Current scan as it appears in a pane of the container size.
    pub fn render_pane(&self, background: Rgba<u8>) -> Option<RgbaImage> {
        let composite = self.composite_image()?;
        Some(render_view(&composite, &self.transform(), &self.viewport, background))
    }

    /// Decoded comparison target, cached until the target changes.
    pub fn target_native(&mut self) -> Result<Option<&RgbaImage>> {
        let Some(target) = self.comparison.target() else {
            return Ok(None);
        };
        let stale = self
            .target_image
            .as_ref()
            .map_or(true, |(id, _)| *id != target.id);
        if stale {
            let img = target.decode_image()?;
            self.target_image = Some((target.id, img));
        }
        Ok(self.target_image.as_ref().map(|(_, img)| img))
    }

    /// Comparison target with the shared viewport applied, ink excluded.
    pub fn render_target_pane(&mut self, background: Rgba<u8>) -> Result<Option<RgbaImage>> {
        let viewport = self.viewport.clone();
        let container = self.container;
        let fit = self.config.viewport.fit_fraction;
        let Some(native) = self.target_native()? else {
            return Ok(None);
        };
        let filtered = render_filtered(native, &viewport);
        let transform = DisplayTransform::new(container, Size::from_dimensions(filtered.dimensions()))
            .with_fit_fraction(fit);
        Ok(Some(render_view(&filtered, &transform, &viewport, background)))
    }

    /// Whole viewer area: one pane, or target and current side by side.
    pub fn render(&mut self, background: Rgba<u8>) -> Result<Option<RgbaImage>> {
        let Some(current) = self.render_pane(background) else {
            return Ok(None);
        };
        if !self.comparison.is_enabled() {
            return Ok(Some(current));
        }
        let left = match self.render_target_pane(background)? {
            Some(img) => img,
            None => {
                warn!("Compare mode has no comparison scan, rendering an empty pane");
                RgbaImage::from_pixel(current.width(), current.height(), background)
            }
        };
        let mut out = RgbaImage::from_pixel(current.width() * 2, current.height(), background);
        image::imageops::replace(&mut out, &left, 0, 0);
        image::imageops::replace(&mut out, &current, i64::from(current.width()), 0);
        Ok(Some(out))
    }

    // --- validation ---

    pub fn final_diagnosis(&self) -> &str {
        &self.final_diagnosis
    }

    pub fn set_final_diagnosis(&mut self, diagnosis: impl Into<String>) {
        self.final_diagnosis = diagnosis.into();
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn validation_request(&self) -> Result<ValidationRequest> {
        let scan = self.scan.as_ref().ok_or(RetinaError::NoScanSelected)?;
        Ok(ValidationRequest {
            scan_id: scan.id,
            notes: self.notes.clone(),
            final_diagnosis: self.final_diagnosis.clone(),
        })
    }

    /// Refresh a scan's record after a validation, keeping the view.
    ///
    /// The selected scan, the loaded history and the comparison candidates
    /// all take the new record so every view reports the same severity.
    pub fn apply_validated(&mut self, updated: Scan) {
        if let Some(entry) = self.history.iter_mut().find(|s| s.id == updated.id) {
            *entry = updated.clone();
        }
        self.comparison.update_scan(&updated);
        if let Some(scan) = self.scan.as_mut().filter(|s| s.id == updated.id) {
            *scan = updated;
        }
    }

    pub fn export_report(&self) -> Result<ReportExport> {
        let scan = self.scan.as_ref().ok_or(RetinaError::NoScanSelected)?;
        Ok(ReportExport::new(scan, &self.final_diagnosis, &self.notes))
    }
}
