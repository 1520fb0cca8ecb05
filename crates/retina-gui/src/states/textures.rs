use retina_core::error::Result;
use retina_core::scan::ScanId;
use retina_core::session::ViewerSession;
use retina_core::viewport::{render_filtered, ColorFilter, ViewportState};

use crate::convert::rgba_to_color_image;

/// What a filtered texture was rendered from. Zoom and pan are applied at
/// draw time, so only the colour adjustments invalidate it.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LevelsKey {
    scan: ScanId,
    brightness: f32,
    contrast: f32,
    filter: ColorFilter,
}

impl LevelsKey {
    fn new(scan: ScanId, viewport: &ViewportState) -> Self {
        Self {
            scan,
            brightness: viewport.brightness(),
            contrast: viewport.contrast(),
            filter: viewport.filter(),
        }
    }
}

/// GPU copies of the current scan, its ink and the comparison scan.
#[derive(Default)]
pub struct TextureCache {
    current: Option<(LevelsKey, egui::TextureHandle)>,
    target: Option<(LevelsKey, egui::TextureHandle)>,
    ink: Option<egui::TextureHandle>,
    ink_dirty: bool,
}

impl TextureCache {
    /// Drop everything, e.g. after a new scan was selected.
    pub fn invalidate(&mut self) {
        *self = Self {
            ink_dirty: true,
            ..Self::default()
        };
    }

    /// The ink layers changed and must be re-uploaded.
    pub fn mark_ink_dirty(&mut self) {
        self.ink_dirty = true;
    }

    /// Filtered texture of the current scan.
    pub fn current(
        &mut self,
        ctx: &egui::Context,
        session: &ViewerSession,
    ) -> Option<egui::TextureId> {
        let scan = session.scan()?.id;
        let native = session.native_image()?;
        let key = LevelsKey::new(scan, session.viewport());

        if self.current.as_ref().map(|(k, _)| *k) != Some(key) {
            let image = rgba_to_color_image(&render_filtered(native, session.viewport()));
            let handle = ctx.load_texture("scan", image, egui::TextureOptions::LINEAR);
            self.current = Some((key, handle));
        }
        self.current.as_ref().map(|(_, t)| t.id())
    }

    /// Committed ink plus the live preview, same size as the scan.
    pub fn ink(&mut self, ctx: &egui::Context, session: &ViewerSession) -> Option<egui::TextureId> {
        session.native_image()?;
        if self.ink_dirty || self.ink.is_none() {
            let image = rgba_to_color_image(&session.surface().composite());
            match self.ink.as_mut() {
                Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
                None => {
                    self.ink = Some(ctx.load_texture("ink", image, egui::TextureOptions::LINEAR));
                }
            }
            self.ink_dirty = false;
        }
        self.ink.as_ref().map(|t| t.id())
    }

    /// Filtered texture of the comparison scan and its native size.
    pub fn target(
        &mut self,
        ctx: &egui::Context,
        session: &mut ViewerSession,
    ) -> Result<Option<(egui::TextureId, [usize; 2])>> {
        let Some(scan) = session.comparison().target().map(|s| s.id) else {
            return Ok(None);
        };
        let viewport = session.viewport().clone();
        let key = LevelsKey::new(scan, &viewport);

        if self.target.as_ref().map(|(k, _)| *k) != Some(key) {
            let Some(native) = session.target_native()? else {
                return Ok(None);
            };
            let image = rgba_to_color_image(&render_filtered(native, &viewport));
            let handle = ctx.load_texture("comparison", image, egui::TextureOptions::LINEAR);
            self.target = Some((key, handle));
        }
        Ok(self.target.as_ref().map(|(_, t)| (t.id(), t.size())))
    }
}
