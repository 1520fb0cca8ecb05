use tracing::debug;

use crate::error::{RetinaError, Result};
use crate::scan::{sort_chronologically, Scan, ScanId};

/// What the viewer area should show.
#[derive(Clone, Copy, Debug)]
pub enum ComparisonView<'a> {
    /// One full-width viewport.
    Single,
    /// Compare mode is on but the patient has no other scan to show.
    Empty,
    /// Prior scan on the left, current scan on the right, one shared transform.
    Dual { left: &'a Scan },
}

impl ComparisonView<'_> {
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Side-by-side comparison against another scan of the same patient.
#[derive(Clone, Debug, Default)]
pub struct ComparisonController {
    enabled: bool,
    current: Option<ScanId>,
    /// Patient history, oldest first.
    history: Vec<Scan>,
    target: Option<ScanId>,
}

impl ComparisonController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip compare mode. Returns the new state.
    pub fn toggle_compare(&mut self) -> bool {
        self.enabled = !self.enabled;
        debug!(enabled = self.enabled, "Compare mode toggled");
        self.enabled
    }

    /// Forget the previous patient's history when a new scan is selected.
    ///
    /// The compare flag itself is kept.
    pub fn reset_for(&mut self, current: ScanId) {
        self.current = Some(current);
        self.history.clear();
        self.target = None;
    }

    /// Install the patient's history for the current scan and pick the default target.
    ///
    /// Histories for a scan other than the current one are ignored (a late
    /// response for a previous selection). The default target is the newest
    /// scan older than the current one.
    pub fn load_history(&mut self, current: &Scan, mut history: Vec<Scan>) {
        if self.current != Some(current.id) {
            debug!(scan = %current.id, "Ignoring history for a scan that is no longer selected");
            return;
        }
        sort_chronologically(&mut history);
        self.target = default_target(&history, current);
        self.history = history;
    }

    /// Replace the history entry for `scan` with its newer record.
    pub fn update_scan(&mut self, scan: &Scan) {
        if let Some(entry) = self.history.iter_mut().find(|s| s.id == scan.id) {
            *entry = scan.clone();
        }
    }

    /// Scans the user may compare against: the whole history minus the current scan.
    pub fn candidates(&self) -> impl Iterator<Item = &Scan> {
        let current = self.current;
        self.history.iter().filter(move |s| Some(s.id) != current)
    }

    pub fn has_candidates(&self) -> bool {
        self.candidates().next().is_some()
    }

    /// Choose which scan fills the left pane.
    pub fn set_comparison_target(&mut self, scan_id: ScanId) -> Result<()> {
        let current = self.current.ok_or(RetinaError::NoScanSelected)?;
        if !self.candidates().any(|s| s.id == scan_id) {
            return Err(RetinaError::InvalidComparisonTarget {
                current,
                target: scan_id,
            });
        }
        self.target = Some(scan_id);
        Ok(())
    }

    pub fn target(&self) -> Option<&Scan> {
        let id = self.target?;
        self.history.iter().find(|s| s.id == id)
    }

    pub fn view(&self) -> ComparisonView<'_> {
        if !self.enabled {
            return ComparisonView::Single;
        }
        match self.target() {
            Some(left) => ComparisonView::Dual { left },
            None => ComparisonView::Empty,
        }
    }
}

/// Newest scan strictly older than `current`, if any. `history` is oldest first.
fn default_target(history: &[Scan], current: &Scan) -> Option<ScanId> {
    history
        .iter()
        .rev()
        .find(|s| s.id != current.id && s.created_at < current.created_at)
        .map(|s| s.id)
}
