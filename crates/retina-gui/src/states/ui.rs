use std::path::PathBuf;

use retina_core::scan::{Scan, ScanId};

/// Narrative report shown in the details panel.
#[derive(Debug, Default)]
pub enum ReportState {
    #[default]
    Idle,
    /// Generation requested; the placeholder text is shown until it arrives.
    Pending(ScanId),
    Ready { scan_id: ScanId, text: String },
}

impl ReportState {
    pub const PLACEHOLDER: &'static str = "Analyse en cours...";

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub store_path: Option<PathBuf>,

    /// Pending scans, most urgent first, as last fetched.
    pub queue: Vec<Scan>,

    pub report: ReportState,

    /// Last repository failure, shown in a modal until dismissed.
    pub error: Option<String>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Record a failure in the log and raise the error modal.
    pub fn show_error(&mut self, message: String) {
        self.log_messages.push(format!("ERROR: {message}"));
        self.error = Some(message);
    }

    /// Report text for `scan`, or the placeholder while it is being generated.
    pub fn report_text(&self, scan: ScanId) -> Option<&str> {
        match &self.report {
            ReportState::Pending(id) if *id == scan => Some(ReportState::PLACEHOLDER),
            ReportState::Ready { scan_id, text } if *scan_id == scan => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_text_only_for_its_scan() {
        let mut state = UIState::default();
        state.report = ReportState::Pending(ScanId(4));
        assert_eq!(state.report_text(ScanId(4)), Some(ReportState::PLACEHOLDER));
        assert_eq!(state.report_text(ScanId(5)), None);

        state.report = ReportState::Ready {
            scan_id: ScanId(4),
            text: "Stable".into(),
        };
        assert_eq!(state.report_text(ScanId(4)), Some("Stable"));
    }

    #[test]
    fn errors_are_logged() {
        let mut state = UIState::default();
        state.show_error("Unauthorized".into());
        assert_eq!(state.error.as_deref(), Some("Unauthorized"));
        assert_eq!(state.log_messages, vec!["ERROR: Unauthorized".to_string()]);
    }
}
