use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RetinaError, Result};
use crate::report::narrative_report;
use crate::repository::{ScanRepository, Session, ValidationRequest};
use crate::scan::{sort_chronologically, PatientId, Scan, ScanId, ScanStatus};

/// On-disk layout of a store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    scans: Vec<Scan>,
}

/// Scan repository backed by a single JSON document.
///
/// Validations are written back to the file when the store was opened from one.
#[derive(Debug, Default)]
pub struct JsonScanStore {
    path: Option<PathBuf>,
    scans: Vec<Scan>,
}

impl JsonScanStore {
    /// In-memory store, never persisted.
    pub fn from_scans(scans: Vec<Scan>) -> Self {
        Self { path: None, scans }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let doc: StoreDocument = serde_json::from_str(&text)?;
        info!(path = %path.display(), scans = doc.scans.len(), "Opened scan store");
        Ok(Self {
            path: Some(path.to_path_buf()),
            scans: doc.scans,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn scans(&self) -> &[Scan] {
        &self.scans
    }

    pub fn scan(&self, id: ScanId) -> Result<&Scan> {
        self.scans
            .iter()
            .find(|s| s.id == id)
            .ok_or(RetinaError::ScanNotFound(id))
    }

    /// Write the whole document to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let doc = StoreDocument {
            scans: self.scans.clone(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        debug!(path = %path.display(), scans = self.scans.len(), "Saved scan store");
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    fn history_of(&self, patient: PatientId) -> Vec<Scan> {
        let mut history: Vec<Scan> = self
            .scans
            .iter()
            .filter(|s| s.patient.id == patient)
            .cloned()
            .collect();
        sort_chronologically(&mut history);
        history
    }
}

fn authorize(session: &Session) -> Result<()> {
    if session.token.trim().is_empty() {
        return Err(RetinaError::Unauthorized(format!(
            "no token for user '{}'",
            session.user
        )));
    }
    Ok(())
}

impl ScanRepository for JsonScanStore {
    fn fetch_queue(&self, session: &Session) -> Result<Vec<Scan>> {
        authorize(session)?;
        let mut queue: Vec<Scan> = self.scans.iter().filter(|s| s.is_pending()).cloned().collect();
        queue.sort_by(|a, b| {
            a.queue_priority()
                .cmp(&b.queue_priority())
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        debug!(pending = queue.len(), "Fetched review queue");
        Ok(queue)
    }

    fn fetch_patient_history(&self, session: &Session, patient: PatientId) -> Result<Vec<Scan>> {
        authorize(session)?;
        let history = self.history_of(patient);
        if history.is_empty() {
            return Err(RetinaError::PatientNotFound(patient));
        }
        Ok(history)
    }

    fn submit_validation(&mut self, session: &Session, request: &ValidationRequest) -> Result<Scan> {
        authorize(session)?;
        let scan = self
            .scans
            .iter_mut()
            .find(|s| s.id == request.scan_id)
            .ok_or(RetinaError::ScanNotFound(request.scan_id))?;

        scan.status = ScanStatus::Validated;
        scan.doctor_notes = Some(request.notes.clone());
        let diagnosis = request.final_diagnosis.trim();
        if !diagnosis.is_empty() {
            scan.diagnosis_label = Some(diagnosis.to_string());
            // A replaced label supersedes the inference service's ordinal.
            scan.severity_level = None;
        }
        let updated = scan.clone();
        info!(
            scan = %updated.id,
            user = %session.user,
            diagnosis = ?updated.diagnosis_label,
            "Scan validated"
        );

        self.persist()?;
        Ok(updated)
    }

    fn request_report(&self, session: &Session, scan_id: ScanId) -> Result<String> {
        authorize(session)?;
        let current = self.scan(scan_id)?;
        let history = self.history_of(current.patient.id);
        Ok(narrative_report(current, &history))
    }
}
