//! Seam to the remote scan repository.

mod json_store;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scan::{PatientId, Scan, ScanId};

pub use json_store::JsonScanStore;

/// Authenticated clinician session, passed explicitly to every repository call.
///
/// Token expiry and re-authentication belong to the authentication
/// service, not to the viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: String,
    pub token: String,
}

impl Session {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }
}

/// Physician sign-off of a scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub scan_id: ScanId,
    pub notes: String,
    /// Replaces the AI label when non-empty.
    pub final_diagnosis: String,
}

/// Operations the viewer consumes from the scan service.
///
/// Implementations may block; the workstation calls them off the UI thread.
pub trait ScanRepository: Send {
    /// Pending scans, most urgent first. Ordering is the repository's policy.
    fn fetch_queue(&self, session: &Session) -> Result<Vec<Scan>>;

    /// Every scan of one patient, oldest first.
    fn fetch_patient_history(&self, session: &Session, patient: PatientId) -> Result<Vec<Scan>>;

    /// Record a validation and return the updated scan.
    fn submit_validation(&mut self, session: &Session, request: &ValidationRequest) -> Result<Scan>;

    /// Narrative report text for a scan. May be slow.
    fn request_report(&self, session: &Session, scan_id: ScanId) -> Result<String>;
}
