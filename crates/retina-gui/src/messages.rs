use std::path::PathBuf;

use retina_core::repository::{Session, ValidationRequest};
use retina_core::scan::{PatientId, Scan, ScanId};

/// Commands sent from UI thread to worker thread.
///
/// Every repository command carries the session it runs under.
pub enum WorkerCommand {
    /// Open a JSON scan store and fetch its queue.
    OpenStore { path: PathBuf, session: Session },

    /// Re-fetch the pending queue.
    FetchQueue { session: Session },

    /// Fetch a patient's history for the scan selected at request time.
    FetchHistory {
        session: Session,
        scan_id: ScanId,
        patient: PatientId,
    },

    /// Submit a physician validation.
    Validate {
        session: Session,
        request: ValidationRequest,
    },

    /// Generate the narrative report for a scan.
    RequestReport { session: Session, scan_id: ScanId },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    StoreOpened { path: PathBuf, scans: usize },
    Queue { scans: Vec<Scan> },
    History { scan_id: ScanId, history: Vec<Scan> },
    Validated { scan: Scan },
    Report { scan_id: ScanId, text: String },
    Error { message: String },
    Log { message: String },
}
