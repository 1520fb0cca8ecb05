use std::path::Path;
use std::sync::mpsc;

use retina_core::repository::{JsonScanStore, ScanRepository, Session, ValidationRequest};
use retina_core::scan::{PatientId, ScanId};
use tracing::{error, info};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("retina-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

/// Log a failed repository call and surface it to the user. No retry.
fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    let message = msg.into();
    error!("{message}");
    send(tx, ctx, WorkerResult::Error { message });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut repo: Option<Box<dyn ScanRepository>> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::OpenStore { path, session } => {
                handle_open_store(&path, &session, &mut repo, &tx, &ctx);
            }
            WorkerCommand::FetchQueue { session } => {
                if let Some(repo) = connected(&repo, &tx, &ctx) {
                    handle_fetch_queue(repo, &session, &tx, &ctx);
                }
            }
            WorkerCommand::FetchHistory {
                session,
                scan_id,
                patient,
            } => {
                if let Some(repo) = connected(&repo, &tx, &ctx) {
                    handle_fetch_history(repo, &session, scan_id, patient, &tx, &ctx);
                }
            }
            WorkerCommand::Validate { session, request } => match repo.as_deref_mut() {
                Some(repo) => handle_validate(repo, &session, &request, &tx, &ctx),
                None => send_error(&tx, &ctx, "No scan store is open"),
            },
            WorkerCommand::RequestReport { session, scan_id } => {
                if let Some(repo) = connected(&repo, &tx, &ctx) {
                    handle_request_report(repo, &session, scan_id, &tx, &ctx);
                }
            }
        }
    }
}

fn connected<'a>(
    repo: &'a Option<Box<dyn ScanRepository>>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Option<&'a dyn ScanRepository> {
    if repo.is_none() {
        send_error(tx, ctx, "No scan store is open");
    }
    repo.as_deref()
}

fn handle_open_store(
    path: &Path,
    session: &Session,
    repo: &mut Option<Box<dyn ScanRepository>>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match JsonScanStore::open(path) {
        Ok(store) => {
            let scans = store.scans().len();
            info!(path = %path.display(), scans, "Scan store opened");
            *repo = Some(Box::new(store));
            send(tx, ctx, WorkerResult::StoreOpened {
                path: path.to_path_buf(),
                scans,
            });
            if let Some(repo) = repo.as_deref() {
                handle_fetch_queue(repo, session, tx, ctx);
            }
        }
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

fn handle_fetch_queue(
    repo: &dyn ScanRepository,
    session: &Session,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match repo.fetch_queue(session) {
        Ok(scans) => {
            send_log(tx, ctx, format!("{} scans awaiting review", scans.len()));
            send(tx, ctx, WorkerResult::Queue { scans });
        }
        Err(e) => send_error(tx, ctx, format!("Failed to fetch the queue: {e}")),
    }
}

fn handle_fetch_history(
    repo: &dyn ScanRepository,
    session: &Session,
    scan_id: ScanId,
    patient: PatientId,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match repo.fetch_patient_history(session, patient) {
        Ok(history) => send(tx, ctx, WorkerResult::History { scan_id, history }),
        Err(e) => send_error(tx, ctx, format!("Failed to fetch history of {patient}: {e}")),
    }
}

fn handle_validate(
    repo: &mut dyn ScanRepository,
    session: &Session,
    request: &ValidationRequest,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match repo.submit_validation(session, request) {
        Ok(scan) => {
            send_log(tx, ctx, format!("Validated {}", scan.id));
            send(tx, ctx, WorkerResult::Validated { scan });
            handle_fetch_queue(repo, session, tx, ctx);
        }
        Err(e) => send_error(
            tx,
            ctx,
            format!("Failed to validate {}: {e}", request.scan_id),
        ),
    }
}

fn handle_request_report(
    repo: &dyn ScanRepository,
    session: &Session,
    scan_id: ScanId,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match repo.request_report(session, scan_id) {
        Ok(text) => send(tx, ctx, WorkerResult::Report { scan_id, text }),
        Err(e) => send_error(tx, ctx, format!("Report generation failed for {scan_id}: {e}")),
    }
}
