use std::path::PathBuf;
use std::sync::mpsc;

use retina_core::config::ViewerConfig;
use retina_core::repository::Session;
use retina_core::scan::Scan;
use retina_core::session::ViewerSession;
use retina_core::viewport::PanDrag;
use tracing::warn;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{ReportState, TextureCache, UIState};
use crate::worker;

pub struct RetinaApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    /// Credentials passed with every repository command.
    pub auth: Session,
    pub session: ViewerSession,
    pub ui_state: UIState,
    pub textures: TextureCache,
    /// Pan started on the comparison pane, which never draws.
    pub target_pan: Option<PanDrag>,
}

impl RetinaApp {
    pub fn new(
        ctx: &egui::Context,
        config: ViewerConfig,
        auth: Session,
        store: Option<PathBuf>,
    ) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx, ctx.clone());

        let app = Self {
            cmd_tx,
            result_rx,
            auth,
            session: ViewerSession::new(config),
            ui_state: UIState::default(),
            textures: TextureCache::default(),
            target_pan: None,
        };
        if let Some(path) = store {
            app.open_store(path);
        }
        app
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    pub fn open_store(&self, path: PathBuf) {
        self.send_command(WorkerCommand::OpenStore {
            path,
            session: self.auth.clone(),
        });
    }

    pub fn refresh_queue(&self) {
        self.send_command(WorkerCommand::FetchQueue {
            session: self.auth.clone(),
        });
    }

    /// Show `scan` and fetch its patient's history in the background.
    pub fn select_scan(&mut self, scan: Scan) {
        let (scan_id, patient) = (scan.id, scan.patient.id);
        if let Err(e) = self.session.select_scan(scan) {
            warn!(scan = %scan_id, error = %e, "Scan image could not be decoded");
            self.ui_state
                .show_error(format!("Cannot display scan {scan_id}: {e}"));
            return;
        }
        self.textures.invalidate();
        self.target_pan = None;
        self.ui_state.report = ReportState::Idle;
        self.send_command(WorkerCommand::FetchHistory {
            session: self.auth.clone(),
            scan_id,
            patient,
        });
    }

    pub fn submit_validation(&mut self) {
        match self.session.validation_request() {
            Ok(request) => self.send_command(WorkerCommand::Validate {
                session: self.auth.clone(),
                request,
            }),
            Err(e) => self.ui_state.show_error(e.to_string()),
        }
    }

    pub fn request_report(&mut self) {
        let Some(scan_id) = self.session.scan().map(|s| s.id) else {
            return;
        };
        self.ui_state.report = ReportState::Pending(scan_id);
        self.send_command(WorkerCommand::RequestReport {
            session: self.auth.clone(),
            scan_id,
        });
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::StoreOpened { path, scans } => {
                    self.ui_state
                        .add_log(format!("Opened: {} ({scans} scans)", path.display()));
                    self.ui_state.store_path = Some(path);
                }
                WorkerResult::Queue { scans } => {
                    self.ui_state.queue = scans;
                }
                WorkerResult::History { scan_id, history } => {
                    self.session.load_history(scan_id, history);
                }
                WorkerResult::Validated { scan } => {
                    self.session.apply_validated(scan);
                }
                WorkerResult::Report { scan_id, text } => {
                    if let ReportState::Pending(pending) = self.ui_state.report {
                        if pending == scan_id {
                            self.ui_state.report = ReportState::Ready { scan_id, text };
                        }
                    }
                }
                WorkerResult::Error { message } => {
                    if self.ui_state.report.is_pending() {
                        self.ui_state.report = ReportState::Idle;
                    }
                    self.ui_state.show_error(message);
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }
}

impl eframe::App for RetinaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::queue::show(ctx, self);
        panels::details::show(ctx, self);
        panels::toolbar::show(ctx, self);
        panels::viewport::show(ctx, self);

        if let Some(message) = self.ui_state.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.ui_state.error = None;
                    }
                });
        }

        if self.ui_state.show_about {
            egui::Window::new("About RetinaScan")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("RetinaScan");
                        ui.label("Diabetic retinopathy triage");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
