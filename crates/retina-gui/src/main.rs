mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod worker;

use std::path::PathBuf;

use clap::Parser;
use retina_core::config::ViewerConfig;

#[derive(Parser)]
#[command(name = "retina-gui", about = "Retinal scan review workstation")]
struct Args {
    /// JSON scan store to open at startup
    #[arg(long)]
    store: Option<PathBuf>,

    /// Viewer config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clinician user name
    #[arg(long, default_value = "local")]
    user: String,

    /// Session token
    #[arg(long, default_value = "local")]
    token: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ViewerConfig::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Falling back to default config");
            ViewerConfig::default()
        }),
        None => ViewerConfig::default(),
    };
    let store = args.store.clone().or_else(|| config.store.path.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("RetinaScan"),
        ..Default::default()
    };

    eframe::run_native(
        "RetinaScan",
        options,
        Box::new(move |cc| {
            let session = retina_core::repository::Session::new(args.user, args.token);
            Ok(Box::new(app::RetinaApp::new(&cc.egui_ctx, config, session, store)))
        }),
    )
}
