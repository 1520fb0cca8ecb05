mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retina", about = "Retinal scan triage and review tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the severity level and advice for a diagnosis label
    Classify(commands::classify::ClassifyArgs),
    /// List pending scans, most urgent first
    Queue(commands::queue::QueueArgs),
    /// Show a patient's severity evolution
    History(commands::history::HistoryArgs),
    /// Render a scan with zoom, levels and filters
    Render(commands::render::RenderArgs),
    /// Draw annotations over a scan
    Annotate(commands::annotate::AnnotateArgs),
    /// Print the AI report and export record for a scan
    Report(commands::report::ReportArgs),
    /// Validate a scan with notes and a final diagnosis
    Validate(commands::validate::ValidateArgs),
    /// Print or save the default viewer configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Queue(args) => commands::queue::run(args),
        Commands::History(args) => commands::history::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Annotate(args) => commands::annotate::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
