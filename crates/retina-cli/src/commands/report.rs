use anyhow::{Context, Result};
use clap::Args;
use retina_core::report::ReportExport;
use retina_core::repository::ScanRepository;
use retina_core::scan::ScanId;

use super::StoreArgs;
use crate::summary::print_export;

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Scan id
    #[arg(short, long)]
    pub scan: u64,

    /// Print the export record as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ReportArgs) -> Result<()> {
    let store = args.store.open()?;
    let scan_id = ScanId(args.scan);
    let scan = store.scan(scan_id)?;

    let narrative = store
        .request_report(&args.store.session(), scan_id)
        .with_context(|| format!("Failed to generate the report for scan {scan_id}"))?;
    let export = ReportExport::new(
        scan,
        &scan.label_or_default(),
        scan.doctor_notes.as_deref().unwrap_or_default(),
    );

    if args.json {
        println!("{}", export.to_json()?);
        return Ok(());
    }

    println!();
    print!("{}", export.to_text());
    println!();
    println!("{narrative}");
    println!();
    print_export(&export);
    Ok(())
}
