use anyhow::{Context, Result};
use clap::Args;
use retina_core::repository::{ScanRepository, ValidationRequest};
use retina_core::scan::ScanId;

use super::StoreArgs;
use crate::summary::severity_badge;

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Scan id
    #[arg(short, long)]
    pub scan: u64,

    /// Physician notes
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Final diagnosis; the AI label is kept when omitted
    #[arg(long, default_value = "")]
    pub diagnosis: String,
}

pub fn run(args: &ValidateArgs) -> Result<()> {
    let mut store = args.store.open()?;
    let request = ValidationRequest {
        scan_id: ScanId(args.scan),
        notes: args.notes.clone(),
        final_diagnosis: args.diagnosis.clone(),
    };
    let updated = store
        .submit_validation(&args.store.session(), &request)
        .with_context(|| format!("Failed to validate scan {}", request.scan_id))?;

    println!(
        "Validated {} as {} {}",
        updated.id,
        updated.label_or_default(),
        severity_badge(updated.severity())
    );
    println!("Saved to {}", args.store.store.display());
    Ok(())
}
