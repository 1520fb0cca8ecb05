use anyhow::{Context, Result};
use clap::Args;
use retina_core::evolution::build_evolution_bounded;
use retina_core::repository::ScanRepository;
use retina_core::scan::PatientId;

use super::StoreArgs;
use crate::summary::print_evolution;

#[derive(Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Patient id
    #[arg(short, long)]
    pub patient: u64,
}

pub fn run(args: &HistoryArgs) -> Result<()> {
    let config = args.store.viewer_config()?;
    let store = args.store.open()?;
    let patient = PatientId(args.patient);
    let history = store
        .fetch_patient_history(&args.store.session(), patient)
        .with_context(|| format!("Failed to fetch history of patient {patient}"))?;

    let name = history
        .first()
        .map(|s| s.patient.full_name())
        .unwrap_or_else(|| patient.to_string());
    let evolution = build_evolution_bounded(&history, config.evolution.max_points);
    print_evolution(&name, &evolution);
    Ok(())
}
