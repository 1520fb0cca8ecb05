use anyhow::{Context, Result};
use clap::Args;
use retina_core::severity::{classify, queue_priority, SeverityLevel};

use crate::summary::print_classification;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Diagnosis label, e.g. "Rétinopathie Modérée"
    pub label: String,

    /// Typed severity ordinal (0-4); takes precedence over the label
    #[arg(long)]
    pub ordinal: Option<u8>,
}

pub fn run(args: &ClassifyArgs) -> Result<()> {
    let (level, rank) = match args.ordinal {
        Some(ordinal) => {
            let level = SeverityLevel::from_ordinal(ordinal)
                .with_context(|| format!("Severity ordinal must be 0-4, got {ordinal}"))?;
            (level, level.queue_priority())
        }
        None => (classify(Some(&args.label)), queue_priority(Some(&args.label))),
    };
    print_classification(&args.label, level, rank);
    Ok(())
}
