use anyhow::{Context, Result};
use clap::Args;
use retina_core::repository::ScanRepository;

use super::StoreArgs;
use crate::summary::print_queue;

#[derive(Args)]
pub struct QueueArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Show at most this many scans
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

pub fn run(args: &QueueArgs) -> Result<()> {
    let store = args.store.open()?;
    let mut queue = store
        .fetch_queue(&args.store.session())
        .context("Failed to fetch the review queue")?;
    if let Some(limit) = args.limit {
        queue.truncate(limit);
    }
    print_queue(&queue);
    Ok(())
}
