//! `mfetch fetch` – make sure the model file is in place.

use anyhow::Result;
use mfetch_core::config::FetchConfig;
use mfetch_core::console::Console;
use mfetch_core::transfer::CurlTransport;
use mfetch_core::{FetchOutcome, ModelAsset, ModelFetcher};

/// Run the fetcher for the built-in model. Cancellation and all-mirrors-failed
/// are reported on stdout and are not errors.
pub fn run_fetch(cfg: &FetchConfig, yes: bool) -> Result<()> {
    let transport = CurlTransport::new(cfg.transfer_options());
    let mut fetcher = ModelFetcher::new(ModelAsset::u2net(), transport)
        .auto_confirm(yes || cfg.auto_confirm)
        .show_progress(cfg.show_progress);

    let mut console = Console::stdio();
    let outcome = fetcher.run(&mut console)?;

    match &outcome {
        FetchOutcome::AllMirrorsFailed { failures } => {
            tracing::info!(failed = failures.len(), "fetch finished without a model");
        }
        other => tracing::info!(success = other.is_success(), "fetch finished"),
    }
    Ok(())
}
