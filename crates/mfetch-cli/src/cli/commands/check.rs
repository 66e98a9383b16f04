//! `mfetch check` – report the state of the model file. Read-only.

use anyhow::Result;
use mfetch_core::inspect::{self, AssetState, SMALL_FILE_THRESHOLD};
use mfetch_core::ModelAsset;

pub fn run_check() -> Result<()> {
    let asset = ModelAsset::u2net();
    let path = asset.target_path();
    let report = inspect::assess(&asset)?;

    match report.state {
        AssetState::Absent => {
            println!("Model file not found at {}", path.display());
            println!("Run `mfetch` to download it.");
        }
        AssetState::Placeholder => {
            println!("{} is a Git LFS pointer, not the actual model", path.display());
            println!("Run `mfetch` to replace it.");
        }
        AssetState::Valid { size } => {
            println!("{}  {} bytes", path.display(), size);
            if report.suspiciously_small {
                println!(
                    "Warning: file is smaller than {} bytes and may not be a real model",
                    SMALL_FILE_THRESHOLD
                );
            }
            if !report.size_matches {
                println!("Note: expected size {}, got {}", asset.expected_size, size);
            }
        }
    }
    Ok(())
}
