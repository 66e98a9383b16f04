//! Model fetcher: inspect the target, then download from mirrors in order.
//!
//! Control flow is inspect → (early return | fallback loop) → (success |
//! failure report). Nothing persists between runs except the file itself.

use anyhow::Result;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::asset::{mirror_host, ModelAsset};
use crate::console::Console;
use crate::inspect::{ensure_directory, inspect_existing, AssetState};
use crate::progress::ProgressMeter;
use crate::storage::PartFile;
use crate::transfer::{classify, FailureKind, TransferError, Transport};

/// One mirror that did not deliver the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorFailure {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

/// How a fetch ended. None of these are errors from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Target already held a non-placeholder file; nothing was done.
    AlreadyPresent { size: u64 },
    /// Target is a placeholder and the user declined the overwrite.
    Cancelled,
    /// Mirror `mirror_index` (0-based) delivered the file.
    Downloaded {
        mirror_index: usize,
        url: String,
        bytes: u64,
        /// Advisory: on-disk size equals the expected size.
        size_matches: bool,
    },
    /// Every mirror failed; manual instructions were printed.
    AllMirrorsFailed { failures: Vec<MirrorFailure> },
}

impl FetchOutcome {
    /// True when the model is in place after the run.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            FetchOutcome::AlreadyPresent { .. } | FetchOutcome::Downloaded { .. }
        )
    }
}

/// Ensures one model file is present, downloading it if needed.
pub struct ModelFetcher<T> {
    asset: ModelAsset,
    transport: T,
    auto_confirm: bool,
    show_progress: bool,
}

impl<T: Transport> ModelFetcher<T> {
    pub fn new(asset: ModelAsset, transport: T) -> Self {
        Self {
            asset,
            transport,
            auto_confirm: false,
            show_progress: true,
        }
    }

    /// Overwrite placeholders without asking.
    pub fn auto_confirm(mut self, yes: bool) -> Self {
        self.auto_confirm = yes;
        self
    }

    /// Print `Progress: N%` lines while downloading.
    pub fn show_progress(mut self, on: bool) -> Self {
        self.show_progress = on;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the whole flow. Only unexpected errors (directory creation, console
    /// I/O, a malformed asset) are returned as `Err`; mirror failures are not.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<FetchOutcome> {
        self.asset.validate()?;
        ensure_directory(&self.asset.target_dir)?;
        let target = self.asset.target_path();

        match inspect_existing(&target)? {
            AssetState::Absent => {
                tracing::debug!(path = %target.display(), "target absent");
            }
            AssetState::Placeholder => {
                let out = console.output_mut();
                writeln!(out, "Model file already exists at {}", target.display())?;
                writeln!(
                    out,
                    "Warning: Existing file is a Git LFS pointer, not the actual model"
                )?;
                let overwrite = if self.auto_confirm {
                    writeln!(out, "Overwriting it (auto-confirm)")?;
                    true
                } else {
                    console.confirm("Do you want to overwrite it? (y/N): ")?
                };
                if !overwrite {
                    writeln!(console.output_mut(), "Download cancelled")?;
                    tracing::info!(path = %target.display(), "overwrite of placeholder declined");
                    return Ok(FetchOutcome::Cancelled);
                }
                tracing::info!(path = %target.display(), "replacing LFS placeholder");
            }
            AssetState::Valid { size } => {
                let out = console.output_mut();
                writeln!(out, "Model file already exists at {}", target.display())?;
                writeln!(out, "Model file appears to be valid")?;
                tracing::info!(path = %target.display(), size, "model already present");
                return Ok(FetchOutcome::AlreadyPresent { size });
            }
        }

        download_with_fallback(
            &mut self.transport,
            &self.asset,
            self.show_progress,
            console.output_mut(),
        )
    }
}

/// Try each mirror of `asset` in order until one succeeds.
///
/// A failed mirror is reported and skipped. After a success no further mirror
/// is contacted. When all fail, manual-download instructions are printed and
/// `AllMirrorsFailed` is returned.
pub fn download_with_fallback<T: Transport, W: Write>(
    transport: &mut T,
    asset: &ModelAsset,
    show_progress: bool,
    out: &mut W,
) -> Result<FetchOutcome> {
    let target = asset.target_path();
    let count = asset.mirrors.len();
    let mut failures = Vec::new();

    for (i, url) in asset.mirrors.iter().enumerate() {
        let host = mirror_host(url);
        writeln!(out, "\nAttempting download from source {}/{}", i + 1, count)?;
        writeln!(out, "Downloading {} from {}", asset.filename, url)?;
        writeln!(
            out,
            "This may take several minutes depending on your internet connection..."
        )?;
        tracing::info!(mirror = i + 1, host = %host, "download attempt started");

        match attempt_mirror(transport, url, &target, show_progress, out) {
            Ok(bytes) => {
                writeln!(out, "Download completed: {}", target.display())?;
                let actual = fs::metadata(&target).map(|m| m.len()).unwrap_or(bytes);
                let size_matches = actual == asset.expected_size;
                if size_matches {
                    writeln!(out, "File size verification passed")?;
                } else {
                    writeln!(
                        out,
                        "Warning: Expected size {}, got {}",
                        asset.expected_size, actual
                    )?;
                    tracing::warn!(
                        expected = asset.expected_size,
                        actual,
                        "downloaded size differs from expected"
                    );
                }
                writeln!(out, "Successfully downloaded model to {}", target.display())?;
                writeln!(out, "The model is ready to use.")?;
                tracing::info!(mirror = i + 1, host = %host, bytes, "download succeeded");
                return Ok(FetchOutcome::Downloaded {
                    mirror_index: i,
                    url: url.clone(),
                    bytes,
                    size_matches,
                });
            }
            Err(e) => {
                let kind = classify(&e);
                writeln!(out, "Download failed: {}", e)?;
                writeln!(out, "Failed to download from {}", url)?;
                tracing::warn!(
                    mirror = i + 1,
                    host = %host,
                    kind = kind.as_str(),
                    "download attempt failed: {}",
                    e
                );
                failures.push(MirrorFailure {
                    url: url.clone(),
                    kind,
                    message: e.to_string(),
                });
                if i + 1 < count {
                    writeln!(out, "Trying next source...")?;
                }
            }
        }
    }

    writeln!(out, "\nAll download attempts failed.")?;
    writeln!(out, "Please manually download the {} file from:", asset.filename)?;
    writeln!(out, "{}", asset.manual_source)?;
    writeln!(out, "And place it in: {}", target.display())?;
    tracing::error!(mirrors = count, "all download attempts failed");
    Ok(FetchOutcome::AllMirrorsFailed { failures })
}

/// One full GET of `url` into a part file, renamed over `target` on success.
fn attempt_mirror<T: Transport, W: Write>(
    transport: &mut T,
    url: &str,
    target: &Path,
    show_progress: bool,
    out: &mut W,
) -> Result<u64, TransferError> {
    let mut part = PartFile::create(target)?;
    let mut meter = ProgressMeter::new();

    let result = {
        let mut on_progress = |received: u64, total: Option<u64>| {
            if !show_progress {
                return;
            }
            if let Some(pct) = meter.update(received, total) {
                // Progress is cosmetic; a broken stdout must not fail the download.
                let _ = write!(out, "\rProgress: {}%", pct);
                let _ = out.flush();
            }
        };
        transport.fetch(url, &mut part, &mut on_progress)
    };
    if meter.last_percent().is_some() {
        let _ = writeln!(out);
    }

    match result {
        Ok(bytes) => {
            part.finalize(target)?;
            Ok(bytes)
        }
        Err(e) => {
            part.discard();
            Err(e)
        }
    }
}
