//! Inspect the target path before fetching.
//!
//! The check is a one-line sniff: a file whose first line is a Git LFS pointer
//! header is a placeholder, anything else that exists is taken as the real model.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::asset::ModelAsset;

/// First-line signature of a Git LFS pointer file.
pub const LFS_POINTER_PREFIX: &str = "version https://git-lfs.github.com/spec/v1";

/// Files below this size are flagged by `assess` as suspicious.
pub const SMALL_FILE_THRESHOLD: u64 = 1024;

/// Upper bound on how much of the first line is read.
const FIRST_LINE_LIMIT: u64 = 1024;

/// What is currently at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    /// Nothing at the path.
    Absent,
    /// A Git LFS pointer stands in for the real file.
    Placeholder,
    /// A file that does not look like a pointer; treated as the model.
    Valid { size: u64 },
}

/// Create `path` and any missing parents. No error if it already exists.
pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory {}", path.display()))
}

/// Classify the file at `path`.
pub fn inspect_existing(path: &Path) -> Result<AssetState> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AssetState::Absent),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to stat {}", path.display()));
        }
    };

    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut line = Vec::new();
    BufReader::new(file.take(FIRST_LINE_LIMIT))
        .read_until(b'\n', &mut line)
        .with_context(|| format!("read {}", path.display()))?;

    if is_lfs_pointer_line(&line) {
        Ok(AssetState::Placeholder)
    } else {
        Ok(AssetState::Valid { size: meta.len() })
    }
}

/// True if `line` (raw bytes, possibly with trailing newline) is an LFS pointer header.
pub fn is_lfs_pointer_line(line: &[u8]) -> bool {
    String::from_utf8_lossy(line)
        .trim()
        .starts_with(LFS_POINTER_PREFIX)
}

/// Read-only summary of the target, for the `check` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub state: AssetState,
    /// True when the file is valid and its size equals the expected size.
    pub size_matches: bool,
    /// True when the file is valid but smaller than `SMALL_FILE_THRESHOLD`.
    pub suspiciously_small: bool,
}

/// Inspect the asset's target without touching it.
pub fn assess(asset: &ModelAsset) -> Result<AssetReport> {
    let state = inspect_existing(&asset.target_path())?;
    let (size_matches, suspiciously_small) = match state {
        AssetState::Valid { size } => (size == asset.expected_size, size < SMALL_FILE_THRESHOLD),
        AssetState::Absent | AssetState::Placeholder => (false, false),
    };
    Ok(AssetReport {
        state,
        size_matches,
        suspiciously_small,
    })
}
