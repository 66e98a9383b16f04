//! Description of the model file to fetch: where it lives and where it comes from.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory the model is placed in, relative to the working directory.
pub const U2NET_TARGET_DIR: &str = "src/AI.SmartCut/Assets/Models";

/// File name of the U2Net ONNX model.
pub const U2NET_FILENAME: &str = "u2net.onnx";

/// Mirrors, tried in this order.
pub const U2NET_MIRRORS: [&str; 2] = [
    "https://github.com/xuebinqin/U-2-Net/releases/download/v1.0/u2net.onnx",
    "https://huggingface.co/danielgatis/rembg/resolve/main/u2net.onnx",
];

/// Approximate size of the published model (176 MiB). Advisory only.
pub const U2NET_EXPECTED_SIZE: u64 = 176 * 1024 * 1024;

/// Where a user can grab the file by hand when every mirror fails.
pub const U2NET_MANUAL_SOURCE: &str = "https://github.com/xuebinqin/U-2-Net/releases";

/// A single downloadable model file and the mirrors that serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAsset {
    /// Directory that holds the model (created if missing).
    pub target_dir: PathBuf,
    /// File name inside `target_dir`.
    pub filename: String,
    /// Mirror URLs in priority order.
    pub mirrors: Vec<String>,
    /// Size the downloaded file is expected to have, compared after download.
    pub expected_size: u64,
    /// Canonical page printed in the manual-recovery instructions.
    pub manual_source: String,
}

impl ModelAsset {
    /// The built-in U2Net model asset.
    pub fn u2net() -> Self {
        Self {
            target_dir: PathBuf::from(U2NET_TARGET_DIR),
            filename: U2NET_FILENAME.to_string(),
            mirrors: U2NET_MIRRORS.iter().map(|m| m.to_string()).collect(),
            expected_size: U2NET_EXPECTED_SIZE,
            manual_source: U2NET_MANUAL_SOURCE.to_string(),
        }
    }

    /// Full path of the model file.
    pub fn target_path(&self) -> PathBuf {
        self.target_dir.join(&self.filename)
    }

    /// Rejects assets that could never be fetched: no mirrors, an empty
    /// filename, or a mirror that is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() {
            anyhow::bail!("model filename is empty");
        }
        if self.mirrors.is_empty() {
            anyhow::bail!("no mirrors configured for {}", self.filename);
        }
        for mirror in &self.mirrors {
            let parsed = url::Url::parse(mirror)
                .with_context(|| format!("invalid mirror URL: {}", mirror))?;
            match parsed.scheme() {
                "http" | "https" => {}
                other => anyhow::bail!("unsupported scheme {:?} in mirror {}", other, mirror),
            }
        }
        Ok(())
    }
}

impl Default for ModelAsset {
    fn default() -> Self {
        Self::u2net()
    }
}

/// Host part of a mirror URL, for log fields. Falls back to the full string.
pub fn mirror_host(mirror: &str) -> String {
    url::Url::parse(mirror)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| mirror.to_string())
}
