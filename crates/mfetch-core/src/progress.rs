//! Percentage progress for a single download.
//!
//! Progress is relative to the server-advertised total. Without a usable total
//! nothing is reported.

/// Tracks the last reported percentage so callers only print on change.
#[derive(Debug, Clone, Default)]
pub struct ProgressMeter {
    last_percent: Option<u8>,
}

impl ProgressMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the bytes received so far and the advertised total.
    ///
    /// Returns the new percentage (0..=100) when it differs from the last one
    /// reported; `None` when the total is unknown or zero, or nothing changed.
    pub fn update(&mut self, received: u64, total: Option<u64>) -> Option<u8> {
        let pct = percent(received, total?)?;
        if self.last_percent == Some(pct) {
            return None;
        }
        self.last_percent = Some(pct);
        Some(pct)
    }

    /// Last percentage handed out, if any.
    pub fn last_percent(&self) -> Option<u8> {
        self.last_percent
    }
}

/// Whole percent of `received` over `total`, capped at 100. `None` for a zero total.
pub fn percent(received: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (received as u128 * 100 / total as u128).min(100);
    Some(pct as u8)
}
