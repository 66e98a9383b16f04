//! Error for a single mirror attempt.

/// Why one download attempt failed. Never fatal to the whole fetch; the
/// fetcher reports it and moves to the next mirror.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Curl reported an error (DNS, connect, timeout, reset, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to disk failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
