//! One blocking GET per mirror.
//!
//! `Transport` is the seam between the fetcher and the network. The real
//! implementation is `CurlTransport` (libcurl Easy handle); tests script their
//! own.

mod classify;
mod easy;
mod error;

pub use classify::{classify, classify_curl_error, FailureKind};
pub use easy::{parse_content_length, parse_status_line, CurlTransport, TransferOptions};
pub use error::TransferError;

use std::io::Write;

/// Callback receiving (bytes received so far, advertised total if known).
pub type ProgressFn<'a> = dyn FnMut(u64, Option<u64>) + 'a;

/// Fetches a URL in full, streaming the body into `sink`.
pub trait Transport {
    /// Download `url` into `sink`, calling `progress` as bytes arrive.
    /// Returns the number of body bytes written.
    fn fetch(
        &mut self,
        url: &str,
        sink: &mut dyn Write,
        progress: &mut ProgressFn<'_>,
    ) -> Result<u64, TransferError>;
}
