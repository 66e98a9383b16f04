//! libcurl-backed transport: a single plain GET, following redirects.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::str;
use std::time::Duration;

use super::error::TransferError;
use super::{ProgressFn, Transport};

const USER_AGENT: &str = concat!("mfetch/", env!("CARGO_PKG_VERSION"));

/// Knobs for the curl handle. The defaults set no timeouts and leave the
/// redirect cap to libcurl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferOptions {
    /// Connect timeout; `None` = libcurl default.
    pub connect_timeout: Option<Duration>,
    /// Maximum redirects to follow; `None` = libcurl default.
    pub max_redirections: Option<u32>,
}

/// Blocking downloader using one curl Easy handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: TransferOptions,
}

impl CurlTransport {
    pub fn new(opts: TransferOptions) -> Self {
        Self { opts }
    }
}

impl Transport for CurlTransport {
    fn fetch(
        &mut self,
        url: &str,
        sink: &mut dyn Write,
        progress: &mut ProgressFn<'_>,
    ) -> Result<u64, TransferError> {
        let received = Cell::new(0u64);
        let total: Cell<Option<u64>> = Cell::new(None);
        let status: Cell<Option<u32>> = Cell::new(None);
        let sink_error: RefCell<Option<io::Error>> = RefCell::new(None);

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.useragent(USER_AGENT)?;
        if let Some(n) = self.opts.max_redirections {
            easy.max_redirections(n)?;
        }
        if let Some(t) = self.opts.connect_timeout {
            easy.connect_timeout(t)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    // Each hop of a redirect chain starts with a status line.
                    if line.starts_with("HTTP/") {
                        total.set(None);
                        status.set(parse_status_line(line));
                    } else if let Some(n) = parse_content_length(line) {
                        total.set(Some(n));
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                // Error pages are not the file: swallow them, the status check below reports it.
                if !status.get().map_or(true, is_success) {
                    return Ok(data.len());
                }
                if let Err(e) = sink.write_all(data) {
                    tracing::warn!("download write failed: {}", e);
                    *sink_error.borrow_mut() = Some(e);
                    return Ok(0); // abort transfer
                }
                let now = received.get() + data.len() as u64;
                received.set(now);
                progress(now, total.get());
                Ok(data.len())
            })?;
            if let Err(e) = transfer.perform() {
                if let Some(io_err) = sink_error.borrow_mut().take() {
                    return Err(TransferError::Io(io_err));
                }
                return Err(TransferError::Curl(e));
            }
        }

        let code = easy.response_code()?;
        if !is_success(code) {
            return Err(TransferError::Http(code));
        }
        sink.flush()?;
        Ok(received.get())
    }
}

fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

/// Status code from an `HTTP/x y reason` line.
pub fn parse_status_line(line: &str) -> Option<u32> {
    let mut parts = line.split_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse::<u32>().ok()
}

/// Parse a `Content-Length` header line. Returns `None` for other headers or
/// unparsable values.
pub fn parse_content_length(line: &str) -> Option<u64> {
    let (name, value) = line.trim().split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<u64>().ok()
}
