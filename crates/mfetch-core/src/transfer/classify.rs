//! Classify transfer errors for logs and user messages.

use super::error::TransferError;

/// Coarse failure category of a mirror attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection refused or reset, DNS, etc.).
    Connection,
    /// Server answered with a non-2xx status.
    Http(u32),
    /// Local disk write failed.
    Write,
    /// Anything else.
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connection => "connection",
            FailureKind::Http(_) => "http",
            FailureKind::Write => "write",
            FailureKind::Other => "other",
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return FailureKind::Connection;
    }
    if e.is_write_error() {
        return FailureKind::Write;
    }
    FailureKind::Other
}

/// Classify a transfer error.
pub fn classify(e: &TransferError) -> FailureKind {
    match e {
        TransferError::Curl(ce) => classify_curl_error(ce),
        TransferError::Http(code) => FailureKind::Http(*code),
        TransferError::Io(_) => FailureKind::Write,
    }
}
