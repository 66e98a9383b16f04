//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body to every GET. Behaviour can be bent to look like
//! a broken mirror (error status, missing Content-Length, redirect).

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct FileServerOptions {
    /// Status line sent with the body (e.g. "200 OK", "404 Not Found").
    pub status: &'static str,
    /// If false, omit `Content-Length` and close the connection after the body.
    pub advertise_length: bool,
    /// If set, answer every GET with a 302 to this location.
    pub redirect_to: Option<String>,
}

impl Default for FileServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            advertise_length: true,
            redirect_to: None,
        }
    }
}

/// A running server: its URL and how many requests it has answered.
pub struct FileServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl FileServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `body` at `/u2net.onnx`.
/// The server runs until the process exits.
pub fn start(body: Vec<u8>) -> FileServer {
    start_with_options(body, FileServerOptions::default())
}

/// Like `start` but allows customizing server behaviour.
pub fn start_with_options(body: Vec<u8>, opts: FileServerOptions) -> FileServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = opts.clone();
            hits_srv.fetch_add(1, Ordering::SeqCst);
            thread::spawn(move || handle(stream, &body, &opts));
        }
    });
    FileServer {
        url: format!("http://127.0.0.1:{}/u2net.onnx", port),
        hits,
    }
}

/// URL on a port nobody listens on, so connecting is refused.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/u2net.onnx", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: &FileServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let method = request.split_whitespace().next().unwrap_or("");
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    if let Some(location) = &opts.redirect_to {
        let response = format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    let length = if opts.advertise_length {
        format!("Content-Length: {}\r\n", body.len())
    } else {
        String::new()
    };
    let response = format!(
        "HTTP/1.1 {}\r\n{}Content-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        opts.status, length
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
