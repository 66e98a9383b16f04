//! Sequential writer for the `.part` file of one download attempt.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::temp_path;

/// Temp file for one mirror attempt. Implements `Write`; call `finalize` on
/// success or `discard` on failure.
pub struct PartFile {
    file: BufWriter<File>,
    temp_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) the part file that belongs to `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| with_path(e, "create", &temp_path))?;
        Ok(PartFile {
            file: BufWriter::new(file),
            temp_path,
        })
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, sync and rename the temp file over `final_path`, replacing any
    /// existing file there. On error the temp file is removed.
    pub fn finalize(self, final_path: &Path) -> io::Result<()> {
        let PartFile {
            file, temp_path, ..
        } = self;
        let result = file
            .into_inner()
            .map_err(|e| e.into_error())
            .and_then(|f| f.sync_all())
            .and_then(|()| std::fs::rename(&temp_path, final_path));
        if let Err(e) = result {
            let _ = std::fs::remove_file(&temp_path);
            return Err(with_path(e, "finalize", final_path));
        }
        Ok(())
    }

    /// Close and delete the temp file. Errors are logged, not returned.
    pub fn discard(self) {
        let PartFile {
            file, temp_path, ..
        } = self;
        drop(file);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %temp_path.display(), "could not remove part file: {}", e);
            }
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn with_path(e: io::Error, op: &str, path: &Path) -> io::Error {
    io::Error::new(e.kind(), format!("{} {}: {}", op, path.display(), e))
}
