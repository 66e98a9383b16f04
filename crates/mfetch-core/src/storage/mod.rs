//! Disk side of a download.
//!
//! The body streams into a `.part` file next to the target. On success the
//! part file is synced and renamed over the target; on failure it is removed,
//! so the target is never left holding a truncated body.

mod writer;

pub use writer::PartFile;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `u2net.onnx` → `u2net.onnx.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("u2net.onnx"));
        assert_eq!(p.to_string_lossy(), "u2net.onnx.part");
        let p2 = temp_path(Path::new("/tmp/models/u2net.onnx"));
        assert_eq!(p2.to_string_lossy(), "/tmp/models/u2net.onnx.part");
    }

    #[test]
    fn finalize_replaces_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("u2net.onnx");
        std::fs::write(&final_path, "version https://git-lfs.github.com/spec/v1\n").unwrap();

        let mut part = PartFile::create(&final_path).unwrap();
        part.write_all(b"hello ").unwrap();
        part.write_all(b"world").unwrap();
        let tp = part.temp_path().to_path_buf();
        part.finalize(&final_path).unwrap();

        assert!(!tp.exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"hello world");
    }

    #[test]
    fn discard_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("u2net.onnx");
        std::fs::write(&final_path, b"original").unwrap();

        let mut part = PartFile::create(&final_path).unwrap();
        part.write_all(b"half a bo").unwrap();
        let tp = part.temp_path().to_path_buf();
        assert!(tp.exists());
        part.discard();

        assert!(!tp.exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"original");
    }

    #[test]
    fn create_truncates_stale_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("u2net.onnx");
        std::fs::write(temp_path(&final_path), b"stale bytes from a killed run").unwrap();

        let mut part = PartFile::create(&final_path).unwrap();
        part.write_all(b"new").unwrap();
        part.finalize(&final_path).unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
    }
}
