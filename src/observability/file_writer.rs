//! Size-rotated append-only writer for the trace file.
//!
//! When the active file passes the size limit it is shifted into numbered
//! backups before the next write:
//!
//! ```text
//! zcatalog-otlp.json.2 → .3   (old .3 is removed)
//! zcatalog-otlp.json.1 → .2
//! zcatalog-otlp.json   → .1
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to a file, rotating it once it exceeds a size limit.
///
/// Safe to share between threads; writes are serialized by the handle lock.
#[derive(Debug)]
pub struct FileWriter {
    /// Active file. Backups get `.1`, `.2`, ... appended to this path.
    file_path: PathBuf,
    /// Size past which the next write rotates first.
    max_bytes: u64,
    /// Opened on first write, dropped on rotation.
    handle: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default 10 MB limit.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    /// Creates a writer with a custom size limit.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Active file path
    /// * `max_bytes` - Rotation threshold in bytes
    pub const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes, rotating first if the
    /// file has grown past the limit.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, or `Other` if the lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *handle = Some(file);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file not open"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shifts backups up by one, dropping the oldest, and moves the active
    /// file to `.1`.
    fn rotate(&self) -> io::Result<()> {
        let oldest = self.backup_path(MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }

        fs::rename(&self.file_path, self.backup_path(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(read(&path), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        // Every line is 6 bytes, so each write after the first rotates.
        let writer = FileWriter::with_limit(path.clone(), 4);

        for n in 0..5 {
            writer.write_line(&format!("line{n}")).unwrap();
        }

        assert_eq!(read(&path), "line4\n");
        assert_eq!(read(&writer.backup_path(1)), "line3\n");
        assert_eq!(read(&writer.backup_path(2)), "line2\n");
        assert_eq!(read(&writer.backup_path(3)), "line1\n");
        assert!(!writer.backup_path(4).exists());
    }

    #[test]
    fn backup_names_keep_the_extension() {
        let writer = FileWriter::new(PathBuf::from("/data/zcatalog-otlp.json"));
        assert_eq!(
            writer.backup_path(2),
            PathBuf::from("/data/zcatalog-otlp.json.2")
        );
    }
}
