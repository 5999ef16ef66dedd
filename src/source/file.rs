//! Local JSON file source.
//!
//! Reads the catalog from the host filesystem. In the Zellij sandbox the host
//! directory is mounted at `/host`, so callers pass already-resolved paths
//! (see [`crate::infrastructure::paths::resolve_source`]).

use crate::domain::error::{CatalogError, Result};
use crate::source::backend::DataSource;
use std::path::PathBuf;

/// Catalog source backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Resolved path, e.g. `/host/shop/db.json` inside the sandbox.
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for `path`. Nothing is read until [`DataSource::fetch`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&mut self) -> Result<Vec<u8>> {
        let _span = tracing::debug_span!("file_source_fetch", path = ?self.path).entered();

        let bytes = std::fs::read(&self.path).map_err(|e| {
            CatalogError::Load(format!("unable to read {}: {e}", self.path.display()))
        })?;

        tracing::debug!(bytes = bytes.len(), "catalog file read");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.fetch().unwrap(), b"[]");
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FileSource::new(dir.path().join("db.json"));

        let err = source.fetch().unwrap_err();
        assert!(matches!(err, CatalogError::Load(_)));
        assert!(err.to_string().contains("db.json"));
    }
}
