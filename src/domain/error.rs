//! Error types for the catalog plugin.
//!
//! [`CatalogError`] covers every failure the plugin can report, from the
//! one-shot catalog load to theme and configuration problems. [`Result`] is the
//! crate-wide alias.

use thiserror::Error;

/// The main error type for catalog plugin operations.
///
/// Load and parse failures are fatal for the session: the UI shows a fixed
/// banner and the underlying message goes to the trace log.
///
/// # Examples
///
/// ```
/// use zcatalog::CatalogError;
///
/// fn fetch() -> Result<(), CatalogError> {
///     Err(CatalogError::Load("HTTP status 404".to_string()))
/// }
///
/// assert!(fetch().unwrap_err().is_load_failure());
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The data source was unreachable or answered with a non-success status.
    #[error("Load error: {0}")]
    Load(String),

    /// The payload was not a well-formed sequence of product records.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The catalog was already populated; it is loaded exactly once.
    #[error("Catalog already loaded")]
    AlreadyLoaded,

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Returns `true` for the errors that end the one-shot catalog load.
    ///
    /// These move the plugin to its failed state. Everything else, including
    /// [`CatalogError::AlreadyLoaded`], leaves the loaded catalog in place.
    #[must_use]
    pub const fn is_load_failure(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Parse(_))
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_parse_are_load_failures() {
        assert!(CatalogError::Load("HTTP status 500".into()).is_load_failure());
        assert!(CatalogError::Parse("expected array".into()).is_load_failure());
    }

    #[test]
    fn already_loaded_is_not_a_load_failure() {
        assert!(!CatalogError::AlreadyLoaded.is_load_failure());
        assert!(!CatalogError::Theme("x".into()).is_load_failure());
        assert!(!CatalogError::Config("x".into()).is_load_failure());
    }
}
