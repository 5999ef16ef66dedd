//! Data source abstraction.
//!
//! The catalog is read exactly once at startup. [`DataSource`] is the seam
//! between the store and wherever the bytes come from: a local JSON file read
//! on the worker thread, or an HTTP response delivered by Zellij.

use crate::domain::error::Result;

/// A one-shot supplier of the raw catalog payload.
///
/// Implementations report transport problems (missing file, non-success HTTP
/// status) as [`CatalogError::Load`](crate::CatalogError::Load). Decoding the
/// bytes is not their concern; see [`decode_products`](super::decode_products).
///
/// # Implementations
///
/// - [`FileSource`](super::FileSource): JSON file on the host filesystem
/// - [`FetchedResponse`](super::FetchedResponse): body of a `web_request`
///
/// # Examples
///
/// ```no_run
/// use zcatalog::source::{DataSource, FileSource};
///
/// let mut source = FileSource::new("/host/db.json");
/// let bytes = source.fetch()?;
/// # Ok::<(), zcatalog::CatalogError>(())
/// ```
pub trait DataSource {
    /// Human-readable location, used in log entries.
    fn describe(&self) -> String;

    /// Reads the full payload.
    ///
    /// # Errors
    ///
    /// Returns a load error if the source is unreachable or reports failure.
    fn fetch(&mut self) -> Result<Vec<u8>>;
}
