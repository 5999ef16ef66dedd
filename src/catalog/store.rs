//! Catalog store: the authoritative product list and the current view.
//!
//! `all` is populated exactly once and never mutated afterwards. `view` is
//! replaced wholesale each time the query changes; there is no incremental
//! diffing.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──load()/install()──► loaded ──set_view()──► loaded (new view)
//!                │
//!                └─ error ──► still empty, never retried by the app
//! ```
//!
//! A second `load` or `install` on a populated store fails with
//! [`CatalogError::AlreadyLoaded`] and leaves both lists untouched.

use crate::domain::error::{CatalogError, Result};
use crate::domain::Product;
use crate::source::{self, DataSource};
use std::collections::BTreeSet;

/// Holds the full catalog and the currently displayed subset.
///
/// Owned by [`AppState`](crate::app::AppState). The query engine reads
/// [`all`](Self::all) and writes its result back through
/// [`set_view`](Self::set_view).
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    /// Every decoded product, in source order.
    ///
    /// Written once by `install` and read-only afterwards.
    all: Vec<Product>,

    /// Products currently displayed, in display order.
    ///
    /// Always a subset of `all`. Starts as a full copy after loading.
    view: Vec<Product>,

    /// Whether `all` has been populated.
    ///
    /// Distinguishes a loaded empty catalog from one that never loaded.
    loaded: bool,
}

impl CatalogStore {
    /// Creates an empty, unloaded store.
    ///
    /// # Returns
    ///
    /// A store with no products whose [`is_loaded`](Self::is_loaded) is `false`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zcatalog::catalog::CatalogStore;
    ///
    /// let store = CatalogStore::new();
    /// assert!(!store.is_loaded());
    /// assert_eq!(store.total(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the catalog from a data source.
    ///
    /// On success `all` holds the decoded products and `view` is a full copy of
    /// it.
    ///
    /// # Parameters
    ///
    /// * `source` - Where to read the raw payload from (file or HTTP response)
    ///
    /// # Returns
    ///
    /// The full catalog as just installed.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::AlreadyLoaded`] if the store was populated before
    /// - [`CatalogError::Load`] if the source is unreachable or reports failure
    /// - [`CatalogError::Parse`] if the payload is malformed
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::catalog::CatalogStore;
    /// use zcatalog::source::FetchedResponse;
    ///
    /// let mut store = CatalogStore::new();
    /// let mut response = FetchedResponse::new("https://shop/db.json", 200, b"[]".to_vec());
    /// assert!(store.load(&mut response)?.is_empty());
    /// assert!(store.is_loaded());
    /// # Ok::<(), zcatalog::CatalogError>(())
    /// ```
    pub fn load(&mut self, source: &mut dyn DataSource) -> Result<&[Product]> {
        if self.loaded {
            return Err(CatalogError::AlreadyLoaded);
        }
        let products = source::load_products(source)?;
        self.install(products)?;
        Ok(&self.all)
    }

    /// Populates the store with products decoded elsewhere (the worker thread).
    ///
    /// # Parameters
    ///
    /// * `products` - Already validated products, in source order
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::AlreadyLoaded`] if the store was populated before.
    pub fn install(&mut self, products: Vec<Product>) -> Result<()> {
        if self.loaded {
            return Err(CatalogError::AlreadyLoaded);
        }

        tracing::debug!(product_count = products.len(), "catalog installed");
        self.view.clone_from(&products);
        self.all = products;
        self.loaded = true;
        Ok(())
    }

    /// Distinct category names across the full catalog.
    ///
    /// # Returns
    ///
    /// Category names in sorted order. Empty for an empty or unloaded store.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<String> {
        self.all.iter().map(|p| p.category.name.clone()).collect()
    }

    /// Replaces the current view.
    ///
    /// # Parameters
    ///
    /// * `view` - Query result; every entry must come from the full catalog
    pub fn set_view(&mut self, view: Vec<Product>) {
        debug_assert!(view.iter().all(|v| self.all.iter().any(|p| p.id == v.id)));
        self.view = view;
    }

    /// Looks a product up by id in the full catalog, not the view.
    ///
    /// # Returns
    ///
    /// The product with `id`, or `None` if the catalog has no such entry.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Product> {
        self.all.iter().find(|p| p.id == id)
    }

    /// The full catalog in source order.
    ///
    /// Input to every query run. Empty until loaded.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.all
    }

    /// The products currently displayed, in display order.
    ///
    /// Indexed by the selection in [`AppState`](crate::app::AppState).
    #[must_use]
    pub fn view(&self) -> &[Product] {
        &self.view
    }

    /// Size of the full catalog.
    #[must_use]
    pub fn total(&self) -> usize {
        self.all.len()
    }

    /// Whether a load has completed successfully.
    ///
    /// Stays `false` after a failed load. An empty catalog still counts as
    /// loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::{run, QueryParams};
    use crate::source::{FetchedResponse, FileSource};
    use std::io::Write;

    const PAYLOAD: &str = r#"[
        {"id":1,"title":"Red Shirt","description":"Cotton","price":10,"category":{"name":"Clothing"}},
        {"id":2,"title":"Blue Mug","description":"Ceramic","price":5,"category":{"name":"Home"}},
        {"id":3,"title":"Green Shirt","description":"Linen","price":12,"category":{"name":"Clothing"}}
    ]"#;

    fn loaded_store() -> CatalogStore {
        let mut store = CatalogStore::new();
        let mut response = FetchedResponse::new("https://shop/db.json", 200, PAYLOAD.as_bytes().to_vec());
        store.load(&mut response).unwrap();
        store
    }

    #[test]
    fn load_initializes_view_to_full_catalog() {
        let store = loaded_store();
        assert_eq!(store.total(), 3);
        assert_eq!(store.view(), store.all());
    }

    #[test]
    fn load_from_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{PAYLOAD}").unwrap();

        let mut store = CatalogStore::new();
        let loaded = store.load(&mut FileSource::new(file.path())).unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn second_load_is_rejected_and_store_untouched() {
        let mut store = loaded_store();
        let mut response = FetchedResponse::new("https://shop/db.json", 200, b"[]".to_vec());

        assert!(matches!(store.load(&mut response), Err(CatalogError::AlreadyLoaded)));
        assert!(matches!(store.install(vec![]), Err(CatalogError::AlreadyLoaded)));
        assert_eq!(store.total(), 3);
    }

    #[test]
    fn failed_load_leaves_store_empty() {
        let mut store = CatalogStore::new();
        let mut response = FetchedResponse::new("https://shop/db.json", 200, b"not json".to_vec());

        assert!(matches!(store.load(&mut response), Err(CatalogError::Parse(_))));
        assert!(!store.is_loaded());
        assert!(store.view().is_empty());
    }

    #[test]
    fn unreachable_source_is_a_load_error() {
        let mut store = CatalogStore::new();
        let mut response = FetchedResponse::new("https://shop/db.json", 503, vec![]);
        assert!(matches!(store.load(&mut response), Err(CatalogError::Load(_))));
    }

    #[test]
    fn categories_are_distinct() {
        let store = loaded_store();
        let categories: Vec<String> = store.categories().into_iter().collect();
        assert_eq!(categories, vec!["Clothing".to_string(), "Home".to_string()]);
    }

    #[test]
    fn empty_catalog_has_no_categories() {
        let mut store = CatalogStore::new();
        store.install(vec![]).unwrap();
        assert!(store.categories().is_empty());
        assert!(store.view().is_empty());
    }

    #[test]
    fn find_searches_full_catalog_not_view() {
        let mut store = loaded_store();
        let params = QueryParams {
            category: "Home".into(),
            ..Default::default()
        };
        let view = run(store.all(), &params);
        store.set_view(view);

        assert_eq!(store.view().len(), 1);
        assert_eq!(store.find(1).map(|p| p.title.as_str()), Some("Red Shirt"));
        assert!(store.find(42).is_none());
    }
}
