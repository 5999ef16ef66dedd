//! Catalog core: the store and the query engine.
//!
//! - [`store`]: owns the full product list and the current view
//! - [`query`]: pure filter/sort over the full list
//!
//! # Example
//!
//! ```rust
//! use zcatalog::catalog::{run, CatalogStore, QueryParams};
//! use zcatalog::Product;
//!
//! let mut store = CatalogStore::new();
//! store.install(vec![Product::new(1, "Red Shirt", "", 10.0, "Clothing")])?;
//!
//! let params = QueryParams { search_term: "shirt".into(), ..Default::default() };
//! let view = run(store.all(), &params);
//! store.set_view(view);
//! assert_eq!(store.view().len(), 1);
//! # Ok::<(), zcatalog::CatalogError>(())
//! ```

pub mod query;
pub mod store;

pub use query::{compare_titles, match_ranges, run, QueryParams, SortKey};
pub use store::CatalogStore;
