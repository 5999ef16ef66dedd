//! Catalog data sources and payload decoding.
//!
//! - `backend`: the [`DataSource`] trait
//! - `file`: local JSON file source
//! - `response`: HTTP response source
//!
//! [`load_products`] is the full fetch-then-decode pipeline shared by the
//! worker thread and the store.

pub mod backend;
pub mod file;
pub mod response;

pub use backend::DataSource;
pub use file::FileSource;
pub use response::FetchedResponse;

use crate::domain::error::{CatalogError, Result};
use crate::domain::Product;
use std::collections::HashSet;

/// Decodes a JSON array of product records.
///
/// Beyond the shape enforced by serde, every price must be finite and
/// non-negative and every `id` unique.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] for malformed JSON, a non-array payload,
/// records with missing required fields, negative prices or duplicate ids.
///
/// # Examples
///
/// ```
/// use zcatalog::source::decode_products;
///
/// let products = decode_products(br#"[{"id":1,"title":"Red Shirt","description":"",
///     "price":10,"category":{"name":"Clothing"}}]"#)?;
/// assert_eq!(products[0].title, "Red Shirt");
/// # Ok::<(), zcatalog::CatalogError>(())
/// ```
pub fn decode_products(bytes: &[u8]) -> Result<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_slice(bytes)
        .map_err(|e| CatalogError::Parse(format!("invalid catalog payload: {e}")))?;

    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(CatalogError::Parse(format!(
                "product {} has invalid price {}",
                product.id, product.price
            )));
        }
        if !seen.insert(product.id) {
            return Err(CatalogError::Parse(format!("duplicate product id {}", product.id)));
        }
    }

    Ok(products)
}

/// Fetches and decodes the catalog from a source.
///
/// # Parameters
///
/// * `source` - File or HTTP response to read the payload from
///
/// # Returns
///
/// The validated products in payload order.
///
/// # Errors
///
/// Returns the source's load error or a parse error from [`decode_products`].
pub fn load_products(source: &mut dyn DataSource) -> Result<Vec<Product>> {
    let _span = tracing::debug_span!("load_products", source = %source.describe()).entered();

    let bytes = source.fetch()?;
    let products = decode_products(&bytes)?;

    tracing::debug!(product_count = products.len(), "catalog decoded");
    Ok(products)
}
