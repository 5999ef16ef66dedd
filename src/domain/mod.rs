//! Domain layer for the catalog plugin.
//!
//! Core types with no dependency on Zellij APIs.
//!
//! - [`error`]: Error types and result aliases
//! - [`product`]: Product model and display formatting
//!
//! # Examples
//!
//! ```
//! use zcatalog::domain::{Product, Result};
//!
//! fn sample() -> Result<Product> {
//!     Ok(Product::new(2, "Blue Mug", "Ceramic", 5.0, "Home"))
//! }
//! ```

pub mod error;
pub mod product;

pub use error::{CatalogError, Result};
pub use product::{format_price, Category, Product, PLACEHOLDER_IMAGE};
