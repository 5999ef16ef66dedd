//! Product domain model and display formatting.
//!
//! A [`Product`] is one record of the externally supplied catalog. The core
//! never mutates products; it only selects and reorders them. The formatting
//! helpers here produce the strings shown in the table and detail panel.

use serde::{Deserialize, Serialize};

/// Image shown when a product has no image URLs.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

/// Number of description characters kept in the table column.
const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// Category a product belongs to.
///
/// Only `name` is required; the remaining fields are carried through so the
/// detail panel can show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Numeric category id from the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display name. The category filter compares against it exactly.
    pub name: String,

    /// URL-friendly identifier, e.g. `clothing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Category image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Category {
    /// A category with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: None,
            image: None,
        }
    }
}

/// One catalog record.
///
/// Decoded from the source payload with camelCase keys (`creationAt`,
/// `updatedAt`). Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within a catalog.
    pub id: i64,

    /// Product name, searched and used by the name sort.
    pub title: String,

    /// Free text, searched alongside the title.
    pub description: String,

    /// Non-negative, finite price in dollars.
    pub price: f64,

    /// Category; its `name` drives the category filter.
    pub category: Category,

    /// Image URLs in source order. May be empty.
    #[serde(default)]
    pub images: Vec<String>,

    /// Creation timestamp, RFC 3339 when well formed.
    #[serde(default)]
    pub creation_at: String,

    /// Last update timestamp, if the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Product {
    /// Builds a product with the fields the query engine looks at.
    ///
    /// # Parameters
    ///
    /// * `id` - Unique product id
    /// * `title` - Product name
    /// * `description` - Free text description
    /// * `price` - Price in dollars
    /// * `category` - Category name; the other category fields stay empty
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::Product;
    ///
    /// let shirt = Product::new(1, "Red Shirt", "Cotton tee", 10.0, "Clothing");
    /// assert_eq!(shirt.category.name, "Clothing");
    /// assert!(shirt.images.is_empty());
    /// ```
    #[must_use]
    pub fn new(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            price,
            category: Category::named(category),
            images: Vec::new(),
            creation_at: String::new(),
            updated_at: None,
        }
    }

    /// First image URL, or the placeholder when the list is empty.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images.first().map_or(PLACEHOLDER_IMAGE, String::as_str)
    }

    /// Description preview: the first 50 characters followed by `...`.
    ///
    /// The ellipsis is always appended, even for short descriptions.
    #[must_use]
    pub fn description_preview(&self) -> String {
        let head: String = self.description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{head}...")
    }

    /// Price as currency, e.g. `$1,299.00`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }

    /// Creation date as `M/D/YYYY` (no zero padding, e.g. `3/7/2024`), or
    /// the raw text if it is not RFC 3339.
    #[must_use]
    pub fn created_date(&self) -> String {
        format_date(&self.creation_at)
    }

    /// Last update date, formatted like [`Product::created_date`].
    ///
    /// # Returns
    ///
    /// `None` when the payload carried no `updatedAt`.
    #[must_use]
    pub fn updated_date(&self) -> Option<String> {
        self.updated_at.as_deref().map(format_date)
    }
}

/// US short date without zero padding; unparsable text is returned as-is.
fn format_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map_or_else(|_| raw.to_string(), |ts| ts.format("%-m/%-d/%Y").to_string())
}

/// Formats a non-negative amount as US dollars with thousands separators and
/// exactly two decimals.
///
/// # Examples
///
/// ```
/// use zcatalog::domain::format_price;
///
/// assert_eq!(format_price(5.0), "$5.00");
/// assert_eq!(format_price(1234567.891), "$1,234,567.89");
/// ```
#[must_use]
pub fn format_price(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.max(0.0) * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${grouped}.{:02}", cents % 100)
}
