//! Query engine: filter and sort the catalog.
//!
//! [`run`] is a pure function from the full product list and a set of
//! [`QueryParams`] to a new view. It holds no state and never mutates the
//! products it is given; the result is a selection of clones, reordered.
//!
//! # Pipeline
//!
//! ```text
//! all ──filter(category, search_term)──► matches ──stable sort(sort_key)──► view
//! ```
//!
//! Every query change re-runs the whole pipeline over the full catalog, so the
//! result never depends on the previous view.

use crate::domain::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the catalog order.
    #[default]
    None,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Alphabetical by title.
    NameAsc,
}

impl SortKey {
    /// Selector order used by `next`/`previous`.
    pub const ALL: [Self; 4] = [Self::None, Self::PriceAsc, Self::PriceDesc, Self::NameAsc];

    /// Label shown in the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Default",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
        }
    }

    /// Next key in selector order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous key in selector order, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Configuration spelling, also used by `Display` and `FromStr`.
    const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| format!("unknown sort key: {s}"))
    }
}

/// The tuple driving view recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Case-insensitive substring matched against title and description.
    pub search_term: String,
    /// Exact category name; empty means no category filter.
    pub category: String,
    /// Order of the resulting view.
    pub sort_key: SortKey,
}

impl QueryParams {
    /// Whether any filter narrows the catalog.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        !self.search_term.is_empty() || !self.category.is_empty()
    }

    /// Tests a single product against the search term and category.
    ///
    /// For filtering many products, prefer [`QueryParams::matcher`], which
    /// lowercases the term only once.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matcher()(product)
    }

    /// Builds a predicate for this query with the search term lowercased
    /// up front.
    ///
    /// # Returns
    ///
    /// A closure that returns `true` when a product passes both the category
    /// filter and the search term.
    pub fn matcher(&self) -> impl Fn(&Product) -> bool + '_ {
        let term = self.search_term.to_lowercase();
        move |product: &Product| {
            let matches_category =
                self.category.is_empty() || product.category.name == self.category;
            matches_category
                && (term.is_empty()
                    || product.title.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term))
        }
    }
}

/// Computes the view for `params` over `all`.
///
/// Filtering keeps a product when the search term is empty or found in its
/// title or description (case-insensitive), and the category is empty or
/// equals the product's category name exactly. The filtered list is then
/// sorted with a stable sort, so products with equal keys keep catalog order.
///
/// # Examples
///
/// ```
/// use zcatalog::catalog::{run, QueryParams, SortKey};
/// use zcatalog::Product;
///
/// let all = vec![
///     Product::new(1, "Red Shirt", "", 10.0, "Clothing"),
///     Product::new(2, "Blue Mug", "", 5.0, "Home"),
/// ];
/// let params = QueryParams { sort_key: SortKey::PriceAsc, ..Default::default() };
/// let ids: Vec<i64> = run(&all, &params).iter().map(|p| p.id).collect();
/// assert_eq!(ids, vec![2, 1]);
/// ```
#[must_use]
pub fn run(all: &[Product], params: &QueryParams) -> Vec<Product> {
    let _span = tracing::debug_span!("query_run",
        total_products = all.len(),
        term_len = params.search_term.len(),
        category = %params.category,
        sort_key = %params.sort_key
    )
    .entered();

    let matches = params.matcher();
    let mut view: Vec<Product> = all.iter().filter(|p| matches(p)).cloned().collect();

    match params.sort_key {
        SortKey::None => {}
        SortKey::PriceAsc => view.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => view.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::NameAsc => view.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }

    tracing::debug!(view_count = view.len(), "query applied");
    view
}

/// Locale-style title comparison, in the manner of a root-locale collator.
///
/// Three levels, each consulted only when the previous one ties:
///
/// 1. Base letters: canonical decomposition (NFD) with combining marks
///    removed, then case-folded. `"Éclair"` compares as `"eclair"`.
/// 2. Accents: unaccented before accented (`"e" < "é"`).
/// 3. Case: lowercase before uppercase (`"a" < "A"`).
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use zcatalog::catalog::compare_titles;
///
/// assert_eq!(compare_titles("apple", "Éclair"), Ordering::Less);
/// assert_eq!(compare_titles("Éclair", "Zebra"), Ordering::Less);
/// assert_eq!(compare_titles("a", "A"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_order(a, b))
}

/// Primary collation key: accents dropped, case folded.
fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Secondary key: decomposed, so accents sort after their base letter.
fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

/// Tertiary key: the first position where case differs decides.
fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    a.nfd().count().cmp(&b.nfd().count())
}

/// Character ranges of every case-insensitive occurrence of `term` in `text`.
///
/// Ranges are `(start, end)` in character indices with exclusive end, and never
/// overlap. Returns nothing when the term is empty or when lowercasing changes
/// the character count of `text` (the indices would no longer line up).
#[must_use]
pub fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    if term.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    if haystack.len() != text.chars().count() {
        return vec![];
    }
    let needle: Vec<char> = term.to_lowercase().chars().collect();

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}
