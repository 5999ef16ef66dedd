//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings only; all formatting and
//! windowing happens while they are built.
//!
//! # Example
//!
//! ```rust
//! use zcatalog::ui::viewmodel::HeaderInfo;
//!
//! assert_eq!(HeaderInfo::status_line(1, 20), "Showing 1 product out of 20 total");
//! assert_eq!(HeaderInfo::status_line(0, 20), "No products found");
//! ```

/// Complete UI view model for one frame.
#[derive(Debug, Clone, Default)]
pub struct UIViewModel {
    /// Table rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Title and product count, always rendered.
    pub header: HeaderInfo,

    /// Active category and sort, rendered above the table.
    pub filter_bar: FilterBarInfo,

    /// Keybinding hints for the current mode, pinned to the last row.
    pub footer: FooterInfo,

    /// Shown instead of the table while loading or when the view is empty.
    pub empty_state: Option<EmptyState>,

    /// Present in search mode.
    pub search_bar: Option<SearchBarInfo>,

    /// Error banner after a failed load.
    pub banner: Option<BannerInfo>,

    /// Detail panel, replaces the table body when present.
    pub detail: Option<DetailInfo>,
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayItem {
    /// First image URL, or the placeholder when the product has none.
    pub image: String,

    /// Full product title; truncated by the table to its column width.
    pub title: String,

    /// Category name shown as a badge.
    pub category: String,

    /// First 50 characters of the description followed by `...`.
    pub description: String,

    /// Price formatted as `$1,234.50`.
    pub price: String,

    /// `#<id>`.
    pub id: String,

    /// Static action label (`View`).
    pub action: String,

    /// Whether this row is under the cursor.
    pub is_selected: bool,

    /// Character ranges of search matches in `title`.
    pub title_ranges: Vec<(usize, usize)>,

    /// Character ranges of search matches in `description`.
    pub description_ranges: Vec<(usize, usize)>,
}

/// Title plus the product count status line.
#[derive(Debug, Clone, Default)]
pub struct HeaderInfo {
    /// Centered pane title.
    pub title: String,

    /// Result of [`HeaderInfo::status_line`], `Loading...`, or empty after a
    /// failed load.
    pub status: String,
}

impl HeaderInfo {
    /// `Showing N product(s) out of M total`, or `No products found` when the
    /// view is empty.
    ///
    /// # Parameters
    ///
    /// * `shown` - Size of the current view
    /// * `total` - Size of the full catalog
    #[must_use]
    pub fn status_line(shown: usize, total: usize) -> String {
        match shown {
            0 => "No products found".to_string(),
            1 => format!("Showing 1 product out of {total} total"),
            n => format!("Showing {n} products out of {total} total"),
        }
    }
}

/// Active category and sort.
#[derive(Debug, Clone, Default)]
pub struct FilterBarInfo {
    /// Selected category, or `All Categories`.
    pub category: String,

    /// Human-readable sort label, e.g. `Price: Low to High`.
    pub sort: String,
}

/// Keybinding hints.
#[derive(Debug, Clone, Default)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Centered two-line message.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Main line, e.g. `No products found`.
    pub message: String,

    /// Dimmed hint below the message.
    pub subtitle: String,
}

/// Search input contents.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search term.
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub is_typing: bool,
}

/// Fixed error message.
#[derive(Debug, Clone)]
pub struct BannerInfo {
    pub message: String,
}

/// Every field of one product, formatted for the detail panel.
///
/// Optional payload fields stay `None` when the source omitted them, and the
/// panel skips their lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,

    /// Formatted as currency, e.g. `$1,299.00`.
    pub price: String,

    /// Category name.
    pub category: String,

    /// Category id from the payload, if present.
    pub category_id: Option<String>,

    /// Category slug from the payload, if present.
    pub category_slug: Option<String>,

    /// Category image URL from the payload, if present.
    pub category_image: Option<String>,

    /// Product id without the `#` prefix used in the table.
    pub id: String,

    /// Full description, wrapped by the renderer.
    pub description: String,

    /// Creation date (`M/D/YYYY`) or the raw timestamp text.
    pub created: String,

    /// Last update date, formatted like `created`.
    pub updated: Option<String>,

    /// Every image URL; the placeholder alone when the product has none.
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_pluralizes() {
        assert_eq!(HeaderInfo::status_line(2, 2), "Showing 2 products out of 2 total");
        assert_eq!(HeaderInfo::status_line(1, 1), "Showing 1 product out of 1 total");
    }

    #[test]
    fn empty_view_reads_no_products() {
        assert_eq!(HeaderInfo::status_line(0, 0), "No products found");
    }
}
