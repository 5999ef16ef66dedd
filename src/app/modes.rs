//! Input, view and load state machine types.
//!
//! - [`InputMode`] decides how keys are interpreted
//! - [`ViewMode`] decides whether the table or the detail panel is shown
//! - [`LoadStatus`] tracks the one-shot catalog load
//!
//! # Example
//!
//! ```rust
//! use zcatalog::app::modes::{InputMode, LoadStatus, SearchFocus, ViewMode};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! let view_mode = ViewMode::Detail { product_id: 3 };
//! assert!(LoadStatus::Loading.is_loading());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the search term; the view updates on every keystroke.
    Typing,

    /// The term is kept and keys move through the results.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation plus the category, sort and reset commands.
    #[default]
    Normal,

    /// Search bar visible; see [`SearchFocus`].
    Search(SearchFocus),
}

/// What occupies the body of the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The product table.
    #[default]
    Table,

    /// Detail panel for one product, looked up by id in the full catalog.
    Detail {
        /// Id of the product being shown.
        product_id: i64,
    },
}

/// Progress of the one-shot catalog load.
///
/// `Failed` is terminal: there is no retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Waiting for the worker reply or the HTTP response.
    #[default]
    Loading,

    /// The store holds the catalog and the view reflects the query.
    Ready,

    /// Loading failed; only the error banner is shown.
    Failed,
}

impl LoadStatus {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}
