//! zcatalog: a Zellij plugin for browsing a product catalog.
//!
//! The plugin loads a product list once, from a local JSON file or over HTTP,
//! and presents it as a table with:
//! - Live case-insensitive search over titles and descriptions
//! - Exact-match category filter
//! - Sorting by price (either direction) or by name
//! - A detail panel for the selected product
//! - A fixed error banner when the catalog cannot be loaded

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Worker Layer  │
//! │ (ui/)         │   │ (catalog/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Store       │   │ - File loads  │
//! │ - Theming     │   │ - Query engine│   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Sources, Infrastructure & Domain                   │
//! │  - Data sources and decoding (source/)              │
//! │  - Source resolution, paths (infrastructure/)       │
//! │  - Product model, errors (domain/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zcatalog.wasm" {
//!         source "https://example.com/api/products"
//!         sort "price-asc"
//!         theme "catppuccin-latte"
//!         trace_level "zcatalog=debug"
//!     }
//! }
//! ```
//!
//! # Load Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    build `AppState`, subscribe to events, dispatch `Event::BeginLoad`.
//! 2. **Local source**: the `catalog` worker reads and decodes the file and
//!    answers with `CatalogLoaded` or `LoadFailed`.
//! 3. **Remote source**: after `WebAccess` is granted the plugin issues a GET
//!    and decodes the response body itself.
//! 4. **Browsing**: every search keystroke, category or sort change re-runs the
//!    query engine over the full catalog and replaces the view.
//!
//! # Example
//!
//! ```rust
//! use zcatalog::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::BeginLoad)?;
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), zcatalog::CatalogError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod source;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, ViewMode};
pub use catalog::SortKey;
pub use domain::{CatalogError, Product, Result};
pub use ui::Theme;

use infrastructure::resolve_source;
use std::collections::BTreeMap;

/// Catalog loaded when no `source` is configured.
pub const DEFAULT_SOURCE: &str = "db.json";

/// Plugin configuration from the layout's `plugin { ... }` block.
///
/// ```kdl
/// plugin location="file:/path/to/zcatalog.wasm" {
///     source "~/shop/db.json"
///     sort "name-asc"
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL (`http://`, `https://`) or path of the product JSON.
    ///
    /// Relative and `~` paths resolve against the host home directory.
    pub source: String,

    /// Sort key applied before the first render.
    pub sort: SortKey,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive, e.g. `"info"` or `"zcatalog=trace"`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            sort: SortKey::None,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses Zellij's configuration map, falling back to defaults for
    /// missing, blank or invalid values.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zcatalog::{Config, SortKey};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("source".to_string(), "https://example.com/products".to_string());
    /// map.insert("sort".to_string(), "price-desc".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.source, "https://example.com/products");
    /// assert_eq!(config.sort, SortKey::PriceDesc);
    /// assert_eq!(config.trace_level, "info");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let sort = value("sort").map_or(defaults.sort, |raw| {
            raw.parse().unwrap_or_else(|e: String| {
                let err = CatalogError::Config(e);
                tracing::warn!(error = %err, "using default sort");
                defaults.sort
            })
        });

        Self {
            source: value("source").unwrap_or(defaults.source),
            sort,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial state: theme loaded, source resolved, configured sort
/// applied, catalog still loading.
///
/// ```rust
/// use zcatalog::{initialize, Config, SortKey};
///
/// let config = Config {
///     sort: SortKey::NameAsc,
///     ..Default::default()
/// };
/// let state = initialize(&config);
///
/// assert!(state.load_status.is_loading());
/// assert_eq!(state.query.sort_key, SortKey::NameAsc);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(source = %config.source, "initializing zcatalog plugin");

    AppState::new(resolve_source(&config.source), config.load_theme()).with_sort(config.sort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SourceLocation;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[("source", "  "), ("trace_level", "")]));
        assert_eq!(config.source, "db.json");
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn invalid_sort_falls_back_to_none() {
        let config = Config::from_zellij(&map(&[("sort", "cheapest")]));
        assert_eq!(config.sort, SortKey::None);
    }

    #[test]
    fn all_keys_parsed() {
        let config = Config::from_zellij(&map(&[
            ("source", "https://example.com/products"),
            ("sort", "name-asc"),
            ("theme", "catppuccin-frappe"),
            ("theme_file", "/tmp/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.source, "https://example.com/products");
        assert_eq!(config.sort, SortKey::NameAsc);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-frappe"));
        assert_eq!(config.theme_file.as_deref(), Some("/tmp/theme.toml"));
        assert_eq!(config.trace_level, "debug");
    }

    #[test]
    fn initialize_resolves_remote_source() {
        let config = Config {
            source: "https://example.com/products".to_string(),
            ..Default::default()
        };
        let state = initialize(&config);

        assert_eq!(
            state.source,
            SourceLocation::Remote("https://example.com/products".to_string())
        );
    }

    #[test]
    fn named_theme_is_used() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-latte");
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            ..Default::default()
        };
        assert_eq!(initialize(&config).theme.name, Theme::default().name);
    }

    #[test]
    fn theme_file_wins_over_name() {
        let custom = Theme::from_name("catppuccin-macchiato").unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut toml = toml::to_string(&custom).unwrap();
        toml = toml.replace("catppuccin-macchiato", "custom");
        file.write_all(toml.as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().display().to_string()),
            ..Default::default()
        };
        assert_eq!(initialize(&config).theme.name, "custom");
    }
}
