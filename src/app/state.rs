//! Application state and view model computation.
//!
//! [`AppState`] owns the [`CatalogStore`] and everything transient about the
//! UI: the query parameters, selection, modes and load progress. Every query
//! change goes through [`AppState::refresh_view`], which re-runs the query
//! engine over the full catalog and replaces the store's view.
//!
//! # State Components
//!
//! - **Store**: Full catalog plus the current view
//! - **Query**: Search term, category filter and sort key
//! - **Selection**: Cursor position within the view
//! - **Modes**: Input mode (keybindings), view mode (table or detail), load status
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a renderable
//! [`UIViewModel`]: loading and failure screens, the detail panel, or a
//! windowed table with search term highlighting.
//!
//! # Example
//!
//! ```rust
//! use zcatalog::app::AppState;
//! use zcatalog::infrastructure::resolve_source;
//! use zcatalog::ui::Theme;
//! use zcatalog::Product;
//!
//! let mut state = AppState::new(resolve_source("db.json"), Theme::default());
//! state.store.install(vec![Product::new(1, "Red Shirt", "", 10.0, "Clothing")])?;
//! state.finish_load();
//!
//! let viewmodel = state.compute_viewmodel(24, 120);
//! assert_eq!(viewmodel.header.status, "Showing 1 product out of 1 total");
//! # Ok::<(), zcatalog::CatalogError>(())
//! ```

use super::modes::{InputMode, LoadStatus, SearchFocus, ViewMode};
use crate::catalog::{self, CatalogStore, QueryParams, SortKey};
use crate::domain::error::CatalogError;
use crate::domain::Product;
use crate::infrastructure::SourceLocation;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BannerInfo, DetailInfo, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo,
    SearchBarInfo, UIViewModel,
};

/// Text of the banner shown after a failed load. The cause goes to the log.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load products. Please check the logs for details.";

const TITLE: &str = " Product Catalog ";

/// Central application state container.
///
/// Mutated by the event handler in response to user input, worker replies and
/// HTTP results. View models are computed on demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Full catalog and current view.
    pub store: CatalogStore,

    /// Search term, category and sort key of the current view.
    pub query: QueryParams,

    /// Distinct category names, sorted. Populated once the catalog loads.
    pub categories: Vec<String>,

    /// Zero-based index of the selected product within the view.
    ///
    /// Clamped by `refresh_view()`. Wraps around during navigation via
    /// `move_selection_up/down()`.
    pub selected_index: usize,

    /// Current input handling mode.
    ///
    /// Determines active keybindings, search box visibility and footer text.
    pub input_mode: InputMode,

    /// Whether the table or the detail panel is shown.
    ///
    /// Set to `Detail` by `show_detail()`, back to `Table` by `CloseDetail`
    /// and by a failed load.
    pub view_mode: ViewMode,

    /// Progress of the one-shot catalog load.
    ///
    /// Starts as `Loading`. Moves to `Ready` via `finish_load()` or to the
    /// terminal `Failed` via `fail_load()`.
    pub load_status: LoadStatus,

    /// Where the catalog is loaded from.
    pub source: SourceLocation,

    /// Color scheme for UI rendering.
    ///
    /// Resolved from the plugin configuration during `initialize`.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state that is still waiting for its catalog.
    ///
    /// # Parameters
    ///
    /// * `source` - Resolved location of the product JSON
    /// * `theme` - Color scheme for UI rendering
    ///
    /// # Returns
    ///
    /// An `AppState` in `Loading` status with an empty store, default query,
    /// `Normal` input mode and the table view.
    #[must_use]
    pub fn new(source: SourceLocation, theme: Theme) -> Self {
        Self {
            store: CatalogStore::new(),
            query: QueryParams::default(),
            categories: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Table,
            load_status: LoadStatus::Loading,
            source,
            theme,
        }
    }

    /// Sets the sort key applied once the catalog arrives.
    ///
    /// # Parameters
    ///
    /// * `sort_key` - Initial sort, usually from the `sort` config value
    #[must_use]
    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.query.sort_key = sort_key;
        self
    }

    /// Moves the selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.store.view().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.store.view().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The product under the cursor.
    ///
    /// # Returns
    ///
    /// `None` while the view is empty.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.store.view().get(self.selected_index)
    }

    /// Re-runs the query engine against the full catalog and replaces the view.
    ///
    /// The selection is clamped to the new view.
    pub fn refresh_view(&mut self) {
        let _span = tracing::debug_span!(
            "refresh_view",
            total_products = self.store.total(),
            term_len = self.query.search_term.len(),
            category = %self.query.category,
            sort = %self.query.sort_key
        )
        .entered();

        let view = catalog::run(self.store.all(), &self.query);
        self.store.set_view(view);

        let len = self.store.view().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };

        tracing::debug!(view_count = len, "view refreshed");
    }

    /// Transitions to `Ready` once the store holds the catalog.
    ///
    /// Captures the category list and runs the configured query so the first
    /// render is already sorted.
    pub fn finish_load(&mut self) {
        self.categories = self.store.categories().into_iter().collect();
        self.load_status = LoadStatus::Ready;
        tracing::info!(
            product_count = self.store.total(),
            category_count = self.categories.len(),
            source = %self.source.label(),
            "catalog ready"
        );
        self.refresh_view();
    }

    /// Transitions to the terminal `Failed` state.
    ///
    /// Logs `err` with the source label. The UI only ever shows
    /// [`LOAD_FAILURE_MESSAGE`].
    ///
    /// # Parameters
    ///
    /// * `err` - Cause of the failure, for the log only
    pub fn fail_load(&mut self, err: &CatalogError) {
        tracing::error!(error = %err, source = %self.source.label(), "failed to load products");
        self.load_status = LoadStatus::Failed;
        self.input_mode = InputMode::Normal;
        self.view_mode = ViewMode::Table;
    }

    /// Steps the category filter through `All` and each known category.
    ///
    /// # Parameters
    ///
    /// * `forward` - `true` for the next category, `false` for the previous one
    ///
    /// # Returns
    ///
    /// `false` when there is nothing to cycle through. The caller refreshes
    /// the view otherwise.
    pub fn cycle_category(&mut self, forward: bool) -> bool {
        if self.categories.is_empty() {
            return false;
        }

        // Slot 0 is "no category filter".
        let slots = self.categories.len() + 1;
        let current = self
            .categories
            .iter()
            .position(|c| *c == self.query.category)
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };

        self.query.category = if next == 0 {
            String::new()
        } else {
            self.categories[next - 1].clone()
        };
        true
    }

    /// Clears every query parameter and leaves search mode.
    pub fn reset_filters(&mut self) {
        self.query = QueryParams::default();
        self.input_mode = InputMode::Normal;
        self.selected_index = 0;
    }

    /// Opens the detail panel for `product_id`.
    ///
    /// # Parameters
    ///
    /// * `product_id` - Id looked up in the full catalog
    ///
    /// # Returns
    ///
    /// `false`, without changing state, if the id is not in the catalog.
    pub fn show_detail(&mut self, product_id: i64) -> bool {
        if self.store.find(product_id).is_none() {
            tracing::debug!(product_id, "detail requested for unknown product");
            return false;
        }
        self.view_mode = ViewMode::Detail { product_id };
        true
    }

    /// Computes the view model for a pane of `rows` x `cols` cells.
    ///
    /// The visible window is centered on the selection and shifted to stay
    /// full near either end of the view.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height, used to size the table window
    /// * `cols` - Pane width, only traced here; components lay out columns
    ///
    /// # Returns
    ///
    /// A view model with exactly one body: loading or empty state, failure
    /// banner, detail panel, or table rows.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let mut vm = UIViewModel {
            header: self.compute_header(),
            filter_bar: self.compute_filter_bar(),
            footer: self.compute_footer(),
            search_bar: self.compute_search_bar(),
            ..UIViewModel::default()
        };

        match self.load_status {
            LoadStatus::Loading => {
                vm.empty_state = Some(EmptyState {
                    message: "Loading products...".to_string(),
                    subtitle: self.source.label(),
                });
                return vm;
            }
            LoadStatus::Failed => {
                vm.search_bar = None;
                vm.banner = Some(BannerInfo {
                    message: LOAD_FAILURE_MESSAGE.to_string(),
                });
                return vm;
            }
            LoadStatus::Ready => {}
        }

        if let ViewMode::Detail { product_id } = self.view_mode {
            if let Some(product) = self.store.find(product_id) {
                vm.detail = Some(Self::compute_detail(product));
                return vm;
            }
        }

        let view = self.store.view();
        if view.is_empty() {
            let subtitle = if self.query.is_filtering() {
                "Try adjusting your search or filter criteria"
            } else {
                "The catalog is empty"
            };
            vm.empty_state = Some(EmptyState {
                message: "No products found".to_string(),
                subtitle: subtitle.to_string(),
            });
            return vm;
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(view.len());
        if visible_end - visible_start < available_rows && view.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        vm.display_items = view[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, product)| {
                self.compute_display_item(product, visible_start + relative_idx == self.selected_index)
            })
            .collect();
        vm.selected_index = self.selected_index.saturating_sub(visible_start);

        tracing::trace!(cols, visible_start, visible_end, "viewmodel computed");
        vm
    }

    fn compute_display_item(&self, product: &Product, is_selected: bool) -> DisplayItem {
        let description = product.description_preview();
        let term = &self.query.search_term;

        let (title_ranges, description_ranges) = if term.is_empty() {
            (vec![], vec![])
        } else {
            (
                catalog::match_ranges(&product.title, term),
                catalog::match_ranges(&description, term),
            )
        };

        DisplayItem {
            image: product.primary_image().to_string(),
            title: product.title.clone(),
            category: product.category.name.clone(),
            description,
            price: product.display_price(),
            id: format!("#{}", product.id),
            action: "View".to_string(),
            is_selected,
            title_ranges,
            description_ranges,
        }
    }

    fn compute_detail(product: &Product) -> DetailInfo {
        let images = if product.images.is_empty() {
            vec![product.primary_image().to_string()]
        } else {
            product.images.clone()
        };

        DetailInfo {
            title: product.title.clone(),
            price: product.display_price(),
            category: product.category.name.clone(),
            category_id: product.category.id.map(|id| id.to_string()),
            category_slug: product.category.slug.clone(),
            category_image: product.category.image.clone(),
            id: product.id.to_string(),
            description: product.description.clone(),
            created: product.created_date(),
            updated: product.updated_date(),
            images,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = match self.load_status {
            LoadStatus::Ready => HeaderInfo::status_line(self.store.view().len(), self.store.total()),
            LoadStatus::Loading => "Loading...".to_string(),
            LoadStatus::Failed => String::new(),
        };
        HeaderInfo {
            title: TITLE.to_string(),
            status,
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let category = if self.query.category.is_empty() {
            "All Categories".to_string()
        } else {
            self.query.category.clone()
        };
        FilterBarInfo {
            category,
            sort: self.query.sort_key.label().to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.load_status.is_failed() {
            "q: quit"
        } else if matches!(self.view_mode, ViewMode::Detail { .. }) {
            "ESC/Enter/q: close details"
        } else {
            match self.input_mode {
                InputMode::Search(SearchFocus::Typing) => {
                    "ESC: clear search  Enter: browse results  Ctrl+n/p: navigate  Type to filter"
                }
                InputMode::Search(SearchFocus::Navigating) => {
                    "ESC: clear search  /: edit query  j/k: navigate  Enter: details"
                }
                InputMode::Normal => {
                    "j/k: navigate  /: search  c/C: category  x: all categories  s/S: sort  r: reset  Enter: details  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.query.search_term.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    /// Rows left for table rows once the chrome is drawn.
    ///
    /// Chrome: blank line, header (2), two borders, filter bar, column
    /// headings, footer and the unused last row; plus the search box (3) when
    /// present.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(9),
            InputMode::Search(_) => total_rows.saturating_sub(12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::resolve_source;

    fn ready_state(products: Vec<Product>) -> AppState {
        let mut state = AppState::new(resolve_source("db.json"), Theme::default());
        state.store.install(products).unwrap();
        state.finish_load();
        state
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new(1, "Red Shirt", "Soft cotton shirt", 10.0, "Clothing"),
            Product::new(2, "Blue Mug", "Ceramic mug", 5.0, "Home"),
            Product::new(3, "Green Shirt", "Linen", 12.0, "Clothing"),
        ]
    }

    #[test]
    fn finish_load_collects_sorted_categories() {
        let state = ready_state(sample());
        assert_eq!(state.categories, vec!["Clothing", "Home"]);
        assert!(state.load_status.is_ready());
    }

    #[test]
    fn initial_sort_applies_on_load() {
        let mut state = AppState::new(resolve_source("db.json"), Theme::default())
            .with_sort(SortKey::PriceAsc);
        state.store.install(sample()).unwrap();
        state.finish_load();

        let ids: Vec<i64> = state.store.view().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = ready_state(sample());
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn refresh_clamps_selection() {
        let mut state = ready_state(sample());
        state.selected_index = 2;
        state.query.category = "Home".into();
        state.refresh_view();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_product().map(|p| p.id), Some(2));
    }

    #[test]
    fn category_cycle_visits_all_then_wraps() {
        let mut state = ready_state(sample());
        assert!(state.cycle_category(true));
        assert_eq!(state.query.category, "Clothing");
        assert!(state.cycle_category(true));
        assert_eq!(state.query.category, "Home");
        assert!(state.cycle_category(true));
        assert_eq!(state.query.category, "");
        assert!(state.cycle_category(false));
        assert_eq!(state.query.category, "Home");
    }

    #[test]
    fn category_cycle_is_noop_without_categories() {
        let mut state = ready_state(vec![]);
        assert!(!state.cycle_category(true));
    }

    #[test]
    fn show_detail_ignores_unknown_ids() {
        let mut state = ready_state(sample());
        assert!(!state.show_detail(99));
        assert_eq!(state.view_mode, ViewMode::Table);
        assert!(state.show_detail(3));
        assert_eq!(state.view_mode, ViewMode::Detail { product_id: 3 });
    }

    #[test]
    fn viewmodel_rows_are_formatted() {
        let state = ready_state(sample());
        let vm = state.compute_viewmodel(24, 120);

        assert_eq!(vm.display_items.len(), 3);
        let first = &vm.display_items[0];
        assert_eq!(first.price, "$10.00");
        assert_eq!(first.id, "#1");
        assert_eq!(first.action, "View");
        assert_eq!(first.description, "Soft cotton shirt...");
        assert_eq!(first.image, crate::domain::PLACEHOLDER_IMAGE);
        assert!(first.is_selected);
        assert_eq!(vm.header.status, "Showing 3 products out of 3 total");
        assert_eq!(vm.filter_bar.category, "All Categories");
        assert_eq!(vm.filter_bar.sort, "Default");
    }

    #[test]
    fn viewmodel_highlights_search_matches() {
        let mut state = ready_state(sample());
        state.query.search_term = "shirt".into();
        state.refresh_view();

        let vm = state.compute_viewmodel(24, 120);
        assert_eq!(vm.display_items.len(), 2);
        assert_eq!(vm.display_items[0].title_ranges, vec![(4, 9)]);
        assert_eq!(vm.display_items[0].description_ranges, vec![(12, 17)]);
    }

    #[test]
    fn empty_view_shows_empty_state() {
        let state = ready_state(vec![]);
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.display_items.is_empty());
        assert_eq!(vm.header.status, "No products found");
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "No products found");
        assert_eq!(empty.subtitle, "The catalog is empty");
    }

    #[test]
    fn filtered_out_view_suggests_adjusting_filters() {
        let mut state = ready_state(sample());
        state.query.search_term = "teapot".into();
        state.refresh_view();

        let empty = state.compute_viewmodel(24, 80).empty_state.unwrap();
        assert_eq!(empty.message, "No products found");
        assert_eq!(empty.subtitle, "Try adjusting your search or filter criteria");
    }

    #[test]
    fn loading_state_has_no_table() {
        let state = AppState::new(resolve_source("db.json"), Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.display_items.is_empty());
        assert!(vm.empty_state.is_some());
        assert!(vm.banner.is_none());
    }

    #[test]
    fn failed_state_shows_fixed_banner() {
        let mut state = AppState::new(resolve_source("db.json"), Theme::default());
        state.fail_load(&CatalogError::Parse("expected array".into()));

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.banner.map(|b| b.message).as_deref(), Some(LOAD_FAILURE_MESSAGE));
        assert!(vm.display_items.is_empty());
    }

    #[test]
    fn window_follows_selection() {
        let products: Vec<Product> = (1..=30)
            .map(|i| Product::new(i, format!("Item {i}"), "", 1.0, "Misc"))
            .collect();
        let mut state = ready_state(products);
        state.selected_index = 29;

        // 19 rows leave 10 table rows in normal mode.
        let vm = state.compute_viewmodel(19, 120);
        assert_eq!(vm.display_items.len(), 10);
        assert_eq!(vm.display_items.last().map(|i| i.id.as_str()), Some("#30"));
        assert_eq!(vm.selected_index, 9);
        assert!(vm.display_items[9].is_selected);
    }

    #[test]
    fn detail_viewmodel_uses_full_catalog_entry() {
        let mut state = ready_state(sample());
        state.query.category = "Home".into();
        state.refresh_view();
        state.show_detail(1);

        let detail = state.compute_viewmodel(24, 80).detail.unwrap();
        assert_eq!(detail.title, "Red Shirt");
        assert_eq!(detail.price, "$10.00");
        assert_eq!(detail.images, vec![crate::domain::PLACEHOLDER_IMAGE.to_string()]);
        assert_eq!(detail.category_slug, None);
        assert_eq!(detail.updated, None);
    }

    #[test]
    fn detail_viewmodel_carries_category_fields_and_update_date() {
        let mut lamp = Product::new(7, "Desk Lamp", "Brass", 40.0, "Home");
        lamp.category.id = Some(3);
        lamp.category.slug = Some("home".into());
        lamp.category.image = Some("https://i/home.jpg".into());
        lamp.creation_at = "2024-03-07T12:30:00.000Z".into();
        lamp.updated_at = Some("2024-12-25T00:00:00Z".into());

        let mut state = ready_state(vec![lamp]);
        state.show_detail(7);

        let detail = state.compute_viewmodel(24, 80).detail.unwrap();
        assert_eq!(detail.category_id.as_deref(), Some("3"));
        assert_eq!(detail.category_slug.as_deref(), Some("home"));
        assert_eq!(detail.category_image.as_deref(), Some("https://i/home.jpg"));
        assert_eq!(detail.created, "3/7/2024");
        assert_eq!(detail.updated.as_deref(), Some("12/25/2024"));
    }
}
