//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place state changes. Query-changing events
//! update [`QueryParams`](crate::catalog::QueryParams), re-run the query engine
//! through [`AppState::refresh_view`] and ask for a render. Load events move
//! the one-shot load from `Loading` to `Ready` or the terminal `Failed`.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenDetail`, `CloseDetail`
//! - **Search**: `SearchMode`, `Char`, `Backspace`, `FocusResults`, `FocusSearchBar`, `ExitSearch`
//! - **Filters**: `NextCategory`, `PreviousCategory`, `ClearCategory`, `NextSort`, `PreviousSort`, `ResetFilters`
//! - **Load**: `BeginLoad`, `PermissionsResult`, `CatalogFetched`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use zcatalog::app::{handle_event, Action, AppState, Event};
//! use zcatalog::infrastructure::resolve_source;
//! use zcatalog::ui::Theme;
//!
//! let mut state = AppState::new(resolve_source("https://shop.example/products"), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::BeginLoad)?;
//! assert_eq!(actions, vec![Action::RequestWebAccess]);
//! # Ok::<(), zcatalog::CatalogError>(())
//! ```

use super::modes::{InputMode, SearchFocus, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::{CatalogError, Result};
use crate::infrastructure::SourceLocation;
use crate::source::FetchedResponse;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events produced by the plugin shim from Zellij input and results.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the selection down (wraps to top).
    KeyDown,
    /// Moves the selection up (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the detail panel for the selected product.
    OpenDetail,
    /// Returns from the detail panel to the table.
    CloseDetail,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Returns focus to the search input.
    FocusSearchBar,
    /// Moves focus to the results, keeping the term.
    FocusResults,
    /// Clears the term and leaves search mode.
    ExitSearch,
    /// Appends a character to the term.
    Char(char),
    /// Removes the last character of the term.
    Backspace,

    /// Selects the next category, wrapping through `All`.
    NextCategory,
    /// Selects the previous category, wrapping through `All`.
    PreviousCategory,
    /// Removes the category filter.
    ClearCategory,
    /// Advances to the next sort key.
    NextSort,
    /// Steps back to the previous sort key.
    PreviousSort,
    /// Clears term, category and sort.
    ResetFilters,

    /// Starts the one-shot load for the configured source.
    BeginLoad,

    /// Result of the `WebAccess` permission request.
    PermissionsResult {
        /// Whether the user granted `WebAccess`.
        granted: bool,
    },

    /// HTTP response for a remote source.
    CatalogFetched {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// Reply from the catalog worker for a local source.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for span fields; payloads are not logged.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::CloseFocus => "CloseFocus",
            Self::OpenDetail => "OpenDetail",
            Self::CloseDetail => "CloseDetail",
            Self::SearchMode => "SearchMode",
            Self::FocusSearchBar => "FocusSearchBar",
            Self::FocusResults => "FocusResults",
            Self::ExitSearch => "ExitSearch",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::NextCategory => "NextCategory",
            Self::PreviousCategory => "PreviousCategory",
            Self::ClearCategory => "ClearCategory",
            Self::NextSort => "NextSort",
            Self::PreviousSort => "PreviousSort",
            Self::ResetFilters => "ResetFilters",
            Self::BeginLoad => "BeginLoad",
            Self::PermissionsResult { .. } => "PermissionsResult",
            Self::CatalogFetched { .. } => "CatalogFetched",
            Self::WorkerResponse(_) => "WorkerResponse",
        }
    }
}

/// Processes one event, mutating `state`.
///
/// # Parameters
///
/// * `state` - Mutable application state
/// * `event` - Event produced by the plugin shim
///
/// # Returns
///
/// A tuple of `(should_render, actions)`: whether the UI should re-render and
/// the actions to execute in order.
///
/// # Errors
///
/// Returns [`CatalogError::AlreadyLoaded`] if a second catalog arrives after
/// the first was installed. Load and parse failures are not errors here: they
/// move the state to `Failed` and render the banner.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenDetail => {
            let Some(product_id) = state.selected_product().map(|p| p.id) else {
                tracing::debug!("no product selected");
                return Ok((false, vec![]));
            };
            Ok((state.show_detail(product_id), vec![]))
        }
        Event::CloseDetail => {
            if state.view_mode == ViewMode::Table {
                return Ok((false, vec![]));
            }
            state.view_mode = ViewMode::Table;
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            if !state.load_status.is_ready() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.query.search_term.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(term = %state.query.search_term, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.query.search_term.clear();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.query.search_term.push(*c);
            tracing::trace!(term = %state.query.search_term, "search term updated");
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            if state.query.search_term.pop().is_none() {
                return Ok((false, vec![]));
            }
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::NextCategory | Event::PreviousCategory => {
            if !state.cycle_category(matches!(event, Event::NextCategory)) {
                return Ok((false, vec![]));
            }
            tracing::debug!(category = %state.query.category, "category filter changed");
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::ClearCategory => {
            if state.query.category.is_empty() {
                return Ok((false, vec![]));
            }
            state.query.category.clear();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::NextSort | Event::PreviousSort => {
            state.query.sort_key = if matches!(event, Event::NextSort) {
                state.query.sort_key.next()
            } else {
                state.query.sort_key.previous()
            };
            tracing::debug!(sort = %state.query.sort_key, "sort changed");
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::ResetFilters => {
            state.reset_filters();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::BeginLoad => {
            if !state.load_status.is_loading() || state.store.is_loaded() {
                return Ok((false, vec![]));
            }
            let action = match &state.source {
                SourceLocation::Remote(_) => Action::RequestWebAccess,
                SourceLocation::Local(path) => {
                    Action::PostToWorker(WorkerMessage::load_catalog(path.to_string_lossy().into_owned()))
                }
            };
            tracing::debug!(source = %state.source.label(), "catalog load started");
            Ok((false, vec![action]))
        }
        Event::PermissionsResult { granted } => {
            if !state.load_status.is_loading() {
                return Ok((false, vec![]));
            }
            let SourceLocation::Remote(url) = &state.source else {
                return Ok((false, vec![]));
            };
            if *granted {
                return Ok((false, vec![Action::FetchRemote { url: url.clone() }]));
            }
            state.fail_load(&CatalogError::Load(format!(
                "web access permission denied for {url}"
            )));
            Ok((true, vec![]))
        }
        Event::CatalogFetched { status, body } => {
            if state.load_status.is_failed() {
                return Ok((false, vec![]));
            }
            let mut response = FetchedResponse::new(state.source.label(), *status, body.clone());
            match state.store.load(&mut response) {
                Ok(_) => state.finish_load(),
                Err(e) if e.is_load_failure() => state.fail_load(&e),
                Err(e) => return Err(e),
            }
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => {
            if state.load_status.is_failed() {
                return Ok((false, vec![]));
            }
            match response {
                WorkerResponse::CatalogLoaded { products } => {
                    state.store.install(products.clone())?;
                    state.finish_load();
                }
                WorkerResponse::LoadFailed { .. } => {
                    if let Some(err) = response.clone().into_error() {
                        state.fail_load(&err);
                    }
                }
            }
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::LoadStatus;
    use crate::catalog::SortKey;
    use crate::domain::Product;
    use crate::infrastructure::resolve_source;
    use crate::ui::Theme;
    use crate::worker::LoadFailureKind;

    const PAYLOAD: &str = r#"[
        {"id":1,"title":"Red Shirt","description":"Cotton","price":10,"category":{"name":"Clothing"}},
        {"id":2,"title":"Blue Mug","description":"Ceramic","price":5,"category":{"name":"Home"}}
    ]"#;

    fn local_state() -> AppState {
        AppState::new(resolve_source("db.json"), Theme::default())
    }

    fn remote_state() -> AppState {
        AppState::new(resolve_source("https://shop.example/db.json"), Theme::default())
    }

    fn ready_state() -> AppState {
        let mut state = local_state();
        let response = WorkerResponse::CatalogLoaded {
            products: vec![
                Product::new(1, "Red Shirt", "Cotton", 10.0, "Clothing"),
                Product::new(2, "Blue Mug", "Ceramic", 5.0, "Home"),
            ],
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        state
    }

    fn view_ids(state: &AppState) -> Vec<i64> {
        state.store.view().iter().map(|p| p.id).collect()
    }

    fn type_term(state: &mut AppState, term: &str) {
        handle_event(state, &Event::SearchMode).unwrap();
        for c in term.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn local_source_loads_through_worker() {
        let mut state = local_state();
        let (render, actions) = handle_event(&mut state, &Event::BeginLoad).unwrap();
        assert!(!render);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadCatalog { path, .. })] if path == "/host/db.json"
        ));
    }

    #[test]
    fn remote_source_requests_permission_then_fetches() {
        let mut state = remote_state();
        let (_, actions) = handle_event(&mut state, &Event::BeginLoad).unwrap();
        assert_eq!(actions, vec![Action::RequestWebAccess]);

        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert_eq!(
            actions,
            vec![Action::FetchRemote {
                url: "https://shop.example/db.json".into()
            }]
        );
    }

    #[test]
    fn denied_permission_is_a_terminal_failure() {
        let mut state = remote_state();
        let (render, _) =
            handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(render);
        assert_eq!(state.load_status, LoadStatus::Failed);

        let (_, actions) = handle_event(&mut state, &Event::BeginLoad).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn fetched_catalog_becomes_ready() {
        let mut state = remote_state();
        let event = Event::CatalogFetched {
            status: 200,
            body: PAYLOAD.as_bytes().to_vec(),
        };
        handle_event(&mut state, &event).unwrap();

        assert!(state.load_status.is_ready());
        assert_eq!(view_ids(&state), vec![1, 2]);
        assert_eq!(state.categories, vec!["Clothing", "Home"]);
    }

    #[test]
    fn http_error_status_fails_load() {
        let mut state = remote_state();
        let event = Event::CatalogFetched {
            status: 404,
            body: b"Not Found".to_vec(),
        };
        handle_event(&mut state, &event).unwrap();
        assert!(state.load_status.is_failed());
        assert!(!state.store.is_loaded());
    }

    #[test]
    fn malformed_payload_fails_load() {
        let mut state = remote_state();
        let event = Event::CatalogFetched {
            status: 200,
            body: b"<html>".to_vec(),
        };
        handle_event(&mut state, &event).unwrap();
        assert!(state.load_status.is_failed());
    }

    #[test]
    fn worker_failure_fails_load() {
        let mut state = local_state();
        let response = WorkerResponse::LoadFailed {
            kind: LoadFailureKind::Load,
            message: "No such file".into(),
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(state.load_status.is_failed());
    }

    #[test]
    fn second_catalog_is_rejected() {
        let mut state = ready_state();
        let response = WorkerResponse::CatalogLoaded { products: vec![] };
        let err = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyLoaded));
        assert_eq!(state.store.total(), 2);
    }

    #[test]
    fn fetch_after_load_is_rejected_without_failing() {
        let mut state = ready_state();
        let event = Event::CatalogFetched {
            status: 200,
            body: PAYLOAD.as_bytes().to_vec(),
        };

        let err = handle_event(&mut state, &event).unwrap_err();
        assert!(!err.is_load_failure());
        assert!(state.load_status.is_ready());
        assert_eq!(state.store.total(), 2);
    }

    #[test]
    fn empty_catalog_scenario() {
        let mut state = local_state();
        let response = WorkerResponse::CatalogLoaded { products: vec![] };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert!(render);
        assert!(state.load_status.is_ready());
        assert!(state.categories.is_empty());
        assert!(state.store.view().is_empty());
        let vm = state.compute_viewmodel(24, 120);
        assert_eq!(vm.header.status, "No products found");
        assert!(vm.empty_state.is_some());
    }

    #[test]
    fn category_filter_scenario() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::NextCategory).unwrap();
        assert_eq!(state.query.category, "Clothing");
        assert_eq!(view_ids(&state), vec![1]);
    }

    #[test]
    fn search_and_sort_scenario() {
        let mut state = ready_state();
        type_term(&mut state, "mug");
        handle_event(&mut state, &Event::NextSort).unwrap();
        assert_eq!(state.query.sort_key, SortKey::PriceAsc);
        assert_eq!(view_ids(&state), vec![2]);
    }

    #[test]
    fn search_is_case_insensitive_on_description() {
        let mut state = ready_state();
        type_term(&mut state, "CERAMIC");
        assert_eq!(view_ids(&state), vec![2]);
    }

    #[test]
    fn backspace_widens_results() {
        let mut state = ready_state();
        type_term(&mut state, "mugs");
        assert!(view_ids(&state).is_empty());
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(view_ids(&state), vec![2]);
    }

    #[test]
    fn focus_results_keeps_term_and_ignores_typing() {
        let mut state = ready_state();
        type_term(&mut state, "shirt");
        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));

        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert_eq!(state.query.search_term, "shirt");
    }

    #[test]
    fn focus_results_with_empty_term_leaves_search() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn exit_search_restores_full_view() {
        let mut state = ready_state();
        type_term(&mut state, "mug");
        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.query.search_term.is_empty());
        assert_eq!(view_ids(&state), vec![1, 2]);
    }

    #[test]
    fn chars_outside_search_are_ignored() {
        let mut state = ready_state();
        let (render, _) = handle_event(&mut state, &Event::Char('a')).unwrap();
        assert!(!render);
    }

    #[test]
    fn reset_clears_every_filter() {
        let mut state = ready_state();
        type_term(&mut state, "shirt");
        handle_event(&mut state, &Event::NextCategory).unwrap();
        handle_event(&mut state, &Event::PreviousSort).unwrap();
        handle_event(&mut state, &Event::ResetFilters).unwrap();

        assert_eq!(state.query, crate::catalog::QueryParams::default());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(view_ids(&state), vec![1, 2]);
    }

    #[test]
    fn clear_category_is_noop_when_unset() {
        let mut state = ready_state();
        let (render, _) = handle_event(&mut state, &Event::ClearCategory).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::NextCategory).unwrap();
        let (render, _) = handle_event(&mut state, &Event::ClearCategory).unwrap();
        assert!(render);
        assert_eq!(view_ids(&state), vec![1, 2]);
    }

    #[test]
    fn detail_opens_for_selection_and_closes() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert_eq!(state.view_mode, ViewMode::Detail { product_id: 2 });

        handle_event(&mut state, &Event::CloseDetail).unwrap();
        assert_eq!(state.view_mode, ViewMode::Table);
    }

    #[test]
    fn detail_needs_a_selection() {
        let mut state = ready_state();
        type_term(&mut state, "nothing matches");
        let (render, _) = handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(!render);
        assert_eq!(state.view_mode, ViewMode::Table);
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = ready_state();
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
