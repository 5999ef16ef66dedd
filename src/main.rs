//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zcatalog library and Zellij: it maps
//! Zellij events to library events and library actions to Zellij API calls.
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij Main Thread     │
//! │  ┌───────────────────┐   │
//! │  │  State (plugin)   │   │  ← UI state, event handling, HTTP fetch
//! │  └───────────────────┘   │
//! │          │ IPC           │
//! │          ▼               │
//! │  ┌───────────────────┐   │
//! │  │ CatalogWorkerShim │   │  ← Local file read + decode
//! │  └───────────────────┘   │
//! └──────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search, filter and detail events (mode dependent)
//! - `CustomMessage(load_catalog)` → `Event::WorkerResponse`
//! - `WebRequestResult` → `Event::CatalogFetched`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`k`/`Down`/`Up`, `Ctrl+n`/`Ctrl+p`: move selection
//! - `/`: search
//! - `c`/`C`: next/previous category, `x`: all categories
//! - `s`/`S`: next/previous sort
//! - `r`: reset filters
//! - `Enter`: product details
//! - `q`/`Esc`: close plugin
//!
//! Search mode (typing):
//! - characters and `Backspace` edit the term
//! - `Enter`: browse results, `Esc`: clear and exit
//! - `Ctrl+n`/`Ctrl+p`, `Down`/`Up`: move selection
//!
//! Search mode (browsing results):
//! - `j`/`k`: move selection, `Enter`: details, `/`: edit term, `Esc`: exit
//!
//! Detail panel: `Esc`, `Enter`, `q` or `Backspace` close it.

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use zcatalog::worker::{
    init_worker_tracing, CatalogWorker, WorkerMessage, WorkerResponse, LOAD_MESSAGE, WORKER_NAME,
};
use zcatalog::{handle_event, Action, CatalogError, Config, Event, InputMode, SearchFocus, ViewMode};

register_plugin!(State);
register_worker!(CatalogWorkerShim, catalog_worker, CATALOG_WORKER);

/// Plugin state wrapper.
///
/// Zellij requires `Default` for plugin registration; the real state is built
/// in `load` once the configuration is known.
struct State {
    /// Library state driven by `handle_event`.
    app: zcatalog::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zcatalog::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, subscribes to events and starts the catalog load.
    ///
    /// `WebAccess` is requested only for remote sources, as part of the load.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zcatalog::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(source = %config.source, sort = %config.sort, "parsed configuration");
        self.app = zcatalog::initialize(&config);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        self.dispatch(&Event::BeginLoad);
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, _context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::CatalogFetched { status, body }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zcatalog::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` through the library and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if matches!(self.app.view_mode, ViewMode::Detail { .. }) {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Backspace | BareKey::Char('q') => {
                    Some(Event::CloseDetail)
                }
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Self::map_typing_key(key),
            InputMode::Search(SearchFocus::Navigating) => Self::map_navigating_key(key),
            InputMode::Normal => Self::map_normal_key(key),
        }
    }

    /// Search mode while the term is being edited: every character is input.
    fn map_typing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter => Event::FocusResults,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Search mode after `Enter`: the term is frozen and `j`/`k` navigate.
    fn map_navigating_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char('/') => Event::FocusSearchBar,
            _ => return None,
        })
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('c') => Event::NextCategory,
            BareKey::Char('C') => Event::PreviousCategory,
            BareKey::Char('x') => Event::ClearCategory,
            BareKey::Char('s') => Event::NextSort,
            BareKey::Char('S') => Event::PreviousSort,
            BareKey::Char('r') => Event::ResetFilters,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a worker reply to an application event.
    ///
    /// An undecodable reply still ends the load, as a failure.
    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != LOAD_MESSAGE {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        let response = serde_json::from_str::<WorkerResponse>(payload).unwrap_or_else(|e| {
            WorkerResponse::from_error(&CatalogError::Worker(format!(
                "failed to decode worker response: {e}"
            )))
        });
        Some(Event::WorkerResponse(response))
    }

    /// Serializes `message` and posts it to the catalog worker.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: LOAD_MESSAGE.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::RequestWebAccess => request_permission(&[PermissionType::WebAccess]),
            Action::FetchRemote { url } => {
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], BTreeMap::new());
            }
        }
    }
}

/// `ZellijWorker` glue around [`CatalogWorker`].
#[derive(Default, Serialize, Deserialize)]
struct CatalogWorkerShim {
    #[serde(skip)]
    inner: CatalogWorker,
}

impl ZellijWorker<'_> for CatalogWorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        if let Some(payload) = self.inner.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}
