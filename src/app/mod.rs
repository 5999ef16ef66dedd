//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the catalog, worker and UI
//! layers.
//!
//! ```text
//! User Input → Events → Event Handler → QueryParams → query::run → view
//!                           ↑                                       ↓
//!                           └──── fetch / worker results      Actions → Zellij
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input, view and load state machine types
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, LoadStatus, SearchFocus, ViewMode};
pub use state::{AppState, LOAD_FAILURE_MESSAGE};
