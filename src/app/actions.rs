//! Side effects requested by the event handler.
//!
//! The handler never calls Zellij directly. It returns a `Vec<Action>` and the
//! plugin shim executes each one in order.
//!
//! # Example
//!
//! ```rust
//! use zcatalog::app::Action;
//! use zcatalog::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_catalog("/host/db.json".into())),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a request to the catalog worker thread.
    PostToWorker(WorkerMessage),

    /// Asks the user for the `WebAccess` permission needed by a remote source.
    RequestWebAccess,

    /// Issues a one-shot HTTP GET through Zellij's `web_request`.
    FetchRemote {
        /// Absolute `http://` or `https://` URL of the product JSON.
        url: String,
    },
}
