//! Background worker for the catalog file read.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: request processing

pub mod handler;
pub mod messages;

pub use handler::{init_worker_tracing, CatalogWorker};
pub use messages::{LoadFailureKind, TraceContext, WorkerMessage, WorkerResponse};

/// Name the worker is registered under (`register_worker!` prefix).
pub const WORKER_NAME: &str = "catalog";

/// `PluginMessage::name` used for catalog load requests and replies.
pub const LOAD_MESSAGE: &str = "load_catalog";
