//! Tracing export to a local OTLP JSON file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → FileSpanExporter → zcatalog-otlp.json
//! ```
//!
//! The trace file lives at `~/.local/share/zellij/zcatalog/zcatalog-otlp.json`
//! and rotates at 10 MB, keeping `.1` to `.3` as backups. One line per export
//! batch, each a complete `resourceSpans` document.
//!
//! The filter comes from the `trace_level` plugin option (default `"info"`).
//!
//! ```rust
//! use zcatalog::observability::init_tracing;
//! use zcatalog::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// Service and instrumentation scope name stamped on every exported batch.
pub const SERVICE_NAME: &str = "zcatalog";

/// File name of the active trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "zcatalog-otlp.json";
