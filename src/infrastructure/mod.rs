//! Filesystem and environment glue for the Zellij plugin sandbox.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_source, SourceLocation};
