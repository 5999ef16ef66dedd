//! Protocol between the plugin thread and the catalog worker.
//!
//! Messages travel as JSON payloads of Zellij `PluginMessage`s. Every request
//! carries an optional trace context so worker spans join the plugin's trace.

use crate::domain::error::CatalogError;
use crate::domain::Product;
use serde::{Deserialize, Serialize};

/// Serialized OpenTelemetry span context for cross-thread propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Trace ID as 32 hex characters.
    pub trace_id: String,

    /// Span ID of the sending span as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the active tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, which is the
    /// case whenever tracing was never initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_catalog(LoadCatalog { path: String }),
}

/// Requests sent from the plugin thread to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read and decode the catalog file at `path` (already mapped under `/host`).
    LoadCatalog {
        /// Resolved filesystem path of the product JSON.
        path: String,

        /// Context of the plugin span that sent the request.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context carried by the request, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadCatalog { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Which stage of the load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadFailureKind {
    /// The file could not be read.
    Load,
    /// The file was read but is not a valid product list.
    Parse,
}

/// Replies from the worker to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog was read and decoded.
    CatalogLoaded { products: Vec<Product> },

    /// The load failed; `message` is the underlying cause for the log.
    LoadFailed { kind: LoadFailureKind, message: String },
}

impl WorkerResponse {
    /// Builds the failure reply for a load error.
    ///
    /// # Parameters
    ///
    /// * `err` - Error raised while loading; `Parse` keeps its kind, any other
    ///   variant is reported as a `Load` failure
    ///
    /// # Returns
    ///
    /// A `LoadFailed` reply carrying the error's display text.
    #[must_use]
    pub fn from_error(err: &CatalogError) -> Self {
        let kind = match err {
            CatalogError::Parse(_) => LoadFailureKind::Parse,
            _ => LoadFailureKind::Load,
        };
        Self::LoadFailed {
            kind,
            message: err.to_string(),
        }
    }

    /// Reconstructs the error on the receiving side.
    ///
    /// Returns `None` for successful responses.
    #[must_use]
    pub fn into_error(self) -> Option<CatalogError> {
        match self {
            Self::CatalogLoaded { .. } => None,
            Self::LoadFailed {
                kind: LoadFailureKind::Parse,
                message,
            } => Some(CatalogError::Parse(message)),
            Self::LoadFailed {
                kind: LoadFailureKind::Load,
                message,
            } => Some(CatalogError::Load(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_active_span_has_no_trace_context() {
        let message = WorkerMessage::load_catalog("/host/db.json".into());
        assert!(message.trace_context().is_none());

        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
    }

    #[test]
    fn failure_kind_follows_error_variant() {
        let parse = WorkerResponse::from_error(&CatalogError::Parse("bad".into()));
        assert!(matches!(
            parse,
            WorkerResponse::LoadFailed {
                kind: LoadFailureKind::Parse,
                ..
            }
        ));

        let load = WorkerResponse::from_error(&CatalogError::Worker("gone".into()));
        assert!(matches!(load.into_error(), Some(CatalogError::Load(_))));
    }

    #[test]
    fn success_has_no_error() {
        let response = WorkerResponse::CatalogLoaded { products: vec![] };
        assert!(response.into_error().is_none());
    }
}
