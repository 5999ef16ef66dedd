//! Catalog worker: reads and decodes the local catalog off the render thread.
//!
//! The Zellij `ZellijWorker` glue lives in the plugin binary; this type holds
//! the logic so it can be exercised without a Zellij host.

use crate::source::{self, FileSource};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Initializes tracing for the worker thread with default settings.
///
/// Worker instances have no access to the plugin configuration; repeated
/// calls are no-ops.
pub fn init_worker_tracing() {
    crate::observability::init_tracing(&crate::Config::default());
}

/// Worker-side state. Stateless today: every load builds a fresh source.
#[derive(Debug, Default)]
pub struct CatalogWorker;

impl CatalogWorker {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads and decodes the catalog at `path`.
    ///
    /// # Returns
    ///
    /// `CatalogLoaded` with the products, or `LoadFailed` describing the
    /// first error.
    fn handle_load_catalog(path: &str) -> WorkerResponse {
        let mut file = FileSource::new(path);
        match source::load_products(&mut file) {
            Ok(products) => {
                tracing::debug!(product_count = products.len(), "catalog loaded on worker");
                WorkerResponse::CatalogLoaded { products }
            }
            Err(e) => {
                tracing::debug!(error = %e, "catalog load failed on worker");
                WorkerResponse::from_error(&e)
            }
        }
    }

    /// Links spans created here to the plugin span that sent the message.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one request.
    ///
    /// Spans opened here are children of the sender's span when the request
    /// carries a trace context.
    ///
    /// # Parameters
    ///
    /// * `message` - Decoded request from the plugin thread
    ///
    /// # Returns
    ///
    /// The reply to post back to the plugin.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadCatalog { path, .. } => Self::handle_load_catalog(&path),
        }
    }

    /// Decodes a JSON request, handles it, and encodes the reply.
    ///
    /// Returns `None` when the payload is not a valid request or the reply
    /// cannot be serialized; both are logged.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);
        match serde_json::to_string(&response) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::LoadFailureKind;
    use std::io::Write;

    fn write_catalog(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_products_from_file() {
        let file = write_catalog(
            r#"[{"id":7,"title":"Lamp","description":"Brass","price":40,"category":{"name":"Home"}}]"#,
        );
        let message = WorkerMessage::load_catalog(file.path().to_string_lossy().into_owned());

        match CatalogWorker::new().handle_message(message) {
            WorkerResponse::CatalogLoaded { products } => {
                assert_eq!(products.len(), 1);
                assert_eq!(products[0].id, 7);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let message = WorkerMessage::load_catalog(path.to_string_lossy().into_owned());

        assert!(matches!(
            CatalogWorker::new().handle_message(message),
            WorkerResponse::LoadFailed {
                kind: LoadFailureKind::Load,
                ..
            }
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_failure() {
        let file = write_catalog("{not json");
        let message = WorkerMessage::load_catalog(file.path().to_string_lossy().into_owned());

        assert!(matches!(
            CatalogWorker::new().handle_message(message),
            WorkerResponse::LoadFailed {
                kind: LoadFailureKind::Parse,
                ..
            }
        ));
    }

    #[test]
    fn payload_round_trip_through_json() {
        let file = write_catalog("[]");
        let request = serde_json::to_string(&WorkerMessage::load_catalog(
            file.path().to_string_lossy().into_owned(),
        ))
        .unwrap();

        let reply = CatalogWorker::new().handle_payload(&request).unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
        assert_eq!(response, WorkerResponse::CatalogLoaded { products: vec![] });
    }

    #[test]
    fn garbage_payload_yields_no_reply() {
        assert!(CatalogWorker::new().handle_payload("nope").is_none());
    }
}
