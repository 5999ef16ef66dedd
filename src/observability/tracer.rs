//! Tracer provider backed by a file exporter.
//!
//! Spans are exported synchronously through the SDK's simple processor. The
//! plugin sandbox has no async runtime.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// `SpanExporter` that appends each batch as one OTLP JSON line.
#[derive(Debug)]
struct FileSpanExporter {
    /// Rotating destination file.
    writer: FileWriter,

    /// Converts span batches to OTLP JSON, stamped with the current resource.
    formatter: SpanFormatter,

    /// Set by `shutdown`; later exports fail.
    is_shutdown: bool,
}

impl FileSpanExporter {
    /// Creates an exporter writing to `file_path`.
    ///
    /// The file is not touched until the first non-empty batch.
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: false,
        }
    }

    /// Writes `batch` as a single line.
    ///
    /// # Errors
    ///
    /// Returns a `TraceError` after shutdown or when the write fails.
    /// Empty batches succeed without writing.
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown {
            return Err(TraceError::from("exporter is shut down"));
        }
        if batch.is_empty() {
            return Ok(());
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.formatter.set_resource(resource.clone());
    }
}

/// Builds a provider that exports every finished span immediately to
/// `file_path`.
///
/// # Parameters
///
/// * `file_path` - Active trace file; backups are created next to it
/// * `resource` - Resource attributes (`service.name`) for every batch
///
/// # Returns
///
/// A provider whose tracers feed the `tracing-opentelemetry` layer.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;

    fn exporter(dir: &tempfile::TempDir) -> FileSpanExporter {
        FileSpanExporter::new(
            dir.path().join("trace.json"),
            Resource::new(vec![KeyValue::new("service.name", "zcatalog")]),
        )
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(&dir);

        assert!(exporter.write_batch(&[]).is_ok());
        assert!(!dir.path().join("trace.json").exists());
    }

    #[test]
    fn export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = exporter(&dir);
        exporter.shutdown();

        assert!(exporter.write_batch(&[]).is_err());
    }
}
