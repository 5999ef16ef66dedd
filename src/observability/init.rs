//! Subscriber setup.
//!
//! ```text
//! registry
//!   ├── EnvFilter (trace_level)
//!   └── OpenTelemetryLayer → TracerProvider → FileSpanExporter
//! ```

use super::{tracer, SERVICE_NAME, TRACE_FILE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::sync::Once;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` and an OpenTelemetry layer exporting to the trace file.
///
/// Only the first call in a process has any effect. Failures (data directory
/// not writable, invalid filter directive, a subscriber already installed)
/// leave tracing disabled rather than surfacing an error.
///
/// ```rust
/// use zcatalog::observability::init_tracing;
/// use zcatalog::Config;
///
/// let config = Config {
///     trace_level: "zcatalog=debug".to_string(),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// init_tracing(&config); // no-op
/// ```
pub fn init_tracing(config: &Config) {
    INIT.call_once(|| install(&config.trace_level));
}

/// Builds and installs the subscriber, giving up silently on the first failure.
///
/// # Parameters
///
/// * `level` - `EnvFilter` directive such as `"info"` or `"zcatalog=trace"`
fn install(level: &str) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let Ok(filter) = EnvFilter::try_new(level) else {
        return;
    };

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
