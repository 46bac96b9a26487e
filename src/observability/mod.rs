//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → rotating JSON file
//! ```
//!
//! Spans land in `artisan-combobox-otlp.json` in the plugin data directory,
//! one OTLP JSON batch per line. The file rotates at 10 MiB and keeps three
//! backups.
//!
//! The filter is taken from `RUST_LOG`, then the `trace_level` plugin option,
//! then defaults to `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation
//! - [`exporter`]: Span exporter and OTLP JSON encoding
//! - [`rotation`]: Size-capped file with numbered backups

mod exporter;
mod init;
mod rotation;

pub use init::{init_tracing, init_tracing_in, TRACE_FILE_NAME};
