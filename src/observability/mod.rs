//! OpenTelemetry-based tracing with file export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → JSONL
//! ```
//!
//! Every finished span becomes one JSON object per line in
//! `~/.local/share/zellij/moviefinder/moviefinder-spans.jsonl`. The file is
//! capped in size and keeps a single `.1` backup when it rolls over.
//!
//! The level comes from the `trace_level` plugin option (default `"info"`) and
//! accepts any `EnvFilter` directive, e.g. `moviefinder::query=debug`.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `exporter`: Span exporter writing one JSON line per span
//! - `file_writer`: Size-capped file writer with one backup

mod exporter;
mod file_writer;
mod init;

pub use init::init_tracing;
