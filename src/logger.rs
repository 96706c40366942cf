// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The logger facade.
//!
//! Five leveled methods over one internal emit path. The correlation
//! context is an explicit per-call parameter: there is no stored "current
//! context" on the instance, so a single [`Logger`] can be shared freely
//! across threads and tasks.
//!
//! No method returns a `Result`. Emission is fire-and-forget by contract;
//! attempting to log must never disturb the caller's control flow. The one
//! deliberate exception is [`Logger::fatal`], which terminates the process
//! after flushing the sink.
//!
//! # Usage
//!
//! ```rust,no_run
//! use scribe::{Configuration, LogContext, Logger};
//! use scribe::context::ContextKey;
//!
//! let logger = Logger::new(
//!     Configuration::new()
//!         .with_service("orders")
//!         .with_environment("prod"),
//! );
//!
//! let ctx = LogContext::new().with_value(ContextKey::TraceId, "abc123");
//! logger.info(&ctx, "created", "order.create", None);
//! ```

use std::panic::Location;
use std::sync::Arc;

use crate::config::{Configuration, Level};
use crate::context::{LogContext, Vocabulary};
use crate::payload::Payload;
use crate::record::{merge_fields, ProcessFields, Record};
use crate::sink::{JsonSink, Sink};
use crate::trace::{CurrentSpanSource, SpanSource};

/// Context-aware structured logger.
///
/// Cheap to clone; clones share the sink and span source.
#[derive(Clone)]
pub struct Logger {
    config: Configuration,
    process: ProcessFields,
    vocabulary: Vocabulary,
    span_source: Arc<dyn SpanSource>,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Create a logger writing JSON to stdout, filtered by the configured
    /// console level.
    pub fn new(config: Configuration) -> Self {
        let sink = Arc::new(JsonSink::stdout(config.level()));
        Self::with_sink(config, sink)
    }

    /// Create a logger over a custom sink.
    pub fn with_sink(config: Configuration, sink: Arc<dyn Sink>) -> Self {
        Self {
            config,
            process: ProcessFields::capture(),
            vocabulary: Vocabulary::default(),
            span_source: Arc::new(CurrentSpanSource),
            sink,
        }
    }

    /// Select the identifier vocabulary recognized by this logger.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Replace the active-span source.
    pub fn with_span_source(mut self, span_source: Arc<dyn SpanSource>) -> Self {
        self.span_source = span_source;
        self
    }

    /// The configuration this logger was built with.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[track_caller]
    pub fn debug(&self, ctx: &LogContext, message: &str, action: &str, payload: Option<&Payload>) {
        self.emit(Level::Debug, ctx, message, action, payload, caller());
    }

    #[track_caller]
    pub fn info(&self, ctx: &LogContext, message: &str, action: &str, payload: Option<&Payload>) {
        self.emit(Level::Info, ctx, message, action, payload, caller());
    }

    #[track_caller]
    pub fn warn(&self, ctx: &LogContext, message: &str, action: &str, payload: Option<&Payload>) {
        self.emit(Level::Warn, ctx, message, action, payload, caller());
    }

    #[track_caller]
    pub fn error(&self, ctx: &LogContext, message: &str, action: &str, payload: Option<&Payload>) {
        self.emit(Level::Error, ctx, message, action, payload, caller());
    }

    /// Emit at fatal level, flush the sink, and terminate the process.
    #[track_caller]
    pub fn fatal(
        &self,
        ctx: &LogContext,
        message: &str,
        action: &str,
        payload: Option<&Payload>,
    ) -> ! {
        self.emit(Level::Fatal, ctx, message, action, payload, caller());
        self.sink.flush();
        std::process::exit(1);
    }

    fn emit(
        &self,
        level: Level,
        ctx: &LogContext,
        message: &str,
        action: &str,
        payload: Option<&Payload>,
        method: String,
    ) {
        let span = self.span_source.active_span();
        let fields = merge_fields(
            &self.config,
            &self.process,
            self.vocabulary,
            ctx,
            span,
            action,
            payload,
        );
        self.sink.emit(&Record {
            level,
            message: message.to_string(),
            method,
            fields,
        });
    }

    /// Emit with an externally supplied caller attribution. Used by the
    /// `tracing` layer adapter, which knows the event's own file and line.
    pub(crate) fn emit_at(
        &self,
        level: Level,
        ctx: &LogContext,
        message: &str,
        action: &str,
        payload: Option<&Payload>,
        method: String,
    ) {
        self.emit(level, ctx, message, action, payload, method);
    }

    /// Flush the underlying sink.
    pub fn flush(&self) {
        self.sink.flush();
    }
}

#[track_caller]
fn caller() -> String {
    let location = Location::caller();
    format!("{}:{}", location.file(), location.line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextKey;
    use crate::record::SOURCE_TAG;
    use crate::trace::ActiveSpan;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Sink that keeps records in memory.
    #[derive(Default)]
    struct CaptureSink {
        records: Mutex<Vec<Record>>,
    }

    impl Sink for CaptureSink {
        fn emit(&self, record: &Record) {
            self.records.lock().unwrap().push(record.clone());
        }
    }

    impl CaptureSink {
        fn take(&self) -> Vec<Record> {
            std::mem::take(&mut *self.records.lock().unwrap())
        }
    }

    struct FixedSpan(ActiveSpan);

    impl SpanSource for FixedSpan {
        fn active_span(&self) -> ActiveSpan {
            self.0
        }
    }

    fn capture_logger(config: Configuration) -> (Logger, Arc<CaptureSink>) {
        let sink = Arc::new(CaptureSink::default());
        let logger = Logger::with_sink(config, sink.clone());
        (logger, sink)
    }

    #[test]
    fn test_levels_route_to_sink() {
        let (logger, sink) = capture_logger(Configuration::new());
        let ctx = LogContext::new();
        logger.debug(&ctx, "d", "", None);
        logger.info(&ctx, "i", "", None);
        logger.warn(&ctx, "w", "", None);
        logger.error(&ctx, "e", "", None);

        let records = sink.take();
        let levels: Vec<Level> = records.iter().map(|r| r.level).collect();
        assert_eq!(levels, [Level::Debug, Level::Info, Level::Warn, Level::Error]);
        assert_eq!(records[1].message, "i");
    }

    #[test]
    fn test_method_points_at_the_caller() {
        let (logger, sink) = capture_logger(Configuration::new());
        logger.info(&LogContext::new(), "m", "", None);
        let records = sink.take();
        assert!(
            records[0].method.contains("logger.rs"),
            "caller attribution was {}",
            records[0].method
        );
    }

    #[test]
    fn test_context_fields_flow_through() {
        let (logger, sink) = capture_logger(Configuration::new());
        let ctx = LogContext::new().with_value(ContextKey::TraceId, "abc123");
        logger.error(&ctx, "failed", "order.create", None);

        let records = sink.take();
        assert_eq!(records[0].fields.get("trace_id"), Some(&Value::from("abc123")));
        assert_eq!(records[0].fields.get("action"), Some(&Value::from("order.create")));
    }

    #[test]
    fn test_tracer_fields_via_span_source() {
        let sink = Arc::new(CaptureSink::default());
        let logger = Logger::with_sink(
            Configuration::new().with_version("1.2.0"),
            sink.clone(),
        )
        .with_span_source(Arc::new(FixedSpan(ActiveSpan { trace_id: 555, span_id: 777 })));

        logger.info(&LogContext::new(), "traced", "", None);

        let records = sink.take();
        let dd = records[0].fields.get("dd").unwrap().as_object().unwrap();
        assert_eq!(dd["trace_id"], Value::from("555"));
        assert_eq!(dd["span_id"], Value::from("777"));
        assert_eq!(dd["version"], Value::from("1.2.0"));
        assert_eq!(dd["source"], Value::from(SOURCE_TAG));
    }

    #[test]
    fn test_event_vocabulary_logger() {
        let sink = Arc::new(CaptureSink::default());
        let logger = Logger::with_sink(Configuration::new(), sink.clone())
            .with_vocabulary(Vocabulary::Event);
        let ctx = LogContext::new()
            .with_value(ContextKey::CorrelationId, "c1")
            .with_value(ContextKey::TraceId, "ignored-here");

        logger.info(&ctx, "consumed", "", None);

        let records = sink.take();
        assert_eq!(records[0].fields.get("correlation_id"), Some(&Value::from("c1")));
        assert_eq!(records[0].fields.get("trace_id"), None);
    }

    #[test]
    fn test_clones_share_the_sink() {
        let (logger, sink) = capture_logger(Configuration::new());
        let clone = logger.clone();
        logger.info(&LogContext::new(), "a", "", None);
        clone.info(&LogContext::new(), "b", "", None);
        assert_eq!(sink.take().len(), 2);
    }
}
