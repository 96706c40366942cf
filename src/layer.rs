// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! `tracing` integration.
//!
//! [`ScribeLayer`] routes events emitted through the `tracing` macros into
//! the same merge-and-sink path as the facade, so a codebase can mix both
//! styles and still produce one log schema. Span fields named after
//! recognized correlation keys are harvested from the event's span scope
//! and become context fields; the innermost binding wins.
//!
//! # Usage
//!
//! ```rust,ignore
//! let logger = scribe::init(Configuration::new().with_service("orders"))?;
//!
//! // Facade style:
//! logger.info(&ctx, "created", "order.create", None);
//!
//! // Macro style, same schema:
//! let span = tracing::info_span!("request", trace_id = "abc123");
//! span.in_scope(|| tracing::info!(action = "order.create", "created"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::str::FromStr;

use tracing::field::{Field, Visit};
use tracing::{span, Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{Configuration, Level};
use crate::context::{ContextKey, LogContext};
use crate::logger::Logger;
use crate::payload::Payload;

/// Correlation bindings recorded on one span.
#[derive(Clone, Default)]
struct SpanBindings(Vec<(ContextKey, String)>);

/// Visitor that picks recognized correlation keys out of span fields.
struct SpanVisitor {
    bindings: SpanBindings,
}

impl SpanVisitor {
    fn new() -> Self {
        Self {
            bindings: SpanBindings::default(),
        }
    }

    fn push(&mut self, field: &Field, value: String) {
        // Same ingress rule as headers: empty values are never inserted.
        if value.is_empty() {
            return;
        }
        if let Ok(key) = ContextKey::from_str(field.name()) {
            self.bindings.0.push((key, value));
        }
    }
}

impl Visit for SpanVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

/// Visitor that splits an event into message, action, and payload.
struct EventVisitor {
    message: String,
    action: String,
    payload: Payload,
}

impl EventVisitor {
    fn new() -> Self {
        Self {
            message: String::new(),
            action: String::new(),
            payload: HashMap::new(),
        }
    }

    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "action" => self.action = value,
            name => {
                self.payload.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{value:?}"));
    }
}

/// Layer that forwards `tracing` events through a [`Logger`].
pub struct ScribeLayer {
    logger: Logger,
}

impl ScribeLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

fn map_level(level: &tracing::Level) -> Level {
    if *level == tracing::Level::ERROR {
        Level::Error
    } else if *level == tracing::Level::WARN {
        Level::Warn
    } else if *level == tracing::Level::INFO {
        Level::Info
    } else {
        Level::Debug
    }
}

impl<S> Layer<S> for ScribeLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let mut visitor = SpanVisitor::new();
        attrs.record(&mut visitor);

        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(visitor.bindings);
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        // Layer outermost first so the innermost span's bindings win.
        let mut log_ctx = LogContext::new();
        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<_> = scope.collect();
            for span in spans.into_iter().rev() {
                if let Some(bindings) = span.extensions().get::<SpanBindings>() {
                    for (key, value) in &bindings.0 {
                        log_ctx = log_ctx.with_value(*key, value.clone());
                    }
                }
            }
        }

        let mut visitor = EventVisitor::new();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let method = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            _ => metadata.target().to_string(),
        };

        let payload = (!visitor.payload.is_empty()).then_some(&visitor.payload);
        self.logger.emit_at(
            map_level(metadata.level()),
            &log_ctx,
            &visitor.message,
            &visitor.action,
            payload,
            method,
        );
    }
}

/// Env-filter directive for a console level. `tracing` has no fatal
/// level, so fatal narrows the filter to errors.
fn filter_directive(level: Level) -> &'static str {
    match level {
        Level::Fatal => "error",
        other => other.as_str(),
    }
}

/// Initialize the global `tracing` subscriber with a [`ScribeLayer`].
///
/// The configured console level is the default directive; `RUST_LOG`
/// overrides it. Returns a facade handle sharing the installed sink.
/// Call once at application startup.
pub fn init(config: Configuration) -> io::Result<Logger> {
    let logger = Logger::new(config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(logger.config().level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(ScribeLayer::new(logger.clone()))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(logger)
}
