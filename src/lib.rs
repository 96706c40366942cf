// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Scribe - context-aware structured JSON logging for services.
//!
//! Every record is decorated with process metadata (host, pid), deployment
//! metadata from a static [`Configuration`], correlation identifiers from
//! an ambient [`LogContext`], and trace/span ids from the active tracing
//! span. Attempting to log never fails and never disturbs the caller.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`config`] - Static configuration and level handling
//! - [`context`] - Immutable layered correlation context
//! - [`trace`] - Bridge to the active tracing span
//! - [`payload`] - Call payload normalization
//! - [`record`] - Per-call records and the field merge
//! - [`sink`] - Structured JSON sinks
//! - [`logger`] - The leveled logger facade
//! - [`layer`] - `tracing` subscriber integration
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use scribe::{Configuration, LogContext, Logger, Vocabulary};
//!
//! let logger = Logger::new(
//!     Configuration::new()
//!         .with_service("orders")
//!         .with_environment("prod")
//!         .with_console_level("info"),
//! );
//!
//! // Populate the context at the ingress boundary and thread it through.
//! let ctx = LogContext::from_headers(
//!     Vocabulary::Request,
//!     [("trace_id", "abc123"), ("consumer_name", "mobile")],
//! );
//!
//! logger.info(&ctx, "order created", "order.create", None);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod layer;
pub mod logger;
pub mod payload;
pub mod record;
pub mod sink;
pub mod trace;

// Re-export commonly used types at crate root
pub use config::{Configuration, Level};
pub use context::{ContextKey, LogContext, Vocabulary};
pub use error::UnknownKeyError;
pub use layer::{init, ScribeLayer};
pub use logger::Logger;
pub use payload::Payload;
pub use record::{FieldSet, Record};
pub use sink::{JsonSink, Sink};
pub use trace::{ActiveSpan, CurrentSpanSource, NoopSpanSource, SpanSource};

/// Scribe version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_exports() {
        let _ctx = LogContext::new();
        let _config = Configuration::new();
        assert_eq!(Level::parse("warn"), Level::Warn);
    }
}
