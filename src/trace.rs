// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Bridge to the active tracing span.
//!
//! The tracer owns span creation and sampling; this module only reads the
//! numeric identifiers of whatever span is active and normalizes them for
//! emission. An id of exactly zero means "no active span" and is treated
//! as absent, so code paths without a trace never emit meaningless zeros.

use tracing::Span;

/// Numeric identifiers of the active span.
///
/// A zero-value span is the "nothing active" sentinel; the lookup never
/// fails, it just returns zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveSpan {
    pub trace_id: u64,
    pub span_id: u64,
}

impl ActiveSpan {
    /// The trace id as a decimal string, or `None` when zero.
    pub fn trace_id_str(&self) -> Option<String> {
        format_id(self.trace_id)
    }

    /// The span id as a decimal string, or `None` when zero.
    pub fn span_id_str(&self) -> Option<String> {
        format_id(self.span_id)
    }

    /// True when neither id is set.
    pub fn is_empty(&self) -> bool {
        self.trace_id == 0 && self.span_id == 0
    }
}

/// Normalize a raw span identifier for emission.
///
/// Zero is the tracer's "absent" sentinel and maps to `None`; everything
/// else becomes a base-10 decimal string.
pub fn format_id(id: u64) -> Option<String> {
    if id == 0 {
        None
    } else {
        Some(id.to_string())
    }
}

/// Source of the ambient active span.
///
/// The logger asks this at every call; implementations must be cheap and
/// non-blocking.
pub trait SpanSource: Send + Sync {
    /// The identifiers of the active span, zeroed when none is active.
    fn active_span(&self) -> ActiveSpan;
}

/// A source that never reports an active span.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpanSource;

impl SpanSource for NoopSpanSource {
    fn active_span(&self) -> ActiveSpan {
        ActiveSpan::default()
    }
}

/// Reads the current `tracing` span.
///
/// `tracing` subscriber ids carry the span dimension only; the trace
/// dimension stays zero unless an APM integration layers its own
/// [`SpanSource`] over this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentSpanSource;

impl SpanSource for CurrentSpanSource {
    fn active_span(&self) -> ActiveSpan {
        let span_id = Span::current().id().map(|id| id.into_u64()).unwrap_or(0);
        ActiveSpan { trace_id: 0, span_id }
    }
}
