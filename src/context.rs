// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Correlation context carried across async boundaries.
//!
//! [`LogContext`] is an immutable, layered key-value carrier. Setting a
//! value never mutates in place: [`LogContext::with_value`] returns a new
//! context layered on top of the old one, so concurrent tasks can each
//! extend their own fork of a shared ancestor without locking.
//!
//! Keys form a closed set, [`ContextKey`]. Two identifier vocabularies are
//! recognized (see [`Vocabulary`]); the carrier algorithm is identical for
//! both, only the set of keys consumed at ingress and emitted on records
//! differs.
//!
//! # Usage
//!
//! ```rust
//! use scribe::context::{ContextKey, LogContext, Vocabulary};
//!
//! let ctx = LogContext::new()
//!     .with_value(ContextKey::TraceId, "abc123")
//!     .with_value(ContextKey::RequestId, "req-1");
//!
//! assert_eq!(ctx.get(ContextKey::TraceId), Some("abc123"));
//! assert_eq!(ctx.get(ContextKey::SessionId), None);
//!
//! // Ingress: recognized, non-empty headers become context values.
//! let ctx = LogContext::from_headers(
//!     Vocabulary::Request,
//!     [("trace_id", "abc123"), ("session_id", "")],
//! );
//! assert_eq!(ctx.get(ContextKey::SessionId), None);
//! ```

use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::UnknownKeyError;

/// The closed set of correlation identifiers a context can carry.
///
/// Unknown keys are rejected at this boundary, which keeps the emitted
/// schema stable: nothing outside this enum can ever reach the record
/// through the context layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKey {
    /// Trace id propagated from the edge (request vocabulary).
    TraceId,
    /// Per-request id (request vocabulary).
    RequestId,
    /// Session id (request vocabulary).
    SessionId,
    /// Name of the calling consumer (request vocabulary).
    ConsumerName,
    /// Correlation id linking an event chain (event vocabulary).
    CorrelationId,
    /// Id of the message that caused this one (event vocabulary).
    CausationId,
    /// Tenant identifier (event vocabulary).
    Tenant,
    /// End-user identifier (event vocabulary).
    UserId,
    /// Consuming application (event vocabulary).
    Consumer,
}

impl ContextKey {
    /// The wire name of this key, as used in headers and emitted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKey::TraceId => "trace_id",
            ContextKey::RequestId => "request_id",
            ContextKey::SessionId => "session_id",
            ContextKey::ConsumerName => "consumer_name",
            ContextKey::CorrelationId => "correlation_id",
            ContextKey::CausationId => "causation_id",
            ContextKey::Tenant => "tenant",
            ContextKey::UserId => "user_id",
            ContextKey::Consumer => "consumer",
        }
    }
}

impl FromStr for ContextKey {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace_id" => Ok(ContextKey::TraceId),
            "request_id" => Ok(ContextKey::RequestId),
            "session_id" => Ok(ContextKey::SessionId),
            "consumer_name" => Ok(ContextKey::ConsumerName),
            "correlation_id" => Ok(ContextKey::CorrelationId),
            "causation_id" => Ok(ContextKey::CausationId),
            "tenant" => Ok(ContextKey::Tenant),
            "user_id" => Ok(ContextKey::UserId),
            "consumer" => Ok(ContextKey::Consumer),
            _ => Err(UnknownKeyError(s.to_string())),
        }
    }
}

/// Which identifier set a logger recognizes.
///
/// Request-oriented services correlate on trace/request/session ids;
/// event-driven services correlate on correlation/causation chains. The
/// vocabulary picks the keys consumed by [`LogContext::from_headers`] and
/// emitted by the field merger, in a fixed order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Vocabulary {
    /// `trace_id`, `request_id`, `session_id`, `consumer_name`.
    #[default]
    Request,
    /// `correlation_id`, `causation_id`, `tenant`, `user_id`, `consumer`.
    Event,
}

impl Vocabulary {
    /// Recognized keys, in emission order.
    pub fn keys(&self) -> &'static [ContextKey] {
        match self {
            Vocabulary::Request => &[
                ContextKey::TraceId,
                ContextKey::RequestId,
                ContextKey::SessionId,
                ContextKey::ConsumerName,
            ],
            Vocabulary::Event => &[
                ContextKey::CorrelationId,
                ContextKey::CausationId,
                ContextKey::Tenant,
                ContextKey::UserId,
                ContextKey::Consumer,
            ],
        }
    }
}

/// One binding in the layered carrier.
#[derive(Debug)]
struct Frame {
    key: ContextKey,
    value: String,
    parent: Option<Arc<Frame>>,
}

/// Immutable, layered correlation context.
///
/// Cloning is an `Arc` bump; forking with [`LogContext::with_value`]
/// allocates a single frame. Lookups walk newest to oldest, so the most
/// recently set binding for a key wins.
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    head: Option<Arc<Frame>>,
}

impl LogContext {
    /// An empty context with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fork this context with one additional binding.
    pub fn with_value(&self, key: ContextKey, value: impl Into<String>) -> LogContext {
        LogContext {
            head: Some(Arc::new(Frame {
                key,
                value: value.into(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the nearest binding for `key`.
    ///
    /// `None` means the key was never set. Ingress filters empty values,
    /// so absent and empty collapse into one concept here.
    pub fn get(&self, key: ContextKey) -> Option<&str> {
        let mut frame = self.head.as_deref();
        while let Some(f) = frame {
            if f.key == key {
                return Some(&f.value);
            }
            frame = f.parent.as_deref();
        }
        None
    }

    /// True if no binding has ever been layered in.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Build a context from inbound headers.
    ///
    /// For each key the vocabulary recognizes, a present and non-empty
    /// header value is layered in. Empty values are never inserted; this is
    /// the single normalization point that lets the rest of the crate treat
    /// absent and empty as the same thing.
    pub fn from_headers<'a, I>(vocabulary: Vocabulary, headers: I) -> LogContext
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut ctx = LogContext::new();
        for (name, value) in headers {
            if value.is_empty() {
                continue;
            }
            let Ok(key) = ContextKey::from_str(name) else {
                continue;
            };
            if vocabulary.keys().contains(&key) {
                ctx = ctx.with_value(key, value);
            }
        }
        ctx
    }

    /// Return a context that is guaranteed to carry `key`.
    ///
    /// If the key is already present this is a cheap clone; otherwise a
    /// fresh uuid-v4 value is minted, for ingress points where the edge
    /// did not send an identifier.
    pub fn ensure(&self, key: ContextKey) -> LogContext {
        if self.get(key).is_some() {
            self.clone()
        } else {
            self.with_value(key, Uuid::new_v4().to_string())
        }
    }
}
