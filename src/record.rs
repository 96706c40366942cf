// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-call log records and the field merge.
//!
//! A [`Record`] is assembled fresh for every log call from four sources:
//! process metadata, static configuration, the correlation context, and
//! the active tracing span, plus whatever the call itself supplies. Each
//! source writes to its own disjoint set of field names, so a later layer
//! can add fields but never overwrite an earlier one.

use gethostname::gethostname;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::config::{Configuration, Level};
use crate::context::{LogContext, Vocabulary};
use crate::payload::{normalize, Payload};
use crate::trace::ActiveSpan;

/// Fixed source tag attached to the tracer grouping.
pub const SOURCE_TAG: &str = "rust";

/// Grouping key for tracer correlation fields.
const DD_KEY: &str = "dd";

// Resolved once; lookup failure degrades to an empty string rather than
// keeping the process from logging.
static HOSTNAME: Lazy<String> =
    Lazy::new(|| gethostname().into_string().unwrap_or_default());

/// Process-wide metadata captured at logger construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProcessFields {
    pub pid: u32,
    pub host: &'static str,
}

impl ProcessFields {
    pub fn capture() -> Self {
        Self {
            pid: std::process::id(),
            host: HOSTNAME.as_str(),
        }
    }
}

/// An ordered set of named field values.
///
/// Insertion order is emission order. Keys are unique by construction;
/// a duplicate push is a programming error and trips a debug assertion.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    entries: Vec<(&'static str, Value)>,
}

impl FieldSet {
    /// Append a field. The key must not already be present.
    pub fn push(&mut self, key: &'static str, value: impl Into<Value>) {
        debug_assert!(
            !self.entries.iter().any(|(k, _)| *k == key),
            "field {key} written twice"
        );
        self.entries.push((key, value.into()));
    }

    /// Iterate fields in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Look up a field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One structured log record, built per call and handed to the sink.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub message: String,
    /// Caller attribution, `file:line` of the facade's caller.
    pub method: String,
    pub fields: FieldSet,
}

/// Compute the full field set for one log call.
pub(crate) fn merge_fields(
    config: &Configuration,
    process: &ProcessFields,
    vocabulary: Vocabulary,
    ctx: &LogContext,
    span: ActiveSpan,
    action: &str,
    payload: Option<&Payload>,
) -> FieldSet {
    let mut fields = FieldSet::default();

    // Process fields are always present, even when host resolution failed.
    fields.push("pid", process.pid);
    fields.push("host", process.host);

    // Configuration fields, omitted when unset.
    if !config.service.is_empty() {
        fields.push("service", config.service.as_str());
    }
    if !config.environment.is_empty() {
        fields.push("environment", config.environment.as_str());
    }
    if !config.team.is_empty() {
        fields.push("team", config.team.as_str());
    }
    if !config.project.is_empty() {
        fields.push("project", config.project.as_str());
    }
    if !config.version.is_empty() {
        fields.push("version", config.version.as_str());
    }

    // Context fields, one per recognized key, presence-gated.
    for key in vocabulary.keys() {
        if let Some(value) = ctx.get(*key) {
            fields.push(key.as_str(), value);
        }
    }

    // Tracer grouping. The tracer layer owns only the `dd` key, so its
    // trace_id can never collide with the context layer's.
    if !span.is_empty() {
        let mut dd = Map::new();
        if let Some(trace_id) = span.trace_id_str() {
            dd.insert("trace_id".to_string(), Value::from(trace_id));
        }
        if let Some(span_id) = span.span_id_str() {
            dd.insert("span_id".to_string(), Value::from(span_id));
        }
        dd.insert("source".to_string(), Value::from(SOURCE_TAG));
        if !config.service.is_empty() {
            dd.insert("service".to_string(), Value::from(config.service.as_str()));
        }
        if !config.environment.is_empty() {
            dd.insert("env".to_string(), Value::from(config.environment.as_str()));
        }
        if !config.version.is_empty() {
            dd.insert("version".to_string(), Value::from(config.version.as_str()));
        }
        fields.push(DD_KEY, Value::Object(dd));
    }

    // Call fields.
    if !action.is_empty() {
        fields.push("action", action);
    }
    if let Some(payload) = payload {
        if !payload.is_empty() {
            fields.push("payload", Value::Object(normalize(payload)));
        }
    }

    fields
}
