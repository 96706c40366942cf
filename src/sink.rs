// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Structured sinks.
//!
//! A [`Sink`] accepts finished [`Record`]s and writes them somewhere.
//! [`JsonSink`] is the default: one JSON object per record with the fixed
//! key remapping the ingestion side expects (`message`, `method`, `date`).
//! Emission is fire-and-forget; write failures are swallowed so a broken
//! pipe can never disturb the calling business logic.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::config::Level;
use crate::record::Record;

/// Timestamp layout for the `date` key: millisecond precision, UTC,
/// literal `Z` suffix.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Destination for structured records.
pub trait Sink: Send + Sync {
    /// Write one record. Must not panic or block indefinitely.
    fn emit(&self, record: &Record);

    /// Flush buffered output. Called before process termination.
    fn flush(&self) {}
}

/// Line-delimited JSON sink over any writer.
#[derive(Debug)]
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
    min_level: Level,
}

impl<W: Write + Send> JsonSink<W> {
    /// Wrap a writer, dropping records below `min_level`.
    pub fn new(writer: W, min_level: Level) -> Self {
        Self {
            writer: Mutex::new(writer),
            min_level,
        }
    }
}

impl JsonSink<io::Stdout> {
    /// The default console sink.
    pub fn stdout(min_level: Level) -> Self {
        Self::new(io::stdout(), min_level)
    }
}

fn encode(record: &Record) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert("level".to_string(), Value::from(record.level.as_str()));
    object.insert(
        "date".to_string(),
        Value::from(Utc::now().format(DATE_FORMAT).to_string()),
    );
    object.insert("message".to_string(), Value::from(record.message.as_str()));
    object.insert("method".to_string(), Value::from(record.method.as_str()));
    for (key, value) in record.fields.iter() {
        object.insert(key.to_string(), value.clone());
    }
    object
}

impl<W: Write + Send> Sink for JsonSink<W> {
    fn emit(&self, record: &Record) {
        if record.level < self.min_level {
            return;
        }
        let object = encode(record);
        // A poisoned lock means another emit panicked mid-write; skip
        // rather than propagate.
        if let Ok(mut writer) = self.writer.lock() {
            let _ = serde_json::to_writer(&mut *writer, &Value::Object(object));
            let _ = writer.write_all(b"\n");
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
