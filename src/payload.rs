// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Payload normalization.
//!
//! Callers hand the logger a flat string-to-string map. Normalization
//! types the one key with a known numeric meaning, `duration`, and passes
//! everything else through as strings. Coercion is best-effort: a payload
//! must never make a log call fail.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Call-supplied structured payload.
pub type Payload = HashMap<String, String>;

/// The payload key coerced to an integer.
pub const DURATION_KEY: &str = "duration";

/// Value used when a `duration` does not parse as a base-10 integer.
pub const DURATION_FALLBACK: i64 = 0;

/// Convert a payload into a typed JSON map.
///
/// `duration` becomes an integer, [`DURATION_FALLBACK`] when malformed;
/// all other values stay strings. Empty input yields an empty map, which
/// the logger omits from the record entirely.
pub fn normalize(payload: &Payload) -> Map<String, Value> {
    let mut normalized = Map::with_capacity(payload.len());

    for (key, value) in payload {
        if key == DURATION_KEY {
            let parsed = value.parse::<i64>().unwrap_or(DURATION_FALLBACK);
            normalized.insert(key.clone(), Value::from(parsed));
        } else {
            normalized.insert(key.clone(), Value::from(value.clone()));
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(entries: &[(&str, &str)]) -> Payload {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_duration_parses_to_integer() {
        let normalized = normalize(&payload(&[("duration", "150")]));
        assert_eq!(normalized["duration"], Value::from(150));
    }

    #[test]
    fn test_malformed_duration_falls_back_to_zero() {
        let normalized = normalize(&payload(&[("duration", "abc")]));
        assert_eq!(normalized["duration"], Value::from(DURATION_FALLBACK));
    }

    #[test]
    fn test_negative_duration_is_accepted() {
        let normalized = normalize(&payload(&[("duration", "-5")]));
        assert_eq!(normalized["duration"], Value::from(-5));
    }

    #[test]
    fn test_other_keys_stay_strings() {
        let normalized = normalize(&payload(&[("reason", "timeout"), ("count", "3")]));
        assert_eq!(normalized["reason"], Value::from("timeout"));
        // No coercion for keys other than duration, even numeric-looking ones.
        assert_eq!(normalized["count"], Value::from("3"));
    }

    #[test]
    fn test_empty_payload_yields_empty_map() {
        assert!(normalize(&Payload::new()).is_empty());
    }
}
