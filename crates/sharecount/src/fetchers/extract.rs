//! Count extraction helpers: regex captures and padded JSON

use crate::error::CountError;
use regex::bytes::Regex;
use serde_json::{Map, Value};

/// Outcome of looking for a count with a regex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Pattern matched and the group parsed as a base-10 integer
    Count(u64),
    /// Pattern matched but the group did not fit in a count
    Unparsable,
    /// Pattern (or the group) did not match
    Missing,
}

/// Find `pattern` in `body` and parse capture `group` as a count
pub fn capture_count(pattern: &Regex, body: &[u8], group: usize) -> Capture {
    let Some(digits) = pattern
        .captures(body)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_bytes())
    else {
        return Capture::Missing;
    };

    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map_or(Capture::Unparsable, Capture::Count)
}

/// Decode a JSON object wrapped in `skip_front`/`skip_end` bytes of padding
///
/// Anything but a top-level object is a decode error.
pub fn padded_object(
    provider: &'static str,
    body: &[u8],
    skip_front: usize,
    skip_end: usize,
) -> Result<Map<String, Value>, CountError> {
    let end = body
        .len()
        .checked_sub(skip_end)
        .filter(|end| *end >= skip_front)
        .ok_or_else(|| {
            CountError::decode(
                provider,
                format!(
                    "body of {} bytes is shorter than its padding ({} + {})",
                    body.len(),
                    skip_front,
                    skip_end
                ),
            )
        })?;

    let value: Value = serde_json::from_slice(&body[skip_front..end])
        .map_err(|e| CountError::decode(provider, e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CountError::decode(
            provider,
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
    }
}

/// Look up `key`, treating JSON `null` the same as an absent key
pub fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

/// Read a JSON number as a count: floored, never negative
pub fn floor_count(provider: &'static str, name: &str, value: &Value) -> Result<u64, CountError> {
    let number = value.as_f64().ok_or_else(|| {
        CountError::decode(
            provider,
            format!("{} is {}, not a number", name, json_kind(value)),
        )
    })?;
    Ok(number.floor().max(0.0) as u64)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
