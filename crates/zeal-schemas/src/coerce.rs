//! Coercion functions for the `coerce.*` constructor namespace
//!
//! Each function maps a JSON value into the target primitive's value space
//! before schema validation runs. Scalar conversions follow the loose
//! conversion rules of the mirrored API; containers never coerce.

use crate::schema::type_name;
use chrono::{TimeZone, Utc};
use serde_json::{Number, Value};

/// Coerce scalars to their string rendering.
pub fn to_string(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(true) => Ok(Value::String("true".to_string())),
        Value::Bool(false) => Ok(Value::String("false".to_string())),
        Value::Null => Ok(Value::String("null".to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(format!("cannot coerce {} to string", type_name(value)))
        }
    }
}

/// Coerce numeric strings, booleans, and null to numbers.
///
/// Integral strings keep an integer representation so coerced values compare
/// equal to integer literals.
pub fn to_number(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::Bool(flag) => Ok(Value::Number(Number::from(i64::from(*flag)))),
        Value::Null => Ok(Value::Number(Number::from(0))),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(Value::Number(Number::from(0)));
            }
            if let Ok(whole) = trimmed.parse::<i64>() {
                return Ok(Value::Number(Number::from(whole)));
            }
            let parsed: f64 = trimmed
                .parse()
                .map_err(|_| format!("cannot coerce string \"{}\" to number", text))?;
            Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| format!("cannot coerce string \"{}\" to number", text))
        }
        Value::Array(_) | Value::Object(_) => {
            Err(format!("cannot coerce {} to number", type_name(value)))
        }
    }
}

/// Coerce any value to a boolean using loose truthiness: `false`, `0`, the
/// empty string, and `null` are falsy; everything else is truthy.
pub fn to_boolean(value: &Value) -> Result<Value, String> {
    let truthy = match value {
        Value::Bool(flag) => *flag,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    Ok(Value::Bool(truthy))
}

/// Coerce RFC 3339 strings and epoch-millisecond numbers to a date string.
pub fn to_date(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(text) => chrono::DateTime::parse_from_rfc3339(text)
            .map(|_| value.clone())
            .map_err(|_| "invalid RFC 3339 date string".to_string()),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| "cannot coerce fractional number to date".to_string())?;
            let stamp = Utc
                .timestamp_millis_opt(millis)
                .single()
                .ok_or_else(|| "timestamp out of range for date coercion".to_string())?;
            Ok(Value::String(stamp.to_rfc3339()))
        }
        _ => Err(format!("cannot coerce {} to date", type_name(value))),
    }
}
