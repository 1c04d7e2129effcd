//! Lenient typed lookups into a JSON override object.
//!
//! Used to layer `--params '{"seed": 7}'` style overrides on top of a
//! [`SceneConfig`](crate::config::SceneConfig). A missing key or a value of the
//! wrong JSON type yields `None`, and the caller keeps its current value.

use serde_json::Value;

/// Returns `params[name]` as an `f64` if it is any JSON number.
pub fn param_f64(params: &Value, name: &str) -> Option<f64> {
    params.get(name).and_then(Value::as_f64)
}

/// Returns `params[name]` as a `u64` if it is a non-negative integer.
pub fn param_u64(params: &Value, name: &str) -> Option<u64> {
    params.get(name).and_then(Value::as_u64)
}

/// Returns `params[name]` as a `usize` if it is a non-negative integer that fits.
pub fn param_usize(params: &Value, name: &str) -> Option<usize> {
    param_u64(params, name).and_then(|v| usize::try_from(v).ok())
}
