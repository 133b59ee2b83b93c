//! Lenient integer coercion shared by inbound payloads and stored records.

use serde_json::Value;

/// Read an integer from a JSON number or numeric string.
///
/// Integral floats such as `4.0` are accepted; floats outside the `i64`
/// range are rejected rather than clamped.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use study_rooms::domain::coerce::int_from_json;
///
/// assert_eq!(int_from_json(&json!(" 12 ")), Some(12));
/// assert_eq!(int_from_json(&json!(4.0)), Some(4));
/// assert_eq!(int_from_json(&json!(f64::MAX)), None);
/// ```
#[must_use]
pub fn int_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite() && float.fract() == 0.0)
                .and_then(|float| format!("{float:.0}").parse().ok())
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
