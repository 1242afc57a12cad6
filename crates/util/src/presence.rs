use serde_json::Value;

/// Check if a JSON value is blank.
///
/// `null`, `false`, strings made only of whitespace, empty arrays and empty
/// objects are blank. Numbers and `true` never are.
///
/// # Examples
///
/// ```
/// use rest_resource_util::presence::is_blank;
/// use serde_json::json;
///
/// assert!(is_blank(&json!(null)));
/// assert!(is_blank(&json!("  ")));
/// assert!(is_blank(&json!([])));
/// assert!(!is_blank(&json!(0)));
/// assert!(!is_blank(&json!({"id": 1})));
/// ```
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(_) => false,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Inverse of [`is_blank`].
pub fn is_present(value: &Value) -> bool {
    !is_blank(value)
}
