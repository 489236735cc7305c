use serde_json::Value;

/// Convert a JSON scalar into a sanitized string.
pub fn value_to_string(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    };
    sanitize(raw)
}

/// Returns the field as a string only when it carries a usable value.
///
/// Absent, `null`, `false`, `0` and empty strings all count as missing, so a
/// login body of `{"id": 0}` does not produce a user id.
pub fn truthy_string(value: Option<&Value>) -> Option<String> {
    let value = value?;
    let present = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    present.then(|| value_to_string(value))
}

fn sanitize(s: String) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}
