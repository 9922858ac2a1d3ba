use serde_json::Value;

use super::display_scalar;

// Headline field per command: retirement readiness, then plan balances.
const PRIORITY_KEYS: [&str; 3] = ["readinessScore", "finalBalance", "corpusAtRetirement"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", render_minimal(value));
}

pub(crate) fn render_minimal(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let Some(val) = PRIORITY_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|val| !val.is_null())
        {
            return display_scalar(val);
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, display_scalar(val));
        }
    }

    display_scalar(result_obj)
}
