use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_scalar;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

/// Summary table, one table per breakdown series, then warnings and
/// methodology.
pub(crate) fn render_table(value: &Value) -> String {
    let envelope = match value {
        Value::Object(map) => map,
        other => return display_scalar(other),
    };
    let result = match envelope.get("result") {
        Some(Value::Object(result)) => result,
        _ => return summary_table(envelope),
    };

    let mut sections = vec![summary_table(result)];

    for (key, val) in result {
        if let Value::Array(rows) = val {
            sections.push(format!("{}:\n{}", title(key), series_table(rows)));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let lines: Vec<String> = warnings
                .iter()
                .filter_map(Value::as_str)
                .map(|w| format!("  - {}", w))
                .collect();
            sections.push(format!("Warnings:\n{}", lines.join("\n")));
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        sections.push(format!("Methodology: {}", meth));
    }

    sections.join("\n\n")
}

/// Field/value table of the scalar fields; nested objects are flattened
/// with dotted keys and arrays are left for their own tables.
fn summary_table(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        match val {
            Value::Array(_) => {}
            Value::Object(inner) => {
                for (sub, v) in inner {
                    builder.push_record([format!("{}.{}", key, sub), display_scalar(v)]);
                }
            }
            _ => builder.push_record([key.clone(), display_scalar(val)]),
        }
    }
    Table::from(builder).to_string()
}

fn series_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return "(empty)".to_string();
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(display_scalar).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    Table::from(builder).to_string()
}

// "sustainability" -> "Sustainability"
fn title(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
