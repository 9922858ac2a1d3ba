pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Dispatch output to the appropriate formatter.
///
/// JSON always carries the full result; table and csv drop the
/// month-by-month series unless `include_monthly` is set.
pub fn format_output(format: &OutputFormat, value: &Value, include_monthly: bool) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(&shape(value, include_monthly)),
        OutputFormat::Csv => csv_out::print_csv(&shape(value, include_monthly)),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

fn shape(value: &Value, include_monthly: bool) -> Value {
    let mut shaped = value.clone();
    if !include_monthly {
        if let Some(result) = shaped.get_mut("result").and_then(Value::as_object_mut) {
            result.remove("monthly");
        }
    }
    shaped
}

/// Human-facing rendering of a scalar: decimal strings are rounded to two
/// places, everything else is shown as-is.
pub(crate) fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => d.round_dp(2).normalize().to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
