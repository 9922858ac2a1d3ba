use serde_json::{Map, Value};
use std::io::{self, Write};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// `field,value` pairs for the scalar fields, then one block per breakdown
/// series: a title record naming the series, a header row and its rows.
/// Values are written at full precision.
pub(crate) fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    let map = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        },
        Value::Array(arr) => {
            write_series(&mut wtr, arr)?;
            return Ok(wtr.flush()?);
        }
        other => {
            wtr.write_record([format_csv_value(other)])?;
            return Ok(wtr.flush()?);
        }
    };

    write_scalars(&mut wtr, map)?;
    for (key, val) in map {
        if let Value::Array(rows) = val {
            if rows.is_empty() {
                continue;
            }
            wtr.write_record([key.as_str()])?;
            write_series(&mut wtr, rows)?;
        }
    }

    Ok(wtr.flush()?)
}

fn write_scalars<W: Write>(
    wtr: &mut csv::Writer<W>,
    map: &Map<String, Value>,
) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        match val {
            Value::Array(_) => {}
            Value::Object(inner) => {
                for (sub, v) in inner {
                    wtr.write_record([format!("{}.{}", key, sub), format_csv_value(v)])?;
                }
            }
            _ => wtr.write_record([key.clone(), format_csv_value(val)])?,
        }
    }
    Ok(())
}

fn write_series<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), csv::Error> {
    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in rows {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in rows {
            wtr.write_record([format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
