pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The cash flow lines of a derivation envelope, if `value` is one.
pub(crate) fn statement_lines(value: &Value) -> Option<&Vec<Value>> {
    value.get("result")?.get("lines")?.as_array()
}

/// Flatten nested objects into `(dotted.path, leaf)` pairs, in key order.
pub(crate) fn flatten<'a>(prefix: &str, value: &'a Value, out: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, val, out);
            }
        }
        leaf => out.push((prefix.to_string(), leaf)),
    }
}
