use serde_json::Value;
use std::io;

use super::{flatten, statement_lines};

/// Write output as CSV to stdout.
///
/// A derivation envelope becomes one row per statement line; other objects
/// become `field,value` rows with nested keys joined by dots.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(lines) = statement_lines(value) {
        write_lines(&mut wtr, lines);
    } else {
        match value {
            Value::Object(map) => {
                let body = map.get("result").unwrap_or(value);
                let mut rows = Vec::new();
                flatten("", body, &mut rows);

                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in rows {
                    let _ = wtr.write_record([key, format_csv_value(val)]);
                }
            }
            Value::Array(arr) => write_array_csv(&mut wtr, arr),
            _ => {
                let _ = wtr.write_record([&format_csv_value(value)]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_lines<W: io::Write>(wtr: &mut csv::Writer<W>, lines: &[Value]) {
    let headers = ["section", "kind", "key", "label", "amount"];
    let _ = wtr.write_record(headers);
    for line in lines {
        let row: Vec<String> = headers
            .iter()
            .map(|h| line.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_csv(f: impl FnOnce(&mut csv::Writer<Vec<u8>>)) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        f(&mut wtr);
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_statement_lines_become_rows() {
        let lines = vec![json!({
            "section": "operating",
            "kind": "item",
            "key": "receivablesChange",
            "label": "Decrease (increase) in trade receivables",
            "amount": "100"
        })];

        let out = to_csv(|w| write_lines(w, &lines));
        assert_eq!(
            out,
            "section,kind,key,label,amount\n\
             operating,item,receivablesChange,Decrease (increase) in trade receivables,100\n"
        );
    }

    #[test]
    fn test_array_rows_follow_first_object_keys() {
        let rows = vec![
            json!({"field": "cash", "path": "currentAssets.prev.cash"}),
            json!({"field": "dividends", "path": "appropriation.dividends"}),
        ];

        let out = to_csv(|w| write_array_csv(w, &rows));
        assert_eq!(
            out,
            "field,path\ncash,currentAssets.prev.cash\ndividends,appropriation.dividends\n"
        );
    }
}
