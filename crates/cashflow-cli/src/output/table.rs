use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use super::{flatten, statement_lines};

/// Format output as tables using the tabled crate.
///
/// A derivation envelope prints the statement lines in presentation order,
/// then the balance check and the cash reconciliation. Anything else prints
/// as a field/value listing.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(lines) = statement_lines(value) {
                print_statement(lines, map);
            } else if let Some(result) = map.get("result") {
                print_flat_object(result, format_value);
                print_notes(map);
            } else {
                print_flat_object(value, format_value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_statement(lines: &[Value], envelope: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Section", "Line", "Amount"]);
    for line in lines {
        let label = line.get("label").and_then(Value::as_str).unwrap_or_default();
        let label = match line.get("kind").and_then(Value::as_str) {
            Some("item") => format!("  {}", label),
            _ => label.to_string(),
        };
        builder.push_record([
            line.get("section").and_then(Value::as_str).unwrap_or_default().to_string(),
            label,
            line.get("amount").map(format_amount).unwrap_or_default(),
        ]);
    }
    println!("{}", Table::from(builder));

    let result = envelope.get("result");

    if let Some(Value::Object(bs)) = result.and_then(|r| r.get("balanceSheet")) {
        let mut builder = Builder::default();
        builder.push_record(["Balance sheet", "Prior year", "Current year"]);
        for (key, pair) in bs {
            builder.push_record([
                key.clone(),
                pair.get("prev").map(format_amount).unwrap_or_default(),
                pair.get("current").map(format_amount).unwrap_or_default(),
            ]);
        }
        println!("\n{}", Table::from(builder));
    }

    if let Some(rec) = result.and_then(|r| r.get("reconciliation")) {
        println!();
        print_flat_object(rec, format_amount);
    }

    print_notes(envelope);
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value, format: fn(&Value) -> String) {
    let mut rows = Vec::new();
    flatten("", value, &mut rows);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in rows {
        builder.push_record([key, format(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

/// Amounts arrive as decimal strings; group their integer digits.
fn format_amount(value: &Value) -> String {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(amount) => group_thousands(amount),
            Err(_) => s.clone(),
        },
        other => format_value(other),
    }
}

fn group_thousands(amount: Decimal) -> String {
    let text = amount.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if amount.is_sign_negative() && !amount.is_zero() {
        grouped.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
