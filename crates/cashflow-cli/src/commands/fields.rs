use serde_json::{json, Value};

use cashflow_core::form::FieldPath;

/// Every input field path in form order.
pub fn run_fields() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = FieldPath::all()
        .into_iter()
        .map(|path| {
            json!({
                "path": path.to_string(),
                "section": path.section.key(),
                "period": path.period.map(|p| p.key()).unwrap_or("-"),
                "field": path.field,
            })
        })
        .collect();
    Ok(Value::Array(rows))
}
