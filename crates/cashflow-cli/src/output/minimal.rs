use serde_json::Value;

/// Result fields worth printing on their own, as dotted paths, in order of
/// priority.
const PRIORITY_PATHS: [&str; 4] = [
    "reconciliation.isCashFlowBalanced",
    "reconciliation.difference",
    "balanceSheet.isBalanced",
    "enteredFields",
];

/// Print just the key answer from the output.
///
/// For a derivation that is whether the cash flows reconcile, followed by
/// the difference when they do not.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{}", line);
    }
}

fn minimal_lines(value: &Value) -> Vec<String> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(balanced) = lookup(result_obj, PRIORITY_PATHS[0]) {
        let mut lines = vec![format_minimal(balanced)];
        if balanced == &Value::Bool(false) {
            if let Some(diff) = lookup(result_obj, PRIORITY_PATHS[1]) {
                lines.push(format!("difference: {}", format_minimal(diff)));
            }
        }
        return lines;
    }

    for path in &PRIORITY_PATHS[2..] {
        if let Some(val) = lookup(result_obj, path) {
            return vec![format_minimal(val)];
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return vec![format!("{}: {}", key, format_minimal(val))];
        }
    }

    vec![format_minimal(result_obj)]
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |v, key| v.get(key))
        .filter(|v| !v.is_null())
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balanced_statement_prints_flag_only() {
        let value = json!({
            "result": {"reconciliation": {"isCashFlowBalanced": true, "difference": "0"}}
        });
        assert_eq!(minimal_lines(&value), vec!["true"]);
    }

    #[test]
    fn test_unbalanced_statement_adds_difference() {
        let value = json!({
            "result": {"reconciliation": {"isCashFlowBalanced": false, "difference": "100"}}
        });
        assert_eq!(minimal_lines(&value), vec!["false", "difference: 100"]);
    }

    #[test]
    fn test_other_objects_fall_back() {
        assert_eq!(minimal_lines(&json!({"enteredFields": 67, "owner": "acme"})), vec!["67"]);
        assert_eq!(minimal_lines(&json!({"cash": "5"})), vec!["cash: 5"]);
    }
}
