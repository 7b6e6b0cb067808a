use clap::Args;
use serde_json::{json, Value};
use tracing::info;

use cashflow_core::{derive_statement, form, FinancialData};

use crate::store::{StatementStore, StoredStatement};

/// Arguments for creating a stored statement
#[derive(Args)]
pub struct InitArgs {
    /// Company name to record
    #[arg(long)]
    pub company: Option<String>,

    /// Fiscal year label to record (e.g. 2024)
    #[arg(long)]
    pub fiscal_year: Option<String>,
}

/// Arguments for editing one field
#[derive(Args)]
pub struct SetArgs {
    /// Field path, e.g. currentAssets.prev.cash or incomeStatement.netIncome
    pub path: String,

    /// Amount; commas, a leading sign or a leading △ are accepted. Empty clears the field
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

fn summary(store: &StatementStore, record: &StoredStatement, created: bool) -> Value {
    json!({
        "owner": record.owner,
        "companyName": record.company_name,
        "fiscalYear": record.fiscal_year,
        "enteredFields": record.financial_data.entered_count(),
        "created": created,
        "updatedAt": record.updated_at.to_rfc3339(),
        "path": store
            .path_for(&record.owner)
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    })
}

pub fn run_init(
    store: &StatementStore,
    owner: &str,
    args: &InitArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (mut record, created) = store.load_or_create(owner)?;

    let mut changed = false;
    if let Some(company) = args.company.as_deref().filter(|c| !c.trim().is_empty()) {
        record.company_name = company.trim().to_string();
        changed = true;
    }
    if let Some(year) = args.fiscal_year.as_deref().filter(|y| !y.trim().is_empty()) {
        record.fiscal_year = year.trim().to_string();
        changed = true;
    }
    if changed {
        store.save(&mut record)?;
    }

    info!(owner, created, dir = %store.dir().display(), "statement ready");
    Ok(summary(store, &record, created))
}

pub fn run_set(
    store: &StatementStore,
    owner: &str,
    args: &SetArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (mut record, _) = store.load_or_create(owner)?;

    let path = form::apply_input(&mut record.financial_data, &args.path, &args.value)?;
    store.save(&mut record)?;
    info!(owner, field = %path, value = %args.value, "field updated");

    Ok(serde_json::to_value(derive_statement(&record.financial_data))?)
}

pub fn run_clear(store: &StatementStore, owner: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let (mut record, _) = store.load_or_create(owner)?;

    record.financial_data = FinancialData::cleared();
    store.save(&mut record)?;
    info!(owner, "statement cleared");

    Ok(serde_json::to_value(derive_statement(&record.financial_data))?)
}

pub fn run_show(store: &StatementStore, owner: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let (record, _) = store.load_or_create(owner)?;
    Ok(serde_json::to_value(derive_statement(&record.financial_data))?)
}

pub fn run_export(
    store: &StatementStore,
    owner: &str,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (record, _) = store.load_or_create(owner)?;
    Ok(serde_json::to_value(&record.financial_data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, StatementStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = StatementStore::open(Some(temp_dir.path().to_path_buf())).unwrap();
        (temp_dir, store)
    }

    fn set(store: &StatementStore, path: &str, value: &str) -> Value {
        let args = SetArgs {
            path: path.to_string(),
            value: value.to_string(),
        };
        run_set(store, "acme", &args).unwrap()
    }

    #[test]
    fn test_init_records_company_and_year() {
        let (_dir, store) = temp_store();
        let args = InitArgs {
            company: Some("Acme Corp".to_string()),
            fiscal_year: Some("2024".to_string()),
        };

        let value = run_init(&store, "acme", &args).unwrap();
        assert_eq!(value["created"], true);
        assert_eq!(value["companyName"], "Acme Corp");
        assert_eq!(value["enteredFields"], 67);

        // Blank flags leave the recorded metadata alone.
        let args = InitArgs {
            company: Some("  ".to_string()),
            fiscal_year: None,
        };
        let value = run_init(&store, "acme", &args).unwrap();
        assert_eq!(value["created"], false);
        assert_eq!(value["companyName"], "Acme Corp");
        assert_eq!(value["fiscalYear"], "2024");
    }

    #[test]
    fn test_set_rederives_from_stored_snapshot() {
        let (_dir, store) = temp_store();

        set(&store, "currentAssets.prev.cash", "1,000");
        set(&store, "currentAssets.current.cash", "1200");
        set(&store, "current_assets.prev.receivables", "500");
        let value = set(&store, "currentAssets.current.receivables", "400");

        let result = &value["result"];
        assert_eq!(result["operating"]["receivablesChange"], "100");
        assert_eq!(result["reconciliation"]["cashIncrease"], "200");
        assert_eq!(result["reconciliation"]["isCashFlowBalanced"], false);
        assert_eq!(value["warnings"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_set_rejects_bad_amount_and_keeps_record() {
        let (_dir, store) = temp_store();
        set(&store, "appropriation.dividends", "△30");

        let args = SetArgs {
            path: "appropriation.dividends".to_string(),
            value: "thirty".to_string(),
        };
        assert!(run_set(&store, "acme", &args).is_err());

        let exported = run_export(&store, "acme").unwrap();
        assert_eq!(exported["appropriation"]["dividends"], "-30");
    }

    #[test]
    fn test_set_rejects_oversized_amount_and_keeps_record() {
        let (_dir, store) = temp_store();
        set(&store, "currentAssets.prev.cash", "100");

        let args = SetArgs {
            path: "currentAssets.prev.cash".to_string(),
            value: "79228162514264337593543950335".to_string(),
        };
        let err = run_set(&store, "acme", &args).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");

        let value = set(&store, "currentAssets.prev.receivables", "1");
        assert_eq!(value["result"]["balanceSheet"]["totalAssets"]["prev"], "101");
    }

    #[test]
    fn test_blank_value_clears_field() {
        let (_dir, store) = temp_store();
        set(&store, "incomeStatement.netIncome", "");

        let exported = run_export(&store, "acme").unwrap();
        assert_eq!(exported["incomeStatement"]["netIncome"], Value::Null);
    }

    #[test]
    fn test_clear_resets_every_field_to_zero() {
        let (_dir, store) = temp_store();
        set(&store, "equity.current.capitalStock", "5000");
        set(&store, "incomeStatement.depreciation", "");

        let value = run_clear(&store, "acme").unwrap();
        assert_eq!(value["result"]["reconciliation"]["isCashFlowBalanced"], true);

        let stored = store.load("acme").unwrap().unwrap();
        assert_eq!(stored.financial_data, FinancialData::cleared());
    }

    #[test]
    fn test_show_and_export_create_missing_record() {
        let (_dir, store) = temp_store();

        let shown = run_show(&store, "fresh").unwrap();
        assert!(shown["warnings"].as_array().unwrap().is_empty());

        let exported = run_export(&store, "fresh").unwrap();
        assert_eq!(exported["currentAssets"]["prev"]["cash"], "0");
    }
}
