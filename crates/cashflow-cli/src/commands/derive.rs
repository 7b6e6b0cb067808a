use clap::Args;
use serde_json::Value;
use tracing::info;

use cashflow_core::{derive_statement, FinancialData};

use crate::input;

/// Arguments for a one-off derivation
#[derive(Args)]
pub struct DeriveArgs {
    /// Path to a JSON or YAML snapshot (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_derive(args: &DeriveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data: FinancialData = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::file::read_piped()? {
        data
    } else {
        return Err("--input <file.json|file.yaml> or stdin required for derive".into());
    };

    let output = derive_statement(&data);
    info!(
        entered = data.entered_count(),
        balanced = output.result.is_consistent(),
        "derived cash flow statement"
    );
    Ok(serde_json::to_value(output)?)
}
