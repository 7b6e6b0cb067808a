use napi::Result as NapiResult;
use napi_derive::napi;

use cashflow_core::form::{self, FieldPath};
use cashflow_core::FinancialData;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the statement of cash flows from a snapshot. Missing fields count
/// as blank; the result is the standard output envelope.
#[napi]
pub fn derive_cash_flow(input_json: String) -> NapiResult<String> {
    let input = FinancialData::from_json(&input_json).map_err(to_napi_error)?;
    let output = cashflow_core::derive_statement(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// The snapshot a fresh form starts from: every field entered as zero.
#[napi]
pub fn default_financial_data() -> NapiResult<String> {
    serde_json::to_string(&FinancialData::cleared()).map_err(to_napi_error)
}

/// Apply typed text to one field and return the updated snapshot. Blank
/// text clears the field.
#[napi]
pub fn set_financial_field(data_json: String, path: String, value: String) -> NapiResult<String> {
    let mut data = FinancialData::from_json(&data_json).map_err(to_napi_error)?;
    form::apply_input(&mut data, &path, &value).map_err(to_napi_error)?;
    serde_json::to_string(&data).map_err(to_napi_error)
}

#[napi]
pub fn list_financial_fields() -> NapiResult<String> {
    let paths: Vec<String> = FieldPath::all().iter().map(ToString::to_string).collect();
    serde_json::to_string(&paths).map_err(to_napi_error)
}
