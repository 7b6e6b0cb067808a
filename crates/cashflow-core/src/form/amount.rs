use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::CashFlowError;
use crate::types::{within_bounds, Entry};

/// Parse text typed into an amount field.
///
/// Blank text means "not entered". Thousands separators are ignored, and a
/// leading `△` or `▲` marks a negative amount as on printed statements.
/// Exponents, `NaN` and infinities are rejected, as is anything beyond
/// [`MAX_AMOUNT`](crate::types::MAX_AMOUNT) in magnitude.
pub fn parse_amount(field: &str, text: &str) -> Result<Entry, CashFlowError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || CashFlowError::InvalidAmount {
        field: field.to_string(),
        value: text.to_string(),
    };

    let (negative, digits) = match trimmed.strip_prefix(['△', '▲']) {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();

    let well_formed = !cleaned.is_empty()
        && cleaned
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')))
        && cleaned.chars().any(|c| c.is_ascii_digit());
    if !well_formed || (negative && cleaned.starts_with(['-', '+'])) {
        return Err(invalid());
    }

    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let value = Decimal::from_str(unsigned).map_err(|_| invalid())?;
    if !within_bounds(value) {
        return Err(CashFlowError::AmountOutOfRange {
            field: field.to_string(),
            value: text.to_string(),
        });
    }
    Ok(Some(if negative { -value } else { value }))
}
