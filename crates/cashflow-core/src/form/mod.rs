//! Field-level editing of a [`FinancialData`] snapshot.
//!
//! This is the layer that turns typed text into amounts. Anything that is
//! not a finite decimal is rejected here, so the derivation never sees it.

mod amount;
mod path;

pub use amount::parse_amount;
pub use path::{FieldPath, Period, Section};

use crate::error::CashFlowError;
use crate::snapshot::FinancialData;
use crate::types::{within_bounds, Entry, Money, PeriodPair};
use crate::CashFlowResult;

fn pick<T>(pair: &PeriodPair<T>, period: Option<Period>) -> &T {
    match period {
        Some(Period::Prev) => &pair.prev,
        _ => &pair.current,
    }
}

fn pick_mut<T>(pair: &mut PeriodPair<T>, period: Option<Period>) -> &mut T {
    match period {
        Some(Period::Prev) => &mut pair.prev,
        _ => &mut pair.current,
    }
}

/// Read the entry at `path`.
pub fn get_field(data: &FinancialData, path: &FieldPath) -> Entry {
    let p = path.period;
    let entry = match path.section {
        Section::CurrentAssets => pick(&data.current_assets, p).entry(path.field),
        Section::FixedAssets => pick(&data.fixed_assets, p).entry(path.field),
        Section::DeferredAssets => pick(&data.deferred_assets, p).entry(path.field),
        Section::CurrentLiabilities => pick(&data.current_liabilities, p).entry(path.field),
        Section::FixedLiabilities => pick(&data.fixed_liabilities, p).entry(path.field),
        Section::Equity => pick(&data.equity, p).entry(path.field),
        Section::IncomeStatement => data.income_statement.entry(path.field),
        Section::Appropriation => data.appropriation.entry(path.field),
    };
    entry.flatten()
}

fn entry_mut<'a>(data: &'a mut FinancialData, path: &FieldPath) -> CashFlowResult<&'a mut Entry> {
    let p = path.period;
    let slot = match path.section {
        Section::CurrentAssets => pick_mut(&mut data.current_assets, p).entry_mut(path.field),
        Section::FixedAssets => pick_mut(&mut data.fixed_assets, p).entry_mut(path.field),
        Section::DeferredAssets => pick_mut(&mut data.deferred_assets, p).entry_mut(path.field),
        Section::CurrentLiabilities => {
            pick_mut(&mut data.current_liabilities, p).entry_mut(path.field)
        }
        Section::FixedLiabilities => {
            pick_mut(&mut data.fixed_liabilities, p).entry_mut(path.field)
        }
        Section::Equity => pick_mut(&mut data.equity, p).entry_mut(path.field),
        Section::IncomeStatement => data.income_statement.entry_mut(path.field),
        Section::Appropriation => data.appropriation.entry_mut(path.field),
    };
    slot.ok_or_else(|| CashFlowError::UnknownField(path.to_string()))
}

/// Store an amount at `path`, returning the previous entry.
pub fn set_field(
    data: &mut FinancialData,
    path: &FieldPath,
    value: Money,
) -> CashFlowResult<Entry> {
    if !within_bounds(value) {
        return Err(CashFlowError::AmountOutOfRange {
            field: path.to_string(),
            value: value.to_string(),
        });
    }
    let slot = entry_mut(data, path)?;
    Ok(slot.replace(value))
}

/// Mark the entry at `path` as not entered, returning the previous entry.
pub fn clear_field(data: &mut FinancialData, path: &FieldPath) -> CashFlowResult<Entry> {
    let slot = entry_mut(data, path)?;
    Ok(slot.take())
}

/// Parse `path` and `text` and apply the edit. Blank text clears the field.
pub fn apply_input(data: &mut FinancialData, path: &str, text: &str) -> CashFlowResult<FieldPath> {
    let path: FieldPath = path.parse()?;
    match parse_amount(&path.to_string(), text)? {
        Some(value) => set_field(data, &path, value)?,
        None => clear_field(data, &path)?,
    };
    Ok(path)
}
