//! Indirect-method cash flow statement derivation.
//!
//! A [`FinancialData`] snapshot holds two balance sheets (prior and current
//! fiscal year), a single-period income statement and the prior-year profit
//! appropriation. [`derive`] maps it to a [`DerivedReport`]: balance-sheet
//! subtotals with balance checks, the operating / investing / financing
//! sections, and the cash reconciliation.

pub mod derivation;
pub mod error;
pub mod snapshot;
pub mod types;

#[cfg(feature = "form")]
pub mod form;

pub use derivation::{derive, derive_statement, DerivedReport};
pub use error::CashFlowError;
pub use snapshot::FinancialData;
pub use types::*;

/// Standard result type for all cash-flow operations
pub type CashFlowResult<T> = Result<T, CashFlowError>;
