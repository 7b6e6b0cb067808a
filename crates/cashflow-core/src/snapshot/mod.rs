//! The input snapshot: two balance sheets, the income statement and the
//! prior-year profit appropriation.
//!
//! Every leaf is an [`Entry`](crate::types::Entry), so a snapshot remembers which amounts were
//! entered and which were left blank. Blank entries count as zero once the
//! snapshot is resolved; nothing downstream of [`FinancialData::resolve`]
//! sees an `Option`.

use serde::{Deserialize, Serialize};

use crate::types::{within_bounds, Entry, PeriodPair};
use crate::CashFlowResult;

/// Defines an input record with optional leaves, its resolved counterpart,
/// and key-based access used by the form layer.
macro_rules! ledger_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $resolved:ident {
            $( $(#[$fmeta:meta])* $field:ident : $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(
                    rename = $key,
                    default,
                    deserialize_with = "crate::types::deserialize_entry"
                )]
                pub $field: $crate::types::Entry,
            )+
        }

        #[doc = concat!("[`", stringify!($name), "`] with blank entries resolved to zero.")]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $resolved {
            $( pub $field: $crate::types::Money, )+
        }

        impl $name {
            /// Field keys as they appear in serialized snapshots.
            pub const FIELDS: &'static [&'static str] = &[$($key),+];

            /// Every field entered as an explicit zero.
            pub fn zeroed() -> Self {
                Self {
                    $( $field: Some(::rust_decimal::Decimal::ZERO), )+
                }
            }

            /// Blank entries become zero and oversized ones are capped.
            pub fn resolve(&self) -> $resolved {
                $resolved {
                    $(
                        $field: self
                            .$field
                            .map_or(::rust_decimal::Decimal::ZERO, $crate::types::bounded),
                    )+
                }
            }

            /// The entry stored under a serialized key.
            pub fn entry(&self, key: &str) -> Option<$crate::types::Entry> {
                match key {
                    $( $key => Some(self.$field), )+
                    _ => None,
                }
            }

            pub fn entry_mut(&mut self, key: &str) -> Option<&mut $crate::types::Entry> {
                match key {
                    $( $key => Some(&mut self.$field), )+
                    _ => None,
                }
            }

            /// Every entry in declaration order.
            pub fn entries(&self) -> Vec<$crate::types::Entry> {
                vec![$( self.$field ),+]
            }
        }
    };
}

mod balance_sheet;
mod income;

pub use balance_sheet::*;
pub use income::*;

/// Complete input for one derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(default)]
    pub current_assets: PeriodPair<CurrentAssets>,
    #[serde(default)]
    pub fixed_assets: PeriodPair<FixedAssets>,
    #[serde(default)]
    pub deferred_assets: PeriodPair<DeferredAssets>,
    #[serde(default)]
    pub current_liabilities: PeriodPair<CurrentLiabilities>,
    #[serde(default)]
    pub fixed_liabilities: PeriodPair<FixedLiabilities>,
    #[serde(default)]
    pub equity: PeriodPair<Equity>,
    #[serde(default)]
    pub income_statement: IncomeStatement,
    #[serde(default)]
    pub appropriation: Appropriation,
}

/// A snapshot with every blank entry resolved to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedSnapshot {
    pub current_assets: PeriodPair<CurrentAssetAmounts>,
    pub fixed_assets: PeriodPair<FixedAssetAmounts>,
    pub deferred_assets: PeriodPair<DeferredAssetAmounts>,
    pub current_liabilities: PeriodPair<CurrentLiabilityAmounts>,
    pub fixed_liabilities: PeriodPair<FixedLiabilityAmounts>,
    pub equity: PeriodPair<EquityAmounts>,
    pub income_statement: IncomeStatementAmounts,
    pub appropriation: AppropriationAmounts,
}

impl FinancialData {
    /// Parse a snapshot from JSON. Amounts may be numbers or decimal
    /// strings; missing sections and fields are blank.
    pub fn from_json(text: &str) -> CashFlowResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The snapshot a fresh form starts from, and what "clear" resets to:
    /// every field entered as zero.
    pub fn cleared() -> Self {
        Self {
            current_assets: PeriodPair::new(CurrentAssets::zeroed(), CurrentAssets::zeroed()),
            fixed_assets: PeriodPair::new(FixedAssets::zeroed(), FixedAssets::zeroed()),
            deferred_assets: PeriodPair::new(DeferredAssets::zeroed(), DeferredAssets::zeroed()),
            current_liabilities: PeriodPair::new(
                CurrentLiabilities::zeroed(),
                CurrentLiabilities::zeroed(),
            ),
            fixed_liabilities: PeriodPair::new(
                FixedLiabilities::zeroed(),
                FixedLiabilities::zeroed(),
            ),
            equity: PeriodPair::new(Equity::zeroed(), Equity::zeroed()),
            income_statement: IncomeStatement::zeroed(),
            appropriation: Appropriation::zeroed(),
        }
    }

    /// Resolve blank entries to zero. This is the only place the
    /// default-if-absent rule is applied. Entries beyond
    /// [`MAX_AMOUNT`](crate::types::MAX_AMOUNT) are capped, which only a
    /// snapshot built in code can hold.
    pub fn resolve(&self) -> ResolvedSnapshot {
        ResolvedSnapshot {
            current_assets: self.current_assets.map(CurrentAssets::resolve),
            fixed_assets: self.fixed_assets.map(FixedAssets::resolve),
            deferred_assets: self.deferred_assets.map(DeferredAssets::resolve),
            current_liabilities: self.current_liabilities.map(CurrentLiabilities::resolve),
            fixed_liabilities: self.fixed_liabilities.map(FixedLiabilities::resolve),
            equity: self.equity.map(Equity::resolve),
            income_statement: self.income_statement.resolve(),
            appropriation: self.appropriation.resolve(),
        }
    }

    /// Every leaf, prior year before current year within each section.
    pub fn entries(&self) -> Vec<Entry> {
        fn both<T>(pair: &PeriodPair<T>, entries: fn(&T) -> Vec<Entry>) -> Vec<Entry> {
            let mut all = entries(&pair.prev);
            all.extend(entries(&pair.current));
            all
        }

        let mut all = both(&self.current_assets, CurrentAssets::entries);
        all.extend(both(&self.fixed_assets, FixedAssets::entries));
        all.extend(both(&self.deferred_assets, DeferredAssets::entries));
        all.extend(both(&self.current_liabilities, CurrentLiabilities::entries));
        all.extend(both(&self.fixed_liabilities, FixedLiabilities::entries));
        all.extend(both(&self.equity, Equity::entries));
        all.extend(self.income_statement.entries());
        all.extend(self.appropriation.entries());
        all
    }

    /// Number of leaves that hold an entered amount.
    pub fn entered_count(&self) -> usize {
        self.entries().iter().filter(|e| e.is_some()).count()
    }

    /// Number of leaves beyond `MAX_AMOUNT`, which `resolve` caps.
    pub fn out_of_range_count(&self) -> usize {
        self.entries()
            .into_iter()
            .flatten()
            .filter(|v| !within_bounds(*v))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cleared_snapshot_is_all_entered_zero() {
        let data = FinancialData::cleared();
        assert_eq!(data.entered_count(), 67);
        assert_eq!(data.resolve(), ResolvedSnapshot::default());
    }

    #[test]
    fn test_default_snapshot_has_nothing_entered() {
        let data = FinancialData::default();
        assert_eq!(data.entered_count(), 0);
        assert_eq!(data.resolve(), ResolvedSnapshot::default());
    }

    #[test]
    fn test_deserialize_uses_camel_case_keys_and_numbers() {
        let json = r#"{
            "currentAssets": {
                "prev": { "cash": 1000, "shortTermLoans": 25 },
                "current": { "cash": "1200.50", "inventory": 0 }
            },
            "incomeStatement": { "netIncome": -40 },
            "appropriation": { "executiveBonuses": 5 }
        }"#;
        let data: FinancialData = serde_json::from_str(json).unwrap();

        assert_eq!(data.current_assets.prev.cash, Some(dec!(1000)));
        assert_eq!(data.current_assets.prev.short_term_loans, Some(dec!(25)));
        assert_eq!(data.current_assets.current.cash, Some(dec!(1200.50)));
        assert_eq!(data.current_assets.current.inventory, Some(dec!(0)));
        assert_eq!(data.income_statement.net_income, Some(dec!(-40)));
        assert_eq!(data.appropriation.executive_bonuses, Some(dec!(5)));
        assert_eq!(data.entered_count(), 6);
    }

    #[test]
    fn test_missing_and_null_leaves_are_not_entered() {
        let json = r#"{ "equity": { "prev": { "capitalStock": null } } }"#;
        let data: FinancialData = serde_json::from_str(json).unwrap();

        assert_eq!(data.equity.prev.capital_stock, None);
        assert_eq!(data.equity.current, Equity::default());
        assert_eq!(data.resolve().equity.prev.capital_stock, dec!(0));
    }

    #[test]
    fn test_json_round_trip_preserves_blank_and_zero() {
        let mut data = FinancialData::cleared();
        data.fixed_assets.current.intangible_assets = None;
        data.fixed_liabilities.prev.long_term_borrowings = Some(dec!(1250.75));

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"fixedLiabilities\""));
        assert!(json.contains("\"longTermBorrowings\""));

        let back: FinancialData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
        assert_eq!(back.fixed_assets.current.intangible_assets, None);
        assert_eq!(back.fixed_assets.prev.intangible_assets, Some(dec!(0)));
    }

    #[test]
    fn test_field_keys_match_serialized_names() {
        let value = serde_json::to_value(FinancialData::cleared()).unwrap();
        let prev = &value["currentLiabilities"]["prev"];
        for key in CurrentLiabilities::FIELDS {
            assert!(prev.get(key).is_some(), "missing {key}");
        }
        let income = &value["incomeStatement"];
        for key in IncomeStatement::FIELDS {
            assert!(income.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_from_json_reports_malformed_input() {
        let data = FinancialData::from_json(r#"{"appropriation": {"dividends": "12"}}"#).unwrap();
        assert_eq!(data.appropriation.dividends, Some(dec!(12)));

        let err = FinancialData::from_json(r#"{"appropriation": {"dividends": "twelve"}}"#)
            .unwrap_err();
        assert!(matches!(err, crate::CashFlowError::SerializationError(_)));
    }

    #[test]
    fn test_deserialize_rejects_amounts_beyond_max() {
        let max = rust_decimal::Decimal::MAX;
        let json = format!(r#"{{"currentAssets": {{"prev": {{"cash": "{max}"}}}}}}"#);
        let err = FinancialData::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("exceeds"), "{err}");

        let json = format!(r#"{{"currentAssets": {{"current": {{"cash": "-{max}"}}}}}}"#);
        assert!(FinancialData::from_json(&json).is_err());

        let data = FinancialData::from_json(
            r#"{"equity": {"prev": {"capitalStock": "-1000000000000000000000000"}}}"#,
        )
        .unwrap();
        assert_eq!(data.equity.prev.capital_stock, Some(-crate::types::MAX_AMOUNT));
    }

    #[test]
    fn test_resolve_caps_leaves_built_in_code() {
        let mut data = FinancialData::cleared();
        data.current_assets.prev.cash = Some(rust_decimal::Decimal::MAX);
        data.current_assets.current.cash = Some(rust_decimal::Decimal::MIN);
        data.current_assets.prev.receivables = Some(dec!(5));

        assert_eq!(data.out_of_range_count(), 2);
        let resolved = data.resolve();
        assert_eq!(resolved.current_assets.prev.cash, crate::types::MAX_AMOUNT);
        assert_eq!(resolved.current_assets.current.cash, -crate::types::MAX_AMOUNT);
        assert_eq!(resolved.current_assets.prev.receivables, dec!(5));
    }
}
