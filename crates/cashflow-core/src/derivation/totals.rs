use serde::Serialize;

use crate::snapshot::{
    CurrentAssetAmounts, CurrentLiabilityAmounts, EquityAmounts, FixedAssetAmounts,
    FixedLiabilityAmounts, ResolvedSnapshot,
};
use crate::types::{normalize_zero, Money, PeriodPair};

/// Balance-sheet subtotals and the balance check, per fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetTotals {
    pub total_current_assets: PeriodPair<Money>,
    pub total_fixed_assets: PeriodPair<Money>,
    pub deferred_assets: PeriodPair<Money>,
    pub total_assets: PeriodPair<Money>,
    pub total_current_liabilities: PeriodPair<Money>,
    pub total_fixed_liabilities: PeriodPair<Money>,
    pub total_liabilities: PeriodPair<Money>,
    pub total_equity: PeriodPair<Money>,
    pub total_liabilities_and_equity: PeriodPair<Money>,
    /// Exact equality of total assets and total liabilities plus equity.
    pub is_balanced: PeriodPair<bool>,
    /// Total assets minus total liabilities and equity. Zero when balanced.
    pub difference: PeriodPair<Money>,
}

impl BalanceSheetTotals {
    pub fn compute(snapshot: &ResolvedSnapshot) -> Self {
        let total_current_assets = snapshot.current_assets.map(current_assets_total);
        let total_fixed_assets = snapshot.fixed_assets.map(fixed_assets_total);
        let deferred_assets = snapshot.deferred_assets.map(|d| d.deferred_assets);
        let total_assets = PeriodPair::new(
            total_current_assets.prev + total_fixed_assets.prev + deferred_assets.prev,
            total_current_assets.current + total_fixed_assets.current + deferred_assets.current,
        );

        let total_current_liabilities = snapshot
            .current_liabilities
            .map(current_liabilities_total);
        let total_fixed_liabilities = snapshot.fixed_liabilities.map(fixed_liabilities_total);
        let total_liabilities = PeriodPair::new(
            total_current_liabilities.prev + total_fixed_liabilities.prev,
            total_current_liabilities.current + total_fixed_liabilities.current,
        );

        let total_equity = snapshot.equity.map(equity_total);
        let total_liabilities_and_equity = PeriodPair::new(
            total_liabilities.prev + total_equity.prev,
            total_liabilities.current + total_equity.current,
        );

        let is_balanced = PeriodPair::new(
            total_assets.prev == total_liabilities_and_equity.prev,
            total_assets.current == total_liabilities_and_equity.current,
        );
        let difference = PeriodPair::new(
            total_assets.prev - total_liabilities_and_equity.prev,
            total_assets.current - total_liabilities_and_equity.current,
        );

        BalanceSheetTotals {
            total_current_assets: normalized(total_current_assets),
            total_fixed_assets: normalized(total_fixed_assets),
            deferred_assets: normalized(deferred_assets),
            total_assets: normalized(total_assets),
            total_current_liabilities: normalized(total_current_liabilities),
            total_fixed_liabilities: normalized(total_fixed_liabilities),
            total_liabilities: normalized(total_liabilities),
            total_equity: normalized(total_equity),
            total_liabilities_and_equity: normalized(total_liabilities_and_equity),
            is_balanced,
            difference: normalized(difference),
        }
    }

    /// Both fiscal years balance.
    pub fn both_balanced(&self) -> bool {
        self.is_balanced.prev && self.is_balanced.current
    }
}

fn normalized(pair: PeriodPair<Money>) -> PeriodPair<Money> {
    pair.map(|v| normalize_zero(*v))
}

fn current_assets_total(ca: &CurrentAssetAmounts) -> Money {
    ca.cash
        + ca.receivables
        + ca.inventory
        + ca.securities
        + ca.short_term_loans
        + ca.deferred_tax_assets
        + ca.other_current_assets
}

fn fixed_assets_total(fa: &FixedAssetAmounts) -> Money {
    fa.tangible_assets
        + fa.intangible_assets
        + fa.investment_securities
        + fa.long_term_loans
        + fa.other_fixed_assets
        + fa.deferred_tax_assets
}

fn current_liabilities_total(cl: &CurrentLiabilityAmounts) -> Money {
    cl.accounts_payable
        + cl.short_term_borrowings
        + cl.income_tax_payable
        + cl.deferred_tax_liabilities
        + cl.bonus_reserve
        + cl.retirement_benefits
        + cl.other_current_liabilities
}

fn fixed_liabilities_total(fl: &FixedLiabilityAmounts) -> Money {
    fl.long_term_borrowings
        + fl.deferred_tax_liabilities
        + fl.retirement_benefits
        + fl.other_fixed_liabilities
}

fn equity_total(eq: &EquityAmounts) -> Money {
    eq.capital_stock + eq.retained_earnings + eq.treasury_stock
}
