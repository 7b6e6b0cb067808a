//! Derivation of the statement of cash flows from a [`FinancialData`]
//! snapshot.
//!
//! [`derive`] is a pure function: the same snapshot always yields an equal
//! report, and the snapshot is never modified. [`derive_statement`] wraps the
//! report in the standard output envelope with human-readable warnings for
//! every failed reconciliation.

use serde::Serialize;
use std::time::Instant;
use tracing::debug;

use crate::snapshot::{FinancialData, ResolvedSnapshot};
use crate::types::{normalize_zero, with_metadata, ComputationOutput, Money, MAX_AMOUNT};

mod activities;
mod totals;

pub use activities::{
    CashFlowLine, CashFlowSection, FinancingActivities, InvestingActivities, LineKind,
    OperatingActivities,
};
pub use totals::BalanceSheetTotals;

/// Cash movement between the two balance sheets checked against the three
/// activity totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashReconciliation {
    pub opening_cash: Money,
    pub closing_cash: Money,
    /// Closing cash minus opening cash
    pub cash_increase: Money,
    /// Operating + investing + financing totals
    pub net_cash_flow: Money,
    /// `cash_increase - net_cash_flow`. Zero when the statement closes.
    pub difference: Money,
    pub is_cash_flow_balanced: bool,
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedReport {
    pub balance_sheet: BalanceSheetTotals,
    pub operating: OperatingActivities,
    pub investing: InvestingActivities,
    pub financing: FinancingActivities,
    /// All three sections in presentation order
    pub lines: Vec<CashFlowLine>,
    pub reconciliation: CashReconciliation,
}

impl DerivedReport {
    /// Both balance sheets balance and the cash flows close.
    pub fn is_consistent(&self) -> bool {
        self.balance_sheet.both_balanced() && self.reconciliation.is_cash_flow_balanced
    }
}

/// Derive balance-sheet totals, the three cash-flow sections and the cash
/// reconciliation. Blank entries count as zero.
pub fn derive(data: &FinancialData) -> DerivedReport {
    let snapshot = data.resolve();

    let balance_sheet = BalanceSheetTotals::compute(&snapshot);
    let operating = OperatingActivities::compute(&snapshot);
    let investing = InvestingActivities::compute(&snapshot);
    let financing = FinancingActivities::compute(&snapshot);

    let opening_cash = normalize_zero(snapshot.current_assets.prev.cash);
    let closing_cash = normalize_zero(snapshot.current_assets.current.cash);
    let cash_increase = normalize_zero(closing_cash - opening_cash);
    let net_cash_flow = normalize_zero(operating.total + investing.total + financing.total);
    let reconciliation = CashReconciliation {
        opening_cash,
        closing_cash,
        cash_increase,
        net_cash_flow,
        difference: normalize_zero(cash_increase - net_cash_flow),
        is_cash_flow_balanced: cash_increase == net_cash_flow,
    };

    let mut lines = operating.lines();
    lines.extend(investing.lines());
    lines.extend(financing.lines());

    DerivedReport {
        balance_sheet,
        operating,
        investing,
        financing,
        lines,
        reconciliation,
    }
}

/// Movement in retained earnings not explained by net income less the
/// appropriation paid out (dividends and directors' bonuses).
///
/// When both balance sheets balance, this equals the cash reconciliation
/// difference: the statement closes exactly when retained earnings roll
/// forward from net income.
pub fn retained_earnings_gap(snapshot: &ResolvedSnapshot) -> Money {
    let eq = &snapshot.equity;
    let movement = eq.current.retained_earnings - eq.prev.retained_earnings;
    let explained = snapshot.income_statement.net_income
        - snapshot.appropriation.dividends
        - snapshot.appropriation.executive_bonuses;
    normalize_zero(movement - explained)
}

/// Derive the report and wrap it with methodology, the input snapshot and
/// reconciliation warnings.
pub fn derive_statement(data: &FinancialData) -> ComputationOutput<DerivedReport> {
    let start = Instant::now();
    let report = derive(data);
    let warnings = reconciliation_warnings(data, &report);

    for warning in &warnings {
        debug!(%warning, "reconciliation check failed");
    }

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Indirect-method statement of cash flows from comparative balance sheets",
        data,
        warnings,
        elapsed,
        report,
    )
}

fn reconciliation_warnings(data: &FinancialData, report: &DerivedReport) -> Vec<String> {
    let mut warnings = Vec::new();
    let bs = &report.balance_sheet;

    let capped = data.out_of_range_count();
    if capped > 0 {
        warnings.push(format!(
            "{capped} entered amount(s) exceed {MAX_AMOUNT} in magnitude and were capped"
        ));
    }

    if !bs.is_balanced.prev {
        warnings.push(format!(
            "Prior year balance sheet does not balance: assets {} vs liabilities and equity {} (difference {})",
            bs.total_assets.prev, bs.total_liabilities_and_equity.prev, bs.difference.prev
        ));
    }
    if !bs.is_balanced.current {
        warnings.push(format!(
            "Current year balance sheet does not balance: assets {} vs liabilities and equity {} (difference {})",
            bs.total_assets.current, bs.total_liabilities_and_equity.current, bs.difference.current
        ));
    }

    let rec = &report.reconciliation;
    if !rec.is_cash_flow_balanced {
        warnings.push(format!(
            "Cash flows do not reconcile: cash increased by {} but activities total {} (difference {})",
            rec.cash_increase, rec.net_cash_flow, rec.difference
        ));

        if bs.both_balanced() {
            let gap = retained_earnings_gap(&data.resolve());
            if !gap.is_zero() {
                warnings.push(format!(
                    "Retained earnings movement differs from net income less dividends and directors' bonuses by {gap}"
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Two balanced years where retained earnings roll forward from net
    /// income, so the statement closes.
    fn closing_snapshot() -> FinancialData {
        let mut data = FinancialData::cleared();

        let ca = &mut data.current_assets;
        ca.prev.cash = Some(dec!(1000));
        ca.current.cash = Some(dec!(1180));
        ca.prev.receivables = Some(dec!(400));
        ca.current.receivables = Some(dec!(450));
        ca.prev.inventory = Some(dec!(300));
        ca.current.inventory = Some(dec!(280));

        let fa = &mut data.fixed_assets;
        fa.prev.tangible_assets = Some(dec!(2000));
        fa.current.tangible_assets = Some(dec!(2100));

        let cl = &mut data.current_liabilities;
        cl.prev.accounts_payable = Some(dec!(350));
        cl.current.accounts_payable = Some(dec!(370));
        cl.prev.income_tax_payable = Some(dec!(50));
        cl.current.income_tax_payable = Some(dec!(60));

        let fl = &mut data.fixed_liabilities;
        fl.prev.long_term_borrowings = Some(dec!(1300));
        fl.current.long_term_borrowings = Some(dec!(1250));

        let eq = &mut data.equity;
        eq.prev.capital_stock = Some(dec!(1000));
        eq.current.capital_stock = Some(dec!(1100));
        eq.prev.retained_earnings = Some(dec!(1000));
        eq.current.retained_earnings = Some(dec!(1230));

        let is = &mut data.income_statement;
        is.pretax_income = Some(dec!(400));
        is.net_income = Some(dec!(280));
        is.depreciation = Some(dec!(150));

        data.appropriation.dividends = Some(dec!(40));
        data.appropriation.executive_bonuses = Some(dec!(10));

        data
    }

    #[test]
    fn test_closing_snapshot_is_consistent() {
        let report = derive(&closing_snapshot());

        assert_eq!(report.balance_sheet.total_assets.prev, dec!(3700));
        assert_eq!(report.balance_sheet.total_assets.current, dec!(4010));
        assert!(report.balance_sheet.both_balanced());

        // 400 + 150 - 50 + 20 + 20 - 10 = 530; taxes 280 - 400 + 10 = -110
        assert_eq!(report.operating.subtotal1, dec!(530));
        assert_eq!(report.operating.income_taxes_paid, dec!(-110));
        assert_eq!(report.operating.total, dec!(420));
        // -(100) - 150 depreciation
        assert_eq!(report.investing.total, dec!(-250));
        // -50 + 100 - 40
        assert_eq!(report.financing.total, dec!(10));

        assert_eq!(report.reconciliation.cash_increase, dec!(180));
        assert_eq!(report.reconciliation.net_cash_flow, dec!(180));
        assert!(report.reconciliation.is_cash_flow_balanced);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_lines_cover_all_sections_in_order() {
        let report = derive(&closing_snapshot());
        assert_eq!(report.lines.len(), 23 + 6 + 5);
        assert_eq!(report.lines[0].section, CashFlowSection::Operating);
        assert_eq!(report.lines[23].section, CashFlowSection::Investing);
        assert_eq!(report.lines[29].section, CashFlowSection::Financing);

        let totals: Vec<Money> = report
            .lines
            .iter()
            .filter(|l| l.kind == LineKind::Total)
            .map(|l| l.amount)
            .collect();
        assert_eq!(totals, vec![dec!(420), dec!(-250), dec!(10)]);
    }

    #[test]
    fn test_statement_without_warnings_when_consistent() {
        let out = derive_statement(&closing_snapshot());
        assert!(out.warnings.is_empty(), "unexpected: {:?}", out.warnings);
        assert!(out.methodology.contains("Indirect-method"));
        assert_eq!(out.result, derive(&closing_snapshot()));
    }

    #[test]
    fn test_retained_earnings_gap_explains_unclosed_statement() {
        let mut data = closing_snapshot();
        // Lift retained earnings and cash together: still balanced, but the
        // extra 25 is not explained by net income.
        data.equity.current.retained_earnings = Some(dec!(1255));
        data.current_assets.current.cash = Some(dec!(1205));

        let report = derive(&data);
        assert!(report.balance_sheet.both_balanced());
        assert!(!report.reconciliation.is_cash_flow_balanced);
        assert_eq!(report.reconciliation.difference, dec!(25));
        assert_eq!(retained_earnings_gap(&data.resolve()), dec!(25));

        let out = derive_statement(&data);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[1].contains("Retained earnings"));
    }

    #[test]
    fn test_unbalanced_years_each_get_a_warning() {
        let mut data = FinancialData::cleared();
        data.current_assets.prev.cash = Some(dec!(10));
        data.current_assets.current.cash = Some(dec!(20));

        let out = derive_statement(&data);
        assert_eq!(out.warnings.len(), 3);
        assert!(out.warnings[0].starts_with("Prior year"));
        assert!(out.warnings[1].starts_with("Current year"));
        assert!(out.warnings[2].starts_with("Cash flows do not reconcile"));
    }

    #[test]
    fn test_oversized_leaves_are_capped_with_a_warning() {
        let mut data = FinancialData::cleared();
        data.current_assets.prev.cash = Some(Decimal::MAX);
        data.current_assets.prev.receivables = Some(Decimal::MAX);
        data.current_assets.current.cash = Some(Decimal::MIN);

        let out = derive_statement(&data);
        let report = &out.result;
        assert_eq!(report.balance_sheet.total_assets.prev, MAX_AMOUNT * dec!(2));
        assert_eq!(report.reconciliation.opening_cash, MAX_AMOUNT);
        assert_eq!(report.reconciliation.cash_increase, MAX_AMOUNT * dec!(-2));
        assert!(out.warnings[0].starts_with("3 entered amount(s) exceed"));
    }

    #[test]
    fn test_reconciliation_difference_is_positive_zero_when_closed() {
        let report = derive(&FinancialData::default());
        assert_eq!(report.reconciliation.difference, Decimal::ZERO);
        assert!(report.reconciliation.difference.is_sign_positive());
    }
}
