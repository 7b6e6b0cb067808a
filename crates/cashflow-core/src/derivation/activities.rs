use serde::Serialize;

use crate::snapshot::ResolvedSnapshot;
use crate::types::{normalize_zero, Money};

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// The three sections of the statement of cash flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CashFlowSection {
    Operating,
    Investing,
    Financing,
}

/// Whether a line is an adjustment or a sum of the lines above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    Item,
    Subtotal,
    Total,
}

/// One named line of the statement, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowLine {
    pub section: CashFlowSection,
    pub kind: LineKind,
    /// Serialized field name of the amount within its section
    pub key: &'static str,
    pub label: &'static str,
    pub amount: Money,
}

impl CashFlowLine {
    fn new(
        section: CashFlowSection,
        kind: LineKind,
        key: &'static str,
        label: &'static str,
        amount: Money,
    ) -> Self {
        Self {
            section,
            kind,
            key,
            label,
            amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Operating activities
// ---------------------------------------------------------------------------

/// Cash flows from operating activities, indirect method.
///
/// Asset increases consume cash and are reported negative; liability
/// increases free cash and are reported positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingActivities {
    pub pretax_income: Money,
    pub depreciation: Money,
    pub retirement_benefits_change: Money,
    pub bonus_reserve_change: Money,
    /// Interest income backed out of pretax income
    pub interest_income_adjustment: Money,
    /// Interest expense added back to pretax income
    pub interest_expense: Money,
    pub securities_gain_loss: Money,
    pub fixed_asset_gain_loss: Money,
    pub treasury_stock_change: Money,
    pub receivables_change: Money,
    pub inventory_change: Money,
    pub other_current_assets_change: Money,
    pub deferred_assets_change: Money,
    pub accounts_payable_change: Money,
    pub other_current_liabilities_change: Money,
    pub other_fixed_liabilities_change: Money,
    pub executive_bonuses_adjustment: Money,
    pub subtotal1: Money,
    pub interest_received: Money,
    pub interest_paid: Money,
    pub income_taxes_paid: Money,
    pub subtotal2: Money,
    pub total: Money,
}

impl OperatingActivities {
    pub fn compute(s: &ResolvedSnapshot) -> Self {
        let ca = &s.current_assets;
        let fa = &s.fixed_assets;
        let da = &s.deferred_assets;
        let cl = &s.current_liabilities;
        let fl = &s.fixed_liabilities;
        let eq = &s.equity;
        let is = &s.income_statement;
        let ap = &s.appropriation;

        let pretax_income = normalize_zero(is.pretax_income);
        let depreciation = normalize_zero(is.depreciation);
        let retirement_benefits_change = normalize_zero(
            (cl.current.retirement_benefits - cl.prev.retirement_benefits)
                + (fl.current.retirement_benefits - fl.prev.retirement_benefits),
        );
        let bonus_reserve_change =
            normalize_zero(cl.current.bonus_reserve - cl.prev.bonus_reserve);
        let interest_income_adjustment = normalize_zero(-is.interest_income);
        let interest_expense = normalize_zero(is.interest_expense);
        let securities_gain_loss = normalize_zero(is.securities_loss - is.securities_gain);
        let fixed_asset_gain_loss = normalize_zero(is.fixed_asset_loss - is.fixed_asset_gain);
        let treasury_stock_change =
            normalize_zero(eq.current.treasury_stock - eq.prev.treasury_stock);

        // Working capital: assets flip sign, liabilities do not.
        let receivables_change = normalize_zero(-(ca.current.receivables - ca.prev.receivables));
        let inventory_change = normalize_zero(-(ca.current.inventory - ca.prev.inventory));
        let other_current_assets_change =
            normalize_zero(-(ca.current.other_current_assets - ca.prev.other_current_assets));
        let deferred_assets_change =
            normalize_zero(-(da.current.deferred_assets - da.prev.deferred_assets));
        let accounts_payable_change =
            normalize_zero(cl.current.accounts_payable - cl.prev.accounts_payable);
        let other_current_liabilities_change = normalize_zero(
            cl.current.other_current_liabilities - cl.prev.other_current_liabilities,
        );
        let other_fixed_liabilities_change =
            normalize_zero(fl.current.other_fixed_liabilities - fl.prev.other_fixed_liabilities);
        let executive_bonuses_adjustment = normalize_zero(-ap.executive_bonuses);

        let subtotal1 = normalize_zero(
            pretax_income
                + depreciation
                + retirement_benefits_change
                + bonus_reserve_change
                + interest_income_adjustment
                + interest_expense
                + securities_gain_loss
                + fixed_asset_gain_loss
                + treasury_stock_change
                + receivables_change
                + inventory_change
                + other_current_assets_change
                + deferred_assets_change
                + accounts_payable_change
                + other_current_liabilities_change
                + other_fixed_liabilities_change
                + executive_bonuses_adjustment,
        );

        let interest_received = normalize_zero(is.interest_income);
        let interest_paid = normalize_zero(-is.interest_expense);
        // Tax expense (net minus pretax) adjusted for deferred-tax and
        // tax-payable movements.
        let income_taxes_paid = normalize_zero(
            is.net_income - is.pretax_income
                - (ca.current.deferred_tax_assets - ca.prev.deferred_tax_assets)
                - (fa.current.deferred_tax_assets - fa.prev.deferred_tax_assets)
                + (cl.current.deferred_tax_liabilities - cl.prev.deferred_tax_liabilities)
                + (fl.current.deferred_tax_liabilities - fl.prev.deferred_tax_liabilities)
                + (cl.current.income_tax_payable - cl.prev.income_tax_payable),
        );
        let subtotal2 = normalize_zero(interest_received + interest_paid + income_taxes_paid);
        let total = normalize_zero(subtotal1 + subtotal2);

        OperatingActivities {
            pretax_income,
            depreciation,
            retirement_benefits_change,
            bonus_reserve_change,
            interest_income_adjustment,
            interest_expense,
            securities_gain_loss,
            fixed_asset_gain_loss,
            treasury_stock_change,
            receivables_change,
            inventory_change,
            other_current_assets_change,
            deferred_assets_change,
            accounts_payable_change,
            other_current_liabilities_change,
            other_fixed_liabilities_change,
            executive_bonuses_adjustment,
            subtotal1,
            interest_received,
            interest_paid,
            income_taxes_paid,
            subtotal2,
            total,
        }
    }

    pub fn lines(&self) -> Vec<CashFlowLine> {
        use CashFlowSection::Operating;
        use LineKind::{Item, Subtotal, Total};

        vec![
            CashFlowLine::new(
                Operating,
                Item,
                "pretaxIncome",
                "Income before income taxes",
                self.pretax_income,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "depreciation",
                "Depreciation and amortization",
                self.depreciation,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "retirementBenefitsChange",
                "Increase (decrease) in provision for retirement benefits",
                self.retirement_benefits_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "bonusReserveChange",
                "Increase (decrease) in provision for bonuses",
                self.bonus_reserve_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "interestIncomeAdjustment",
                "Interest and dividend income",
                self.interest_income_adjustment,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "interestExpense",
                "Interest expense",
                self.interest_expense,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "securitiesGainLoss",
                "Loss (gain) on sale and valuation of securities",
                self.securities_gain_loss,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "fixedAssetGainLoss",
                "Loss (gain) on sale and disposal of fixed assets",
                self.fixed_asset_gain_loss,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "treasuryStockChange",
                "Change in deferred gains or losses on hedges",
                self.treasury_stock_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "receivablesChange",
                "Decrease (increase) in trade receivables",
                self.receivables_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "inventoryChange",
                "Decrease (increase) in inventories",
                self.inventory_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "otherCurrentAssetsChange",
                "Decrease (increase) in other current assets",
                self.other_current_assets_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "deferredAssetsChange",
                "Decrease (increase) in deferred assets",
                self.deferred_assets_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "accountsPayableChange",
                "Increase (decrease) in trade payables",
                self.accounts_payable_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "otherCurrentLiabilitiesChange",
                "Increase (decrease) in other current liabilities",
                self.other_current_liabilities_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "otherFixedLiabilitiesChange",
                "Increase (decrease) in other fixed liabilities",
                self.other_fixed_liabilities_change,
            ),
            CashFlowLine::new(
                Operating,
                Item,
                "executiveBonusesAdjustment",
                "Bonuses paid to directors",
                self.executive_bonuses_adjustment,
            ),
            CashFlowLine::new(Operating, Subtotal, "subtotal1", "Subtotal", self.subtotal1),
            CashFlowLine::new(
                Operating,
                Item,
                "interestReceived",
                "Interest and dividends received",
                self.interest_received,
            ),
            CashFlowLine::new(Operating, Item, "interestPaid", "Interest paid", self.interest_paid),
            CashFlowLine::new(
                Operating,
                Item,
                "incomeTaxesPaid",
                "Income taxes paid",
                self.income_taxes_paid,
            ),
            CashFlowLine::new(Operating, Subtotal, "subtotal2", "Subtotal", self.subtotal2),
            CashFlowLine::new(
                Operating,
                Total,
                "total",
                "Net cash provided by (used in) operating activities",
                self.total,
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Investing activities
// ---------------------------------------------------------------------------

/// Cash flows from investing activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestingActivities {
    pub tangible_assets_change: Money,
    pub intangible_assets_change: Money,
    pub securities_change: Money,
    pub loans_change: Money,
    pub other_fixed_assets_change: Money,
    pub total: Money,
}

impl InvestingActivities {
    pub fn compute(s: &ResolvedSnapshot) -> Self {
        let ca = &s.current_assets;
        let fa = &s.fixed_assets;
        let is = &s.income_statement;

        // Book movement reversed, then gains, losses and depreciation backed
        // out so only the cash consideration remains.
        let tangible_assets_change = normalize_zero(
            -(fa.current.tangible_assets - fa.prev.tangible_assets) + is.fixed_asset_gain
                - is.fixed_asset_loss
                - is.depreciation,
        );
        let intangible_assets_change =
            normalize_zero(-(fa.current.intangible_assets - fa.prev.intangible_assets));
        let securities_change = normalize_zero(
            -(ca.current.securities - ca.prev.securities)
                - (fa.current.investment_securities - fa.prev.investment_securities)
                + is.securities_gain
                - is.securities_loss,
        );
        let loans_change = normalize_zero(
            -(ca.current.short_term_loans - ca.prev.short_term_loans)
                - (fa.current.long_term_loans - fa.prev.long_term_loans),
        );
        let other_fixed_assets_change =
            normalize_zero(-(fa.current.other_fixed_assets - fa.prev.other_fixed_assets));

        let total = normalize_zero(
            tangible_assets_change
                + intangible_assets_change
                + securities_change
                + loans_change
                + other_fixed_assets_change,
        );

        InvestingActivities {
            tangible_assets_change,
            intangible_assets_change,
            securities_change,
            loans_change,
            other_fixed_assets_change,
            total,
        }
    }

    pub fn lines(&self) -> Vec<CashFlowLine> {
        use CashFlowSection::Investing;
        use LineKind::{Item, Total};

        vec![
            CashFlowLine::new(
                Investing,
                Item,
                "tangibleAssetsChange",
                "Decrease (increase) in property, plant and equipment",
                self.tangible_assets_change,
            ),
            CashFlowLine::new(
                Investing,
                Item,
                "intangibleAssetsChange",
                "Decrease (increase) in intangible assets",
                self.intangible_assets_change,
            ),
            CashFlowLine::new(
                Investing,
                Item,
                "securitiesChange",
                "Decrease (increase) in securities",
                self.securities_change,
            ),
            CashFlowLine::new(
                Investing,
                Item,
                "loansChange",
                "Decrease (increase) in loans receivable",
                self.loans_change,
            ),
            CashFlowLine::new(
                Investing,
                Item,
                "otherFixedAssetsChange",
                "Decrease (increase) in other fixed assets",
                self.other_fixed_assets_change,
            ),
            CashFlowLine::new(
                Investing,
                Total,
                "total",
                "Net cash provided by (used in) investing activities",
                self.total,
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Financing activities
// ---------------------------------------------------------------------------

/// Cash flows from financing activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingActivities {
    pub short_term_borrowings_change: Money,
    pub long_term_borrowings_change: Money,
    pub capital_increase: Money,
    pub dividends_paid: Money,
    pub total: Money,
}

impl FinancingActivities {
    pub fn compute(s: &ResolvedSnapshot) -> Self {
        let cl = &s.current_liabilities;
        let fl = &s.fixed_liabilities;
        let eq = &s.equity;

        let short_term_borrowings_change =
            normalize_zero(cl.current.short_term_borrowings - cl.prev.short_term_borrowings);
        let long_term_borrowings_change =
            normalize_zero(fl.current.long_term_borrowings - fl.prev.long_term_borrowings);
        let capital_increase = normalize_zero(eq.current.capital_stock - eq.prev.capital_stock);
        let dividends_paid = normalize_zero(-s.appropriation.dividends);

        let total = normalize_zero(
            short_term_borrowings_change
                + long_term_borrowings_change
                + capital_increase
                + dividends_paid,
        );

        FinancingActivities {
            short_term_borrowings_change,
            long_term_borrowings_change,
            capital_increase,
            dividends_paid,
            total,
        }
    }

    pub fn lines(&self) -> Vec<CashFlowLine> {
        use CashFlowSection::Financing;
        use LineKind::{Item, Total};

        vec![
            CashFlowLine::new(
                Financing,
                Item,
                "shortTermBorrowingsChange",
                "Increase (decrease) in short-term borrowings",
                self.short_term_borrowings_change,
            ),
            CashFlowLine::new(
                Financing,
                Item,
                "longTermBorrowingsChange",
                "Increase (decrease) in long-term borrowings and bonds",
                self.long_term_borrowings_change,
            ),
            CashFlowLine::new(
                Financing,
                Item,
                "capitalIncrease",
                "Proceeds from issuance of shares",
                self.capital_increase,
            ),
            CashFlowLine::new(
                Financing,
                Item,
                "dividendsPaid",
                "Dividends paid",
                self.dividends_paid,
            ),
            CashFlowLine::new(
                Financing,
                Total,
                "total",
                "Net cash provided by (used in) financing activities",
                self.total,
            ),
        ]
    }
}
