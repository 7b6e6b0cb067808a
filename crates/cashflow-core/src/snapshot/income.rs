ledger_record! {
    /// Income statement for the current fiscal year only.
    pub struct IncomeStatement => IncomeStatementAmounts {
        pretax_income: "pretaxIncome",
        net_income: "netIncome",
        depreciation: "depreciation",
        /// Interest and dividends received
        interest_income: "interestIncome",
        interest_expense: "interestExpense",
        securities_gain: "securitiesGain",
        /// Loss on sale or write-down of securities
        securities_loss: "securitiesLoss",
        fixed_asset_gain: "fixedAssetGain",
        /// Loss on sale or disposal of fixed assets
        fixed_asset_loss: "fixedAssetLoss",
    }
}

ledger_record! {
    /// Prior-year profit appropriation paid out during the current year.
    pub struct Appropriation => AppropriationAmounts {
        dividends: "dividends",
        executive_bonuses: "executiveBonuses",
    }
}
