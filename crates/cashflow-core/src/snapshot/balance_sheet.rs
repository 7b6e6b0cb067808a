ledger_record! {
    /// Current assets for one fiscal year.
    pub struct CurrentAssets => CurrentAssetAmounts {
        /// Cash and deposits
        cash: "cash",
        /// Trade receivables including notes receivable
        receivables: "receivables",
        inventory: "inventory",
        /// Marketable securities held as current assets
        securities: "securities",
        short_term_loans: "shortTermLoans",
        deferred_tax_assets: "deferredTaxAssets",
        other_current_assets: "otherCurrentAssets",
    }
}

ledger_record! {
    /// Fixed (non-current) assets for one fiscal year.
    pub struct FixedAssets => FixedAssetAmounts {
        /// Property, plant and equipment, net of depreciation
        tangible_assets: "tangibleAssets",
        intangible_assets: "intangibleAssets",
        investment_securities: "investmentSecurities",
        long_term_loans: "longTermLoans",
        deferred_tax_assets: "deferredTaxAssets",
        other_fixed_assets: "otherFixedAssets",
    }
}

ledger_record! {
    /// Deferred charges carried as a separate asset class.
    pub struct DeferredAssets => DeferredAssetAmounts {
        deferred_assets: "deferredAssets",
    }
}

ledger_record! {
    /// Current liabilities for one fiscal year.
    pub struct CurrentLiabilities => CurrentLiabilityAmounts {
        /// Trade payables including notes payable
        accounts_payable: "accountsPayable",
        short_term_borrowings: "shortTermBorrowings",
        income_tax_payable: "incomeTaxPayable",
        deferred_tax_liabilities: "deferredTaxLiabilities",
        bonus_reserve: "bonusReserve",
        retirement_benefits: "retirementBenefits",
        other_current_liabilities: "otherCurrentLiabilities",
    }
}

ledger_record! {
    /// Fixed (non-current) liabilities for one fiscal year.
    pub struct FixedLiabilities => FixedLiabilityAmounts {
        /// Long-term borrowings and bonds
        long_term_borrowings: "longTermBorrowings",
        deferred_tax_liabilities: "deferredTaxLiabilities",
        retirement_benefits: "retirementBenefits",
        other_fixed_liabilities: "otherFixedLiabilities",
    }
}

ledger_record! {
    /// Net assets for one fiscal year.
    pub struct Equity => EquityAmounts {
        /// Capital stock and capital surplus
        capital_stock: "capitalStock",
        retained_earnings: "retainedEarnings",
        /// Carried in the treasury-stock slot; the statement line treats it
        /// as deferred hedge gains and losses.
        treasury_stock: "treasuryStock",
    }
}
