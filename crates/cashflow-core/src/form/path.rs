use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CashFlowError;
use crate::snapshot::{
    Appropriation, CurrentAssets, CurrentLiabilities, DeferredAssets, Equity, FixedAssets,
    FixedLiabilities, IncomeStatement,
};

/// Top-level groups of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    CurrentAssets,
    FixedAssets,
    DeferredAssets,
    CurrentLiabilities,
    FixedLiabilities,
    Equity,
    IncomeStatement,
    Appropriation,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::CurrentAssets,
        Section::FixedAssets,
        Section::DeferredAssets,
        Section::CurrentLiabilities,
        Section::FixedLiabilities,
        Section::Equity,
        Section::IncomeStatement,
        Section::Appropriation,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::CurrentAssets => "currentAssets",
            Section::FixedAssets => "fixedAssets",
            Section::DeferredAssets => "deferredAssets",
            Section::CurrentLiabilities => "currentLiabilities",
            Section::FixedLiabilities => "fixedLiabilities",
            Section::Equity => "equity",
            Section::IncomeStatement => "incomeStatement",
            Section::Appropriation => "appropriation",
        }
    }

    /// Balance-sheet sections carry a prior and a current year.
    pub fn is_comparative(self) -> bool {
        !matches!(self, Section::IncomeStatement | Section::Appropriation)
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Section::CurrentAssets => CurrentAssets::FIELDS,
            Section::FixedAssets => FixedAssets::FIELDS,
            Section::DeferredAssets => DeferredAssets::FIELDS,
            Section::CurrentLiabilities => CurrentLiabilities::FIELDS,
            Section::FixedLiabilities => FixedLiabilities::FIELDS,
            Section::Equity => Equity::FIELDS,
            Section::IncomeStatement => IncomeStatement::FIELDS,
            Section::Appropriation => Appropriation::FIELDS,
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Prior or current fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    Prev,
    Current,
}

impl Period {
    pub fn key(self) -> &'static str {
        match self {
            Period::Prev => "prev",
            Period::Current => "current",
        }
    }
}

/// Address of one leaf, e.g. `currentAssets.prev.cash` or
/// `incomeStatement.netIncome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub section: Section,
    /// `None` for the single-period sections
    pub period: Option<Period>,
    /// Serialized field key, always one of `section.fields()`
    pub field: &'static str,
}

impl FieldPath {
    /// Every addressable leaf, in form order.
    pub fn all() -> Vec<FieldPath> {
        let mut paths = Vec::new();
        for section in Section::ALL {
            let periods: &[Option<Period>] = if section.is_comparative() {
                &[Some(Period::Prev), Some(Period::Current)]
            } else {
                &[None]
            };
            for &period in periods {
                for &field in section.fields() {
                    paths.push(FieldPath {
                        section,
                        period,
                        field,
                    });
                }
            }
        }
        paths
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period {
            Some(period) => write!(f, "{}.{}.{}", self.section.key(), period.key(), self.field),
            None => write!(f, "{}.{}", self.section.key(), self.field),
        }
    }
}

impl FromStr for FieldPath {
    type Err = CashFlowError;

    /// Segments may be camelCase or snake_case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CashFlowError::UnknownField(s.to_string());
        let segments: Vec<String> = s.trim().split('.').map(camel_case).collect();

        let section = segments
            .first()
            .and_then(|k| Section::from_key(k))
            .ok_or_else(unknown)?;

        let (period, field_key) = match (section.is_comparative(), segments.as_slice()) {
            (true, [_, period, field]) => {
                let period = match period.as_str() {
                    "prev" => Period::Prev,
                    "current" => Period::Current,
                    _ => return Err(unknown()),
                };
                (Some(period), field)
            }
            (false, [_, field]) => (None, field),
            _ => return Err(unknown()),
        };

        let field = section
            .fields()
            .iter()
            .copied()
            .find(|f| *f == field_key.as_str())
            .ok_or_else(unknown)?;

        Ok(FieldPath {
            section,
            period,
            field,
        })
    }
}

/// `short_term_loans` -> `shortTermLoans`; camelCase input passes through.
fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut upper_next = false;
    for c in segment.trim().chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
