use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{de, Deserialize, Deserializer, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// A single balance-sheet leaf as entered. `None` means "not entered yet".
pub type Entry = Option<Money>;

/// Largest magnitude accepted for a single leaf. Any sum the derivation
/// forms from leaves this size stays well inside `Decimal`'s range.
pub const MAX_AMOUNT: Money = dec!(1000000000000000000000000);

pub fn within_bounds(value: Money) -> bool {
    value.abs() <= MAX_AMOUNT
}

/// Cap `value` at `±MAX_AMOUNT`.
pub fn bounded(value: Money) -> Money {
    value.clamp(-MAX_AMOUNT, MAX_AMOUNT)
}

/// Deserialize an [`Entry`], rejecting amounts beyond `MAX_AMOUNT`.
pub fn deserialize_entry<'de, D>(deserializer: D) -> Result<Entry, D::Error>
where
    D: Deserializer<'de>,
{
    let entry = Option::<Money>::deserialize(deserializer)?;
    match entry {
        Some(value) if !within_bounds(value) => Err(de::Error::custom(format!(
            "amount {value} exceeds the supported magnitude of {MAX_AMOUNT}"
        ))),
        _ => Ok(entry),
    }
}

/// A value observed in both the prior and the current fiscal year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPair<T> {
    #[serde(default)]
    pub prev: T,
    #[serde(default)]
    pub current: T,
}

impl<T> PeriodPair<T> {
    pub fn new(prev: T, current: T) -> Self {
        Self { prev, current }
    }

    /// Apply `f` to both periods.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PeriodPair<U> {
        PeriodPair {
            prev: f(&self.prev),
            current: f(&self.current),
        }
    }
}

impl PeriodPair<Money> {
    /// Current minus prior.
    pub fn change(&self) -> Money {
        self.current - self.prev
    }
}

/// Report a numerically zero amount as plain zero, dropping a negative sign.
pub fn normalize_zero(value: Money) -> Money {
    if value.is_zero() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_is_current_minus_prev() {
        let pair = PeriodPair::new(dec!(500), dec!(400));
        assert_eq!(pair.change(), dec!(-100));
    }

    #[test]
    fn test_normalize_zero_drops_negative_sign() {
        let neg_zero = -Decimal::ZERO;
        let normalized = normalize_zero(neg_zero);
        assert!(normalized.is_sign_positive());
        assert_eq!(normalized.to_string(), "0");
    }

    #[test]
    fn test_normalize_zero_keeps_nonzero_values() {
        assert_eq!(normalize_zero(dec!(-12.50)), dec!(-12.50));
        assert_eq!(normalize_zero(dec!(3)), dec!(3));
    }

    #[test]
    fn test_bounds_reach_exactly_max_amount() {
        assert_eq!(MAX_AMOUNT.to_string(), "1000000000000000000000000");
        assert!(within_bounds(MAX_AMOUNT));
        assert!(within_bounds(-MAX_AMOUNT));
        assert!(!within_bounds(MAX_AMOUNT + dec!(0.01)));
        assert!(!within_bounds(Decimal::MIN));
    }

    #[test]
    fn test_bounded_caps_both_signs() {
        assert_eq!(bounded(Decimal::MAX), MAX_AMOUNT);
        assert_eq!(bounded(Decimal::MIN), -MAX_AMOUNT);
        assert_eq!(bounded(dec!(-42.5)), dec!(-42.5));
    }

    #[test]
    fn test_metadata_precision_tag() {
        let out = with_metadata("m", &"a", vec![], 0, 1u8);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert_eq!(out.metadata.version, env!("CARGO_PKG_VERSION"));
    }
}
