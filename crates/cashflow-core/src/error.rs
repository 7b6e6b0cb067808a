use thiserror::Error;

#[derive(Debug, Error)]
pub enum CashFlowError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid amount for {field}: '{value}' is not a decimal number")]
    InvalidAmount { field: String, value: String },

    #[error(
        "Amount for {field} out of range: '{value}' exceeds {max} in magnitude",
        max = crate::types::MAX_AMOUNT
    )]
    AmountOutOfRange { field: String, value: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CashFlowError {
    fn from(e: serde_json::Error) -> Self {
        CashFlowError::SerializationError(e.to_string())
    }
}
