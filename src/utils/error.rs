use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Invalid budget amount: {amount} (must be greater than zero)")]
    InvalidBudgetAmount { amount: Decimal },

    #[error("Unknown payment method: {id}")]
    UnknownPaymentMethod { id: String },

    #[error("Insufficient funds on '{method_id}': short by {shortfall}")]
    InsufficientFunds { method_id: String, shortfall: Decimal },

    #[error("Settlement via '{method_id}' failed: {reason}")]
    SettlementFailed { method_id: String, reason: String },

    #[error("Validation error on '{field}' (value: {value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimateError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EstimateError::InsufficientFunds { .. } => ErrorSeverity::Low,
            EstimateError::SettlementFailed { .. } => ErrorSeverity::Medium,
            EstimateError::InvalidBudgetAmount { .. }
            | EstimateError::UnknownPaymentMethod { .. }
            | EstimateError::ValidationError { .. }
            | EstimateError::SerializationError(_) => ErrorSeverity::High,
            EstimateError::ConfigError { .. } | EstimateError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EstimateError::InvalidBudgetAmount { .. } => {
                "Enter a budget amount greater than zero".to_string()
            }
            EstimateError::UnknownPaymentMethod { id } => format!(
                "Choose one of the configured payment methods instead of '{}'",
                id
            ),
            EstimateError::InsufficientFunds { shortfall, .. } => format!(
                "Top up at least {} or pick a method that supports top-up",
                shortfall
            ),
            EstimateError::SettlementFailed { .. } => {
                "Check the payment method and submit the checkout again".to_string()
            }
            EstimateError::ValidationError { field, .. } => {
                format!("Fix the value of '{}' and retry", field)
            }
            EstimateError::ConfigError { .. } => {
                "Check the engine configuration file for syntax errors".to_string()
            }
            EstimateError::IoError(_) => {
                "Make sure the file exists and is readable".to_string()
            }
            EstimateError::SerializationError(_) => {
                "Make sure the request is valid JSON".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstimateError::InvalidBudgetAmount { amount } => {
                format!("The budget amount {} is not valid", amount)
            }
            EstimateError::UnknownPaymentMethod { id } => {
                format!("Payment method '{}' is not available", id)
            }
            EstimateError::InsufficientFunds { method_id, shortfall } => format!(
                "Not enough balance on '{}' ({} missing)",
                method_id, shortfall
            ),
            EstimateError::SettlementFailed { reason, .. } => {
                format!("Payment could not be completed: {}", reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;
