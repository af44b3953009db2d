use crate::domain::model::{BonusKind, BudgetSpec, PaymentMethod};
use crate::utils::error::{EstimateError, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Largest budget amount accepted, in currency units.
pub const MAX_BUDGET_AMOUNT: i64 = 1_000_000_000_000;

/// Largest reach multiplier a payment bonus may carry.
pub const MAX_REACH_MULTIPLIER: i64 = 10;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_negative(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// ISO 4217 shape only: three ASCII uppercase letters.
pub fn validate_currency_code(field_name: &str, code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Currency must be a three-letter uppercase code such as USD".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EstimateError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_unique_ids<'a>(field_name: &str, ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(EstimateError::ValidationError {
                field: field_name.to_string(),
                value: id.to_string(),
                reason: "Duplicate id".to_string(),
            });
        }
    }
    Ok(())
}

impl Validate for BudgetSpec {
    fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(EstimateError::InvalidBudgetAmount { amount: self.amount });
        }
        validate_range(
            "budget.amount",
            self.amount,
            Decimal::ZERO,
            Decimal::from(MAX_BUDGET_AMOUNT),
        )?;
        validate_currency_code("budget.currency", &self.currency)
    }
}

impl Validate for PaymentMethod {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("payment_methods.id", &self.id)?;
        validate_non_negative("payment_methods.fees.percentage", self.fees.percentage)?;
        validate_non_negative("payment_methods.fees.fixed", self.fees.fixed)?;
        validate_non_negative("payment_methods.balance", self.balance)?;

        for bonus in &self.bonuses {
            let max = match bonus.kind {
                BonusKind::Discount | BonusKind::Cashback => Decimal::ONE_HUNDRED,
                BonusKind::Reach => Decimal::from(MAX_REACH_MULTIPLIER),
                BonusKind::FirstTime => {
                    validate_non_negative("payment_methods.bonuses.value", bonus.value)?;
                    continue;
                }
            };
            validate_range("payment_methods.bonuses.value", bonus.value, Decimal::ZERO, max)?;
        }
        Ok(())
    }
}
