use crate::core::cost::{checked_add, checked_mul, checked_sub, round_count};
use crate::domain::model::{BonusKind, PaymentMethod, PaymentQuote};
use crate::utils::error::{EstimateError, Result};
use rust_decimal::Decimal;

/// Applies a payment method's discount, fees and bonuses to a campaign cost.
///
/// Pure: balance is checked but nothing is charged. Methods that support
/// top-up are never rejected for balance.
pub fn resolve_payment(cost: Decimal, method: &PaymentMethod, base_reach: u64) -> Result<PaymentQuote> {
    let mut adjusted_cost = cost;
    if let Some(discount) = method.bonus(BonusKind::Discount) {
        let keep = Decimal::ONE - discount.value / Decimal::ONE_HUNDRED;
        adjusted_cost = checked_mul("cost", adjusted_cost, keep)?;
    }

    let fee_rate = method.fees.percentage / Decimal::ONE_HUNDRED;
    let fee_amount = checked_add(
        "payment_methods.fees",
        checked_mul("cost", adjusted_cost, fee_rate)?,
        method.fees.fixed,
    )?;
    let final_cost = checked_add("cost", adjusted_cost, fee_amount)?;

    let cashback_amount = match method.bonus(BonusKind::Cashback) {
        Some(cashback) => checked_mul("cost", adjusted_cost, cashback.value / Decimal::ONE_HUNDRED)?,
        None => Decimal::ZERO,
    };

    let enhanced_reach = match method.bonus(BonusKind::Reach) {
        Some(bonus) => enhance_reach(base_reach, bonus.value),
        None => base_reach,
    };

    if !method.requires_top_up && method.balance < final_cost {
        let shortfall = checked_sub("payment_methods.balance", final_cost, method.balance)?;
        tracing::debug!(method = %method.id, %final_cost, %shortfall, "balance below final cost");
        return Err(EstimateError::InsufficientFunds {
            method_id: method.id.clone(),
            shortfall,
        });
    }

    Ok(PaymentQuote {
        method_id: method.id.clone(),
        adjusted_cost,
        fee_amount,
        final_cost,
        cashback_amount,
        enhanced_reach,
    })
}

/// Reach after a multiplier bonus; saturates at `u64::MAX` instead of
/// wrapping.
fn enhance_reach(base_reach: u64, multiplier: Decimal) -> u64 {
    if multiplier.is_sign_negative() {
        return 0;
    }
    Decimal::from(base_reach)
        .checked_mul(multiplier)
        .map(round_count)
        .unwrap_or(u64::MAX)
}
