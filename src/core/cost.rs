use crate::domain::model::{BudgetSpec, BudgetType, TargetingCriteria};
use crate::utils::error::{EstimateError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_DURATION_DAYS: u32 = 7;

const REACH_PER_CURRENCY_UNIT: i64 = 50;
const WORLDWIDE_BUDGET_FACTOR: i64 = 2;

/// Total spend for a campaign. Daily budgets are projected over
/// `assumed_duration_days`, then scaled by the boost speed.
pub fn total_cost(budget: &BudgetSpec, assumed_duration_days: u32) -> Result<Decimal> {
    let base_cost = match budget.budget_type {
        BudgetType::Daily => checked_mul(
            "budget.amount",
            budget.amount,
            Decimal::from(assumed_duration_days),
        )?,
        BudgetType::Total => budget.amount,
    };
    checked_mul("budget.amount", base_cost, budget.boost_speed.multiplier())
}

/// Budget-driven reach projection used by the budget step.
///
/// Independent from [`crate::core::reach::estimate_reach`]: it looks only at
/// the amount and two coarse targeting flags.
pub fn budget_reach(budget: &BudgetSpec, criteria: Option<&TargetingCriteria>) -> Result<u64> {
    let mut reach = checked_mul(
        "budget.amount",
        budget.amount,
        Decimal::from(REACH_PER_CURRENCY_UNIT),
    )?;

    if let Some(criteria) = criteria {
        if criteria.is_worldwide() {
            reach = checked_mul("budget.amount", reach, Decimal::from(WORLDWIDE_BUDGET_FACTOR))?;
        }
        if !criteria.interests.is_empty() {
            reach = checked_mul("budget.amount", reach, Decimal::new(12, 1))?;
        }
    }

    Ok(round_count(reach))
}

/// `a * b`, reporting overflow against `field` instead of panicking.
pub(crate) fn checked_mul(field: &str, a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(field, a))
}

pub(crate) fn checked_add(field: &str, a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(field, a))
}

pub(crate) fn checked_sub(field: &str, a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(field, a))
}

fn overflow(field: &str, value: Decimal) -> EstimateError {
    EstimateError::ValidationError {
        field: field.to_string(),
        value: value.to_string(),
        reason: "Value is too large to compute with".to_string(),
    }
}

/// Rounds half away from zero. Negatives clamp to 0, values past
/// `u64::MAX` saturate.
pub(crate) fn round_count(value: Decimal) -> u64 {
    if value.is_sign_negative() {
        return 0;
    }
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BoostSpeed;
    use crate::utils::validation::MAX_BUDGET_AMOUNT;

    #[test]
    fn test_daily_fast() {
        let budget = BudgetSpec::daily(Decimal::new(50, 0), BoostSpeed::Fast);
        assert_eq!(total_cost(&budget, DEFAULT_DURATION_DAYS).unwrap(), Decimal::new(525, 0));
    }

    #[test]
    fn test_total_slow() {
        let budget = BudgetSpec::total(Decimal::new(200, 0), BoostSpeed::Slow);
        assert_eq!(total_cost(&budget, DEFAULT_DURATION_DAYS).unwrap(), Decimal::new(160, 0));
    }

    #[test]
    fn test_total_ignores_duration() {
        let budget = BudgetSpec::total(Decimal::new(200, 0), BoostSpeed::Standard);
        assert_eq!(total_cost(&budget, 30).unwrap(), Decimal::new(200, 0));
    }

    #[test]
    fn test_daily_custom_duration() {
        let budget = BudgetSpec::daily(Decimal::new(1250, 2), BoostSpeed::Standard);
        assert_eq!(total_cost(&budget, 14).unwrap(), Decimal::new(175, 0));
    }

    #[test]
    fn test_huge_daily_amount_is_error_not_panic() {
        let budget = BudgetSpec::daily(Decimal::from_scientific("2e28").unwrap(), BoostSpeed::Fast);
        assert!(matches!(
            total_cost(&budget, DEFAULT_DURATION_DAYS),
            Err(EstimateError::ValidationError { .. })
        ));
        assert!(matches!(
            budget_reach(&budget, None),
            Err(EstimateError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_amount_at_budget_cap_still_computes() {
        let budget = BudgetSpec::daily(Decimal::from(MAX_BUDGET_AMOUNT), BoostSpeed::Fast);
        // 1e12 * 7 * 1.5
        assert_eq!(
            total_cost(&budget, DEFAULT_DURATION_DAYS).unwrap(),
            Decimal::from(10_500_000_000_000i64)
        );
        assert_eq!(budget_reach(&budget, None).unwrap(), 50_000_000_000_000);
    }

    #[test]
    fn test_budget_reach_without_targeting() {
        let budget = BudgetSpec::total(Decimal::new(100, 0), BoostSpeed::Standard);
        assert_eq!(budget_reach(&budget, None).unwrap(), 5_000);
    }

    #[test]
    fn test_budget_reach_worldwide_with_interests() {
        let budget = BudgetSpec::daily(Decimal::new(100, 0), BoostSpeed::Fast);
        let criteria = TargetingCriteria::default()
            .with_locations(["worldwide"])
            .with_interests(["tech"]);
        // 100 * 50 * 2 * 1.2
        assert_eq!(budget_reach(&budget, Some(&criteria)).unwrap(), 12_000);
    }

    #[test]
    fn test_budget_reach_rounds_half_up() {
        let budget = BudgetSpec::total(Decimal::new(1001, 2), BoostSpeed::Standard);
        // 10.01 * 50 = 500.5
        assert_eq!(budget_reach(&budget, None).unwrap(), 501);
    }

    #[test]
    fn test_round_count_clamps_and_saturates() {
        assert_eq!(round_count(Decimal::new(-5, 0)), 0);
        assert_eq!(round_count(Decimal::from_scientific("1e25").unwrap()), u64::MAX);
        assert_eq!(round_count(Decimal::new(25, 1)), 3);
    }
}
