use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Location code that targets every market at once. Not a catalog row.
pub const WORLDWIDE: &str = "worldwide";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    All,
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeLevel {
    #[default]
    All,
    Low,
    Middle,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    #[default]
    All,
    HighSchool,
    Bachelor,
    Master,
    Doctorate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    #[default]
    All,
    Employed,
    SelfEmployed,
    Student,
    Unemployed,
}

/// Audience selection for a campaign. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingCriteria {
    pub locations: BTreeSet<String>,
    pub interests: BTreeSet<String>,
    pub age_groups: BTreeSet<String>,
    pub behaviors: BTreeSet<String>,
    pub device_types: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub gender: Gender,
    pub income_level: IncomeLevel,
    pub education: Education,
    pub employment_status: EmploymentStatus,
}

impl TargetingCriteria {
    pub fn is_worldwide(&self) -> bool {
        self.locations.contains(WORLDWIDE)
    }

    pub fn with_locations<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_interests<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_age_groups<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.age_groups.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_behaviors<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.behaviors.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_device_types<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.device_types.extend(ids.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    Daily,
    Total,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostSpeed {
    Slow,
    #[default]
    Standard,
    Fast,
}

impl BoostSpeed {
    pub fn multiplier(self) -> Decimal {
        match self {
            BoostSpeed::Slow => Decimal::new(8, 1),
            BoostSpeed::Standard => Decimal::ONE,
            BoostSpeed::Fast => Decimal::new(15, 1),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSpec {
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub boost_speed: BoostSpeed,
}

impl BudgetSpec {
    pub fn daily(amount: Decimal, boost_speed: BoostSpeed) -> Self {
        Self {
            budget_type: BudgetType::Daily,
            amount,
            currency: default_currency(),
            boost_speed,
        }
    }

    pub fn total(amount: Decimal, boost_speed: BoostSpeed) -> Self {
        Self {
            budget_type: BudgetType::Total,
            amount,
            currency: default_currency(),
            boost_speed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentFees {
    /// Percentage of the adjusted cost, e.g. `2` for 2%.
    #[serde(default)]
    pub percentage: Decimal,
    #[serde(default)]
    pub fixed: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Percent off the campaign cost.
    Discount,
    /// Multiplier on projected reach.
    Reach,
    /// Percent of the adjusted cost returned after payment.
    Cashback,
    FirstTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBonus {
    #[serde(rename = "type")]
    pub kind: BonusKind,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub fees: PaymentFees,
    #[serde(default)]
    pub bonuses: Vec<PaymentBonus>,
    #[serde(default)]
    pub requires_top_up: bool,
}

impl PaymentMethod {
    /// First bonus of the given kind; later duplicates are ignored.
    pub fn bonus(&self, kind: BonusKind) -> Option<&PaymentBonus> {
        self.bonuses.iter().find(|b| b.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecificityLevel {
    Broad,
    Balanced,
    Specific,
}

impl SpecificityLevel {
    pub fn description(self) -> &'static str {
        match self {
            SpecificityLevel::Broad => "Maximum reach",
            SpecificityLevel::Balanced => "Good balance",
            SpecificityLevel::Specific => "Highly targeted",
        }
    }
}

impl fmt::Display for SpecificityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpecificityLevel::Broad => "Broad",
            SpecificityLevel::Balanced => "Balanced",
            SpecificityLevel::Specific => "Specific",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specificity {
    pub level: SpecificityLevel,
    pub description: String,
}

/// Outcome of applying a payment method to a campaign cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub method_id: String,
    pub adjusted_cost: Decimal,
    pub fee_amount: Decimal,
    pub final_cost: Decimal,
    pub cashback_amount: Decimal,
    pub enhanced_reach: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub criteria: TargetingCriteria,
    pub budget: BudgetSpec,
    #[serde(default)]
    pub payment_method_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub reach: u64,
    pub cost: Decimal,
    pub fee_amount: Decimal,
    pub final_cost: Decimal,
    pub enhanced_reach: u64,
    pub budget_reach: u64,
    pub specificity: Specificity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub method_id: String,
    pub amount_charged: Decimal,
    pub reference: String,
    pub settled_at: chrono::DateTime<chrono::Utc>,
}
