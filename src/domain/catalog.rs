use crate::domain::model::{PaymentMethod, TargetingCriteria, WORLDWIDE};
use crate::utils::error::{EstimateError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCatalogEntry {
    pub id: String,
    pub name: String,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestCatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub user_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupEntry {
    pub id: String,
    pub label: String,
}

/// Immutable reference tables. Built once, then shared by reference.
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<LocationCatalogEntry>,
    interests: Vec<InterestCatalogEntry>,
    age_groups: Vec<AgeGroupEntry>,
    payment_methods: Vec<PaymentMethod>,
    location_index: HashMap<String, usize>,
    interest_index: HashMap<String, usize>,
    age_group_index: HashMap<String, usize>,
    payment_method_index: HashMap<String, usize>,
}

fn build_index<T>(table: &str, rows: &[T], id_of: impl Fn(&T) -> &str) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        let id = id_of(row);
        if index.insert(id.to_string(), position).is_some() {
            return Err(EstimateError::ConfigError {
                message: format!("duplicate id '{}' in {} catalog", id, table),
            });
        }
    }
    Ok(index)
}

impl Catalog {
    pub fn new(
        locations: Vec<LocationCatalogEntry>,
        interests: Vec<InterestCatalogEntry>,
        age_groups: Vec<AgeGroupEntry>,
        payment_methods: Vec<PaymentMethod>,
    ) -> Result<Self> {
        let location_index = build_index("locations", &locations, |l| l.id.as_str())?;
        let interest_index = build_index("interests", &interests, |i| i.id.as_str())?;
        let age_group_index = build_index("age_groups", &age_groups, |a| a.id.as_str())?;
        let payment_method_index = build_index("payment_methods", &payment_methods, |m| m.id.as_str())?;

        Ok(Self {
            locations,
            interests,
            age_groups,
            payment_methods,
            location_index,
            interest_index,
            age_group_index,
            payment_method_index,
        })
    }

    pub fn location(&self, id: &str) -> Option<&LocationCatalogEntry> {
        self.location_index.get(id).map(|&i| &self.locations[i])
    }

    pub fn interest(&self, id: &str) -> Option<&InterestCatalogEntry> {
        self.interest_index.get(id).map(|&i| &self.interests[i])
    }

    pub fn age_group(&self, id: &str) -> Option<&AgeGroupEntry> {
        self.age_group_index.get(id).map(|&i| &self.age_groups[i])
    }

    pub fn payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_method_index
            .get(id)
            .map(|&i| &self.payment_methods[i])
    }

    pub fn locations(&self) -> &[LocationCatalogEntry] {
        &self.locations
    }

    pub fn interests(&self) -> &[InterestCatalogEntry] {
        &self.interests
    }

    pub fn age_groups(&self) -> &[AgeGroupEntry] {
        &self.age_groups
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// Selected location, interest and age-group ids with no catalog row.
    /// The worldwide wildcard is never reported.
    pub fn unknown_ids(&self, criteria: &TargetingCriteria) -> Vec<String> {
        let locations = criteria
            .locations
            .iter()
            .filter(|id| id.as_str() != WORLDWIDE && self.location(id).is_none());
        let interests = criteria
            .interests
            .iter()
            .filter(|id| self.interest(id).is_none());
        let age_groups = criteria
            .age_groups
            .iter()
            .filter(|id| self.age_group(id).is_none());

        locations.chain(interests).chain(age_groups).cloned().collect()
    }

    /// Combined user count of the selected interests, for display next to
    /// the reach estimate. Unknown ids contribute nothing.
    pub fn interest_audience(&self, criteria: &TargetingCriteria) -> u64 {
        criteria
            .interests
            .iter()
            .filter_map(|id| self.interest(id))
            .map(|entry| entry.user_count)
            .sum()
    }

    pub fn builtin() -> Self {
        let locations = [
            ("ng", "Nigeria", 218_541_212u64),
            ("gh", "Ghana", 33_475_870),
            ("ke", "Kenya", 54_027_487),
            ("za", "South Africa", 59_893_885),
            ("eg", "Egypt", 110_990_103),
            ("ci", "Côte d'Ivoire", 28_160_542),
            ("sn", "Senegal", 17_316_449),
            ("us", "United States", 333_287_557),
            ("gb", "United Kingdom", 66_971_411),
            ("in", "India", 1_417_173_173),
        ]
        .into_iter()
        .map(|(id, name, population)| LocationCatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
            population,
        })
        .collect();

        let interests = [
            ("tech", "Technology", "Lifestyle", 45_000_000u64),
            ("crypto", "Cryptocurrency", "Finance", 12_000_000),
            ("design", "Design", "Creative", 8_500_000),
            ("fashion", "Fashion", "Lifestyle", 38_000_000),
            ("music", "Music", "Entertainment", 62_000_000),
            ("sports", "Sports", "Entertainment", 55_000_000),
            ("food", "Food & Dining", "Lifestyle", 41_000_000),
            ("travel", "Travel", "Lifestyle", 27_000_000),
            ("gaming", "Gaming", "Entertainment", 33_000_000),
            ("fitness", "Fitness", "Health", 19_000_000),
            ("finance", "Personal Finance", "Finance", 16_000_000),
            ("education", "Education", "Learning", 24_000_000),
        ]
        .into_iter()
        .map(|(id, name, category, user_count)| InterestCatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            user_count,
        })
        .collect();

        let age_groups = ["13-17", "18-24", "25-34", "35-44", "45-54", "55-64", "65+"]
            .into_iter()
            .map(|id| AgeGroupEntry {
                id: id.to_string(),
                label: id.to_string(),
            })
            .collect();

        let payment_methods = builtin_payment_methods();

        // ids above are unique literals
        Self::new(locations, interests, age_groups, payment_methods)
            .unwrap_or_else(|e| unreachable!("built-in catalog is invalid: {}", e))
    }
}

fn builtin_payment_methods() -> Vec<PaymentMethod> {
    use crate::domain::model::{BonusKind, PaymentBonus, PaymentFees};

    vec![
        PaymentMethod {
            id: "wallet".to_string(),
            name: "Wallet balance".to_string(),
            balance: Decimal::new(250, 0),
            fees: PaymentFees::default(),
            bonuses: vec![PaymentBonus {
                kind: BonusKind::Cashback,
                value: Decimal::new(2, 0),
            }],
            requires_top_up: false,
        },
        PaymentMethod {
            id: "card".to_string(),
            name: "Debit / credit card".to_string(),
            balance: Decimal::ZERO,
            fees: PaymentFees {
                percentage: Decimal::new(29, 1),
                fixed: Decimal::new(30, 2),
            },
            bonuses: vec![PaymentBonus {
                kind: BonusKind::FirstTime,
                value: Decimal::new(10, 0),
            }],
            requires_top_up: true,
        },
        PaymentMethod {
            id: "bank_transfer".to_string(),
            name: "Bank transfer".to_string(),
            balance: Decimal::ZERO,
            fees: PaymentFees {
                percentage: Decimal::new(2, 0),
                fixed: Decimal::ZERO,
            },
            bonuses: vec![PaymentBonus {
                kind: BonusKind::Discount,
                value: Decimal::new(3, 0),
            }],
            requires_top_up: true,
        },
        PaymentMethod {
            id: "crypto".to_string(),
            name: "Crypto wallet".to_string(),
            balance: Decimal::new(1000, 0),
            fees: PaymentFees {
                percentage: Decimal::new(15, 1),
                fixed: Decimal::ZERO,
            },
            bonuses: vec![
                PaymentBonus {
                    kind: BonusKind::Discount,
                    value: Decimal::new(5, 0),
                },
                PaymentBonus {
                    kind: BonusKind::Reach,
                    value: Decimal::new(12, 1),
                },
            ],
            requires_top_up: false,
        },
    ]
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
