pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::EngineConfig;
pub use crate::core::{
    cost::{budget_reach, total_cost},
    engine::{EstimationEngine, EstimationSettings},
    payment::resolve_payment,
    reach::estimate_reach,
    settlement::SimulatedSettlement,
    specificity::classify,
};
pub use domain::catalog::Catalog;
pub use domain::model::{
    BoostSpeed, BudgetSpec, BudgetType, EstimateRequest, EstimationResult, PaymentMethod,
    PaymentQuote, SpecificityLevel, TargetingCriteria,
};
pub use utils::error::{EstimateError, Result};
