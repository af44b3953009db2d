pub mod cost;
pub mod engine;
pub mod payment;
pub mod reach;
pub mod settlement;
pub mod specificity;

pub use crate::domain::catalog::Catalog;
pub use crate::domain::model::{EstimateRequest, EstimationResult, PaymentQuote};
pub use crate::domain::ports::PaymentSettlement;
pub use crate::utils::error::Result;
