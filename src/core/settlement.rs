use crate::domain::model::{PaymentMethod, PaymentQuote, SettlementReceipt};
use crate::domain::ports::PaymentSettlement;
use crate::utils::error::{EstimateError, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_SETTLEMENT_LATENCY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    Approve,
    Decline(String),
}

/// Stand-in for a payment processor: waits a fixed latency, then returns a
/// predetermined outcome. Exactly one attempt per `settle` call.
#[derive(Debug, Clone)]
pub struct SimulatedSettlement {
    latency: Duration,
    outcome: SettlementOutcome,
}

impl SimulatedSettlement {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            outcome: SettlementOutcome::Approve,
        }
    }

    pub fn declining(latency: Duration, reason: impl Into<String>) -> Self {
        Self {
            latency,
            outcome: SettlementOutcome::Decline(reason.into()),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedSettlement {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLEMENT_LATENCY)
    }
}

#[async_trait]
impl PaymentSettlement for SimulatedSettlement {
    async fn settle(&self, method: &PaymentMethod, quote: &PaymentQuote) -> Result<SettlementReceipt> {
        tracing::info!(
            "💳 Settling {} via '{}' (simulated, {:?})",
            quote.final_cost,
            method.id,
            self.latency
        );

        tokio::time::sleep(self.latency).await;

        match &self.outcome {
            SettlementOutcome::Approve => {
                let settled_at = chrono::Utc::now();
                let receipt = SettlementReceipt {
                    method_id: method.id.clone(),
                    amount_charged: quote.final_cost,
                    reference: format!("stl-{}-{}", method.id, settled_at.timestamp_millis()),
                    settled_at,
                };
                tracing::info!("✅ Settlement {} completed", receipt.reference);
                Ok(receipt)
            }
            SettlementOutcome::Decline(reason) => {
                tracing::warn!("❌ Settlement via '{}' declined: {}", method.id, reason);
                Err(EstimateError::SettlementFailed {
                    method_id: method.id.clone(),
                    reason: reason.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use rust_decimal::Decimal;

    fn quote() -> PaymentQuote {
        PaymentQuote {
            method_id: "wallet".to_string(),
            adjusted_cost: Decimal::new(100, 0),
            fee_amount: Decimal::ZERO,
            final_cost: Decimal::new(100, 0),
            cashback_amount: Decimal::new(2, 0),
            enhanced_reach: 1000,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_approved_settlement_waits_latency() {
        let catalog = Catalog::builtin();
        let method = catalog.payment_method("wallet").unwrap();
        let settlement = SimulatedSettlement::new(Duration::from_millis(1500));

        let started = tokio::time::Instant::now();
        let receipt = settlement.settle(method, &quote()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(receipt.method_id, "wallet");
        assert_eq!(receipt.amount_charged, Decimal::new(100, 0));
        assert!(receipt.reference.starts_with("stl-wallet-"));
    }

    #[tokio::test]
    async fn test_declined_settlement_is_single_attempt() {
        let catalog = Catalog::builtin();
        let method = catalog.payment_method("card").unwrap();
        let settlement = SimulatedSettlement::declining(Duration::ZERO, "card expired");

        let err = settlement.settle(method, &quote()).await.unwrap_err();
        assert!(matches!(
            err,
            EstimateError::SettlementFailed { ref reason, .. } if reason == "card expired"
        ));
    }
}
