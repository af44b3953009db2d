use crate::domain::model::{PaymentMethod, PaymentQuote, SettlementReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Moves funds for an already-resolved quote. One attempt per call; retry
/// policy belongs to the caller.
#[async_trait]
pub trait PaymentSettlement: Send + Sync {
    async fn settle(&self, method: &PaymentMethod, quote: &PaymentQuote) -> Result<SettlementReceipt>;
}
