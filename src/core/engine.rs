use crate::core::cost::{budget_reach, total_cost, DEFAULT_DURATION_DAYS};
use crate::core::payment::resolve_payment;
use crate::core::reach::estimate_reach;
use crate::core::specificity::classify;
use crate::domain::catalog::Catalog;
use crate::domain::model::{
    EstimateRequest, EstimationResult, PaymentMethod, PaymentQuote, SettlementReceipt,
};
use crate::domain::ports::PaymentSettlement;
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::Validate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimationSettings {
    pub assumed_duration_days: u32,
}

impl Default for EstimationSettings {
    fn default() -> Self {
        Self {
            assumed_duration_days: DEFAULT_DURATION_DAYS,
        }
    }
}

/// Runs every estimation step for one request against a shared catalog.
///
/// Holds no mutable state, so one engine can serve concurrent previews.
#[derive(Debug, Clone, Copy)]
pub struct EstimationEngine<'a> {
    catalog: &'a Catalog,
    settings: EstimationSettings,
}

impl<'a> EstimationEngine<'a> {
    pub fn new(catalog: &'a Catalog, settings: EstimationSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn settings(&self) -> EstimationSettings {
        self.settings
    }

    pub fn estimate(&self, request: &EstimateRequest) -> Result<EstimationResult> {
        request.budget.validate()?;
        self.warn_unknown_ids(request);

        let criteria = &request.criteria;
        let reach = estimate_reach(criteria, self.catalog);
        let cost = total_cost(&request.budget, self.settings.assumed_duration_days)?;
        let budget_reach = budget_reach(&request.budget, Some(criteria))?;
        let specificity = classify(criteria);

        tracing::debug!(
            reach,
            %cost,
            budget_reach,
            specificity = %specificity.level,
            "estimated campaign"
        );

        let (fee_amount, final_cost, enhanced_reach) = match &request.payment_method_id {
            Some(method_id) => {
                let quote = resolve_payment(cost, self.payment_method(method_id)?, reach)?;
                (quote.fee_amount, quote.final_cost, quote.enhanced_reach)
            }
            None => (Decimal::ZERO, cost, reach),
        };

        Ok(EstimationResult {
            reach,
            cost,
            fee_amount,
            final_cost,
            enhanced_reach,
            budget_reach,
            specificity,
            payment_method_id: request.payment_method_id.clone(),
        })
    }

    /// Full payment breakdown for `method_id`, ignoring any method already
    /// named in the request.
    pub fn quote(&self, request: &EstimateRequest, method_id: &str) -> Result<PaymentQuote> {
        request.budget.validate()?;
        let method = self.payment_method(method_id)?;
        let reach = estimate_reach(&request.criteria, self.catalog);
        let cost = total_cost(&request.budget, self.settings.assumed_duration_days)?;
        resolve_payment(cost, method, reach)
    }

    /// Quotes the request's payment method, then makes a single settlement
    /// attempt. The quote is not re-checked after settlement returns.
    pub async fn checkout<S>(&self, request: &EstimateRequest, settlement: &S) -> Result<SettlementReceipt>
    where
        S: PaymentSettlement + ?Sized,
    {
        let method_id = request
            .payment_method_id
            .as_deref()
            .ok_or_else(|| EstimateError::ValidationError {
                field: "payment_method_id".to_string(),
                value: String::new(),
                reason: "A payment method is required to check out".to_string(),
            })?;

        let quote = self.quote(request, method_id)?;
        let method = self.payment_method(method_id)?;
        settlement.settle(method, &quote).await
    }

    fn payment_method(&self, id: &str) -> Result<&'a PaymentMethod> {
        self.catalog
            .payment_method(id)
            .ok_or_else(|| EstimateError::UnknownPaymentMethod { id: id.to_string() })
    }

    fn warn_unknown_ids(&self, request: &EstimateRequest) {
        let unknown = self.catalog.unknown_ids(&request.criteria);
        if !unknown.is_empty() {
            tracing::warn!("Ignoring unknown targeting ids: {}", unknown.join(", "));
        }
    }
}
