use anyhow::Result;
use async_trait::async_trait;
use campaign_estimator::config::cli::load_request;
use campaign_estimator::domain::model::{PaymentMethod, PaymentQuote, SettlementReceipt};
use campaign_estimator::domain::ports::PaymentSettlement;
use campaign_estimator::{EngineConfig, EstimateError, EstimationEngine, SimulatedSettlement};
use rust_decimal::Decimal;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};

const ENGINE_CONFIG: &str = r#"
[estimation]
assumed_duration_days = 10

[settlement]
latency_ms = 0

[[payment_methods]]
id = "wallet"
name = "Wallet"
balance = 1000
requires_top_up = false

[payment_methods.fees]
percentage = 1
fixed = 0.5

[[payment_methods.bonuses]]
type = "reach"
value = 1.5

[[payment_methods]]
id = "empty_wallet"
name = "Empty wallet"
balance = 5
requires_top_up = false
"#;

/// 計算 settle 呼叫次數，確認核心不會自動重試
struct CountingSettlement {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl PaymentSettlement for CountingSettlement {
    async fn settle(
        &self,
        method: &PaymentMethod,
        quote: &PaymentQuote,
    ) -> campaign_estimator::Result<SettlementReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EstimateError::SettlementFailed {
                method_id: method.id.clone(),
                reason: "processor unavailable".to_string(),
            });
        }
        Ok(SettlementReceipt {
            method_id: method.id.clone(),
            amount_charged: quote.final_cost,
            reference: "test-ref".to_string(),
            settled_at: chrono::Utc::now(),
        })
    }
}

fn write_config() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(ENGINE_CONFIG.as_bytes())?;
    Ok(file)
}

fn write_request(dir: &TempDir, method: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join("request.json");
    let body = format!(
        r#"{{
            "criteria": {{"locations": ["worldwide"], "age_groups": ["18-24", "25-34"]}},
            "budget": {{"type": "daily", "amount": 20, "boost_speed": "standard"}},
            "payment_method_id": "{}"
        }}"#,
        method
    );
    std::fs::write(&path, body)?;
    Ok(path)
}

#[tokio::test]
async fn test_checkout_with_configured_wallet() -> Result<()> {
    let config_file = write_config()?;
    let config = EngineConfig::from_file(config_file.path())?;
    config.validate_config()?;
    let catalog = config.build_catalog()?;
    let engine = EstimationEngine::new(&catalog, config.settings());

    let dir = TempDir::new()?;
    let request = load_request(write_request(&dir, "wallet")?)?;

    // 5_000_000 * 0.7 = 3_500_000, reach bonus 1.5
    let estimate = engine.estimate(&request)?;
    assert_eq!(estimate.reach, 3_500_000);
    assert_eq!(estimate.enhanced_reach, 5_250_000);
    // 20 * 10 days = 200, fee 1% + 0.5
    assert_eq!(estimate.cost, Decimal::new(200, 0));
    assert_eq!(estimate.fee_amount, Decimal::new(25, 1));
    assert_eq!(estimate.final_cost, Decimal::new(2025, 1));

    let receipt = engine
        .checkout(&request, &config.simulated_settlement())
        .await?;
    assert_eq!(receipt.method_id, "wallet");
    assert_eq!(receipt.amount_charged, estimate.final_cost);
    Ok(())
}

#[tokio::test]
async fn test_checkout_stops_before_settlement_on_insufficient_funds() -> Result<()> {
    let catalog = EngineConfig::from_toml_str(ENGINE_CONFIG)?.build_catalog()?;
    let engine = EstimationEngine::new(&catalog, Default::default());

    let dir = TempDir::new()?;
    let request = load_request(write_request(&dir, "empty_wallet")?)?;

    let settlement = CountingSettlement {
        calls: AtomicUsize::new(0),
        fail: false,
    };
    let err = engine.checkout(&request, &settlement).await.unwrap_err();

    // 20 * 7 = 140 against a balance of 5
    assert!(matches!(
        err,
        EstimateError::InsufficientFunds { shortfall, .. } if shortfall == Decimal::new(135, 0)
    ));
    assert_eq!(settlement.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_settlement_is_not_retried() -> Result<()> {
    let catalog = EngineConfig::from_toml_str(ENGINE_CONFIG)?.build_catalog()?;
    let engine = EstimationEngine::new(&catalog, Default::default());

    let dir = TempDir::new()?;
    let request = load_request(write_request(&dir, "wallet")?)?;

    let settlement = CountingSettlement {
        calls: AtomicUsize::new(0),
        fail: true,
    };
    let err = engine.checkout(&request, &settlement).await.unwrap_err();

    assert!(matches!(err, EstimateError::SettlementFailed { .. }));
    assert_eq!(settlement.calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_declining_simulation_blocking() {
    let catalog = EngineConfig::default().build_catalog().unwrap();
    let engine = EstimationEngine::new(&catalog, Default::default());
    let request = campaign_estimator::config::cli::parse_request(
        r#"{"budget": {"type": "total", "amount": 10}, "payment_method_id": "card"}"#,
    )
    .unwrap();

    let settlement = SimulatedSettlement::declining(Duration::ZERO, "card expired");
    let result = tokio_test::block_on(engine.checkout(&request, &settlement));

    match result {
        Err(e @ EstimateError::SettlementFailed { .. }) => {
            assert!(e.user_friendly_message().contains("card expired"));
        }
        other => panic!("expected SettlementFailed, got {:?}", other),
    }
}
