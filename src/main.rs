use anyhow::Context;
use campaign_estimator::config::cli::{load_request, render_json};
use campaign_estimator::domain::model::SettlementReceipt;
use campaign_estimator::utils::error::ErrorSeverity;
use campaign_estimator::utils::{logger, validation::Validate};
use campaign_estimator::{CliConfig, EngineConfig, EstimateError, EstimationEngine, EstimationResult};
use clap::Parser;
use serde::Serialize;
use tracing::Instrument;

#[derive(Serialize)]
struct CliOutput {
    estimate: EstimationResult,
    interest_audience: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unknown_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<SettlementReceipt>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting campaign-estimator CLI");
    tracing::debug!("CLI config: {:?}", args);

    // 載入配置
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            EngineConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
        }
        None => EngineConfig::default(),
    };

    // 應用命令列覆蓋設定
    if let Some(days) = args.duration_days {
        config.estimation.assumed_duration_days = days;
        tracing::info!("🔧 Daily budget duration overridden to: {} days", days);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let catalog = match config.build_catalog() {
        Ok(catalog) => catalog,
        Err(e) => exit_with(&e),
    };

    let mut request = load_request(&args.request)
        .with_context(|| format!("failed to read request '{}'", args.request))?;
    if let Some(method) = &args.payment_method {
        request.payment_method_id = Some(method.clone());
    }

    let engine = EstimationEngine::new(&catalog, config.settings());
    let span = logger::estimate_span(&request);

    let estimate = match span.in_scope(|| engine.estimate(&request)) {
        Ok(estimate) => estimate,
        Err(e) => exit_with(&e),
    };
    span.in_scope(|| {
        tracing::info!(
            "✅ Reach {} ({}), cost {}, final {}",
            estimate.reach,
            estimate.specificity.level,
            estimate.cost,
            estimate.final_cost
        )
    });

    let receipt = if args.settle {
        let settlement = config.simulated_settlement();
        match engine.checkout(&request, &settlement).instrument(span.clone()).await {
            Ok(receipt) => Some(receipt),
            Err(e) => exit_with(&e),
        }
    } else {
        None
    };

    let output = CliOutput {
        interest_audience: catalog.interest_audience(&request.criteria),
        unknown_ids: catalog.unknown_ids(&request.criteria),
        estimate,
        receipt,
    };
    println!("{}", render_json(&output, args.pretty)?);

    Ok(())
}

fn exit_with(e: &EstimateError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,      // 需要儲值
        ErrorSeverity::Medium => 2,   // 付款失敗，可重試
        ErrorSeverity::High => 1,     // 輸入錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    };
    std::process::exit(exit_code);
}
