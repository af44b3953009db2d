use crate::core::cost::DEFAULT_DURATION_DAYS;
use crate::core::engine::EstimationSettings;
use crate::core::settlement::{SimulatedSettlement, DEFAULT_SETTLEMENT_LATENCY};
use crate::domain::catalog::{AgeGroupEntry, Catalog, InterestCatalogEntry, LocationCatalogEntry};
use crate::domain::model::PaymentMethod;
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Engine configuration file. Catalog tables left out fall back to the
/// built-in catalog, one table at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub estimation: EstimationConfig,
    pub settlement: SettlementConfig,
    pub locations: Option<Vec<LocationCatalogEntry>>,
    pub interests: Option<Vec<InterestCatalogEntry>>,
    pub age_groups: Option<Vec<AgeGroupEntry>>,
    pub payment_methods: Option<Vec<PaymentMethod>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub assumed_duration_days: u32,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            assumed_duration_days: DEFAULT_DURATION_DAYS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub latency_ms: u64,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_SETTLEMENT_LATENCY.as_millis() as u64,
        }
    }
}

impl EngineConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimateError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WALLET_BALANCE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimateError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "estimation.assumed_duration_days",
            self.estimation.assumed_duration_days,
            1,
            365,
        )?;
        validation::validate_range("settlement.latency_ms", self.settlement.latency_ms, 0, 60_000)?;

        if let Some(locations) = &self.locations {
            validation::validate_unique_ids("locations.id", locations.iter().map(|l| l.id.as_str()))?;
            for location in locations {
                validation::validate_non_empty_string("locations.id", &location.id)?;
            }
        }
        if let Some(interests) = &self.interests {
            validation::validate_unique_ids("interests.id", interests.iter().map(|i| i.id.as_str()))?;
            for interest in interests {
                validation::validate_non_empty_string("interests.id", &interest.id)?;
            }
        }
        if let Some(age_groups) = &self.age_groups {
            validation::validate_unique_ids("age_groups.id", age_groups.iter().map(|a| a.id.as_str()))?;
            for age_group in age_groups {
                validation::validate_non_empty_string("age_groups.id", &age_group.id)?;
            }
        }
        if let Some(methods) = &self.payment_methods {
            validation::validate_unique_ids("payment_methods.id", methods.iter().map(|m| m.id.as_str()))?;
            for method in methods {
                method.validate()?;
            }
        }

        Ok(())
    }

    pub fn build_catalog(&self) -> Result<Catalog> {
        let builtin = Catalog::builtin();

        Catalog::new(
            self.locations
                .clone()
                .unwrap_or_else(|| builtin.locations().to_vec()),
            self.interests
                .clone()
                .unwrap_or_else(|| builtin.interests().to_vec()),
            self.age_groups
                .clone()
                .unwrap_or_else(|| builtin.age_groups().to_vec()),
            self.payment_methods
                .clone()
                .unwrap_or_else(|| builtin.payment_methods().to_vec()),
        )
    }

    pub fn settings(&self) -> EstimationSettings {
        EstimationSettings {
            assumed_duration_days: self.estimation.assumed_duration_days,
        }
    }

    pub fn settlement_latency(&self) -> Duration {
        Duration::from_millis(self.settlement.latency_ms)
    }

    pub fn simulated_settlement(&self) -> SimulatedSettlement {
        SimulatedSettlement::new(self.settlement_latency())
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
