//! Configuration management

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default electricity rate in dollars per kWh (NZ average)
pub const DEFAULT_ELECTRICITY_RATE: f64 = 0.25;
/// Default fixed daily charge in dollars
pub const DEFAULT_DAILY_FIXED_RATE: f64 = 1.0;
/// Default monthly budget in dollars for the allowance calculator
pub const DEFAULT_MONTHLY_BUDGET: f64 = 300.0;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("powercost-estimator").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            log::info!("Created default configuration at {}", path.display());
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Tariff configuration fed to the pricing engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Electricity rate in dollars per kWh
    #[serde(default = "default_electricity_rate")]
    pub electricity_rate: f64,
    /// Fixed charge in dollars per day, independent of consumption
    #[serde(default = "default_daily_fixed_rate")]
    pub daily_fixed_rate: f64,
    /// Whether both rates already include GST
    #[serde(default)]
    pub rate_includes_gst: bool,
    /// Currency symbol
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_electricity_rate() -> f64 { DEFAULT_ELECTRICITY_RATE }
fn default_daily_fixed_rate() -> f64 { DEFAULT_DAILY_FIXED_RATE }
fn default_currency_symbol() -> String { "$".to_string() }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            electricity_rate: default_electricity_rate(),
            daily_fixed_rate: default_daily_fixed_rate(),
            rate_includes_gst: false,
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Budget calculator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Monthly budget in dollars (GST inclusive)
    #[serde(default = "default_monthly_budget")]
    pub monthly_budget: f64,
}

fn default_monthly_budget() -> f64 { DEFAULT_MONTHLY_BUDGET }

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            monthly_budget: default_monthly_budget(),
        }
    }
}

/// Appliance catalog source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file replacing the built-in one (None = built-in)
    #[serde(default)]
    pub path: Option<PathBuf>,
}
