//! Core module - Configuration, error handling, and common types

mod config;
mod error;
mod types;

pub use config::{
    CalculatorConfig, CatalogConfig, Config, PricingConfig,
    DEFAULT_DAILY_FIXED_RATE, DEFAULT_ELECTRICITY_RATE, DEFAULT_MONTHLY_BUDGET,
};
pub use error::{Error, Result};
pub use types::{
    parse_budget, parse_fixed_rate, parse_rate, parse_usage, ApplianceCost, CostSummary,
    UsageSnapshot,
};
