//! Command line arguments

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use powercost_estimator_lib::catalog::Catalog;
use powercost_estimator_lib::core::{
    parse_fixed_rate, parse_rate, parse_usage, Config, PricingConfig,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Configuration file (defaults to the user config directory).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Appliance catalog file replacing the built-in one.
    #[clap(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Electricity rate in dollars per kWh.
    #[clap(long, global = true)]
    pub rate: Option<String>,

    /// Fixed daily charge in dollars.
    #[clap(long, global = true)]
    pub fixed: Option<String>,

    /// The rates already include GST.
    #[clap(long, global = true, conflicts_with = "gst_exclusive")]
    pub gst_inclusive: bool,

    /// The rates exclude GST, 15% is added.
    #[clap(long, global = true)]
    pub gst_exclusive: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the appliances with the cost of one usage unit.
    Catalog {
        /// Only show this category.
        #[clap(long)]
        category: Option<String>,

        /// Print JSON instead of tables.
        #[clap(long)]
        json: bool,
    },

    /// Estimate household costs from appliance usage.
    Estimate {
        /// Usage entry `CATEGORY:APPLIANCE=QUANTITY`, APPLIANCE being an index or a name.
        #[clap(short = 'u', long = "use")]
        usage: Vec<String>,

        /// JSON usage snapshot (`{"kitchen": {"0": 2}}`), applied before `--use` entries.
        #[clap(long)]
        usage_file: Option<PathBuf>,

        /// Print JSON instead of tables.
        #[clap(long)]
        json: bool,
    },

    /// Daily energy allowance for a monthly budget.
    Allowance {
        /// Monthly budget in dollars, GST inclusive.
        #[clap(long)]
        budget: Option<String>,
    },

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the configuration file location.
    Path,
    /// Print the effective configuration, tariff flags applied.
    Show,
    /// Write the default configuration.
    Init,
}

impl Args {
    /// Apply every command line override on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        self.apply_pricing_overrides(&mut config.pricing);
    }

    /// Apply the tariff flags on top of the configured tariff
    pub fn apply_pricing_overrides(&self, pricing: &mut PricingConfig) {
        if let Some(rate) = &self.rate {
            pricing.electricity_rate = parse_rate(rate);
        }
        if let Some(fixed) = &self.fixed {
            pricing.daily_fixed_rate = parse_fixed_rate(fixed);
        }
        if self.gst_inclusive {
            pricing.rate_includes_gst = true;
        }
        if self.gst_exclusive {
            pricing.rate_includes_gst = false;
        }
    }
}

/// Resolve a `CATEGORY:APPLIANCE=QUANTITY` entry against the catalog
///
/// A quantity that is not a number counts as 0.
pub fn parse_usage_entry(catalog: &Catalog, entry: &str) -> Result<(String, usize, f64)> {
    let (target, quantity) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("Usage entry '{}' must look like CATEGORY:APPLIANCE=QUANTITY", entry))?;
    let (category_id, appliance_key) = target
        .split_once(':')
        .ok_or_else(|| anyhow!("Usage entry '{}' must look like CATEGORY:APPLIANCE=QUANTITY", entry))?;

    let category = catalog
        .category(category_id.trim())
        .with_context(|| format!("Unknown category '{}'", category_id.trim()))?;
    let Some((index, _)) = category.find_appliance(appliance_key) else {
        bail!("No appliance '{}' in category '{}'", appliance_key.trim(), category.id);
    };

    Ok((category.id.clone(), index, parse_usage(quantity)))
}
