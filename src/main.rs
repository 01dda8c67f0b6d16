//! PowerCost Estimator - Main entry point
//!
//! Command line front end for the appliance cost engine: lists the
//! catalog, estimates household costs from usage entries and inverts a
//! monthly budget into a daily energy allowance.

mod cli;
mod render;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use powercost_estimator_lib::catalog::Catalog;
use powercost_estimator_lib::core::{parse_budget, Config, UsageSnapshot};
use powercost_estimator_lib::pricing::{format_energy_kwh, format_money, PricingEngine};

use crate::cli::{Args, Command, ConfigAction};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("Starting PowerCost Estimator v{}", env!("CARGO_PKG_VERSION"));

    if let Command::Config { action } = &args.command {
        return handle_config(&args, action);
    }

    let mut config = load_config(&args);
    args.apply_overrides(&mut config);

    let catalog = load_catalog(&args, &config)?;
    let pricing = PricingEngine::new(&config.pricing);

    match &args.command {
        Command::Catalog { category, json } => {
            let categories: Vec<_> = match category {
                Some(id) => vec![catalog
                    .category(id)
                    .with_context(|| format!("Unknown category '{}'", id))?],
                None => catalog.categories().iter().collect(),
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
                return Ok(());
            }

            println!("{}\n", render::tariff_line(&pricing));
            for category in categories {
                println!("{}", render::category_heading(category));
                println!("{}\n", render::category_table(category, &pricing));
            }
        }
        Command::Estimate { usage, usage_file, json } => {
            let mut snapshot = match usage_file {
                Some(path) => {
                    let content = fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    UsageSnapshot::from_json(&content)?
                }
                None => UsageSnapshot::new(),
            };
            for entry in usage {
                let (category_id, index, quantity) = cli::parse_usage_entry(&catalog, entry)?;
                snapshot = snapshot.with_usage(&category_id, index, quantity);
            }

            let items = pricing.line_items(&catalog, &snapshot);
            let summary = pricing.summarize(&catalog, &snapshot);

            if *json {
                let report = serde_json::json!({ "items": items, "summary": summary });
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("{}\n", render::tariff_line(&pricing));
            if items.is_empty() {
                println!("No appliances selected, only the fixed charge applies\n");
            } else {
                println!("{}\n", render::line_items_table(&items, &pricing));
            }
            println!("{}", render::summary_table(&summary, &pricing));
        }
        Command::Allowance { budget } => {
            let monthly_budget = budget
                .as_deref()
                .map_or(config.calculator.monthly_budget, parse_budget);
            let allowance = pricing.allowance(monthly_budget);

            println!("{}", render::tariff_line(&pricing));
            println!(
                "Monthly Budget: {}",
                format_money(monthly_budget, pricing.currency_symbol())
            );
            println!("Daily kWh allowance: {}", format_energy_kwh(allowance));
        }
        Command::Config { action } => handle_config(&args, action)?,
    }

    Ok(())
}

/// Load the configuration, falling back to defaults when it cannot be read
fn load_config(args: &Args) -> Config {
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

fn load_catalog(args: &Args, config: &Config) -> Result<Catalog> {
    match args.catalog.as_ref().or(config.catalog.path.as_ref()) {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()?),
    }
}

fn handle_config(args: &Args, action: &ConfigAction) -> Result<()> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => {
            let mut config = Config::load_from(&path)?;
            args.apply_overrides(&mut config);
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            Config::default().save_to(&path)?;
            println!("Default configuration written to {}", path.display());
        }
    }

    Ok(())
}
