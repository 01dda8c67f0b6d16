//! PowerCost Estimator - Demo CLI
//!
//! Walks through the cost engine: catalog loading, per-appliance costs,
//! a household summary built one usage edit at a time, and the budget
//! allowance calculator.

use powercost_estimator_lib::catalog::{Appliance, Cadence, Catalog};
use powercost_estimator_lib::core::{PricingConfig, UsageSnapshot};
use powercost_estimator_lib::pricing::{format_baseline_cost, format_money, PricingEngine};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   PowerCost Estimator - Demo CLI");
    println!("==============================================\n");

    // 1. Load the built-in catalog
    println!("[1/4] Loading appliance catalog...");
    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("      Could not load catalog: {}", e);
            std::process::exit(1);
        }
    };
    for category in catalog.categories() {
        let cadence = match category.cadence {
            Cadence::Daily => "per day",
            Cadence::Weekly => "per week",
        };
        println!("      {:<24} {:>2} appliances ({})", category.name, category.appliances.len(), cadence);
    }
    println!();

    // 2. Per-appliance costs
    println!("[2/4] Per-appliance costs...");
    let inclusive = PricingEngine::new(&PricingConfig {
        electricity_rate: 0.25,
        daily_fixed_rate: 1.0,
        rate_includes_gst: true,
        ..Default::default()
    });
    match Appliance::new("Oven", Some(2400.0), None, "hour") {
        Ok(oven) => {
            let cost = inclusive.actual_cost(&oven, Cadence::Daily, 2.0);
            println!("      2400W oven, 2 hours at $0.25/kWh (GST incl.): {}", format_money(cost, "$"));
        }
        Err(e) => eprintln!("      {}", e),
    }

    let exclusive = PricingEngine::new(&PricingConfig {
        electricity_rate: 0.30,
        rate_includes_gst: false,
        ..Default::default()
    });
    match Appliance::new("Warm wash", None, Some(45.0), "load") {
        Ok(wash) => {
            let weekly = exclusive.actual_cost(&wash, Cadence::Daily, 3.0);
            let daily = exclusive.actual_cost(&wash, Cadence::Weekly, 3.0);
            println!(
                "      45c wash, 3 loads/week at $0.30/kWh + GST: {:.3}/week, {:.4}/day",
                weekly, daily
            );
            println!("      Base cost per load: {}", format_baseline_cost(exclusive.baseline_cost(&wash), "$"));
        }
        Err(e) => eprintln!("      {}", e),
    }
    println!();

    // 3. Household summary, one edit at a time
    println!("[3/4] Household summary...\n");
    println!("----------------------------------------------");
    println!("  Edit                       | Active |  Daily");
    println!("----------------------------------------------");

    let pricing = PricingEngine::new(&PricingConfig::default());
    let edits = [
        ("kitchen", 1, 1.0),
        ("kitchen", 3, 1.0),
        ("heating", 0, 4.0),
        ("lighting", 0, 30.0),
        ("laundry", 1, 4.0),
        ("entertainment", 0, 3.0),
    ];

    let mut snapshot = UsageSnapshot::new();
    let summary = pricing.summarize(&catalog, &snapshot);
    println!("  {:<26} | {:>6} | {:>6}", "(nothing selected)", summary.active_appliances, format_money(summary.daily_cost, "$"));

    for (category_id, index, quantity) in edits {
        snapshot = snapshot.with_usage(category_id, index, quantity);
        let summary = pricing.summarize(&catalog, &snapshot);
        let name = catalog
            .category(category_id)
            .and_then(|c| c.appliance(index))
            .map_or("?", |a| a.name.as_str());
        let label: String = format!("{} x{}", name, quantity).chars().take(26).collect();
        println!(
            "  {:<26} | {:>6} | {:>6}",
            label,
            summary.active_appliances,
            format_money(summary.daily_cost, "$")
        );
    }
    println!("----------------------------------------------\n");

    let summary = pricing.summarize(&catalog, &snapshot);
    println!("  Total energy:  {:.2} kWh/day", summary.total_power_kw);
    println!("  Weekly:        {}", format_money(summary.weekly_cost, "$"));
    println!("  Monthly:       {}", format_money(summary.monthly_cost, "$"));
    println!("  Yearly:        {}\n", format_money(summary.yearly_cost, "$"));

    // 4. Budget allowance
    println!("[4/4] Budget allowance...");
    for budget in [30.0, 150.0, 300.0, 450.0] {
        println!(
            "      {:>7}/month -> {:>5.1} kWh/day (GST incl. tariff)",
            format_money(budget, "$"),
            inclusive.allowance(budget)
        );
    }

    println!("\n==============================================");
}
