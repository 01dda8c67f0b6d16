//! Table rendering for the command line reports

use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Table};
use powercost_estimator_lib::catalog::{Cadence, Category};
use powercost_estimator_lib::core::{ApplianceCost, CostSummary};
use powercost_estimator_lib::pricing::{
    format_baseline_cost, format_energy_kwh, format_money, PricingEngine,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

/// One category of the catalog with the baseline cost of each appliance
pub fn category_table(category: &Category, pricing: &PricingEngine) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Appliance", "Power (W)", "Base Cost", "Unit"]);

    for (index, appliance) in category.appliances.iter().enumerate() {
        let power = appliance
            .power_watts
            .map_or_else(|| "-".to_string(), |watts| format!("{}W", watts));
        let base_cost = format_baseline_cost(pricing.baseline_cost(appliance), pricing.currency_symbol());

        table.add_row(vec![
            Cell::new(index).add_attribute(Attribute::Dim),
            Cell::new(&appliance.name),
            Cell::new(power).set_alignment(CellAlignment::Right),
            Cell::new(base_cost).set_alignment(CellAlignment::Right),
            Cell::new(appliance.unit.label()),
        ]);
    }

    table
}

/// Heading line for a category
pub fn category_heading(category: &Category) -> String {
    let mut heading = format!("{} ({} appliances)", category.name, category.appliances.len());
    if category.cadence == Cadence::Weekly {
        heading.push_str(", usage entered per week");
    }
    heading
}

/// Active appliances with their daily contribution
pub fn line_items_table(items: &[ApplianceCost], pricing: &PricingEngine) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Category",
        "Appliance",
        "Usage",
        "Your Cost (per day)",
        "Energy (per day)",
    ]);

    for item in items {
        table.add_row(vec![
            Cell::new(&item.category_id).add_attribute(Attribute::Dim),
            Cell::new(&item.name),
            Cell::new(item.usage).set_alignment(CellAlignment::Right),
            Cell::new(format_money(item.daily_cost, pricing.currency_symbol()))
                .set_alignment(CellAlignment::Right),
            Cell::new(format_energy_kwh(item.daily_energy_wh / 1000.0))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Household totals
pub fn summary_table(summary: &CostSummary, pricing: &PricingEngine) -> Table {
    let symbol = pricing.currency_symbol();
    let mut table = new_table();

    let rows = [
        ("Total Selected", summary.active_appliances.to_string()),
        ("Total Power", format_energy_kwh(summary.total_power_kw)),
        ("Usage Charges", format_money(summary.variable_daily_cost, symbol)),
        ("Daily Fixed Charge", format_money(summary.fixed_daily_cost, symbol)),
        ("Daily", format_money(summary.daily_cost, symbol)),
        ("Weekly", format_money(summary.weekly_cost, symbol)),
        ("Monthly", format_money(summary.monthly_cost, symbol)),
        ("Yearly", format_money(summary.yearly_cost, symbol)),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// One line describing the tariff in use
pub fn tariff_line(pricing: &PricingEngine) -> String {
    let config = pricing.config();
    let gst = if config.rate_includes_gst {
        "GST included"
    } else {
        "GST added (15%)"
    };

    format!(
        "Electricity Rate: {}{:.4}/kWh | Daily Fixed Rate: {}/day  ({})",
        config.currency_symbol,
        config.electricity_rate,
        format_money(config.daily_fixed_rate, &config.currency_symbol),
        gst
    )
}
