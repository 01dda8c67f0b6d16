//! Display formatting for costs and energy

/// Format a baseline cost: whole cents below one dollar, dollars otherwise
pub fn format_baseline_cost(dollars: f64, currency_symbol: &str) -> String {
    if dollars >= 1.0 {
        format_money(dollars, currency_symbol)
    } else {
        format!("{}c", (dollars * 100.0).round() as i64)
    }
}

/// Format an amount as dollars with two decimals
pub fn format_money(dollars: f64, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, dollars)
}

/// Format an energy figure in kWh with one decimal
pub fn format_energy_kwh(kwh: f64) -> String {
    format!("{:.1} kWh", kwh)
}
