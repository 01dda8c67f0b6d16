//! Pricing engine for appliance electricity costs
//!
//! Every figure is derived from three inputs owned by the caller: the
//! appliance catalog, a usage snapshot and the tariff. Nothing is cached;
//! each call recomputes from scratch.
//!
//! Appliances are priced one of two ways:
//! - Power draw: rated watts times running hours times the effective rate
//! - Reference cost: a flat per-unit cost authored at $0.25/kWh, rescaled
//!   linearly to the effective rate
//!
//! Weekly categories (laundry) are divided by 7 so all totals are per day.

mod format;

pub use format::{format_baseline_cost, format_energy_kwh, format_money};

use crate::catalog::{Appliance, Cadence, Catalog, CostBasis};
use crate::core::{
    ApplianceCost, CostSummary, PricingConfig, UsageSnapshot, DEFAULT_DAILY_FIXED_RATE,
    DEFAULT_ELECTRICITY_RATE,
};

/// GST multiplier applied to rates that exclude it
pub const GST_MULTIPLIER: f64 = 1.15;
/// Rate in $/kWh at which catalog reference costs were authored
pub const REFERENCE_RATE: f64 = 0.25;

pub const DAYS_PER_WEEK: f64 = 7.0;
/// Fixed 30-day month
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Pricing engine that calculates appliance and household costs
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Create a new pricing engine with the given tariff
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            config: sanitize(config),
        }
    }

    /// Update the tariff
    pub fn update_config(&mut self, config: &PricingConfig) {
        self.config = sanitize(config);
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Get the currency symbol
    pub fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    /// Electricity rate in $/kWh with GST applied
    pub fn effective_rate(&self) -> f64 {
        with_gst(self.config.electricity_rate, self.config.rate_includes_gst)
    }

    /// Daily fixed charge with GST applied
    pub fn effective_fixed_rate(&self) -> f64 {
        with_gst(self.config.daily_fixed_rate, self.config.rate_includes_gst)
    }

    /// Cost of exactly one native usage unit, never normalized to per-day
    pub fn baseline_cost(&self, appliance: &Appliance) -> f64 {
        self.native_cost(appliance, 1.0)
    }

    /// Cost per day of an appliance at the given usage
    pub fn actual_cost(&self, appliance: &Appliance, cadence: Cadence, usage: f64) -> f64 {
        if !(usage > 0.0) {
            return 0.0;
        }
        self.native_cost(appliance, usage) / cadence.days()
    }

    /// Energy per day in Wh of an appliance at the given usage
    ///
    /// Reference-cost appliances have no rating, so their energy is
    /// reverse-derived from the cost at the effective rate.
    pub fn daily_energy_wh(&self, appliance: &Appliance, cadence: Cadence, usage: f64) -> f64 {
        if !(usage > 0.0) {
            return 0.0;
        }

        let energy_wh = match appliance.basis {
            CostBasis::PowerDraw { watts } => watts * appliance.unit.hours(usage),
            CostBasis::ReferenceCost { cents } => {
                let scaled_base_cost = self.scaled_reference_cost(cents);
                scaled_base_cost / self.effective_rate() * usage * 1000.0
            }
            CostBasis::Unpriced => 0.0,
        };

        energy_wh / cadence.days()
    }

    /// Per-appliance daily figures for every active appliance, in catalog order
    pub fn line_items(&self, catalog: &Catalog, usage: &UsageSnapshot) -> Vec<ApplianceCost> {
        let mut items = Vec::new();

        for category in catalog.categories() {
            for (index, appliance) in category.appliances.iter().enumerate() {
                let quantity = usage.usage(&category.id, index);
                if quantity <= 0.0 {
                    continue;
                }

                items.push(ApplianceCost {
                    category_id: category.id.clone(),
                    index,
                    name: appliance.name.clone(),
                    usage: quantity,
                    daily_cost: self.actual_cost(appliance, category.cadence, quantity),
                    daily_energy_wh: self.daily_energy_wh(appliance, category.cadence, quantity),
                });
            }
        }

        for (category_id, index, _) in usage.iter() {
            let known = catalog
                .category(category_id)
                .is_some_and(|category| index < category.appliances.len());
            if !known {
                log::debug!("Ignoring usage for unknown appliance {}:{}", category_id, index);
            }
        }

        items
    }

    /// Fold the whole catalog and usage snapshot into household totals
    pub fn summarize(&self, catalog: &Catalog, usage: &UsageSnapshot) -> CostSummary {
        let items = self.line_items(catalog, usage);

        let variable_daily_cost: f64 = items.iter().map(|item| item.daily_cost).sum();
        let total_energy_wh: f64 = items.iter().map(|item| item.daily_energy_wh).sum();
        let fixed_daily_cost = self.effective_fixed_rate();
        let daily_cost = variable_daily_cost + fixed_daily_cost;

        CostSummary {
            active_appliances: items.len(),
            total_power_kw: total_energy_wh / 1000.0,
            variable_daily_cost,
            fixed_daily_cost,
            daily_cost,
            weekly_cost: daily_cost * DAYS_PER_WEEK,
            monthly_cost: daily_cost * DAYS_PER_MONTH,
            yearly_cost: daily_cost * DAYS_PER_YEAR,
        }
    }

    /// Daily kWh affordable on a GST-inclusive monthly budget
    pub fn allowance(&self, monthly_budget: f64) -> f64 {
        let daily_budget = monthly_budget / DAYS_PER_MONTH;
        let available_for_variable = (daily_budget - self.effective_fixed_rate()).max(0.0);
        available_for_variable / self.effective_rate()
    }

    fn native_cost(&self, appliance: &Appliance, usage: f64) -> f64 {
        match appliance.basis {
            CostBasis::PowerDraw { watts } => {
                let kwh = watts / 1000.0 * appliance.unit.hours(usage);
                kwh * self.effective_rate()
            }
            CostBasis::ReferenceCost { cents } => self.scaled_reference_cost(cents) * usage,
            CostBasis::Unpriced => {
                if cfg!(debug_assertions) {
                    log::warn!("No cost data for '{}', using 0", appliance.name);
                }
                0.0
            }
        }
    }

    /// Reference cost in dollars rescaled from $0.25/kWh to the effective rate
    fn scaled_reference_cost(&self, cents: f64) -> f64 {
        (cents / 100.0) * (self.effective_rate() / REFERENCE_RATE)
    }
}

fn with_gst(amount: f64, includes_gst: bool) -> f64 {
    if includes_gst {
        amount
    } else {
        amount * GST_MULTIPLIER
    }
}

/// Replace out-of-range tariff figures with the defaults
fn sanitize(config: &PricingConfig) -> PricingConfig {
    let mut config = config.clone();

    if !(config.electricity_rate.is_finite() && config.electricity_rate > 0.0) {
        log::warn!(
            "Invalid electricity rate {}, using {}",
            config.electricity_rate,
            DEFAULT_ELECTRICITY_RATE
        );
        config.electricity_rate = DEFAULT_ELECTRICITY_RATE;
    }
    if !(config.daily_fixed_rate.is_finite() && config.daily_fixed_rate >= 0.0) {
        log::warn!(
            "Invalid daily fixed rate {}, using {}",
            config.daily_fixed_rate,
            DEFAULT_DAILY_FIXED_RATE
        );
        config.daily_fixed_rate = DEFAULT_DAILY_FIXED_RATE;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn pricing(rate: f64, fixed: f64, includes_gst: bool) -> PricingEngine {
        PricingEngine::new(&PricingConfig {
            electricity_rate: rate,
            daily_fixed_rate: fixed,
            rate_includes_gst: includes_gst,
            ..Default::default()
        })
    }

    fn oven() -> Appliance {
        Appliance::new("Oven", Some(2400.0), None, "hour").unwrap()
    }

    fn warm_wash() -> Appliance {
        Appliance::new("Warm wash", None, Some(45.0), "load").unwrap()
    }

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            Category::new("kitchen", "Kitchen", None, vec![oven()]).unwrap(),
            Category::new("laundry", "Laundry", None, vec![warm_wash()]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_effective_rates() {
        let inclusive = pricing(0.25, 1.0, true);
        assert_eq!(inclusive.effective_rate(), 0.25);
        assert_eq!(inclusive.effective_fixed_rate(), 1.0);

        let exclusive = pricing(0.30, 2.0, false);
        assert!((exclusive.effective_rate() - 0.345).abs() < 1e-12);
        assert!((exclusive.effective_fixed_rate() - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_power_draw_cost() {
        let engine = pricing(0.25, 1.0, true);
        let cost = engine.actual_cost(&oven(), Cadence::Daily, 2.0);
        assert!((cost - 1.20).abs() < 1e-9);
    }

    #[test]
    fn test_unit_conversion_in_cost() {
        let engine = pricing(0.25, 1.0, true);

        let towel_rail = Appliance::new("Towel rail", Some(100.0), None, "day").unwrap();
        // 0.1 kW * 24 h = 2.4 kWh
        assert!((engine.baseline_cost(&towel_rail) - 0.60).abs() < 1e-9);

        let blanket = Appliance::new("Blanket", Some(100.0), None, "8 hours").unwrap();
        assert!((engine.baseline_cost(&blanket) - 0.20).abs() < 1e-9);

        let microwave = Appliance::new("Microwave", Some(1000.0), None, "30 minutes").unwrap();
        assert!((engine.baseline_cost(&microwave) - 0.125).abs() < 1e-9);

        // two days of 100 W
        let energy = engine.daily_energy_wh(&towel_rail, Cadence::Daily, 2.0);
        assert!((energy - 4800.0).abs() < 1e-9);
        assert!((engine.actual_cost(&towel_rail, Cadence::Daily, 2.0) - 1.20).abs() < 1e-9);
    }

    #[test]
    fn test_reference_cost_weekly() {
        let engine = pricing(0.30, 1.0, false);
        let appliance = warm_wash();

        let weekly = engine.actual_cost(&appliance, Cadence::Daily, 3.0);
        assert!((weekly - 1.863).abs() < 1e-9);

        let daily = engine.actual_cost(&appliance, Cadence::Weekly, 3.0);
        assert!((daily - 1.863 / 7.0).abs() < 1e-9);
        assert!((daily - 0.2661).abs() < 1e-4);
    }

    #[test]
    fn test_zero_usage_is_zero() {
        let engine = pricing(0.42, 3.0, false);
        for appliance in [oven(), warm_wash()] {
            for usage in [0.0, -1.0, f64::NAN] {
                let cost = engine.actual_cost(&appliance, Cadence::Daily, usage);
                assert_eq!(cost, 0.0);
                assert!(cost.is_sign_positive());
            }
        }
    }

    #[test]
    fn test_cost_is_linear_in_usage() {
        let engine = pricing(0.28, 1.0, false);
        for appliance in [oven(), warm_wash()] {
            let single = engine.actual_cost(&appliance, Cadence::Daily, 1.5);
            let double = engine.actual_cost(&appliance, Cadence::Daily, 3.0);
            assert!((double - 2.0 * single).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cost_scales_with_rate() {
        let base = pricing(0.25, 1.0, true);
        let doubled = pricing(0.50, 1.0, true);
        let taxed = pricing(0.25, 1.0, false);

        for appliance in [oven(), warm_wash()] {
            let cost = base.actual_cost(&appliance, Cadence::Daily, 2.0);
            assert!((doubled.actual_cost(&appliance, Cadence::Daily, 2.0) - 2.0 * cost).abs() < 1e-9);
            assert!((taxed.actual_cost(&appliance, Cadence::Daily, 2.0) - 1.15 * cost).abs() < 1e-9);
        }
    }

    #[test]
    fn test_baseline_matches_actual() {
        let engine = pricing(0.31, 1.0, false);
        let appliance = oven();
        let baseline = engine.baseline_cost(&appliance);
        let actual = engine.actual_cost(&appliance, Cadence::Daily, 2.5);
        assert!((baseline * 2.5 - actual).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_ignores_weekly_cadence() {
        let engine = pricing(0.25, 1.0, true);
        // 45c at the reference rate stays 45c
        assert!((engine.baseline_cost(&warm_wash()) - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_unpriced_costs_nothing() {
        let engine = pricing(0.25, 1.0, true);
        let appliance = Appliance::new("Mystery", None, None, "use").unwrap();
        assert_eq!(engine.baseline_cost(&appliance), 0.0);
        assert_eq!(engine.actual_cost(&appliance, Cadence::Daily, 4.0), 0.0);
        assert_eq!(engine.daily_energy_wh(&appliance, Cadence::Daily, 4.0), 0.0);
    }

    #[test]
    fn test_energy() {
        let engine = pricing(0.30, 1.0, false);

        // 2400 W for 2 h
        assert!((engine.daily_energy_wh(&oven(), Cadence::Daily, 2.0) - 4800.0).abs() < 1e-9);

        // 45c at $0.25/kWh is 1.8 kWh per load, whatever the rate
        let weekly = engine.daily_energy_wh(&warm_wash(), Cadence::Weekly, 7.0);
        assert!((weekly - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty() {
        let engine = pricing(0.25, 1.0, false);
        let summary = engine.summarize(&small_catalog(), &UsageSnapshot::new());

        assert_eq!(summary.active_appliances, 0);
        assert_eq!(summary.daily_cost, engine.effective_fixed_rate());
        assert_eq!(summary.total_power_kw, 0.0);
        assert_eq!(summary.variable_daily_cost, 0.0);
    }

    #[test]
    fn test_summarize() {
        let engine = pricing(0.25, 1.0, true);
        let usage = UsageSnapshot::new()
            .with_usage("kitchen", 0, 2.0)
            .with_usage("laundry", 0, 7.0)
            .with_usage("kitchen", 5, 9.0)
            .with_usage("garage", 0, 1.0);
        let summary = engine.summarize(&small_catalog(), &usage);

        // oven 1.20 + warm wash 0.45 per day + 1.00 fixed
        assert_eq!(summary.active_appliances, 2);
        assert!((summary.variable_daily_cost - 1.65).abs() < 1e-9);
        assert!((summary.daily_cost - 2.65).abs() < 1e-9);
        assert!((summary.weekly_cost - 2.65 * 7.0).abs() < 1e-9);
        assert!((summary.monthly_cost - 2.65 * 30.0).abs() < 1e-9);
        assert!((summary.yearly_cost - 2.65 * 365.0).abs() < 1e-9);
        // 4.8 kWh + 1.8 kWh
        assert!((summary.total_power_kw - 6.6).abs() < 1e-9);
    }

    #[test]
    fn test_line_items_sum_to_summary() {
        let engine = pricing(0.33, 1.2, false);
        let usage = UsageSnapshot::new()
            .with_usage("kitchen", 0, 1.0)
            .with_usage("laundry", 0, 4.0);
        let catalog = small_catalog();

        let items = engine.line_items(&catalog, &usage);
        let summary = engine.summarize(&catalog, &usage);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Oven");
        assert_eq!(items[1].category_id, "laundry");
        let total: f64 = items.iter().map(|i| i.daily_cost).sum();
        assert!((total - summary.variable_daily_cost).abs() < 1e-12);
    }

    #[test]
    fn test_allowance() {
        let engine = pricing(0.25, 1.0, true);
        assert!((engine.allowance(300.0) - 36.0).abs() < 1e-9);

        // Budget below the fixed charge clamps to zero
        assert_eq!(engine.allowance(20.0), 0.0);
        assert_eq!(engine.allowance(-50.0), 0.0);
    }

    #[test]
    fn test_allowance_monotonic() {
        let engine = pricing(0.29, 1.4, false);
        let mut previous = 0.0;
        for budget in (0..20).map(|step| step as f64 * 25.0) {
            let allowance = engine.allowance(budget);
            assert!(allowance >= previous);
            assert!(allowance >= 0.0);
            previous = allowance;
        }
    }

    #[test]
    fn test_invalid_tariff_uses_defaults() {
        let engine = pricing(0.0, -2.0, true);
        assert_eq!(engine.effective_rate(), 0.25);
        assert_eq!(engine.effective_fixed_rate(), 1.0);
    }

    #[test]
    fn test_update_config() {
        let mut engine = pricing(0.25, 1.0, true);
        engine.update_config(&PricingConfig {
            electricity_rate: 0.40,
            ..engine.config().clone()
        });
        assert_eq!(engine.effective_rate(), 0.40);
    }
}
