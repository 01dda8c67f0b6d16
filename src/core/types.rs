//! Common types used across the application

use crate::core::config::{
    DEFAULT_DAILY_FIXED_RATE, DEFAULT_ELECTRICITY_RATE, DEFAULT_MONTHLY_BUDGET,
};
use crate::core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Usage quantities entered by the user, keyed by category id and then by
/// appliance index within that category.
///
/// Absent entries mean zero usage. The engine only ever reads a snapshot;
/// edits produce a new snapshot through [`UsageSnapshot::with_usage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageSnapshot {
    #[serde(deserialize_with = "deserialize_entries")]
    entries: BTreeMap<String, BTreeMap<usize, f64>>,
}

impl UsageSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON (`{"kitchen": {"0": 2.5}}`)
    ///
    /// Quantities that are not numbers count as 0; only a malformed
    /// document is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidUsage(format!("Failed to parse usage: {}", e)))
    }

    /// Usage for one appliance, 0 when absent
    pub fn usage(&self, category_id: &str, index: usize) -> f64 {
        self.entries
            .get(category_id)
            .and_then(|quantities| quantities.get(&index))
            .copied()
            .map(sanitize_usage)
            .unwrap_or(0.0)
    }

    /// Record the usage of one appliance, replacing any previous value
    pub fn set_usage(&mut self, category_id: &str, index: usize, quantity: f64) {
        self.entries
            .entry(category_id.to_string())
            .or_default()
            .insert(index, sanitize_usage(quantity));
    }

    /// Copy of this snapshot with a single entry updated
    pub fn with_usage(&self, category_id: &str, index: usize, quantity: f64) -> Self {
        let mut next = self.clone();
        next.set_usage(category_id, index, quantity);
        next
    }

    /// Merge another snapshot into this one, entry by entry (later wins)
    pub fn merge(&mut self, other: &UsageSnapshot) {
        for (category_id, index, quantity) in other.iter() {
            self.set_usage(category_id, index, quantity);
        }
    }

    /// Iterate over every recorded entry as (category id, index, quantity)
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, f64)> + '_ {
        self.entries.iter().flat_map(|(category_id, quantities)| {
            quantities
                .iter()
                .map(move |(index, quantity)| (category_id.as_str(), *index, *quantity))
        })
    }

    /// Whether no appliance has a usage above zero
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, _, quantity)| quantity <= 0.0)
    }
}

/// Household totals derived from a catalog, a usage snapshot and a tariff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Number of appliances with usage above zero
    pub active_appliances: usize,
    /// Daily energy of all active appliances in kWh
    pub total_power_kw: f64,
    /// Consumption part of the daily cost
    pub variable_daily_cost: f64,
    /// Fixed charge part of the daily cost (GST applied)
    pub fixed_daily_cost: f64,
    pub daily_cost: f64,
    pub weekly_cost: f64,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
}

/// Daily contribution of a single active appliance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceCost {
    pub category_id: String,
    pub index: usize,
    pub name: String,
    /// Quantity as entered, in the appliance's native unit
    pub usage: f64,
    /// Cost per day in dollars (weekly categories already divided by 7)
    pub daily_cost: f64,
    /// Energy per day in Wh
    pub daily_energy_wh: f64,
}

fn deserialize_entries<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, BTreeMap<usize, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, BTreeMap<usize, serde_json::Value>>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .map(|(category_id, quantities)| {
            let quantities = quantities
                .into_iter()
                .map(|(index, value)| (index, usage_from_value(&value)))
                .collect();
            (category_id, quantities)
        })
        .collect())
}

fn usage_from_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(number) => number.as_f64().map(sanitize_usage).unwrap_or(0.0),
        serde_json::Value::String(text) => parse_usage(text),
        _ => 0.0,
    }
}

fn sanitize_usage(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        0.0
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a usage entry; anything that is not a non-negative number is 0
pub fn parse_usage(text: &str) -> f64 {
    parse_number(text).map(sanitize_usage).unwrap_or(0.0)
}

/// Parse an electricity rate; falls back to the default unless positive
pub fn parse_rate(text: &str) -> f64 {
    parse_number(text)
        .filter(|rate| *rate > 0.0)
        .unwrap_or(DEFAULT_ELECTRICITY_RATE)
}

/// Parse a daily fixed charge; falls back to the default when negative or invalid
pub fn parse_fixed_rate(text: &str) -> f64 {
    parse_number(text)
        .filter(|rate| *rate >= 0.0)
        .unwrap_or(DEFAULT_DAILY_FIXED_RATE)
}

/// Parse a monthly budget; falls back to the default when negative or invalid
pub fn parse_budget(text: &str) -> f64 {
    parse_number(text)
        .filter(|budget| *budget >= 0.0)
        .unwrap_or(DEFAULT_MONTHLY_BUDGET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_usage_is_zero() {
        let snapshot = UsageSnapshot::new();
        assert_eq!(snapshot.usage("kitchen", 3), 0.0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_with_usage_leaves_original_untouched() {
        let first = UsageSnapshot::new().with_usage("kitchen", 0, 2.0);
        let second = first.with_usage("kitchen", 1, 1.5);

        assert_eq!(first.usage("kitchen", 1), 0.0);
        assert_eq!(second.usage("kitchen", 0), 2.0);
        assert_eq!(second.usage("kitchen", 1), 1.5);
    }

    #[test]
    fn test_invalid_quantities_become_zero() {
        let mut snapshot = UsageSnapshot::new();
        snapshot.set_usage("heating", 0, -4.0);
        snapshot.set_usage("heating", 1, f64::NAN);

        assert_eq!(snapshot.usage("heating", 0), 0.0);
        assert_eq!(snapshot.usage("heating", 1), 0.0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_merge_later_wins() {
        let mut snapshot = UsageSnapshot::new().with_usage("laundry", 0, 3.0);
        let edits = UsageSnapshot::new()
            .with_usage("laundry", 0, 5.0)
            .with_usage("lighting", 2, 6.0);
        snapshot.merge(&edits);

        assert_eq!(snapshot.usage("laundry", 0), 5.0);
        assert_eq!(snapshot.usage("lighting", 2), 6.0);
    }

    #[test]
    fn test_from_json() {
        let snapshot =
            UsageSnapshot::from_json(r#"{"kitchen": {"0": 2, "4": 0.5}, "laundry": {"1": -1}}"#)
                .unwrap();

        assert_eq!(snapshot.usage("kitchen", 0), 2.0);
        assert_eq!(snapshot.usage("kitchen", 4), 0.5);
        assert_eq!(snapshot.usage("laundry", 1), 0.0);
    }

    #[test]
    fn test_from_json_non_numeric_quantities() {
        let snapshot = UsageSnapshot::from_json(
            r#"{"kitchen": {"0": 2, "1": "abc", "2": null, "3": "2.5", "4": true, "5": [1]}}"#,
        )
        .unwrap();

        assert_eq!(snapshot.usage("kitchen", 0), 2.0);
        assert_eq!(snapshot.usage("kitchen", 1), 0.0);
        assert_eq!(snapshot.usage("kitchen", 2), 0.0);
        assert_eq!(snapshot.usage("kitchen", 3), 2.5);
        assert_eq!(snapshot.usage("kitchen", 4), 0.0);
        assert_eq!(snapshot.usage("kitchen", 5), 0.0);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = UsageSnapshot::from_json("not json");
        assert!(matches!(result, Err(Error::InvalidUsage(_))));
    }

    #[test]
    fn test_lenient_parsers() {
        assert_eq!(parse_usage("2.5"), 2.5);
        assert_eq!(parse_usage(" 3 "), 3.0);
        assert_eq!(parse_usage("abc"), 0.0);
        assert_eq!(parse_usage("-2"), 0.0);
        assert_eq!(parse_usage(""), 0.0);

        assert_eq!(parse_rate("0.31"), 0.31);
        assert_eq!(parse_rate("0"), 0.25);
        assert_eq!(parse_rate("cheap"), 0.25);

        assert_eq!(parse_fixed_rate("0"), 0.0);
        assert_eq!(parse_fixed_rate("-1"), 1.0);
        assert_eq!(parse_fixed_rate("x"), 1.0);

        assert_eq!(parse_budget("450"), 450.0);
        assert_eq!(parse_budget("inf"), 300.0);
        assert_eq!(parse_budget(""), 300.0);
    }
}
