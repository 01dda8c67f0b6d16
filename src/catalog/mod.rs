//! Appliance catalog
//!
//! Static appliance data grouped into categories. Each record carries a
//! power rating, a flat reference cost, or both, plus a usage unit. Units
//! and cost bases are resolved once when the catalog is built so the
//! pricing engine never inspects raw unit strings.

mod unit;

pub use unit::UsageUnit;

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Catalog shipped with the application
const BUILTIN_CATALOG: &str = include_str!("appliances.toml");

/// How usage quantities of a category are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Quantities per day
    Daily,
    /// Quantities per week (laundry), normalized to per-day costs
    Weekly,
}

impl Cadence {
    /// Number of days one entered quantity covers
    pub fn days(&self) -> f64 {
        match self {
            Self::Daily => 1.0,
            Self::Weekly => 7.0,
        }
    }
}

/// How the cost of an appliance is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostBasis {
    /// Power rating with a time-based unit
    PowerDraw { watts: f64 },
    /// Flat cost in cents, authored at the $0.25/kWh reference rate
    ReferenceCost { cents: f64 },
    /// Neither a usable power rating nor a reference cost
    Unpriced,
}

impl CostBasis {
    /// Pick the basis for a record: power wins only with a time-based unit
    pub fn resolve(power_watts: Option<f64>, reference_cost_cents: Option<f64>, unit: &UsageUnit) -> Self {
        match (power_watts, reference_cost_cents, unit) {
            (Some(watts), _, UsageUnit::TimeBased { .. }) => Self::PowerDraw { watts },
            (_, Some(cents), _) => Self::ReferenceCost { cents },
            _ => Self::Unpriced,
        }
    }
}

/// A single appliance record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appliance {
    pub name: String,
    pub power_watts: Option<f64>,
    pub reference_cost_cents: Option<f64>,
    pub unit: UsageUnit,
    pub basis: CostBasis,
}

impl Appliance {
    /// Build a record, checking the catalog invariants
    pub fn new(
        name: &str,
        power_watts: Option<f64>,
        reference_cost_cents: Option<f64>,
        unit: &str,
    ) -> Result<Self> {
        if let Some(watts) = power_watts {
            if !(watts.is_finite() && watts > 0.0) {
                return Err(Error::Catalog(format!(
                    "{}: power must be positive, got {}",
                    name, watts
                )));
            }
        }
        if let Some(cents) = reference_cost_cents {
            if !(cents.is_finite() && cents >= 0.0) {
                return Err(Error::Catalog(format!(
                    "{}: cost must not be negative, got {}",
                    name, cents
                )));
            }
        }
        if unit.trim().is_empty() {
            return Err(Error::Catalog(format!("{}: unit is empty", name)));
        }

        let unit = UsageUnit::parse(unit);
        let basis = CostBasis::resolve(power_watts, reference_cost_cents, &unit);
        if basis == CostBasis::Unpriced {
            log::warn!("Appliance '{}' has no usable power rating or cost, it will cost 0", name);
        }

        Ok(Self {
            name: name.to_string(),
            power_watts,
            reference_cost_cents,
            unit,
            basis,
        })
    }
}

/// A named group of appliances
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub cadence: Cadence,
    pub appliances: Vec<Appliance>,
}

impl Category {
    /// Build a category; `laundry` defaults to a weekly cadence
    pub fn new(id: &str, name: &str, cadence: Option<Cadence>, appliances: Vec<Appliance>) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(Error::Catalog(format!("category '{}' has an empty id", name)));
        }

        let cadence = cadence.unwrap_or(if id == "laundry" {
            Cadence::Weekly
        } else {
            Cadence::Daily
        });

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            cadence,
            appliances,
        })
    }

    pub fn appliance(&self, index: usize) -> Option<&Appliance> {
        self.appliances.get(index)
    }

    /// Find an appliance by index or by case-insensitive name
    pub fn find_appliance(&self, key: &str) -> Option<(usize, &Appliance)> {
        let key = key.trim();
        if let Ok(index) = key.parse::<usize>() {
            return self.appliance(index).map(|appliance| (index, appliance));
        }

        self.appliances
            .iter()
            .enumerate()
            .find(|(_, appliance)| appliance.name.eq_ignore_ascii_case(key))
    }
}

/// The full appliance catalog, categories in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate category ids
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                return Err(Error::Catalog(format!("duplicate category id '{}'", category.id)));
            }
        }

        Ok(Self { categories })
    }

    /// The catalog shipped with the application
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded {} appliances in {} categories from {}",
            catalog.appliance_count(),
            catalog.categories.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a catalog from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(content)
            .map_err(|e| Error::Catalog(format!("Failed to parse catalog: {}", e)))?;

        let categories = raw
            .categories
            .into_iter()
            .map(|category| {
                let appliances = category
                    .appliances
                    .iter()
                    .map(|a| Appliance::new(&a.name, a.power, a.cost, &a.unit))
                    .collect::<Result<Vec<_>>>()?;
                Category::new(&category.id, &category.name, category.cadence, appliances)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Total number of appliances across all categories
    pub fn appliance_count(&self) -> usize {
        self.categories.iter().map(|c| c.appliances.len()).sum()
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    categories: Vec<RawCategory>,
}

#[derive(Deserialize)]
struct RawCategory {
    id: String,
    name: String,
    #[serde(default)]
    cadence: Option<Cadence>,
    #[serde(default)]
    appliances: Vec<RawAppliance>,
}

#[derive(Deserialize)]
struct RawAppliance {
    name: String,
    #[serde(default)]
    power: Option<f64>,
    #[serde(default)]
    cost: Option<f64>,
    unit: String,
}
