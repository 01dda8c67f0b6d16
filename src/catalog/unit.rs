//! Usage units
//!
//! A unit label from the catalog is resolved once into either a time-based
//! unit (a fixed number of hours per usage unit) or a bare quantity such as
//! a load of washing or a kettle boil.

use serde::{Serialize, Serializer};
use std::fmt;

/// Hours of appliance running time represented by one usage unit
///
/// | unit         | hours |
/// |--------------|-------|
/// | `day`        | 24    |
/// | `8 hours`    | 8     |
/// | `30 minutes` | 0.5   |
/// | `hour`       | 1     |
fn known_hours_per_unit(label: &str) -> Option<f64> {
    match label {
        "day" => Some(24.0),
        "8 hours" => Some(8.0),
        "30 minutes" => Some(0.5),
        "hour" => Some(1.0),
        _ => None,
    }
}

/// Usage unit of an appliance
#[derive(Debug, Clone, PartialEq)]
pub enum UsageUnit {
    /// Running time, converted to hours for power-rated appliances
    TimeBased { label: String, hours_per_unit: f64 },
    /// Opaque count (`load`, `boil`, `cycle`, ...) used as a bare multiplier
    Quantity { label: String },
}

impl UsageUnit {
    /// Resolve a catalog unit label
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match known_hours_per_unit(label) {
            Some(hours_per_unit) => Self::TimeBased {
                label: label.to_string(),
                hours_per_unit,
            },
            None => Self::Quantity {
                label: label.to_string(),
            },
        }
    }

    /// The label as written in the catalog
    pub fn label(&self) -> &str {
        match self {
            Self::TimeBased { label, .. } | Self::Quantity { label } => label,
        }
    }

    pub fn is_time_based(&self) -> bool {
        matches!(self, Self::TimeBased { .. })
    }

    /// Elapsed hours for a usage quantity
    ///
    /// Labels outside the time table read the usage number itself as hours.
    pub fn hours(&self, usage: f64) -> f64 {
        match self {
            Self::TimeBased { hours_per_unit, .. } => usage * hours_per_unit,
            Self::Quantity { .. } => usage,
        }
    }
}

impl fmt::Display for UsageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for UsageUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
