//! Unit systems and the unit table.
//!
//! The upstream API takes a lowercase unit-system code and returns physical
//! quantities in that system; the table and charts annotate values with the
//! matching symbol. Air Pressure is always reported in inches of mercury and
//! Precipitation in millimeters, whichever system is selected.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::table::Column;

/// Unit system governing which physical units the upstream API returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Imperial,
    Metric,
    Standard,
}

impl UnitSystem {
    /// All supported systems, in display order
    pub const ALL: [UnitSystem; 3] = [
        UnitSystem::Imperial,
        UnitSystem::Metric,
        UnitSystem::Standard,
    ];

    /// Lowercase code sent upstream as the `units` query parameter
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
            UnitSystem::Standard => "standard",
        }
    }

    /// Display label for the unit selector
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "Imperial (Fahrenheit, Mph)",
            UnitSystem::Metric => "Metric (Celsius, Meters/sec)",
            UnitSystem::Standard => "Standard (Kelvin, Meters/sec)",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "metric" => Ok(UnitSystem::Metric),
            "standard" => Ok(UnitSystem::Standard),
            other => Err(DashboardError::validation(format!(
                "unknown unit system '{other}'"
            ))),
        }
    }
}

impl Column {
    /// Unit table: the symbol displayed for this column under the given
    /// system, or `None` for unitless columns. Total over every unit-bearing
    /// column, so a lookup miss cannot happen at runtime.
    #[must_use]
    pub fn unit(self, units: UnitSystem) -> Option<&'static str> {
        match self {
            Column::Temperature | Column::FeelsLike | Column::HighTemp | Column::LowTemp => {
                Some(match units {
                    UnitSystem::Imperial => "F",
                    UnitSystem::Metric => "C",
                    UnitSystem::Standard => "K",
                })
            }
            Column::WindSpeed | Column::MaxWindSpeed => Some(match units {
                UnitSystem::Imperial => "mph",
                UnitSystem::Metric | UnitSystem::Standard => "m/s",
            }),
            Column::Humidity | Column::Cloudiness => Some("%"),
            // only available in inches / millimeters, whatever the system
            Column::AirPressure => Some("inches"),
            Column::Precipitation => Some("mm"),
            Column::Cities
            | Column::UvIndex
            | Column::Description
            | Column::Icon
            | Column::Dates => None,
        }
    }
}

/// Append the unit symbol for display: `"<value> <symbol>"`.
///
/// Columns without a unit render the bare value; callers only annotate the
/// unit-bearing columns of each mode.
#[must_use]
pub fn format_with_unit(value: f64, column: Column, units: UnitSystem) -> String {
    match column.unit(units) {
        Some(symbol) => format!("{value} {symbol}"),
        None => value.to_string(),
    }
}
