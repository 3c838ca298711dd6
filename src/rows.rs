//! Response-to-row mapping.
//!
//! One upstream observation becomes one table row. Air pressure arrives in
//! hectopascals and is always converted to inches of mercury, whichever unit
//! system the submission selected; the unit table labels it "inches"
//! accordingly. No other field is transformed.

use chrono::NaiveDate;

use crate::error::DashboardError;
use crate::table::{Column, TableBuilder};
use crate::weather::{CurrentWeather, DaySummary};

/// Hectopascals to inches of mercury
pub const HPA_TO_INHG: f64 = 0.029529983071;

/// Convert and round to two decimals for display
#[must_use]
pub fn pressure_inhg(hpa: f64) -> f64 {
    (hpa * HPA_TO_INHG * 100.0).round() / 100.0
}

/// Append one current-mode row from a tagged observation.
///
/// The live and archived shapes carry identical fields once decoded, so the
/// mapping is shared; a response without a weather description entry is
/// malformed, with no default substituted.
pub fn append_current(
    city_name: &str,
    observation: &CurrentWeather,
    table: &mut TableBuilder,
) -> Result<(), DashboardError> {
    let conditions = observation.conditions();
    let summary = conditions.weather.first().ok_or_else(|| {
        DashboardError::malformed(format!("observation for {city_name} has no weather entry"))
    })?;

    table.append_row([
        (Column::Cities, city_name.into()),
        (Column::Temperature, conditions.temp.into()),
        (Column::FeelsLike, conditions.feels_like.into()),
        (Column::UvIndex, conditions.uvi.into()),
        (Column::Humidity, conditions.humidity.into()),
        (Column::Cloudiness, conditions.clouds.into()),
        (Column::WindSpeed, conditions.wind_speed.into()),
        (Column::AirPressure, pressure_inhg(conditions.pressure).into()),
        (Column::Description, summary.description.as_str().into()),
        (Column::Icon, summary.icon.as_str().into()),
    ])
}

/// Append one historical-mode row from a day summary.
///
/// The ISO date is reformatted to month/day/year for display.
pub fn append_day_summary(
    summary: &DaySummary,
    table: &mut TableBuilder,
) -> Result<(), DashboardError> {
    let date = NaiveDate::parse_from_str(&summary.date, "%Y-%m-%d").map_err(|e| {
        DashboardError::malformed(format!("unparseable summary date '{}': {e}", summary.date))
    })?;

    table.append_row([
        (Column::Dates, date.format("%m/%d/%Y").to_string().into()),
        (Column::HighTemp, summary.temperature.max.into()),
        (Column::LowTemp, summary.temperature.min.into()),
        (Column::Humidity, summary.humidity.afternoon.into()),
        (Column::Precipitation, summary.precipitation.total.into()),
        (Column::MaxWindSpeed, summary.wind.max.speed.into()),
        (
            Column::AirPressure,
            pressure_inhg(summary.pressure.afternoon).into(),
        ),
    ])
}
