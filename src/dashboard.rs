//! Dashboard controller.
//!
//! Validates a submission, drives the weather client one blocking call per
//! city or per day, accumulates rows through the table builder, and shapes
//! the render payload: a unit-annotated display table, the chart set (only
//! when there are at least two rows to compare), a status line, and any
//! per-city or per-day failure badges. A single failed call never aborts the
//! submission; its row is skipped and reported instead.

use chrono::{DateTime, Days, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::charts;
use crate::error::DashboardError;
use crate::range::DateRange;
use crate::rows;
use crate::table::{Cell, Column, CURRENT_COLUMNS, HISTORICAL_COLUMNS, Table, TableBuilder, TableColumn};
use crate::units::{UnitSystem, format_with_unit};
use crate::weather::WeatherClient;

/// Upper bound on cities in one current-mode submission
pub const MAX_CITIES: usize = 5;

/// Historical data lags this many days behind today
pub const HISTORY_LAG_DAYS: u64 = 2;

/// Columns annotated with unit symbols in a current-mode display table
const CURRENT_UNIT_COLUMNS: &[Column] = &[
    Column::Temperature,
    Column::FeelsLike,
    Column::WindSpeed,
    Column::AirPressure,
    Column::Cloudiness,
    Column::Humidity,
];

/// Columns annotated with unit symbols in a historical display table
const HISTORICAL_UNIT_COLUMNS: &[Column] = &[
    Column::HighTemp,
    Column::LowTemp,
    Column::MaxWindSpeed,
    Column::AirPressure,
    Column::Humidity,
    Column::Precipitation,
];

/// Metrics charted across cities, in tab order
const CURRENT_CHART_COLUMNS: &[Column] = &[
    Column::Temperature,
    Column::FeelsLike,
    Column::Humidity,
    Column::UvIndex,
    Column::Cloudiness,
    Column::WindSpeed,
    Column::AirPressure,
];

/// A multi-city current/past-hour submission
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentRequest {
    /// Catalog city names, in selection order
    pub cities: Vec<String>,
    pub units: UnitSystem,
    /// Request the multi-day forecast alongside current conditions
    #[serde(default)]
    pub include_forecast: bool,
    /// Unix timestamp of an earlier hour today; `None` means live conditions
    #[serde(default)]
    pub earlier_hour: Option<i64>,
}

/// A single-city historical submission
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalRequest {
    pub city: String,
    pub units: UnitSystem,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Everything the frontend renders for one submission
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub table: Table,
    pub charts: Vec<ChartView>,
    pub status: String,
    pub warnings: Vec<String>,
    pub failures: Vec<FailureBadge>,
    /// Per-city forecast blocks, present only when requested
    pub forecasts: Vec<CityForecast>,
}

/// One chart, ready for the ECharts runtime
#[derive(Debug, Serialize)]
pub struct ChartView {
    /// Container element id (kebab-case)
    pub id: String,
    pub title: String,
    /// ECharts option set
    pub options: serde_json::Value,
}

/// A per-city or per-day failure, rendered instead of the missing row
#[derive(Debug, Serialize)]
pub struct FailureBadge {
    /// City name or display date the failure belongs to
    pub label: String,
    pub message: String,
}

/// Compact forecast block for one city
#[derive(Debug, Serialize)]
pub struct CityForecast {
    pub city: String,
    pub days: Vec<ForecastDay>,
}

#[derive(Debug, Serialize)]
pub struct ForecastDay {
    pub date: String,
    pub high: f64,
    pub low: f64,
    pub description: String,
}

/// Hour-slider bounds and date limits for the frontend controls
#[derive(Debug, Serialize)]
pub struct SubmissionBounds {
    /// Start of today, Unix seconds
    pub earliest_hour: i64,
    /// One hour before the current (floored) hour, Unix seconds
    pub latest_hour: i64,
    /// No complete archived hour exists yet today
    pub too_early_for_past_hour: bool,
    /// Latest calendar date a historical range may end on
    pub latest_history_date: NaiveDate,
}

/// Drives one submission end to end
pub struct Dashboard {
    client: WeatherClient,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Run a current/past-hour submission
    pub async fn current(&self, request: &CurrentRequest) -> Result<DashboardView, DashboardError> {
        validate_current(request, Local::now())?;

        let mut table = TableBuilder::new(CURRENT_COLUMNS);
        let mut failures = Vec::new();
        let mut forecasts = Vec::new();

        for city_name in &request.cities {
            let city = match catalog::lookup(city_name) {
                Ok(city) => city,
                Err(err) => {
                    // unknown city: skipped with no network call made
                    failures.push(FailureBadge {
                        label: city_name.clone(),
                        message: err.user_message(),
                    });
                    continue;
                }
            };

            let fetched = match request.earlier_hour {
                Some(timestamp) => self.client.past_hour(city, request.units, timestamp).await,
                None => {
                    self.client
                        .current(city, request.units, request.include_forecast)
                        .await
                }
            };

            let observation = match fetched {
                Ok(observation) => observation,
                Err(err) => {
                    tracing::warn!(city = city.name, error = %err, "skipping city after failed call");
                    failures.push(FailureBadge {
                        label: city_name.clone(),
                        message: err.user_message(),
                    });
                    continue;
                }
            };

            if let Err(err) = rows::append_current(city_name, &observation, &mut table) {
                failures.push(FailureBadge {
                    label: city_name.clone(),
                    message: err.user_message(),
                });
                continue;
            }

            if request.include_forecast {
                forecasts.push(city_forecast(city_name, observation.forecast()));
            }
        }

        assemble_current_view(&request.cities, request.units, &table, failures, forecasts)
    }

    /// Run a historical submission
    pub async fn historical(
        &self,
        request: &HistoricalRequest,
    ) -> Result<DashboardView, DashboardError> {
        let city = catalog::lookup(&request.city)?;
        let range = validate_historical(request, Local::now())?;

        let mut table = TableBuilder::new(HISTORICAL_COLUMNS);
        let mut failures = Vec::new();

        for date in range.iter() {
            let summary = match self.client.day_summary(city, request.units, date).await {
                Ok(summary) => summary,
                Err(err) => {
                    tracing::warn!(city = city.name, %date, error = %err, "skipping day after failed call");
                    failures.push(FailureBadge {
                        label: date.format("%m/%d/%Y").to_string(),
                        message: err.user_message(),
                    });
                    continue;
                }
            };

            if let Err(err) = rows::append_day_summary(&summary, &mut table) {
                failures.push(FailureBadge {
                    label: date.format("%m/%d/%Y").to_string(),
                    message: err.user_message(),
                });
            }
        }

        assemble_historical_view(&request.city, &range, request.units, &table, failures)
    }
}

/// Bounds for the frontend controls, computed from the supplied clock
#[must_use]
pub fn submission_bounds(now: DateTime<Local>) -> SubmissionBounds {
    let (earliest_hour, latest_hour) = hour_bounds(now);
    SubmissionBounds {
        earliest_hour,
        latest_hour,
        too_early_for_past_hour: latest_hour < earliest_hour,
        latest_history_date: latest_history_date(now),
    }
}

/// [start of today, now floored to the hour minus one hour], Unix seconds
fn hour_bounds(now: DateTime<Local>) -> (i64, i64) {
    let midnight_offset = i64::from(now.time().num_seconds_from_midnight());
    let day_start = now.timestamp() - midnight_offset;

    let floored = now
        .with_minute(0)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(now);
    let latest = floored.timestamp() - 3600;

    (day_start, latest)
}

fn latest_history_date(now: DateTime<Local>) -> NaiveDate {
    now.date_naive()
        .checked_sub_days(Days::new(HISTORY_LAG_DAYS))
        .unwrap_or_else(|| now.date_naive())
}

/// Validate a current-mode submission against the supplied clock
fn validate_current(request: &CurrentRequest, now: DateTime<Local>) -> Result<(), DashboardError> {
    if request.cities.is_empty() {
        return Err(DashboardError::validation("Select at least one city."));
    }
    if request.cities.len() > MAX_CITIES {
        return Err(DashboardError::validation(format!(
            "Select at most {MAX_CITIES} cities."
        )));
    }

    if let Some(timestamp) = request.earlier_hour {
        let (earliest, latest) = hour_bounds(now);
        if latest < earliest {
            return Err(DashboardError::validation(
                "It is currently too early in the day to display an earlier hour.",
            ));
        }
        if timestamp < earliest || timestamp > latest {
            return Err(DashboardError::validation(
                "Selected hour must fall between the start of today and one hour ago.",
            ));
        }
    }

    Ok(())
}

/// Validate a historical submission and produce its date range
fn validate_historical(
    request: &HistoricalRequest,
    now: DateTime<Local>,
) -> Result<DateRange, DashboardError> {
    let range = DateRange::new(request.start_date, request.end_date)?;

    let latest = latest_history_date(now);
    if range.end() > latest {
        return Err(DashboardError::validation(format!(
            "Historical weather data is only available through {}.",
            latest.format("%m/%d/%Y")
        )));
    }

    Ok(range)
}

fn assemble_current_view(
    cities: &[String],
    units: UnitSystem,
    table: &TableBuilder,
    failures: Vec<FailureBadge>,
    forecasts: Vec<CityForecast>,
) -> Result<DashboardView, DashboardError> {
    let mut warnings = Vec::new();
    let charts = if table.rows() >= 2 {
        current_charts(table)?
    } else {
        warnings.push("Warning: Select multiple cities to view comparison charts.".to_string());
        Vec::new()
    };

    let cities_str = cities.join(" | ");
    Ok(DashboardView {
        table: display_table(table, CURRENT_UNIT_COLUMNS, units),
        charts,
        status: format!("Displaying weather data for the following cities:\n\n{cities_str}"),
        warnings,
        failures,
        forecasts,
    })
}

fn assemble_historical_view(
    city: &str,
    range: &DateRange,
    units: UnitSystem,
    table: &TableBuilder,
    failures: Vec<FailureBadge>,
) -> Result<DashboardView, DashboardError> {
    let mut warnings = Vec::new();
    let charts = if table.rows() >= 2 {
        historical_charts(table)?
    } else {
        warnings.push("Warning: Select multiple days to view comparison charts.".to_string());
        Vec::new()
    };

    Ok(DashboardView {
        table: display_table(table, HISTORICAL_UNIT_COLUMNS, units),
        charts,
        status: format!(
            "Displaying weather data for:\n\n{city} ({})",
            range.display_span()
        ),
        warnings,
        failures,
        forecasts: Vec::new(),
    })
}

/// One comparison bar chart per metric, one bar per city
fn current_charts(table: &TableBuilder) -> Result<Vec<ChartView>, DashboardError> {
    let cities = table.texts(Column::Cities);
    CURRENT_CHART_COLUMNS
        .iter()
        .map(|&column| {
            let chart = charts::bar_chart(column.name(), &cities, &table.numbers(column));
            chart_view(column.name(), chart)
        })
        .collect()
}

/// The temperature melt plus one line chart per remaining metric
fn historical_charts(table: &TableBuilder) -> Result<Vec<ChartView>, DashboardError> {
    let dates = table.texts(Column::Dates);

    let mut views = vec![chart_view(
        "Temperatures",
        charts::temperature_line_chart(
            "Change in High and Low Temperatures",
            &dates,
            &table.numbers(Column::HighTemp),
            &table.numbers(Column::LowTemp),
        ),
    )?];

    for column in [
        Column::Humidity,
        Column::Precipitation,
        Column::MaxWindSpeed,
        Column::AirPressure,
    ] {
        let chart = charts::line_chart(
            &format!("Change in {}", column.name()),
            &dates,
            column.name(),
            &table.numbers(column),
        );
        views.push(chart_view(column.name(), chart)?);
    }

    Ok(views)
}

fn chart_view(title: &str, chart: charming::Chart) -> Result<ChartView, DashboardError> {
    let options = serde_json::to_value(&chart)
        .map_err(|e| DashboardError::general(format!("failed to serialize chart options: {e}")))?;
    Ok(ChartView {
        id: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        options,
    })
}

/// Copy the accumulated columns into a display table, annotating the
/// unit-bearing ones
fn display_table(table: &TableBuilder, unit_columns: &[Column], units: UnitSystem) -> Table {
    Table {
        columns: table
            .schema()
            .iter()
            .map(|&column| {
                let cells = table.column(column).unwrap_or(&[]);
                let values = cells
                    .iter()
                    .map(|cell| match cell.as_number() {
                        Some(value) if unit_columns.contains(&column) => {
                            Cell::Text(format_with_unit(value, column, units))
                        }
                        _ => cell.clone(),
                    })
                    .collect();
                TableColumn {
                    name: column.name(),
                    values,
                }
            })
            .collect(),
    }
}

fn city_forecast(city: &str, days: &[crate::weather::DailyForecast]) -> CityForecast {
    CityForecast {
        city: city.to_string(),
        days: days
            .iter()
            .map(|day| ForecastDay {
                date: DateTime::from_timestamp(day.dt, 0)
                    .map(|dt| dt.date_naive().format("%m/%d/%Y").to_string())
                    .unwrap_or_else(|| day.dt.to_string()),
                high: day.temp.max,
                low: day.temp.min,
                description: day
                    .weather
                    .first()
                    .map(|w| w.description.clone())
                    .unwrap_or_default(),
            })
            .collect(),
    }
}
