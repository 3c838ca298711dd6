//! Integration tests for the weatherboard library.
//!
//! Everything here runs against fixture JSON for the three upstream response
//! shapes; no network access is required.

use rstest::rstest;

use weatherboard::charts::{self, BASE_COLOR, HIGHLIGHT_COLOR};
use weatherboard::range::DateRange;
use weatherboard::rows;
use weatherboard::table::{CURRENT_COLUMNS, Cell, Column, HISTORICAL_COLUMNS, TableBuilder};
use weatherboard::units::{UnitSystem, format_with_unit};
use weatherboard::weather::CurrentWeather;
use weatherboard::weather::openweather::{DaySummary, OneCallResponse, TimemachineResponse};

const LIVE_FIXTURE: &str = r#"{
    "current": {
        "temp": 72.5, "feels_like": 74.0, "uvi": 3.2, "humidity": 40,
        "clouds": 20, "wind_speed": 5.5, "pressure": 1013,
        "weather": [{"description": "clear sky", "icon": "01d"}]
    },
    "daily": [
        {"dt": 1780315200, "temp": {"min": 55.0, "max": 79.2},
         "weather": [{"description": "few clouds", "icon": "02d"}]}
    ]
}"#;

const ARCHIVED_FIXTURE: &str = r#"{
    "data": [{
        "temp": 61.0, "feels_like": 59.5, "uvi": 0.0, "humidity": 82,
        "clouds": 95, "wind_speed": 3.4, "pressure": 1020,
        "weather": [{"description": "overcast clouds", "icon": "04n"}]
    }]
}"#;

fn day_summary_fixture(date: &str, high: f64, low: f64, humidity: f64) -> DaySummary {
    serde_json::from_str(&format!(
        r#"{{
            "date": "{date}",
            "temperature": {{"min": {low}, "max": {high}}},
            "humidity": {{"afternoon": {humidity}}},
            "precipitation": {{"total": 0.2}},
            "wind": {{"max": {{"speed": 11.0}}}},
            "pressure": {{"afternoon": 1013}}
        }}"#
    ))
    .expect("fixture parses")
}

#[test]
fn live_fixture_flows_through_row_builder() {
    let response: OneCallResponse = serde_json::from_str(LIVE_FIXTURE).unwrap();
    let observation = CurrentWeather::Live {
        conditions: response.current,
        forecast: response.daily.unwrap_or_default(),
    };

    let mut table = TableBuilder::new(CURRENT_COLUMNS);
    rows::append_current("Denver", &observation, &mut table).unwrap();

    assert_eq!(table.rows(), 1);
    assert_eq!(table.numbers(Column::Temperature), vec![72.5]);
    assert_eq!(table.numbers(Column::Humidity), vec![40.0]);
    // 1013 hPa through the fixed conversion factor, rounded to 2 decimals
    assert_eq!(table.numbers(Column::AirPressure), vec![29.91]);
    assert_eq!(observation.forecast().len(), 1);
}

#[test]
fn archived_fixture_uses_the_same_columns() {
    let response: TimemachineResponse = serde_json::from_str(ARCHIVED_FIXTURE).unwrap();
    let conditions = response.data.into_iter().next().unwrap();
    let observation = CurrentWeather::Archived { conditions };

    let mut table = TableBuilder::new(CURRENT_COLUMNS);
    rows::append_current("Boston", &observation, &mut table).unwrap();

    assert_eq!(table.texts(Column::Cities), vec!["Boston"]);
    assert_eq!(table.numbers(Column::Temperature), vec![61.0]);
    assert_eq!(table.texts(Column::Description), vec!["overcast clouds"]);
    assert!(observation.forecast().is_empty());
}

#[rstest]
#[case(UnitSystem::Imperial)]
#[case(UnitSystem::Metric)]
#[case(UnitSystem::Standard)]
fn pressure_column_is_identical_across_unit_systems(#[case] units: UnitSystem) {
    // the conversion is unconditional; only the label could ever vary, and
    // the unit table pins it to inches everywhere
    let mut table = TableBuilder::new(HISTORICAL_COLUMNS);
    rows::append_day_summary(&day_summary_fixture("2026-06-01", 78.4, 51.2, 35.0), &mut table)
        .unwrap();
    assert_eq!(table.numbers(Column::AirPressure), vec![29.91]);
    assert_eq!(Column::AirPressure.unit(units), Some("inches"));
}

#[test]
fn historical_range_emits_rows_in_calendar_order() {
    let start = chrono::NaiveDate::from_ymd_opt(2026, 5, 29).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2026, 6, 2).unwrap();
    let range = DateRange::new(start, end).unwrap();

    let mut table = TableBuilder::new(HISTORICAL_COLUMNS);
    for date in range.iter() {
        let summary = day_summary_fixture(&date.format("%Y-%m-%d").to_string(), 70.0, 50.0, 40.0);
        rows::append_day_summary(&summary, &mut table).unwrap();
    }

    assert_eq!(table.rows(), range.len());
    assert_eq!(
        table.texts(Column::Dates),
        vec![
            "05/29/2026",
            "05/30/2026",
            "05/31/2026",
            "06/01/2026",
            "06/02/2026"
        ]
    );
}

#[test]
fn eight_day_range_is_blocked_before_any_fetch() {
    let start = chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2026, 6, 8).unwrap();
    assert!(DateRange::new(start, end).is_err());
}

#[test]
fn bar_chart_highlights_every_tied_maximum() {
    let labels: Vec<String> = ["Denver", "Chicago", "Boston", "Miami"]
        .iter()
        .map(ToString::to_string)
        .collect();

    let tied = charts::bar_chart("Humidity", &labels, &[10.0, 20.0, 20.0, 5.0]).to_string();
    assert_eq!(tied.matches(HIGHLIGHT_COLOR).count(), 2);
    assert_eq!(tied.matches(BASE_COLOR).count(), 2);

    let single = charts::bar_chart("Humidity", &labels[..3].to_vec(), &[10.0, 20.0, 15.0]).to_string();
    assert_eq!(single.matches(HIGHLIGHT_COLOR).count(), 1);
    assert_eq!(single.matches(BASE_COLOR).count(), 2);
}

#[test]
fn unit_formatter_matches_selected_system() {
    assert_eq!(
        format_with_unit(72.5, Column::Temperature, UnitSystem::Imperial),
        "72.5 F"
    );
    assert_eq!(
        format_with_unit(72.5, Column::Temperature, UnitSystem::Metric),
        "72.5 C"
    );
}

#[test]
fn display_cells_round_trip_through_serde() {
    let mut table = TableBuilder::new(HISTORICAL_COLUMNS);
    rows::append_day_summary(&day_summary_fixture("2026-06-01", 78.4, 51.2, 35.0), &mut table)
        .unwrap();
    let frozen = table.finish();

    let json = serde_json::to_string(&frozen).unwrap();
    assert!(json.contains("\"High Temp\""));
    assert!(json.contains("06/01/2026"));

    // untagged cells serialize as bare numbers and strings
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let columns = value["columns"].as_array().unwrap();
    assert_eq!(columns.len(), HISTORICAL_COLUMNS.len());
}

#[test]
fn cells_display_like_their_sources() {
    assert_eq!(Cell::Number(40.0).display(), "40");
    assert_eq!(Cell::Number(72.5).display(), "72.5");
    assert_eq!(Cell::Text("clear sky".into()).display(), "clear sky");
}
