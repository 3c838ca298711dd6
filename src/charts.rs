//! Chart construction for the dashboard.
//!
//! Charts are built server-side as ECharts option sets and handed to the
//! frontend as JSON; hover highlighting and tooltips run in the ECharts
//! runtime from pointer events, with no further calls back here.

use charming::{
    Chart,
    component::{Axis, Legend, Title},
    datatype::DataPointItem,
    element::{AxisPointer, AxisPointerType, AxisType, ItemStyle, Tooltip, Trigger},
    series::{Bar, Line},
};

/// Bar color for the rows holding the column maximum
pub const HIGHLIGHT_COLOR: &str = "orange";
/// Bar color for every other row
pub const BASE_COLOR: &str = "steelblue";

/// Which rows carry the maximum value.
///
/// Every row equal to the maximum is highlighted, not just the first.
#[must_use]
pub fn max_highlight(values: &[f64]) -> Vec<bool> {
    let max = values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    values.iter().map(|v| *v == max).collect()
}

/// Single-metric comparison bar chart, one bar per city.
#[must_use]
pub fn bar_chart(title: &str, labels: &[String], values: &[f64]) -> Chart {
    let bars: Vec<DataPointItem> = values
        .iter()
        .zip(max_highlight(values))
        .map(|(value, is_max)| {
            let color = if is_max { HIGHLIGHT_COLOR } else { BASE_COLOR };
            DataPointItem::new(*value).item_style(ItemStyle::new().color(color))
        })
        .collect();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(hover_tooltip())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels.to_vec()))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name(title).data(bars))
}

/// Single-series time-series line chart over chronological dates.
#[must_use]
pub fn line_chart(title: &str, dates: &[String], series_name: &str, values: &[f64]) -> Chart {
    Chart::new()
        .title(Title::new().text(title))
        .tooltip(hover_tooltip())
        .x_axis(Axis::new().type_(AxisType::Category).data(dates.to_vec()))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Line::new().name(series_name).data(values.to_vec()))
}

/// Two-series temperature chart: the wide high/low columns melted into one
/// chart keyed by date.
#[must_use]
pub fn temperature_line_chart(
    title: &str,
    dates: &[String],
    highs: &[f64],
    lows: &[f64],
) -> Chart {
    Chart::new()
        .title(Title::new().text(title))
        .tooltip(hover_tooltip())
        .legend(Legend::new())
        .x_axis(Axis::new().type_(AxisType::Category).data(dates.to_vec()))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Line::new().name("High Temp").data(highs.to_vec()))
        .series(Line::new().name("Low Temp").data(lows.to_vec()))
}

/// Nearest-point hover: axis-triggered tooltip with a cross pointer
fn hover_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_all_ties() {
        assert_eq!(
            max_highlight(&[10.0, 20.0, 20.0, 5.0]),
            vec![false, true, true, false]
        );
    }

    #[test]
    fn test_highlight_single_max() {
        assert_eq!(max_highlight(&[10.0, 20.0, 15.0]), vec![false, true, false]);
    }

    #[test]
    fn test_bar_chart_colors_follow_highlight() {
        let labels: Vec<String> = ["Denver", "Chicago", "Boston", "Miami"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let chart = bar_chart("Temperature", &labels, &[10.0, 20.0, 20.0, 5.0]);
        let options = chart.to_string();

        assert_eq!(options.matches(HIGHLIGHT_COLOR).count(), 2);
        assert_eq!(options.matches(BASE_COLOR).count(), 2);
    }

    #[test]
    fn test_temperature_chart_has_two_series() {
        let dates = vec!["06/01/2026".to_string(), "06/02/2026".to_string()];
        let chart = temperature_line_chart(
            "Change in High and Low Temperatures",
            &dates,
            &[78.4, 80.1],
            &[51.2, 54.3],
        );
        let options = chart.to_string();

        assert!(options.contains("High Temp"));
        assert!(options.contains("Low Temp"));
    }

    #[test]
    fn test_line_chart_keeps_date_order() {
        let dates = vec![
            "06/01/2026".to_string(),
            "06/02/2026".to_string(),
            "06/03/2026".to_string(),
        ];
        let chart = line_chart("Change in Humidity", &dates, "Humidity", &[35.0, 40.0, 38.0]);
        let options = chart.to_string();

        let first = options.find("06/01/2026").unwrap();
        let second = options.find("06/02/2026").unwrap();
        let third = options.find("06/03/2026").unwrap();
        assert!(first < second && second < third);
    }
}
