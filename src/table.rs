//! Column-oriented result tables.
//!
//! A dashboard submission produces one table: one row per city (current mode)
//! or per day (historical mode), with a column set fixed per mode. The
//! builder owns growable columnar buffers keyed by a schema decided at
//! construction time and rejects rows that name columns outside it, so every
//! column is the same length whenever the table is rendered.

use serde::Serialize;

use crate::error::DashboardError;

/// Every named column the dashboard can produce, across both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    #[serde(rename = "Cities")]
    Cities,
    #[serde(rename = "Temperature")]
    Temperature,
    #[serde(rename = "Feels Like")]
    FeelsLike,
    #[serde(rename = "UV Index")]
    UvIndex,
    #[serde(rename = "Humidity")]
    Humidity,
    #[serde(rename = "Cloudiness")]
    Cloudiness,
    #[serde(rename = "Wind Speed")]
    WindSpeed,
    #[serde(rename = "Air Pressure")]
    AirPressure,
    #[serde(rename = "Description")]
    Description,
    #[serde(rename = "Icon")]
    Icon,
    #[serde(rename = "Dates")]
    Dates,
    #[serde(rename = "High Temp")]
    HighTemp,
    #[serde(rename = "Low Temp")]
    LowTemp,
    #[serde(rename = "Precipitation")]
    Precipitation,
    #[serde(rename = "Max Wind Speed")]
    MaxWindSpeed,
}

impl Column {
    /// Display name, as shown in table headers and chart titles
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Column::Cities => "Cities",
            Column::Temperature => "Temperature",
            Column::FeelsLike => "Feels Like",
            Column::UvIndex => "UV Index",
            Column::Humidity => "Humidity",
            Column::Cloudiness => "Cloudiness",
            Column::WindSpeed => "Wind Speed",
            Column::AirPressure => "Air Pressure",
            Column::Description => "Description",
            Column::Icon => "Icon",
            Column::Dates => "Dates",
            Column::HighTemp => "High Temp",
            Column::LowTemp => "Low Temp",
            Column::Precipitation => "Precipitation",
            Column::MaxWindSpeed => "Max Wind Speed",
        }
    }
}

/// Column set for a current/past-hour submission, in display order
pub const CURRENT_COLUMNS: &[Column] = &[
    Column::Cities,
    Column::Temperature,
    Column::FeelsLike,
    Column::UvIndex,
    Column::Humidity,
    Column::Cloudiness,
    Column::WindSpeed,
    Column::AirPressure,
    Column::Description,
    Column::Icon,
];

/// Column set for a historical submission, in display order
pub const HISTORICAL_COLUMNS: &[Column] = &[
    Column::Dates,
    Column::HighTemp,
    Column::LowTemp,
    Column::Humidity,
    Column::Precipitation,
    Column::MaxWindSpeed,
    Column::AirPressure,
];

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value, if this cell holds one
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    /// Render the cell the way the table displays it
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Columnar accumulator with a schema fixed at construction.
///
/// Rows are appended atomically: a row must cover every schema column exactly
/// once, and may not name a column outside the schema.
#[derive(Debug)]
pub struct TableBuilder {
    schema: &'static [Column],
    buffers: Vec<Vec<Cell>>,
}

impl TableBuilder {
    #[must_use]
    pub fn new(schema: &'static [Column]) -> Self {
        Self {
            schema,
            buffers: schema.iter().map(|_| Vec::new()).collect(),
        }
    }

    /// Schema this builder accumulates against
    #[must_use]
    pub fn schema(&self) -> &'static [Column] {
        self.schema
    }

    /// Number of complete rows appended so far
    #[must_use]
    pub fn rows(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    /// Append one row. Every schema column must appear exactly once; a column
    /// outside the schema rejects the whole row and the buffers are left
    /// untouched.
    pub fn append_row(
        &mut self,
        row: impl IntoIterator<Item = (Column, Cell)>,
    ) -> Result<(), DashboardError> {
        let mut staged: Vec<Option<Cell>> = vec![None; self.schema.len()];

        for (column, cell) in row {
            let index = self
                .schema
                .iter()
                .position(|c| *c == column)
                .ok_or_else(|| {
                    DashboardError::general(format!(
                        "column '{}' is not part of this table's schema",
                        column.name()
                    ))
                })?;
            if staged[index].is_some() {
                return Err(DashboardError::general(format!(
                    "column '{}' appended twice in one row",
                    column.name()
                )));
            }
            staged[index] = Some(cell);
        }

        for (slot, column) in staged.iter().zip(self.schema) {
            if slot.is_none() {
                return Err(DashboardError::general(format!(
                    "row is missing column '{}'",
                    column.name()
                )));
            }
        }

        for (buffer, cell) in self.buffers.iter_mut().zip(staged) {
            // covered by the loop above
            if let Some(cell) = cell {
                buffer.push(cell);
            }
        }

        Ok(())
    }

    /// Cells of one column, in row order
    #[must_use]
    pub fn column(&self, column: Column) -> Option<&[Cell]> {
        self.schema
            .iter()
            .position(|c| *c == column)
            .map(|i| self.buffers[i].as_slice())
    }

    /// Numeric values of one column, in row order (non-numeric cells skipped)
    #[must_use]
    pub fn numbers(&self, column: Column) -> Vec<f64> {
        self.column(column)
            .map(|cells| cells.iter().filter_map(Cell::as_number).collect())
            .unwrap_or_default()
    }

    /// Display strings of one column, in row order
    #[must_use]
    pub fn texts(&self, column: Column) -> Vec<String> {
        self.column(column)
            .map(|cells| cells.iter().map(Cell::display).collect())
            .unwrap_or_default()
    }

    /// Freeze the accumulated columns into a renderable table
    #[must_use]
    pub fn finish(self) -> Table {
        let rows = self.rows();
        debug_assert!(
            self.buffers.iter().all(|b| b.len() == rows),
            "table columns drifted out of alignment"
        );
        Table {
            columns: self
                .schema
                .iter()
                .zip(self.buffers)
                .map(|(column, values)| TableColumn {
                    name: column.name(),
                    values,
                })
                .collect(),
        }
    }
}

/// An ordered sequence of named, equal-length columns
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    pub name: &'static str,
    pub values: Vec<Cell>,
}

impl Table {
    /// Number of rows (columns are equal length by construction)
    #[must_use]
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(city: &str, temp: f64) -> Vec<(Column, Cell)> {
        vec![
            (Column::Cities, city.into()),
            (Column::Temperature, temp.into()),
            (Column::FeelsLike, temp.into()),
            (Column::UvIndex, 1.0.into()),
            (Column::Humidity, 40.0.into()),
            (Column::Cloudiness, 20.0.into()),
            (Column::WindSpeed, 5.0.into()),
            (Column::AirPressure, 29.92.into()),
            (Column::Description, "clear sky".into()),
            (Column::Icon, "01d".into()),
        ]
    }

    #[test]
    fn test_append_row_keeps_columns_aligned() {
        let mut builder = TableBuilder::new(CURRENT_COLUMNS);
        builder.append_row(sample_row("Denver", 72.5)).unwrap();
        builder.append_row(sample_row("Chicago", 65.0)).unwrap();

        assert_eq!(builder.rows(), 2);
        let table = builder.finish();
        assert_eq!(table.rows(), 2);
        for column in &table.columns {
            assert_eq!(column.values.len(), 2);
        }
    }

    #[test]
    fn test_append_row_rejects_unknown_column() {
        let mut builder = TableBuilder::new(HISTORICAL_COLUMNS);
        let result = builder.append_row(vec![(Column::Cities, "Denver".into())]);
        assert!(result.is_err());
        assert_eq!(builder.rows(), 0);
    }

    #[test]
    fn test_append_row_rejects_partial_row() {
        let mut builder = TableBuilder::new(CURRENT_COLUMNS);
        let result = builder.append_row(vec![
            (Column::Cities, "Denver".into()),
            (Column::Temperature, 72.5.into()),
        ]);
        assert!(result.is_err());
        // a rejected row leaves nothing behind
        assert_eq!(builder.rows(), 0);
    }

    #[test]
    fn test_column_accessors() {
        let mut builder = TableBuilder::new(CURRENT_COLUMNS);
        builder.append_row(sample_row("Denver", 72.5)).unwrap();

        assert_eq!(builder.numbers(Column::Temperature), vec![72.5]);
        assert_eq!(builder.texts(Column::Cities), vec!["Denver".to_string()]);
        assert!(builder.column(Column::Dates).is_none());
    }

    #[test]
    fn test_row_order_matches_append_order() {
        let mut builder = TableBuilder::new(CURRENT_COLUMNS);
        for (city, temp) in [("Denver", 72.5), ("Chicago", 65.0), ("Boston", 58.1)] {
            builder.append_row(sample_row(city, temp)).unwrap();
        }
        assert_eq!(
            builder.texts(Column::Cities),
            vec!["Denver", "Chicago", "Boston"]
        );
        assert_eq!(builder.numbers(Column::Temperature), vec![72.5, 65.0, 58.1]);
    }
}
