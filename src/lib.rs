//! `Weatherboard` - Single-user weather dashboard
//!
//! This library provides the core functionality for fetching current,
//! past-hour and historical weather observations for a fixed city catalog,
//! reshaping them into column-oriented tables, and building the table and
//! chart payloads the web UI renders.

pub mod api;
pub mod catalog;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod range;
pub mod rows;
pub mod table;
pub mod units;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use catalog::City;
pub use config::DashboardConfig;
pub use dashboard::{CurrentRequest, Dashboard, DashboardView, HistoricalRequest};
pub use error::DashboardError;
pub use range::DateRange;
pub use table::{Column, Table, TableBuilder};
pub use units::UnitSystem;
pub use weather::{CurrentWeather, WeatherClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
