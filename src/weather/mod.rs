//! One Call 3.0 weather client.
//!
//! Three request shapes back the dashboard: current conditions (with the
//! multi-day forecast suppressed through the `exclude` parameter unless it
//! was asked for), a past-hour archive lookup keyed by Unix timestamp, and an
//! aggregated single-day summary keyed by calendar date. Every call returns
//! an explicit result so the controller can isolate one city's or one day's
//! failure from the rest of the submission.

use std::time::Duration;

use chrono::NaiveDate;

use crate::catalog::City;
use crate::config::WeatherConfig;
use crate::error::DashboardError;
use crate::units::UnitSystem;

pub use openweather::{Conditions, DailyForecast, DaySummary, WeatherSummary};

/// A current-conditions observation, tagged with where it came from.
///
/// The two upstream shapes (live vs. archived hour) carry the same field set
/// under different paths; the variant is decided once at the call site so
/// nothing downstream sniffs response shapes.
#[derive(Debug, Clone)]
pub enum CurrentWeather {
    /// Live conditions, optionally with the daily forecast
    Live {
        conditions: Conditions,
        forecast: Vec<DailyForecast>,
    },
    /// Nearest archived hourly record for a requested timestamp
    Archived { conditions: Conditions },
}

impl CurrentWeather {
    #[must_use]
    pub fn conditions(&self) -> &Conditions {
        match self {
            CurrentWeather::Live { conditions, .. } | CurrentWeather::Archived { conditions } => {
                conditions
            }
        }
    }

    /// Daily forecast entries (empty unless a live call requested them)
    #[must_use]
    pub fn forecast(&self) -> &[DailyForecast] {
        match self {
            CurrentWeather::Live { forecast, .. } => forecast,
            CurrentWeather::Archived { .. } => &[],
        }
    }
}

/// Client for the One Call API, built once at process start
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Build the client from validated configuration.
    ///
    /// Fails if no API key was configured; the per-call timeout comes from
    /// configuration so a hung upstream cannot stall a render forever.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, DashboardError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DashboardError::config(
                    "No weather API key configured. Set WEATHERBOARD_WEATHER__API_KEY or provide api_keys.json.",
                )
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| DashboardError::api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Current conditions for a catalog city, with the daily forecast
    /// suppressed upstream unless `include_forecast` is set.
    pub async fn current(
        &self,
        city: &City,
        units: UnitSystem,
        include_forecast: bool,
    ) -> Result<CurrentWeather, DashboardError> {
        let exclude_daily = if include_forecast { "" } else { "daily," };
        let url = format!(
            "{}/onecall?lat={}&lon={}&exclude=minutely,hourly,{}alerts&units={}&appid={}",
            self.base_url,
            city.latitude,
            city.longitude,
            exclude_daily,
            units.code(),
            self.api_key
        );

        tracing::debug!(city = city.name, "fetching current conditions");
        let response: openweather::OneCallResponse = self.get_json(&url, city).await?;

        Ok(CurrentWeather::Live {
            conditions: response.current,
            forecast: response.daily.unwrap_or_default(),
        })
    }

    /// The archived hourly record nearest to `timestamp` (Unix seconds)
    pub async fn past_hour(
        &self,
        city: &City,
        units: UnitSystem,
        timestamp: i64,
    ) -> Result<CurrentWeather, DashboardError> {
        let url = format!(
            "{}/onecall/timemachine?lat={}&lon={}&dt={}&units={}&appid={}",
            self.base_url,
            city.latitude,
            city.longitude,
            timestamp,
            units.code(),
            self.api_key
        );

        tracing::debug!(city = city.name, timestamp, "fetching archived hour");
        let response: openweather::TimemachineResponse = self.get_json(&url, city).await?;

        let conditions = response.data.into_iter().next().ok_or_else(|| {
            DashboardError::malformed(format!(
                "timemachine response for {} carried no data records",
                city.name
            ))
        })?;

        Ok(CurrentWeather::Archived { conditions })
    }

    /// Aggregated summary for one calendar day
    pub async fn day_summary(
        &self,
        city: &City,
        units: UnitSystem,
        date: NaiveDate,
    ) -> Result<DaySummary, DashboardError> {
        let url = format!(
            "{}/onecall/day_summary?lat={}&lon={}&date={}&units={}&appid={}",
            self.base_url,
            city.latitude,
            city.longitude,
            date.format("%Y-%m-%d"),
            units.code(),
            self.api_key
        );

        tracing::debug!(city = city.name, %date, "fetching day summary");
        self.get_json(&url, city).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        city: &City,
    ) -> Result<T, DashboardError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            DashboardError::api(format!("request for {} failed: {e}", city.name))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::api(format!(
                "weather API returned HTTP {status} for {}",
                city.name
            )));
        }

        response.json::<T>().await.map_err(|e| {
            DashboardError::malformed(format!("could not decode response for {}: {e}", city.name))
        })
    }
}

/// One Call 3.0 response structures
pub mod openweather {
    use serde::Deserialize;

    /// Live current-conditions response (`/onecall`)
    #[derive(Debug, Clone, Deserialize)]
    pub struct OneCallResponse {
        pub current: Conditions,
        /// Present only when the daily forecast was not excluded
        pub daily: Option<Vec<DailyForecast>>,
    }

    /// Archived-hour response (`/onecall/timemachine`)
    #[derive(Debug, Clone, Deserialize)]
    pub struct TimemachineResponse {
        pub data: Vec<Conditions>,
    }

    /// One observation's conditions; shared by the live and archived shapes
    #[derive(Debug, Clone, Deserialize)]
    pub struct Conditions {
        pub temp: f64,
        pub feels_like: f64,
        pub uvi: f64,
        pub humidity: f64,
        pub clouds: f64,
        pub wind_speed: f64,
        /// Hectopascals, as delivered upstream
        pub pressure: f64,
        pub weather: Vec<WeatherSummary>,
    }

    /// Condition description entry
    #[derive(Debug, Clone, Deserialize)]
    pub struct WeatherSummary {
        pub description: String,
        pub icon: String,
    }

    /// One forecast day from the `daily` block
    #[derive(Debug, Clone, Deserialize)]
    pub struct DailyForecast {
        /// Forecast day, Unix seconds
        pub dt: i64,
        pub temp: TempRange,
        pub weather: Vec<WeatherSummary>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct TempRange {
        pub min: f64,
        pub max: f64,
    }

    /// Day-summary response (`/onecall/day_summary`)
    #[derive(Debug, Clone, Deserialize)]
    pub struct DaySummary {
        /// ISO calendar date (`YYYY-MM-DD`)
        pub date: String,
        pub temperature: SummaryTemperature,
        pub humidity: SummaryHumidity,
        pub precipitation: SummaryPrecipitation,
        pub wind: SummaryWind,
        pub pressure: SummaryPressure,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SummaryTemperature {
        pub min: f64,
        pub max: f64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SummaryHumidity {
        pub afternoon: f64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SummaryPrecipitation {
        pub total: f64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SummaryWind {
        pub max: SummaryWindMax,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SummaryWindMax {
        pub speed: f64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SummaryPressure {
        pub afternoon: f64,
    }
}
