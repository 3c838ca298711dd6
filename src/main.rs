use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use weatherboard::api::AppState;
use weatherboard::config::DashboardConfig;
use weatherboard::dashboard::Dashboard;
use weatherboard::weather::WeatherClient;
use weatherboard::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::load()?;
    init_tracing(&config);

    let client = WeatherClient::from_config(&config.weather)?;
    let state = Arc::new(AppState {
        dashboard: Dashboard::new(client),
    });

    web::run(config.server.port, state).await;
    Ok(())
}

fn init_tracing(config: &DashboardConfig) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
