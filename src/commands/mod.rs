pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod status;

use anyhow::{Context, Result};
use eventdesk_core::config::DeskConfig;
use eventdesk_core::remote::http::HttpEventsApi;
use eventdesk_core::{ApiError, EventCoordinator};

pub type Coordinator = EventCoordinator<HttpEventsApi>;

/// Load config, apply the `--api-url` override and build a coordinator.
pub fn connect(api_url: Option<&str>) -> Result<(DeskConfig, Coordinator)> {
    let mut config = DeskConfig::load()?;
    if let Some(url) = api_url {
        config.api_url = url.to_string();
    }

    let api = HttpEventsApi::from_config(&config).context("Failed to build HTTP client")?;
    tracing::debug!(api_url = %api.base_url(), "connected");

    Ok((config, EventCoordinator::new(api)))
}

/// Turn an API failure into the line shown to the user.
pub fn api_failure(err: ApiError) -> anyhow::Error {
    anyhow::anyhow!("{} (HTTP {})", err.message(), err.status())
}
