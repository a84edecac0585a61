use anyhow::Result;
use eventdesk_core::config::{API_URL_ENV, DeskConfig};
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let config_path = DeskConfig::config_path()?;

    if init {
        if config_path.exists() {
            anyhow::bail!("Config already exists at {}", config_path.display());
        }
        DeskConfig::create_default_config(&config_path)?;
        println!("{}", format!("Created {}", config_path.display()).green());
        return Ok(());
    }

    let config = DeskConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  api_url:  {}", config.api_url);
    println!("  timeout:  {}s", config.request_timeout_secs);
    println!("  currency: {}", config.currency);
    if std::env::var(API_URL_ENV).is_ok() {
        println!("{}", format!("  ({} is set)", API_URL_ENV).dimmed());
    }

    Ok(())
}
