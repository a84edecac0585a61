use anyhow::Result;
use eventdesk_core::EventStatus;
use eventdesk_core::query::{SortBy, StatusFilter, filter_events, sort_events};
use owo_colors::OwoColorize;

use crate::render::render_event;
use crate::utils::tui;

pub async fn run(api_url: Option<&str>, status: Option<EventStatus>, sort: SortBy) -> Result<()> {
    let (config, coordinator) = super::connect(api_url)?;

    let spinner = tui::create_spinner("Loading events...");
    let result = coordinator.list().await;
    spinner.finish_and_clear();
    let events = result.map_err(super::api_failure)?;

    let filter = status.map_or(StatusFilter::All, StatusFilter::Only);
    let shown = sort_events(&filter_events(&events, filter), sort);

    if shown.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &shown {
        println!("{}", render_event(event, &config.currency));
    }

    if shown.len() != events.len() {
        println!(
            "{}",
            format!("{} of {} events", shown.len(), events.len()).dimmed()
        );
    }

    Ok(())
}
