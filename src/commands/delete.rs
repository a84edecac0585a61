use anyhow::Result;
use dialoguer::Confirm;
use eventdesk_core::EventId;
use owo_colors::OwoColorize;

use crate::render::render_event;
use crate::utils::tui;

pub async fn run(api_url: Option<&str>, id: EventId, yes: bool) -> Result<()> {
    let (config, coordinator) = super::connect(api_url)?;

    let spinner = tui::create_spinner("Loading event...");
    let loaded = coordinator.list().await;
    spinner.finish_and_clear();
    loaded.map_err(super::api_failure)?;

    let Some(event) = coordinator.get(id) else {
        anyhow::bail!("Event #{} not found", id);
    };

    if !yes {
        println!("{}", render_event(&event, &config.currency));
        let confirmed = Confirm::new()
            .with_prompt("  Delete this event?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let spinner = tui::create_spinner("Deleting event...");
    let result = coordinator.remove(id).await;
    spinner.finish_and_clear();
    result.map_err(super::api_failure)?;

    println!("{}", "Event deleted".green());

    Ok(())
}
