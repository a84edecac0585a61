use anyhow::Result;
use eventdesk_core::validate::parse_price;
use eventdesk_core::{EventId, EventPatch, EventStatus};
use owo_colors::OwoColorize;

use crate::datetime::parse_datetime;
use crate::render::render_event;
use crate::utils::tui;

pub struct EditArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub price: Option<String>,
    pub status: Option<EventStatus>,
}

impl EditArgs {
    fn into_patch(self) -> Result<EventPatch> {
        Ok(EventPatch {
            title: self.title,
            start_date: self.start.as_deref().map(parse_datetime).transpose()?,
            end_date: self.end.as_deref().map(parse_datetime).transpose()?,
            price: self.price.as_deref().map(parse_price).transpose()?,
            status: self.status,
        })
    }
}

pub async fn run(api_url: Option<&str>, id: EventId, args: EditArgs) -> Result<()> {
    let patch = args.into_patch()?;
    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --title, --start, --end, --price, --status");
    }

    apply(api_url, id, &patch).await
}

/// Send a patch for `id` and print the stored result.
pub async fn apply(api_url: Option<&str>, id: EventId, patch: &EventPatch) -> Result<()> {
    let (config, coordinator) = super::connect(api_url)?;

    let spinner = tui::create_spinner("Updating event...");
    // Cached events get the change applied optimistically.
    if let Err(e) = coordinator.list().await {
        tracing::warn!(status = e.status(), "could not load events before update: {e}");
    }
    let result = coordinator.update(id, patch).await;
    spinner.finish_and_clear();
    let updated = result.map_err(super::api_failure)?;

    println!("{}", "Event updated".green());
    println!("{}", render_event(&updated, &config.currency));

    Ok(())
}
