use anyhow::Result;
use eventdesk_core::{EventId, EventPatch, EventStatus};

pub async fn run(api_url: Option<&str>, id: EventId, status: EventStatus) -> Result<()> {
    super::edit::apply(api_url, id, &EventPatch::status_only(status)).await
}
