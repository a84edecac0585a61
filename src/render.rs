//! Colored terminal rendering for eventdesk types.

use chrono::{DateTime, Local, Utc};
use eventdesk_core::{Event, EventStatus};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventStatus {
    fn render(&self) -> String {
        let label = format!("[{}]", self.as_str());
        match self {
            EventStatus::Started => label.green().to_string(),
            EventStatus::Paused => label.yellow().to_string(),
            EventStatus::Completed => label.blue().to_string(),
        }
    }
}

pub fn format_price(price: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, price)
}

/// Local date and time, e.g. "Sun Mar 15 2026 10:00".
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%a %b %-d %Y %H:%M").to_string()
}

/// One line per event: id, title, window, price and status badge.
pub fn render_event(event: &Event, currency: &str) -> String {
    let id = format!("#{}", event.id);
    let window = format!(
        "{} → {}",
        format_date(&event.start_date),
        format_date(&event.end_date)
    );

    format!(
        "{:>5} {} {} {} {}",
        id.dimmed(),
        event.title.bold(),
        window.dimmed(),
        format_price(event.price, currency),
        event.status.render()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_has_two_decimals_and_currency() {
        assert_eq!(format_price(299.99, "$"), "$299.99");
        assert_eq!(format_price(0.0, "€"), "€0.00");
        assert_eq!(format_price(12.5, "$"), "$12.50");
    }

    #[test]
    fn status_badge_contains_wire_name() {
        assert!(EventStatus::Paused.render().contains("[PAUSED]"));
        assert!(EventStatus::Completed.render().contains("[COMPLETED]"));
    }
}
