//! Input and response checks for events.
//!
//! Each check reports the first failing field only.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::event::{Event, EventPatch, NewEvent};

type Check = Result<(), ValidationError>;

fn check_title(title: &str) -> Check {
    if title.is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }
    Ok(())
}

fn check_price(price: f64) -> Check {
    if !price.is_finite() {
        return Err(ValidationError::new("price", "Invalid price"));
    }
    if price < 0.0 {
        return Err(ValidationError::new("price", "Price must be ≥ 0"));
    }
    Ok(())
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Check {
    if end <= start {
        return Err(ValidationError::new(
            "endDate",
            "End date must be after start date",
        ));
    }
    Ok(())
}

/// Validate a create payload.
pub fn validate_new_event(input: &NewEvent) -> Check {
    check_title(&input.title)?;
    check_window(input.start_date, input.end_date)?;
    check_price(input.price)
}

/// Validate a partial update.
///
/// Every present field is checked on its own. The end-after-start rule only
/// applies when both dates are part of the same patch.
pub fn validate_patch(patch: &EventPatch) -> Check {
    if let Some(title) = &patch.title {
        check_title(title)?;
    }
    if let (Some(start), Some(end)) = (patch.start_date, patch.end_date) {
        check_window(start, end)?;
    }
    if let Some(price) = patch.price {
        check_price(price)?;
    }
    Ok(())
}

/// Validate a full event, as returned by the server.
pub fn validate_event(event: &Event) -> Check {
    if event.id <= 0 {
        return Err(ValidationError::new("id", "Id must be a positive integer"));
    }
    check_title(&event.title)?;
    check_window(event.start_date, event.end_date)?;
    check_price(event.price)
}

/// Parse a price typed by a user. Accepts a comma as decimal separator.
pub fn parse_price(text: &str) -> Result<f64, ValidationError> {
    let normalized = text.trim().replacen(',', ".", 1);
    let price: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::new("price", "Invalid price"))?;
    check_price(price)?;
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStatus;
    use chrono::TimeZone;

    fn make_new_event() -> NewEvent {
        NewEvent {
            title: "New".to_string(),
            start_date: Utc.with_ymd_and_hms(2026, 4, 20, 8, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 4, 22, 20, 0, 0).unwrap(),
            price: 0.0,
            status: EventStatus::Started,
        }
    }

    #[test]
    fn test_valid_new_event() {
        assert!(validate_new_event(&make_new_event()).is_ok());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let mut input = make_new_event();
        input.title = String::new();
        let err = validate_new_event(&input).unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn test_whitespace_title_is_accepted() {
        let mut input = make_new_event();
        input.title = "   ".to_string();
        assert!(validate_new_event(&input).is_ok());
    }

    #[test]
    fn test_negative_and_nan_prices_are_rejected() {
        let mut input = make_new_event();
        input.price = -0.01;
        assert_eq!(validate_new_event(&input).unwrap_err().message, "Price must be ≥ 0");

        input.price = f64::NAN;
        assert_eq!(validate_new_event(&input).unwrap_err().message, "Invalid price");
    }

    #[test]
    fn test_end_must_be_strictly_after_start() {
        let mut input = make_new_event();
        input.end_date = input.start_date;
        assert_eq!(validate_new_event(&input).unwrap_err().field, "endDate");
    }

    #[test]
    fn test_patch_checks_window_only_with_both_dates() {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();

        let only_end = EventPatch {
            end_date: Some(earlier),
            ..Default::default()
        };
        assert!(validate_patch(&only_end).is_ok());

        let both = EventPatch {
            start_date: Some(start),
            end_date: Some(earlier),
            ..Default::default()
        };
        assert_eq!(validate_patch(&both).unwrap_err().field, "endDate");
    }

    #[test]
    fn test_patch_checks_present_fields() {
        let patch = EventPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(validate_patch(&patch).unwrap_err().field, "title");

        let patch = EventPatch {
            price: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(validate_patch(&patch).unwrap_err().field, "price");

        assert!(validate_patch(&EventPatch::default()).is_ok());
    }

    #[test]
    fn test_server_event_needs_positive_id() {
        let event = make_new_event().with_id(0);
        assert_eq!(validate_event(&event).unwrap_err().field, "id");
        assert!(validate_event(&make_new_event().with_id(42)).is_ok());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("12,50").unwrap(), 12.5);
        assert_eq!(parse_price(" 299.99 ").unwrap(), 299.99);
        assert_eq!(parse_price("0").unwrap(), 0.0);
        assert_eq!(parse_price("abc").unwrap_err().message, "Invalid price");
        assert_eq!(parse_price("inf").unwrap_err().message, "Invalid price");
        assert_eq!(parse_price("-1").unwrap_err().message, "Price must be ≥ 0");
    }
}
