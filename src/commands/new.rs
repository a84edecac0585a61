use anyhow::Result;
use chrono::{DateTime, Utc};
use dialoguer::Input;
use eventdesk_core::validate::parse_price;
use eventdesk_core::{EventStatus, NewEvent};
use owo_colors::OwoColorize;

use crate::datetime::{apply_duration, default_end, parse_datetime, parse_end};
use crate::render::render_event;
use crate::utils::tui;

pub struct NewArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub status: EventStatus,
}

pub async fn run(api_url: Option<&str>, args: NewArgs) -> Result<()> {
    let interactive = args.title.is_none() || args.start.is_none();

    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    let start_date = match args.start {
        Some(s) => parse_datetime(&s)?,
        None => prompt_with_retry("  When?", parse_datetime)?,
    };

    let end_date = if let Some(end) = args.end {
        parse_end(&end, start_date)?
    } else if let Some(duration) = args.duration {
        apply_duration(start_date, &duration)?
    } else if interactive {
        prompt_end(start_date)?
    } else {
        default_end(start_date)
    };

    let price = match args.price {
        Some(p) => parse_price(&p)?,
        None if interactive => prompt_price()?,
        None => 0.0,
    };

    let input = NewEvent {
        title,
        start_date,
        end_date,
        price,
        status: args.status,
    };

    let (config, coordinator) = super::connect(api_url)?;

    let spinner = tui::create_spinner("Creating event...");
    let result = coordinator.create(&input).await;
    spinner.finish_and_clear();
    let created = result.map_err(super::api_failure)?;

    if interactive {
        println!();
    }
    println!("{}", "Event created".green());
    println!("{}", render_event(&created, &config.currency));

    Ok(())
}

fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<DateTime<Utc>>
where
    F: Fn(&str) -> Result<DateTime<Utc>>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Empty input means the default one hour.
fn prompt_end(start: DateTime<Utc>) -> Result<DateTime<Utc>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  How long? (1 hour)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(default_end(start));
        }
        match parse_end(&input, start) {
            Ok(end) => return Ok(end),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn prompt_price() -> Result<f64> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Price? (free)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(0.0);
        }
        match parse_price(&input) {
            Ok(price) => return Ok(price),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}
