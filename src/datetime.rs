//! Parsing of user-typed dates, times and durations.
//!
//! Input is read in the local time zone and turned into UTC instants.
//! Accepted forms, tried in order: RFC 3339 (`2026-03-15T09:00:00Z`),
//! local `YYYY-MM-DDTHH:MM` / `YYYY-MM-DD HH:MM`, then natural language
//! via fuzzydate ("tomorrow 3pm", "fri at 10"). A date without a time
//! means midnight.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("mon", "monday"),
    ("tue", "tuesday"),
    ("tues", "tuesday"),
    ("wed", "wednesday"),
    ("thu", "thursday"),
    ("thur", "thursday"),
    ("thurs", "thursday"),
    ("fri", "friday"),
    ("sat", "saturday"),
    ("sun", "sunday"),
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("sept", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return local_to_utc(naive);
        }
    }

    let naive = fuzzydate::parse(&expand_abbreviations(trimmed))
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    if has_time_component(trimmed) {
        local_to_utc(naive)
    } else {
        local_to_utc(naive.date().and_time(NaiveTime::MIN))
    }
}

/// Parse an end input: a duration from `start` ("2h", "90 minutes") or a
/// date/time, optionally prefixed with "until" or "to".
pub fn parse_end(input: &str, start: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if let Ok(end) = apply_duration(start, input) {
        return Ok(end);
    }

    let cleaned = input
        .trim()
        .strip_prefix("until ")
        .or_else(|| input.trim().strip_prefix("to "))
        .unwrap_or(input);

    parse_datetime(cleaned)
}

pub fn apply_duration(start: DateTime<Utc>, input: &str) -> Result<DateTime<Utc>> {
    let std_dur = humantime::parse_duration(input.trim())
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    let duration = Duration::from_std(std_dur).context("Duration too large")?;
    start
        .checked_add_signed(duration)
        .context("Duration too large")
}

/// Default event length when no end is given.
pub fn default_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::hours(1)
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("{} does not exist in the local time zone", naive))
}

fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map_or(word, |(_, full)| *full)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the input names a time of day ("3pm", "15:00", "noon", "at 9").
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    words.iter().enumerate().any(|(i, word)| {
        let prev = i.checked_sub(1).and_then(|j| words.get(j)).copied();
        let next = words.get(i + 1).copied();

        matches!(*word, "noon" | "midnight")
            || is_clock(word)
            || is_meridiem(word, prev)
            || (*word == "at" && next.is_some_and(starts_with_digit))
    })
}

fn starts_with_digit(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
}

fn all_digits(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

fn is_clock(word: &str) -> bool {
    word.split_once(':').is_some_and(|(hours, minutes)| {
        hours.ends_with(|c: char| c.is_ascii_digit()) && starts_with_digit(minutes)
    })
}

/// "6pm", "11am", or a bare "pm" right after a number ("3 pm").
fn is_meridiem(word: &str, prev: Option<&str>) -> bool {
    let Some(stem) = word.strip_suffix("am").or_else(|| word.strip_suffix("pm")) else {
        return false;
    };
    if stem.is_empty() {
        prev.is_some_and(all_digits)
    } else {
        all_digits(stem)
    }
}
