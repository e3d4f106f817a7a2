//! Natural-language date resolution for quick task entry.
//!
//! `resolve_natural_date` is a pure function of `(text, now)`: no hidden
//! current-time capture, no I/O, no randomness. Callers decide what "now"
//! means so results are reproducible.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_IN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^in\s+(\d+)\s+(day|days|week|weeks|month|months)$").unwrap());

static FROM_NOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+(day|days|week|weeks)(\s+from\s+now)?$").unwrap());

static NEXT_WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^next\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)$").unwrap()
});

static BARE_WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(monday|tuesday|wednesday|thursday|friday|saturday|sunday)$").unwrap()
});

/// Explicit formats tried in order once every pattern rule has missed.
/// `%b` accepts both abbreviated and full month names.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%b %d, %Y"];

/// Resolve a free-text temporal expression against `now`.
///
/// Matching is case-insensitive on trimmed input; the first rule that
/// matches wins. Returns `None` when nothing matches. Resolved
/// timestamps inherit `now`'s time-of-day, including for date-only
/// fallback matches (source behavior, preserved literally).
pub fn resolve_natural_date(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if normalized == "today" || normalized == "now" {
        return Some(now);
    }
    if normalized == "tomorrow" {
        return Some(now + Duration::days(1));
    }

    if let Some(caps) = RELATIVE_IN.captures(&normalized) {
        let amount: u32 = caps[1].parse().ok()?;
        return add_units(now, amount, &caps[2]);
    }

    if let Some(caps) = FROM_NOW.captures(&normalized) {
        let amount: u32 = caps[1].parse().ok()?;
        return add_units(now, amount, &caps[2]);
    }

    if let Some(caps) = NEXT_WEEKDAY.captures(&normalized) {
        return Some(next_weekday(now, caps[1].parse().ok()?));
    }

    if let Some(caps) = BARE_WEEKDAY.captures(&normalized) {
        return Some(next_weekday(now, caps[1].parse().ok()?));
    }

    if normalized == "end of week" || normalized == "eow" {
        return Some(next_weekday(now, Weekday::Fri));
    }

    parse_explicit(&normalized, now)
}

fn add_units(now: DateTime<Utc>, amount: u32, unit: &str) -> Option<DateTime<Utc>> {
    if unit.starts_with("day") {
        now.checked_add_signed(Duration::days(i64::from(amount)))
    } else if unit.starts_with("week") {
        now.checked_add_signed(Duration::weeks(i64::from(amount)))
    } else {
        // Calendar month addition clamps at month end (Jan 31 + 1 month
        // is the last day of February).
        now.checked_add_months(Months::new(amount))
    }
}

/// The next occurrence of `target` strictly after `now`'s date. When
/// today already is that weekday, the result is seven days out, never
/// today.
fn next_weekday(now: DateTime<Utc>, target: Weekday) -> DateTime<Utc> {
    let today = i64::from(now.weekday().num_days_from_monday());
    let wanted = i64::from(target.num_days_from_monday());
    let mut ahead = (wanted - today).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    now + Duration::days(ahead)
}

fn parse_explicit(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return at_time_of(date, now);
        }
    }

    // Year-less "Mar 4" / "March 4" forms assume the current year.
    let with_year = format!("{} {}", text, now.year());
    NaiveDate::parse_from_str(&with_year, "%b %d %Y")
        .ok()
        .and_then(|date| at_time_of(date, now))
}

fn at_time_of(date: NaiveDate, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Some(DateTime::from_naive_utc_and_offset(
        date.and_time(now.time()),
        Utc,
    ))
}
