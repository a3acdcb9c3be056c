// Display helpers for dates, timestamps and money amounts.
use chrono::{DateTime, Datelike, Local, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use std::str::FromStr;

/// Formats a calendar date as `YYYY-MM-DD`. `None` yields an empty string.
pub fn format_date<D: Datelike>(date: Option<D>) -> String {
    match date {
        Some(d) => format!("{}-{:02}-{:02}", d.year(), d.month(), d.day()),
        None => String::new(),
    }
}

/// Renders a millisecond timestamp in the local timezone.
///
/// `short == false` gives `YYYY-MM-DD HH:MM:SS`, `short == true` gives
/// `MM-DD HH:MM`. A zero timestamp means "unset" and yields an empty string.
pub fn timestamp_to_date_time(timestamp_ms: i64, short: bool) -> String {
    timestamp_to_date_time_in(timestamp_ms, short, &Local)
}

/// Same as [`timestamp_to_date_time`] but in an explicit timezone.
pub fn timestamp_to_date_time_in<Tz>(timestamp_ms: i64, short: bool, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if timestamp_ms == 0 {
        return String::new();
    }
    let Some(utc) = DateTime::from_timestamp_millis(timestamp_ms) else {
        return String::new();
    };
    let pattern = if short { "%m-%d %H:%M" } else { "%Y-%m-%d %H:%M:%S" };
    utc.with_timezone(tz).format(pattern).to_string()
}

/// Formats an amount with exactly two decimals, rounding half away from zero.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{:.2}", amount);
    }
    // Go through the shortest round-trip text so 5.555 rounds as written
    // rather than as its binary approximation 5.55499...
    match Decimal::from_str(&amount.to_string()) {
        Ok(value) => {
            let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.2}", rounded)
        }
        // Out of Decimal's range
        Err(_) => format!("{:.2}", amount),
    }
}
