//! Utility functions and helpers

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// Escape text for inclusion in HTML element content or quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format an amount with exactly two decimals behind a currency prefix, e.g. `$12.50`
pub fn format_currency(amount: &Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", symbol, rounded)
}

/// Parse an ISO-8601 date or date-time into a calendar date.
///
/// Offset-carrying timestamps are shifted to local time first; naive
/// timestamps are taken as already local.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Format an ISO-8601 date for display using a chrono format string.
///
/// Unparseable input is returned as-is; an invalid format string falls back to `%Y-%m-%d`.
pub fn format_display_date(raw: &str, format: &str) -> String {
    let Some(date) = parse_iso_date(raw) else {
        return raw.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}
