//! pt-BR display formatting for dates, timestamps and money.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

use crate::domain::types::Money;

/// Abbreviated weekday names, Monday first.
const WEEKDAYS_PT_BR: [&str; 7] = ["seg.", "ter.", "qua.", "qui.", "sex.", "sáb.", "dom."];

/// Brasília time, the default display offset.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;

/// Builds the display offset from a number of minutes east of UTC.
///
/// Out-of-range values fall back to [`DEFAULT_UTC_OFFSET_MINUTES`].
pub fn display_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60))
        .or_else(|| FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60))
        .unwrap_or_else(|| Utc.fix())
}

/// Upper-cases the first character, leaving the rest untouched.
fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Day label used to group orders, e.g. `"Seg., 13/01/2025"`.
pub fn format_date_label(at: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = at.with_timezone(&offset);
    let weekday = WEEKDAYS_PT_BR[local.weekday().num_days_from_monday() as usize];
    capitalize_first(&format!(
        "{weekday}, {:02}/{:02}/{}",
        local.day(),
        local.month(),
        local.year()
    ))
}

/// Full timestamp, e.g. `"13/01/2025, 14:30:00"`.
pub fn format_date_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

/// Formats centavos as Brazilian reais, e.g. `"R$ 1.234,56"`.
pub fn format_currency(amount: Money) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let reais = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (idx, digit) in reais.chars().enumerate() {
        if idx > 0 && (reais.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}R$ {grouped},{fraction:02}")
}

/// First eight characters of an order id, shown as a reference number.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
