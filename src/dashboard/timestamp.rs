//! Parsing and display of run timestamps.

use time::format_description::FormatItem;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

const LABEL_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const NAIVE_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
];

/// Parse a timestamp as sent by the service.
///
/// Accepts RFC 3339, RFC 2822 (`Mon, 01 Jan 2024 00:00:00 GMT`) and offset-less
/// ISO forms, which are read as UTC.
pub fn parse(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    if let Ok(parsed) = OffsetDateTime::parse(&numeric_zone(raw), &Rfc2822) {
        return Some(parsed);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(raw, format).ok())
        .map(PrimitiveDateTime::assume_utc)
}

// Flask renders dates as `... GMT`; use the numeric zone form instead.
fn numeric_zone(raw: &str) -> String {
    ["GMT", "UTC", "UT"]
        .iter()
        .find_map(|zone| raw.strip_suffix(zone))
        .map(|head| format!("{head}+0000"))
        .unwrap_or_else(|| raw.to_string())
}

/// Human-readable label in `offset`; unparseable input is returned as-is.
pub fn label(raw: &str, offset: UtcOffset) -> String {
    parse(raw)
        .and_then(|parsed| parsed.to_offset(offset).format(LABEL_FORMAT).ok())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// The machine's UTC offset, or UTC when it cannot be determined.
///
/// Resolve this before spawning threads; on some platforms the lookup fails
/// once the process is multi-threaded.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
