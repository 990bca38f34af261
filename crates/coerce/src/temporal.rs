//! Text parsing and formatting for the temporal shapes.
//!
//! Parsing accepts ISO 8601 / RFC 3339 first and then the culture's short
//! date layout with an optional time of day. Formatting is always ISO 8601
//! so that rendered text parses back to an equal value under any culture.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeDelta,
};

use crate::culture::Culture;
use crate::error::ConversionFault;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M%:z",
];

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Largest day count a duration may spell out.
const MAX_DURATION_DAYS: u64 = 10_675_199;

const SECONDS_PER_DAY: i64 = 86_400;

// ============================================================================
// PARSING
// ============================================================================

/// Parses a wall-clock timestamp.
///
/// Text carrying a UTC offset is converted to its UTC wall clock; a bare
/// date is taken at midnight.
pub fn parse_datetime(text: &str, culture: &Culture) -> Result<NaiveDateTime, ConversionFault> {
    let text = text.trim();
    if let Some(with_offset) = parse_with_offset(text) {
        return Ok(with_offset.naive_utc());
    }
    parse_naive(text, culture)
        .ok_or_else(|| ConversionFault::format(format!("'{text}' is not a recognized timestamp")))
}

/// Parses a timestamp with offset. Text without an offset is taken as UTC.
pub fn parse_datetime_offset(
    text: &str,
    culture: &Culture,
) -> Result<DateTime<FixedOffset>, ConversionFault> {
    let text = text.trim();
    if let Some(with_offset) = parse_with_offset(text) {
        return Ok(with_offset);
    }
    parse_naive(text, culture)
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| ConversionFault::format(format!("'{text}' is not a recognized timestamp")))
}

/// Parses a calendar date, ISO first, then the culture layout.
pub fn parse_date(text: &str, culture: &Culture) -> Result<NaiveDate, ConversionFault> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, &culture.date_pattern()))
        .map_err(|err| ConversionFault::format(format!("'{text}' is not a recognized date: {err}")))
}

/// Parses a time of day in 24-hour or 12-hour notation.
pub fn parse_time(text: &str) -> Result<NaiveTime, ConversionFault> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .ok_or_else(|| ConversionFault::format(format!("'{text}' is not a recognized time of day")))
}

fn parse_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok().or_else(|| {
        OFFSET_DATETIME_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(text, format).ok())
    })
}

fn parse_naive(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
    if let Some(parsed) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(parsed);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, ISO_DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }

    let pattern = culture.date_pattern();
    if let Ok(date) = NaiveDate::parse_from_str(text, &pattern) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    TIME_FORMATS.iter().find_map(|time| {
        NaiveDateTime::parse_from_str(text, &format!("{pattern} {time}")).ok()
    })
}

/// Parses a signed duration.
///
/// Accepted: a bare day count (`"3"`) or `[-][d.]hh:mm[:ss[.fffffffff]]`.
/// A component past its range (hours over 23, minutes or seconds over 59,
/// more days than fit) is an overflow; any other malformation is a format
/// fault.
pub fn parse_duration(text: &str) -> Result<TimeDelta, ConversionFault> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let malformed = || ConversionFault::format(format!("'{trimmed}' is not a recognized duration"));

    if body.is_empty() {
        return Err(malformed());
    }

    let mut days = 0;
    let (mut hours, mut minutes, mut seconds, mut nanos) = (0, 0, 0, 0);

    if body.contains(':') {
        let parts: Vec<&str> = body.split(':').collect();
        let (head, minute_part, second_part) = match parts.as_slice() {
            [head, m] => (*head, *m, None),
            [head, m, s] => (*head, *m, Some(*s)),
            _ => return Err(malformed()),
        };

        let hour_part = match head.split_once('.') {
            Some((d, h)) => {
                days = component(d, malformed)?;
                h
            }
            None => head,
        };
        hours = component(hour_part, malformed)?;
        minutes = component(minute_part, malformed)?;

        if let Some(second_part) = second_part {
            let whole = match second_part.split_once('.') {
                Some((s, fraction)) => {
                    nanos = fraction_nanos(fraction).ok_or_else(malformed)?;
                    s
                }
                None => second_part,
            };
            seconds = component(whole, malformed)?;
        }
    } else {
        days = component(body, malformed)?;
    }

    if hours > 23 || minutes > 59 || seconds > 59 || days > MAX_DURATION_DAYS {
        return Err(ConversionFault::overflow(format!(
            "duration component out of range in '{trimmed}'"
        )));
    }

    // All components are range-checked above; the sum fits in i64.
    let total_seconds = days as i64 * SECONDS_PER_DAY
        + hours as i64 * 3_600
        + minutes as i64 * 60
        + seconds as i64;
    let magnitude = TimeDelta::new(total_seconds, nanos).ok_or_else(|| {
        ConversionFault::overflow(format!("duration '{trimmed}' exceeds the representable range"))
    })?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn component(
    digits: &str,
    malformed: impl Fn() -> ConversionFault,
) -> Result<u64, ConversionFault> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    digits
        .parse::<u64>()
        .map_err(|_| ConversionFault::overflow(format!("duration component '{digits}' is too large")))
}

fn fraction_nanos(fraction: &str) -> Option<u32> {
    if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{fraction:0<9}");
    padded.parse().ok()
}

// ============================================================================
// FORMATTING
// ============================================================================

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

pub fn format_datetime_offset(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format(ISO_DATE_FORMAT).to_string()
}

pub fn format_time(value: &NaiveTime) -> String {
    value.format("%H:%M:%S%.f").to_string()
}

/// Renders `[-][d.]hh:mm:ss[.fffffffff]`, the layout [`parse_duration`] reads.
pub fn format_duration(value: &TimeDelta) -> String {
    let magnitude = value.abs();
    let total = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos();

    let days = total / SECONDS_PER_DAY;
    let rest = total % SECONDS_PER_DAY;
    let (hours, minutes, seconds) = (rest / 3_600, rest % 3_600 / 60, rest % 60);

    let mut out = String::new();
    if *value < TimeDelta::zero() {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}
