//! Normalization of the loosely-typed slot parameters sent by the agent.
//!
//! Every function here is total: malformed input degrades to a default value
//! and is logged, it never produces an error.

use chrono::{Datelike, Days, NaiveDate};
use serde_json::Value;
use tracing::warn;

pub const DEPARTURE_CITY: &str = "departure_city";
pub const DESTINATION_CITY: &str = "destination_city";
pub const DEPARTURE_DATE: &str = "departure_date";
pub const PASSENGER_COUNT: &str = "passenger_count";

/// Sentinel code used when a city cannot be resolved
pub const UNKNOWN_CITY_CODE: &str = "UNK";
pub const DEFAULT_PASSENGER_COUNT: i64 = 1;
/// Days between "today" and the default departure date
pub const DEFAULT_LEAD_DAYS: u64 = 7;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const CODE_LEN: usize = 3;

// ============================================================================
// Cities
// ============================================================================

/// Resolve a city slot into a 3-character uppercase code.
///
/// Accepts either a plain string or an entity object carrying a `city` or
/// `original` text field. Anything shorter than three characters, or of any
/// other shape, resolves to [`UNKNOWN_CITY_CODE`].
pub fn city_code(param: Option<&Value>) -> String {
    let text = match param {
        Some(Value::Object(entity)) => ["city", "original"]
            .iter()
            .filter_map(|key| entity.get(*key).and_then(Value::as_str))
            .find(|s| long_enough(s)),
        Some(Value::String(s)) if long_enough(s) => Some(s.as_str()),
        _ => None,
    };

    match text {
        // Uppercasing can expand a character (ß -> SS), so cap after mapping
        Some(s) => s.chars().flat_map(char::to_uppercase).take(CODE_LEN).collect(),
        None => UNKNOWN_CITY_CODE.to_string(),
    }
}

fn long_enough(s: &str) -> bool {
    s.chars().count() >= CODE_LEN
}

// ============================================================================
// Dates
// ============================================================================

pub fn default_departure(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(DEFAULT_LEAD_DAYS))
        .unwrap_or(today)
}

/// Resolve the departure date slot against `today`.
///
/// Structured dates (`{"year": .., "month": .., "day": ..}`) overlay their
/// numeric fields on today's date. Strings must be strict `YYYY-MM-DD`.
/// Everything else, including impossible calendar dates, falls back to
/// [`default_departure`].
pub fn departure_date(param: Option<&Value>, today: NaiveDate) -> NaiveDate {
    let fallback = default_departure(today);

    match param {
        Some(Value::Object(parts)) => {
            let part = |key: &str, current: i64| {
                parts
                    .get(key)
                    .and_then(Value::as_f64)
                    .map(|v| v.trunc() as i64)
                    .unwrap_or(current)
            };
            let year = part("year", i64::from(today.year()));
            let month = part("month", i64::from(today.month()));
            let day = part("day", i64::from(today.day()));

            compose_date(year, month, day).unwrap_or_else(|| {
                warn!(year, month, day, "Invalid structured departure date, using {}", fallback);
                fallback
            })
        }
        Some(Value::String(raw)) => parse_iso_date(raw).unwrap_or_else(|| {
            warn!(raw = %raw, "Invalid departure date string, using {}", fallback);
            fallback
        }),
        _ => fallback,
    }
}

/// Strict `YYYY-MM-DD` parse; single-digit months or days are rejected.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn compose_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    if !(0..=9999).contains(&year) {
        return None;
    }
    let month = u32::try_from(month).ok()?;
    let day = u32::try_from(day).ok()?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

// ============================================================================
// Passengers
// ============================================================================

/// Resolve the passenger count slot. Numbers are truncated, numeric strings
/// parsed; no range check is applied.
pub fn passenger_count(param: Option<&Value>) -> i64 {
    match param {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(DEFAULT_PASSENGER_COUNT),
        Some(Value::String(raw)) => raw.parse::<i64>().unwrap_or_else(|_| {
            warn!(raw = %raw, "Unparseable passenger count, defaulting to {}", DEFAULT_PASSENGER_COUNT);
            DEFAULT_PASSENGER_COUNT
        }),
        _ => DEFAULT_PASSENGER_COUNT,
    }
}
