//! Projection of the provider's flight groups into ranked [`FlightOption`]s.
//!
//! The provider payload is never deserialized into fixed structs. It is read
//! through the [`FlightGroup`] and [`FlightLeg`] views, whose accessors return
//! empty or absent values for anything missing or oddly typed, so one broken
//! group never spoils the rest of the result.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::debug;

use crate::search::{SearchQuery, CURRENCY};

/// Hard cap on the number of options returned to the agent
pub const MAX_OPTIONS: usize = 5;

const RANKED_LISTS: [&str; 2] = ["best_flights", "other_flights"];

// ============================================================================
// Provider values
// ============================================================================

/// A price or duration exactly as the provider sent it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProviderValue {
    Number(Number),
    Text(String),
}

impl ProviderValue {
    /// `null` is absence; non-scalar payloads are kept as their JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            other => Some(Self::Text(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn display_or_empty(value: &Option<ProviderValue>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Provider payload views
// ============================================================================

/// One itinerary from the provider
#[derive(Debug, Clone, Copy)]
pub struct FlightGroup<'a>(&'a Value);

impl<'a> FlightGroup<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }

    pub fn legs(&self) -> Vec<FlightLeg<'a>> {
        self.0
            .get("flights")
            .and_then(Value::as_array)
            .map(|legs| legs.iter().map(FlightLeg).collect())
            .unwrap_or_default()
    }

    pub fn price(&self) -> Option<ProviderValue> {
        self.0.get("price").and_then(ProviderValue::from_json)
    }

    /// `total_duration`, falling back to `duration`
    pub fn duration(&self) -> Option<ProviderValue> {
        self.0
            .get("total_duration")
            .and_then(ProviderValue::from_json)
            .or_else(|| self.0.get("duration").and_then(ProviderValue::from_json))
    }
}

/// One flight segment inside a [`FlightGroup`]
#[derive(Debug, Clone, Copy)]
pub struct FlightLeg<'a>(&'a Value);

impl<'a> FlightLeg<'a> {
    fn text(&self, key: &str) -> String {
        self.0.get(key).map(json_text).unwrap_or_default()
    }

    pub fn airline(&self) -> String {
        self.text("airline")
    }

    pub fn airplane(&self) -> String {
        self.text("airplane")
    }

    pub fn travel_class(&self) -> String {
        self.text("travel_class")
    }

    pub fn departure_time(&self) -> String {
        self.0
            .pointer("/departure_airport/time")
            .map(json_text)
            .unwrap_or_default()
    }

    pub fn arrival_airport_name(&self) -> Option<&'a str> {
        self.0.pointer("/arrival_airport/name").and_then(Value::as_str)
    }
}

// ============================================================================
// Flight options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightOption {
    /// 1-based rank, contiguous across skipped groups
    pub id: usize,
    pub airline: String,
    pub airplane: String,
    pub price: Option<ProviderValue>,
    pub departure_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub duration: Option<ProviderValue>,
    pub travel_class: String,
    pub is_nonstop: bool,
    pub connection_info: Option<String>,
}

impl FlightOption {
    /// Returns `None` for groups without legs.
    pub fn from_group(rank: usize, group: FlightGroup<'_>, query: &SearchQuery) -> Option<(Self, String)> {
        let legs = group.legs();
        let first = legs.first()?;

        let option = Self {
            id: rank,
            airline: first.airline(),
            airplane: first.airplane(),
            price: group.price(),
            departure_date: query.outbound_date,
            origin: query.origin.clone(),
            destination: query.destination.clone(),
            duration: group.duration(),
            travel_class: first.travel_class(),
            is_nonstop: legs.len() == 1,
            connection_info: connection_info(&legs),
        };
        let line = option.summary_line(&first.departure_time());

        Some((option, line))
    }

    pub fn summary_line(&self, departure_time: &str) -> String {
        format!(
            "{}. {} ({}) Dep: {}, Price: {} {}, Duration: {}, Class: {}, {}",
            self.id,
            self.airline,
            self.airplane,
            departure_time,
            CURRENCY,
            display_or_empty(&self.price),
            display_or_empty(&self.duration),
            self.travel_class,
            self.connection_info.as_deref().unwrap_or("Non-stop"),
        )
    }
}

/// `"<n> stop(s): A, B"` for connecting itineraries, `None` when non-stop.
///
/// The stop count is derived from the number of legs; legs without an
/// arrival airport name are left out of the name list only.
pub fn connection_info(legs: &[FlightLeg<'_>]) -> Option<String> {
    let (_, connecting) = legs.split_last()?;
    if connecting.is_empty() {
        return None;
    }

    let stops: Vec<&str> = connecting
        .iter()
        .filter_map(FlightLeg::arrival_airport_name)
        .collect();

    Some(format!("{} stop(s): {}", connecting.len(), stops.join(", ")))
}

// ============================================================================
// Summary
// ============================================================================

/// Reply lines plus the structured options they describe
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSummary {
    pub lines: Vec<String>,
    pub options: Vec<FlightOption>,
}

/// Rank `best_flights` ahead of `other_flights` and keep the first
/// [`MAX_OPTIONS`] groups that have at least one leg.
pub fn summarize(response: &Value, query: &SearchQuery) -> SearchSummary {
    let groups: Vec<FlightGroup<'_>> = RANKED_LISTS
        .iter()
        .filter_map(|key| response.get(*key).and_then(Value::as_array))
        .flatten()
        .map(FlightGroup::new)
        .collect();

    if groups.is_empty() {
        debug!(origin = %query.origin, destination = %query.destination, "Provider returned no flight groups");
        return SearchSummary {
            lines: vec![format!(
                "No flights found from {} to {} on {}.",
                query.origin,
                query.destination,
                query.departure_label()
            )],
            options: Vec::new(),
        };
    }

    let mut lines = vec![format!(
        "Found flights from {} to {} on {}:",
        query.origin,
        query.destination,
        query.departure_label()
    )];
    let mut options = Vec::with_capacity(MAX_OPTIONS);

    for group in &groups {
        if options.len() == MAX_OPTIONS {
            break;
        }
        match FlightOption::from_group(options.len() + 1, *group, query) {
            Some((option, line)) => {
                lines.push(line);
                options.push(option);
            }
            None => debug!("Skipping flight group without legs"),
        }
    }

    debug!(groups = groups.len(), options = options.len(), "Summarized flight search results");

    SearchSummary { lines, options }
}
