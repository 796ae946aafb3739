use chrono::{Days, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::params;

/// Search engine identifier expected by the provider
pub const SEARCH_ENGINE: &str = "google_flights";
/// All prices are requested (and reported) in this currency
pub const CURRENCY: &str = "USD";
/// Fixed length of the round trip
pub const TRIP_LENGTH_DAYS: u64 = 7;

/// Canonical query sent to the flight search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub outbound_date: NaiveDate,
    pub return_date: NaiveDate,
    pub adults: i64,
}

impl SearchQuery {
    pub fn new(origin: String, destination: String, outbound_date: NaiveDate, adults: i64) -> Self {
        let return_date = outbound_date
            .checked_add_days(Days::new(TRIP_LENGTH_DAYS))
            .unwrap_or(outbound_date);

        Self {
            origin,
            destination,
            outbound_date,
            return_date,
            adults,
        }
    }

    /// Normalize the agent's session parameters into a query
    pub fn from_parameters(parameters: &Map<String, Value>, today: NaiveDate) -> Self {
        Self::new(
            params::city_code(parameters.get(params::DEPARTURE_CITY)),
            params::city_code(parameters.get(params::DESTINATION_CITY)),
            params::departure_date(parameters.get(params::DEPARTURE_DATE), today),
            params::passenger_count(parameters.get(params::PASSENGER_COUNT)),
        )
    }

    /// Outbound date as `YYYY-MM-DD`
    pub fn departure_label(&self) -> String {
        self.outbound_date.format(params::DATE_FORMAT).to_string()
    }

    /// Query-string pairs for the provider, credential excluded
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("engine", SEARCH_ENGINE.to_string()),
            ("departure_id", self.origin.clone()),
            ("arrival_id", self.destination.clone()),
            ("outbound_date", self.departure_label()),
            ("return_date", self.return_date.format(params::DATE_FORMAT).to_string()),
            ("adults", self.adults.to_string()),
            ("currency", CURRENCY.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_return_date_is_one_week_later() {
        let outbound = NaiveDate::from_ymd_opt(2025, 12, 28).unwrap();
        let query = SearchQuery::new("TOK".into(), "PAR".into(), outbound, 2);
        assert_eq!(query.return_date, NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
    }

    #[test]
    fn test_from_parameters() {
        let parameters = json!({
            "departure_city": {"city": "Tokyo", "original": "tokyo"},
            "destination_city": "paris",
            "departure_date": "2025-12-25",
            "passenger_count": "3"
        });
        let query = SearchQuery::from_parameters(parameters.as_object().unwrap(), today());

        assert_eq!(query.origin, "TOK");
        assert_eq!(query.destination, "PAR");
        assert_eq!(query.departure_label(), "2025-12-25");
        assert_eq!(query.adults, 3);
    }

    #[test]
    fn test_from_empty_parameters() {
        let query = SearchQuery::from_parameters(&Map::new(), today());

        assert_eq!(query.origin, "UNK");
        assert_eq!(query.destination, "UNK");
        assert_eq!(query.departure_label(), "2026-10-23");
        assert_eq!(query.return_date, NaiveDate::from_ymd_opt(2026, 10, 30).unwrap());
        assert_eq!(query.adults, 1);
    }

    #[test]
    fn test_query_params() {
        let outbound = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let query = SearchQuery::new("TOK".into(), "PAR".into(), outbound, 2);
        let params = query.query_params();

        let expected = vec![
            ("engine", "google_flights"),
            ("departure_id", "TOK"),
            ("arrival_id", "PAR"),
            ("outbound_date", "2025-12-25"),
            ("return_date", "2026-01-01"),
            ("adults", "2"),
            ("currency", "USD"),
        ];
        let actual: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(actual, expected);
        assert!(params.iter().all(|(k, _)| *k != "api_key"));
    }
}
