use async_trait::async_trait;
use flightdesk_core::{FlightSearchProvider, ProviderError, SearchQuery};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::app_config::ProviderConfig;

/// SerpApi Google Flights client
#[derive(Clone)]
pub struct SerpApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SerpApiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, query: &SearchQuery) -> reqwest::RequestBuilder {
        self.client
            .get(&self.base_url)
            .query(&query.query_params())
            .query(&[("api_key", self.api_key.as_str())])
    }
}

#[async_trait]
impl FlightSearchProvider for SerpApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<Value, ProviderError> {
        debug!(origin = %query.origin, destination = %query.destination, "Calling SerpApi");

        let response = self.request(query).send().await.map_err(|e| {
            error!("SerpApi request failed: {}", e);
            ProviderError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "SerpApi returned a non-success status");
            return Err(ProviderError::Transport(format!("unexpected status {}", status)));
        }

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read SerpApi response: {}", e);
            ProviderError::Transport(e.to_string())
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to decode SerpApi response: {}", e);
            ProviderError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn client() -> SerpApiClient {
        let config = ProviderConfig {
            base_url: "https://serpapi.example/search".to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: Some(5),
        };
        SerpApiClient::new(&config).expect("client should build")
    }

    #[test]
    fn test_request_carries_query_and_credential() {
        let query = SearchQuery::new(
            "TOK".to_string(),
            "PAR".to_string(),
            NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
            2,
        );
        let request = client().request(&query).build().expect("request should build");

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().path(), "/search");

        let pairs: HashMap<String, String> = request.url().query_pairs().into_owned().collect();
        assert_eq!(pairs["engine"], "google_flights");
        assert_eq!(pairs["departure_id"], "TOK");
        assert_eq!(pairs["arrival_id"], "PAR");
        assert_eq!(pairs["outbound_date"], "2025-12-25");
        assert_eq!(pairs["return_date"], "2026-01-01");
        assert_eq!(pairs["adults"], "2");
        assert_eq!(pairs["currency"], "USD");
        assert_eq!(pairs["api_key"], "test-key");
    }
}
