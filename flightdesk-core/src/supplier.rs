use async_trait::async_trait;
use serde_json::Value;

use crate::search::SearchQuery;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced a usable HTTP response
    #[error("flight search request failed: {0}")]
    Transport(String),
    /// The provider answered with something that is not JSON
    #[error("flight search response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait FlightSearchProvider: Send + Sync {
    /// Run a single search and return the provider's raw JSON document
    async fn search(&self, query: &SearchQuery) -> Result<Value, ProviderError>;
}
