pub mod params;
pub mod search;
pub mod results;
pub mod fulfillment;
pub mod supplier;

pub use fulfillment::{fulfill, FulfillmentReply, WebhookRequest};
pub use results::{FlightOption, ProviderValue, SearchSummary};
pub use search::SearchQuery;
pub use supplier::{FlightSearchProvider, ProviderError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Flight search provider error: {0}")]
    Provider(#[from] ProviderError),
}

pub type CoreResult<T> = Result<T, CoreError>;
