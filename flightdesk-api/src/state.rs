use std::sync::Arc;
use flightdesk_core::FlightSearchProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn FlightSearchProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn FlightSearchProvider>) -> Self {
        Self { provider }
    }
}
