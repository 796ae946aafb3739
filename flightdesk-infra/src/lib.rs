pub mod app_config;
pub mod serpapi;

pub use app_config::Config;
pub use serpapi::SerpApiClient;
