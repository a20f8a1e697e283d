use reqwest::Client;

use crate::settings::Settings;
use crate::utils::http::build_client;

/// Application state structure for the web server
#[derive(Debug, Clone)]
pub struct AppState {
    /// Immutable settings read at start-up
    pub settings: Settings,

    /// Shared HTTP client for address sources and the converter
    pub client: Client,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let client = build_client(settings.fetch_timeout)?;
        Ok(Self { settings, client })
    }
}
