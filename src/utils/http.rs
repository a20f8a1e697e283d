use std::time::Duration;

use reqwest::{header, Client};

/// Browser-like user agent sent to address sources, some of which reject
/// unknown clients.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Build the shared HTTP client used for every outbound request.
///
/// # Arguments
/// * `timeout_secs` - Upper bound for a single request, connection included
pub fn build_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("subgen/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Makes a GET request and returns the body of a successful response
///
/// # Arguments
/// * `client` - Shared client
/// * `url` - The URL to request
/// * `user_agent` - Optional user agent overriding the client default
///
/// # Returns
/// * `Ok(String)` - The response body
/// * `Err(String)` - Transport error or non-2xx status
pub async fn web_get_async(
    client: &Client,
    url: &str,
    user_agent: Option<&str>,
) -> Result<String, String> {
    let mut request_builder = client.get(url);
    if let Some(ua) = user_agent {
        request_builder = request_builder.header(header::USER_AGENT, ua);
    }

    let response = match request_builder.send().await {
        Ok(resp) => resp,
        Err(e) => {
            return Err(format!("Failed to send request: {}", e));
        }
    };

    if !response.status().is_success() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    match response.text().await {
        Ok(body) => Ok(body),
        Err(e) => Err(format!("Failed to read response body: {}", e)),
    }
}
