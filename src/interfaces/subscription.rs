//! Subscription assembly: sources -> parser -> links -> output encoding

use log::{debug, error, info, warn};

use crate::error::SubscribeError;
use crate::generator::LinkEncoder;
use crate::interfaces::aggregator::aggregate;
use crate::interfaces::converter::convert;
use crate::models::{AppState, ConverterTarget, LinkParameters, DEFAULT_PATH, DEFAULT_TRANSPORT};
use crate::parser::parse;
use crate::utils::base64_encode;
use crate::utils::url::attachment_disposition;

/// Used when neither the address sources nor the static list yield anything
pub const DEFAULT_ADDRESSES: &str = "time.is:2053#Keaeye提优支持,icook.hk:2083#备用节点,sk.moe:2096#备用节点,142.171.137.37:8443#备用节点";

/// Paths of the built-in scored address endpoints, relative to the origin
pub const DEFAULT_SOURCE_PATHS: [&str; 2] = ["/api/vps789hourcf", "/api/vps789daycf"];

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// One subscription request, already detached from the HTTP layer
#[derive(Debug, Clone, Default)]
pub struct SubscriptionRequest {
    pub host: Option<String>,
    pub identifier: Option<String>,
    pub path: Option<String>,
    pub sni: Option<String>,
    pub transport: Option<String>,
    /// Converter target resolved from the format hint / user agent
    pub converter: Option<ConverterTarget>,
    /// URL the converter should fetch to get the plain subscription
    pub self_url: Option<String>,
    /// `scheme://host` of this server, used for the default address sources
    pub origin: Option<String>,
}

impl SubscriptionRequest {
    /// Validate required fields and fill in defaults
    pub fn link_parameters(&self) -> Result<LinkParameters, SubscribeError> {
        let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
        let (Some(host), Some(identifier)) = (present(&self.host), present(&self.identifier)) else {
            return Err(SubscribeError::MissingParameter("host and uuid".to_string()));
        };

        Ok(LinkParameters {
            identifier,
            host,
            path: present(&self.path).unwrap_or_else(|| DEFAULT_PATH.to_string()),
            sni: present(&self.sni),
            transport: present(&self.transport).unwrap_or_else(|| DEFAULT_TRANSPORT.to_string()),
        })
    }
}

/// Response body plus the headers it should be served with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionOutput {
    pub content_type: &'static str,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl SubscriptionOutput {
    fn plain(body: String) -> Self {
        SubscriptionOutput {
            content_type: TEXT_PLAIN,
            body,
            headers: Vec::new(),
        }
    }

    fn download(body: String, file_name: &str) -> Self {
        SubscriptionOutput {
            content_type: TEXT_PLAIN,
            body,
            headers: vec![(
                "Content-Disposition".to_string(),
                attachment_disposition(&format!("{}.txt", file_name)),
            )],
        }
    }
}

/// Address source URLs for a request: configured ones first, otherwise the
/// built-in scored endpoints on this server's origin.
pub fn resolve_sources(state: &AppState, origin: Option<&str>) -> Vec<String> {
    if !state.settings.addresses_api.is_empty() {
        return state.settings.addresses_api.clone();
    }
    match origin {
        Some(origin) => DEFAULT_SOURCE_PATHS
            .iter()
            .map(|path| format!("{}{}", origin.trim_end_matches('/'), path))
            .collect(),
        None => Vec::new(),
    }
}

/// Address text for a request: remote sources, then the static list, then
/// [`DEFAULT_ADDRESSES`].
pub async fn collect_addresses(state: &AppState, sources: &[String]) -> String {
    let fetched = aggregate(&state.client, sources).await;
    if !fetched.is_empty() {
        return fetched;
    }
    if !state.settings.addresses.trim().is_empty() {
        info!("Address sources empty, using static addresses");
        return state.settings.addresses.clone();
    }
    info!("No addresses found, using built-in fallback");
    DEFAULT_ADDRESSES.to_string()
}

/// Build the subscription for one request
pub async fn build_subscription(
    state: &AppState,
    request: &SubscriptionRequest,
) -> Result<SubscriptionOutput, SubscribeError> {
    let params = request.link_parameters()?;
    if !params.is_known_transport() {
        debug!("Passing through unrecognized transport type '{}'", params.transport);
    }

    let sources = resolve_sources(state, request.origin.as_deref());
    debug!("Using address sources: {:?}", sources);
    let raw = collect_addresses(state, &sources).await;

    let records = parse(&raw);
    debug!("Parsed {} address record(s)", records.len());

    let encoder = LinkEncoder::from_settings(&state.settings);
    let links = encoder.encode_all(&records, &params, state.settings.link_scheme)?;
    let content: String = links.iter().map(|link| format!("{}\n", link)).collect();

    if let (Some(target), Some(self_url)) = (request.converter, request.self_url.as_deref()) {
        return match convert(&state.client, &state.settings, target, self_url).await {
            Ok(converted) => Ok(SubscriptionOutput::plain(converted)),
            Err(e) => {
                error!("{}", e);
                warn!("Falling back to the raw link list");
                Ok(SubscriptionOutput::download(content, &state.settings.file_name))
            }
        };
    }

    Ok(SubscriptionOutput::download(
        base64_encode(&content),
        &state.settings.file_name,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_link_parameters_defaults() {
        let request = SubscriptionRequest {
            host: Some("example.com".to_string()),
            identifier: Some("uuid-1".to_string()),
            sni: Some(String::new()),
            ..Default::default()
        };
        let params = request.link_parameters().unwrap();
        assert_eq!(params.path, "/?ed=2560");
        assert_eq!(params.transport, "ws");
        assert_eq!(params.sni, None);
        assert_eq!(params.effective_sni(), "example.com");
    }

    #[test]
    fn test_link_parameters_missing() {
        let request = SubscriptionRequest {
            host: Some("example.com".to_string()),
            identifier: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            request.link_parameters(),
            Err(SubscribeError::MissingParameter(_))
        ));
        assert!(SubscriptionRequest::default().link_parameters().is_err());
    }

    #[test]
    fn test_resolve_sources() {
        let mut settings = Settings::default();
        let state = AppState::new(settings.clone()).unwrap();
        assert_eq!(
            resolve_sources(&state, Some("https://sub.example/")),
            vec![
                "https://sub.example/api/vps789hourcf",
                "https://sub.example/api/vps789daycf"
            ]
        );
        assert!(resolve_sources(&state, None).is_empty());

        settings.addresses_api = vec!["https://ips.example/list".to_string()];
        let state = AppState::new(settings).unwrap();
        assert_eq!(
            resolve_sources(&state, Some("https://sub.example")),
            vec!["https://ips.example/list"]
        );
    }

    #[test]
    fn test_download_header_is_percent_encoded() {
        let output = SubscriptionOutput::download("x".to_string(), "订阅");
        assert_eq!(output.headers[0].0, "Content-Disposition");
        assert_eq!(
            output.headers[0].1,
            "attachment; filename*=UTF-8''%E8%AE%A2%E9%98%85.txt"
        );
    }
}
