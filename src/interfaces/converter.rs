use log::{debug, info};
use reqwest::Client;

use crate::error::SubscribeError;
use crate::models::ConverterTarget;
use crate::settings::Settings;
use crate::utils::http::web_get_async;
use crate::utils::url::url_encode;

/// URL asking the converter to turn `subscription_url` into `target`
pub fn converter_url(settings: &Settings, target: ConverterTarget, subscription_url: &str) -> String {
    format!(
        "{}://{}/sub?target={}&url={}&insert=false&config={}",
        settings.sub_protocol,
        settings.sub_converter,
        target.to_str(),
        url_encode(subscription_url),
        url_encode(&settings.sub_config)
    )
}

/// Ask the external converter for a client configuration built from
/// `subscription_url`. The body is returned verbatim.
pub async fn convert(
    client: &Client,
    settings: &Settings,
    target: ConverterTarget,
    subscription_url: &str,
) -> Result<String, SubscribeError> {
    let url = converter_url(settings, target, subscription_url);
    debug!("Calling subscription converter: {}", url);
    let body = web_get_async(client, &url, None)
        .await
        .map_err(SubscribeError::Converter)?;
    info!(
        "Converter returned {} bytes for target {}",
        body.len(),
        target.to_str()
    );
    Ok(body)
}
