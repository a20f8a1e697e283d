use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, error};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::SubscribeError;
use crate::interfaces::subscription::{build_subscription, SubscriptionRequest, TEXT_PLAIN};
use crate::models::AppState;
use crate::parser::scores::{daily_lines, hourly_lines};
use crate::utils::match_user_agent;
use crate::web_handlers::index::index_handler;

/// Query parameters for subscription generation
#[derive(Deserialize, Debug, Default, Clone)]
pub struct SubscribeQuery {
    /// Server host name, also the default SNI
    pub host: Option<String>,
    /// User UUID
    pub uuid: Option<String>,
    /// Alias of `uuid`
    pub identifier: Option<String>,
    /// WebSocket / HTTP path
    pub path: Option<String>,
    pub sni: Option<String>,
    /// Transport type
    #[serde(rename = "type")]
    pub transport: Option<String>,
    /// Client format hint, e.g. `clash`
    pub format: Option<String>,
}

/// `scheme://host` of this server as seen by the client
pub fn current_origin(req: &HttpRequest) -> String {
    let headers = req.headers();
    let protocol = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("https");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:3000");

    let is_local = host.contains("localhost") || host.contains("127.0.0.1");
    let protocol = if is_local { "http" } else { protocol };
    format!("{}://{}", protocol, host)
}

/// URL of this request with the `format` hint removed, so that fetching it
/// yields the plain subscription.
pub fn plain_subscription_url(req: &HttpRequest) -> String {
    let params: Vec<(String, String)> = url::form_urlencoded::parse(req.query_string().as_bytes())
        .into_owned()
        .filter(|(key, _)| key != "format")
        .collect();
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let mut url = format!("{}{}", current_origin(req), req.path());
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Handler for subscription generation
pub async fn subscribe_handler(
    req: HttpRequest,
    query: web::Query<SubscribeQuery>,
    app_state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    debug!("Received subscribe request: {:?}", query);
    let query = query.into_inner();

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let converter = match_user_agent(user_agent, query.format.as_deref());

    let request = SubscriptionRequest {
        host: query.host,
        identifier: query.uuid.or(query.identifier),
        path: query.path,
        sni: query.sni,
        transport: query.transport,
        converter,
        self_url: converter.map(|_| plain_subscription_url(&req)),
        origin: Some(current_origin(&req)),
    };

    match build_subscription(&app_state, &request).await {
        Ok(output) => {
            let mut resp = HttpResponse::Ok();
            resp.content_type(output.content_type);
            for (name, value) in output.headers {
                resp.append_header((name, value));
            }
            resp.body(output.body)
        }
        Err(SubscribeError::MissingParameter(_)) => HttpResponse::BadRequest()
            .json(json!({ "error": "Missing required parameters: host and uuid" })),
        Err(e) => {
            error!("Subscription error: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

/// Fetch a scored list from `url` and serve it as address lines
async fn scored_source_handler(
    app_state: &AppState,
    url: &str,
    to_lines: fn(&str) -> Result<Vec<String>, serde_json::Error>,
) -> HttpResponse {
    let response = match app_state.client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Error fetching {}: {}", url, e);
            return HttpResponse::InternalServerError().body("Internal Server Error.");
        }
    };

    let status = response.status();
    if !status.is_success() {
        error!("Error fetching external API {}: {}", url, status);
        let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return HttpResponse::build(status).body("Error fetching data from external API.");
    }

    let lines = match response.text().await {
        Ok(body) => to_lines(&body),
        Err(e) => {
            error!("Failed to read response from {}: {}", url, e);
            return HttpResponse::InternalServerError().body("Internal Server Error.");
        }
    };

    match lines {
        Ok(lines) => {
            debug!("{} produced {} address line(s)", url, lines.len());
            HttpResponse::Ok()
                .content_type(TEXT_PLAIN)
                .body(lines.join("\n"))
        }
        Err(e) => {
            error!("Unexpected response from {}: {}", url, e);
            HttpResponse::InternalServerError().body("Internal Server Error.")
        }
    }
}

/// Hourly per-carrier scores
pub async fn vps789_hourly_handler(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    let url = app_state.settings.vps789_hourly_api.clone();
    scored_source_handler(&app_state, &url, hourly_lines).await
}

/// Daily top list
pub async fn vps789_daily_handler(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    let url = app_state.settings.vps789_daily_api.clone();
    scored_source_handler(&app_state, &url, daily_lines).await
}

/// Register the API endpoints with Actix Web
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_handler))
        .route("/api/subscribe", web::get().to(subscribe_handler))
        .route("/sub", web::get().to(subscribe_handler))
        .route("/api/vps789hourcf", web::get().to(vps789_hourly_handler))
        .route("/api/vps789daycf", web::get().to(vps789_daily_handler));
}
