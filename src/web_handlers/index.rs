use actix_web::{web, HttpRequest, HttpResponse};
use log::error;
use minijinja::context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{AppState, DEFAULT_PATH, DEFAULT_TRANSPORT};
use crate::template::render_template;
use crate::web_handlers::interfaces::current_origin;

/// Form fields of the index page
#[derive(Deserialize, Debug, Default, Clone)]
pub struct IndexQuery {
    pub host: Option<String>,
    pub uuid: Option<String>,
    pub path: Option<String>,
    pub sni: Option<String>,
    #[serde(rename = "type")]
    pub transport: Option<String>,
}

#[derive(Serialize)]
struct TransportOption {
    value: &'static str,
    label: &'static str,
}

const TRANSPORT_OPTIONS: [TransportOption; 3] = [
    TransportOption {
        value: "ws",
        label: "WebSocket (ws)",
    },
    TransportOption {
        value: "tcp",
        label: "TCP",
    },
    TransportOption {
        value: "http",
        label: "HTTP",
    },
];

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Subscription URL for the submitted form, `None` until host and uuid are
/// filled in
pub fn subscription_link(origin: &str, query: &IndexQuery) -> Option<String> {
    let host = non_empty(&query.host)?;
    let uuid = non_empty(&query.uuid)?;

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer
        .append_pair("host", host)
        .append_pair("uuid", uuid)
        .append_pair("path", non_empty(&query.path).unwrap_or(DEFAULT_PATH));
    if let Some(sni) = non_empty(&query.sni) {
        serializer.append_pair("sni", sni);
    }
    serializer.append_pair("type", non_empty(&query.transport).unwrap_or(DEFAULT_TRANSPORT));

    Some(format!("{}/api/subscribe?{}", origin, serializer.finish()))
}

/// Handler for the generator page
pub async fn index_handler(
    req: HttpRequest,
    query: web::Query<IndexQuery>,
    app_state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    let query = query.into_inner();
    let link = subscription_link(&current_origin(&req), &query);

    let ctx = context! {
        title => app_state.settings.file_name,
        host => non_empty(&query.host).unwrap_or_default(),
        uuid => non_empty(&query.uuid).unwrap_or_default(),
        uuid_placeholder => Uuid::new_v4().to_string(),
        path => non_empty(&query.path).unwrap_or(DEFAULT_PATH),
        sni => non_empty(&query.sni).unwrap_or_default(),
        transport => non_empty(&query.transport).unwrap_or(DEFAULT_TRANSPORT),
        transports => TRANSPORT_OPTIONS,
        subscription_link => link,
    };

    match render_template("index.html", ctx) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            error!("Failed to render index page: {}", e);
            HttpResponse::InternalServerError().body("Internal Server Error.")
        }
    }
}
