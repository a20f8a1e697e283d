#![allow(dead_code)]

use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use subgen::{AppState, Settings};

/// Address nothing listens on; connections are refused right away
pub const CLOSED_URL: &str = "http://127.0.0.1:9/none";

/// Start a throwaway HTTP server on an ephemeral port and return its base URL
pub async fn spawn_server<F>(configure: F) -> (String, ServerHandle)
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{}", addr), handle)
}

pub fn app_state(settings: Settings) -> web::Data<Arc<AppState>> {
    web::Data::new(Arc::new(AppState::new(settings).unwrap()))
}
