use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use subgen::interfaces::subscription::{build_subscription, SubscriptionRequest};
use subgen::models::AppState;
use subgen::web_handlers;
use subgen::Settings;

/// Generate preferred-node VMess/VLESS subscriptions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Server host to generate a subscription for instead of starting the server
    #[arg(long, value_name = "HOST", requires = "uuid", requires = "output")]
    host: Option<String>,

    /// User UUID (must be used with --host)
    #[arg(long, value_name = "UUID", requires = "host")]
    uuid: Option<String>,

    /// Output file for the generated subscription (must be used with --host)
    #[arg(short, long, value_name = "OUTPUT_FILE", requires = "host")]
    output: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let mut settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(address) = args.address {
        settings.listen_address = address;
    }
    if let Some(port) = args.port {
        settings.listen_port = port;
    }

    let app_state = match AppState::new(settings) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    if let (Some(host), Some(uuid), Some(output_file)) = (args.host, args.uuid, args.output) {
        info!("Generating subscription for {} to file: {}", host, output_file);
        let request = SubscriptionRequest {
            host: Some(host),
            identifier: Some(uuid),
            ..Default::default()
        };
        return match build_subscription(&app_state, &request).await {
            Ok(output) => {
                tokio::fs::write(&output_file, output.body).await?;
                info!("Successfully wrote subscription to {}", output_file);
                Ok(())
            }
            Err(e) => {
                error!("Failed to generate subscription: {}", e);
                std::process::exit(1);
            }
        };
    }

    let listen_address = app_state.settings.listen_target();
    let workers = app_state.settings.max_concur_threads.max(1);
    info!("Subscription generator starting on {}", listen_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&app_state)))
            .configure(web_handlers::config)
    })
    .bind(listen_address)?
    .workers(workers)
    .run()
    .await
}
