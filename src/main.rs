use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use gig_matcher::config::Settings;
use gig_matcher::routes::{self, matches::AppState};
use gig_matcher::services::{CompletionClient, PgConnector, ProfileStore};
use gig_matcher::core::RequestHandler;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn startup_error(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting gig matcher...");

    // GIG_CONFIG points at a single config file instead of config/default + config/local
    let settings = match std::env::var("GIG_CONFIG") {
        Ok(path) => Settings::load_from(&path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| startup_error(format!("Failed to load configuration: {}", e)))?;

    info!("Configuration loaded successfully");

    let store = ProfileStore::new(Arc::new(PgConnector::from_settings(&settings.database)));

    let oracle = CompletionClient::from_settings(&settings.oracle)
        .map_err(|e| startup_error(format!("Failed to build completion client: {}", e)))?;

    info!(
        "Completion client initialized (model: {}, max_tokens: {})",
        settings.oracle.model, settings.oracle.max_tokens
    );

    let handler = RequestHandler::new(store, Arc::new(oracle), settings.matching.candidate_cap());

    let app_state = AppState {
        handler: Arc::new(handler),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
