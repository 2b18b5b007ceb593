/// HTTP server exposing dashboard sessions over WebSocket and plain HTTP
use actix_web::{middleware, web, App, Error, HttpRequest, HttpResponse, HttpServer};
use actix_web_actors::ws;
use std::path::PathBuf;
use std::sync::Arc;

use crate::session::{DashboardSession, FilterState};
use crate::table::ListingTable;
use crate::websocket::{AppState, DashboardWebSocket};

/// Server settings, from command line flags or the environment.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "listingview-server", about = "Serve listing dashboard sessions")]
pub struct ServerConfig {
    /// CSV file of listings to load at startup
    #[arg(long, env = "LISTINGS_PATH", default_value = "listings.csv")]
    pub listings: PathBuf,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

/// WebSocket endpoint handler
async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let resp = ws::start(DashboardWebSocket::new(state), &req, stream)?;
    Ok(resp)
}

/// One-off snapshot for the filter state given in the query string
async fn dashboard(
    query: web::Query<FilterState>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let session = DashboardSession::with_state(Arc::clone(&state.table), query.into_inner());
    HttpResponse::Ok().json(session.snapshot())
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "listings": state.table.len(),
    }))
}

/// Start the HTTP server for an already loaded table
pub async fn run_server(config: &ServerConfig, table: Arc<ListingTable>) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(table));

    log::info!("WebSocket: ws://{}:{}/ws", config.host, config.port);
    log::info!("Dashboard: http://{}:{}/dashboard", config.host, config.port);
    log::info!("Health check: http://{}:{}/health", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            // CORS for development
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/ws", web::get().to(ws_index))
            .route("/dashboard", web::get().to(dashboard))
            .route("/health", web::get().to(health_check))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
