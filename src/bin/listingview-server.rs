/// ListingView Server
///
/// Loads the listing CSV once, then serves isolated dashboard sessions to
/// frontend clients over WebSocket and HTTP.

use clap::Parser;
use listingview::loader::load_listings;
use listingview::server::{run_server, ServerConfig};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::parse();

    // Without a usable table there is nothing to serve
    let loaded = match load_listings(&config.listings) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Cannot start: {} ({})", e, config.listings.display());
            std::process::exit(1);
        }
    };

    run_server(&config, Arc::new(loaded.table)).await
}
