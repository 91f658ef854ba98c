use std::sync::Arc;

use resq_gateway::api::overpass;
use resq_gateway::api::service;
use resq_gateway::cache::{HospitalCache, MemoryStore};
use resq_gateway::config::{Config, VARIABLES};
use resq_gateway::finder::HospitalFinder;
use resq_gateway::state::AppState;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{e}");
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::env().inspect_err(|e| {
        log::error!(
            "config: {e}. Check the environment variables ({}).",
            VARIABLES.join(", ")
        );
    })?;

    config.log();

    let client = overpass::Client::new(&config.overpass_url, config.overpass_timeout)?;
    log::info!("Using map data endpoint ({})", config.overpass_url);

    let finder = HospitalFinder::new(client, HospitalCache::new(MemoryStore::default()));
    let app = Arc::new(AppState::default());
    let state = service::State::new(app, Arc::new(finder), config.static_root.clone());

    let listen_addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    let router = service::router::router(state);

    log::info!("Listening on {listen_addr}");
    axum::serve(listener, router).await?;

    Ok(())
}
