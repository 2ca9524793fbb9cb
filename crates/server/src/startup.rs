use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use service::{
    cafes::{CafeRepository, CafeStore},
    runtime,
};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port and store path from configs or env vars, with sensible fallbacks
fn load_settings() -> anyhow::Result<(SocketAddr, String)> {
    let (host, port, store_path) = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => (cfg.server.host, cfg.server.port, cfg.store.path),
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000);
            let store_path =
                env::var("CAFES_STORE_PATH").unwrap_or_else(|_| "cafes.json".to_string());
            (host, port, store_path)
        }
    };
    Ok((format!("{}:{}", host, port).parse()?, store_path))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let (addr, store_path) = load_settings()?;

    // The file is expected to exist already; this only warns when it does not
    runtime::ensure_env(&store_path).await?;

    // Flat-file store behind the repository capability
    let repo: Arc<dyn CafeRepository> = CafeStore::new(&store_path);

    let cors = build_cors();
    let app: Router = routes::build_router(repo, cors);

    info!(%addr, %store_path, "starting cafes server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
