use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;

use crate::config::settings::AppConfig;
use crate::modules::stream::supervisor::{DbOverlayLister, StreamSupervisor, TranscodeSettings};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new().expect("Missing required environment configuration");

    let db = infrastructure::db::pool::connect_to_db(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let supervisor = Arc::new(StreamSupervisor::new(
        TranscodeSettings {
            ffmpeg_path: config.ffmpeg_path.clone(),
            asset_root: PathBuf::from(&config.asset_root),
            publish_url: config.publish_url.clone(),
        },
        Arc::new(DbOverlayLister::new(db.clone())),
    ));

    let state = AppState::new(config.clone(), db, Arc::clone(&supervisor));
    let app = app::create_app(state).await;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("✅ Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // The transcoder child outlives the HTTP server unless stopped here.
    if supervisor.stop().await.is_ok() {
        info!("Stopped active transcoder on shutdown");
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    info!("Shutting down servers...");
}
