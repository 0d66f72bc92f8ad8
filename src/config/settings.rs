use serde::Deserialize;
use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub ffmpeg_path: String,
    pub asset_root: String,
    pub publish_url: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 5000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            ffmpeg_path: env::get_or(EnvKey::FfmpegPath, "ffmpeg"),
            asset_root: env::get_or(EnvKey::AssetRoot, "public"),
            publish_url: env::get_or(EnvKey::PublishUrl, "rtmp://localhost:1935/live/stream"),
        })
    }
}
