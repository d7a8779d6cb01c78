//! Handles settings for the application. Configuration is written in
//! `valigia.toml`, with `VALIGIA_*` environment overrides.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    pub theme: client::Theme,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            theme: client::Theme::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct Trip {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
    pub trip: Trip,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("valigia").required(false))
            .add_source(Environment::with_prefix("VALIGIA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
