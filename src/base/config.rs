//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default port for the keep-alive HTTP listener.
fn default_http_port() -> u16 {
    3000
}

/// Configuration for the bump-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// The concrete configuration values behind [`Config`].
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Discord bot token (`DISCORD_TOKEN`).
    pub discord_token: String,
    /// The single channel the bot monitors for bump activity (`BUMP_CHANNEL_ID`).
    pub bump_channel_id: u64,
    /// The role mentioned when the cooldown elapses (`BUMP_ROLE_ID`).
    pub bump_role_id: u64,
    /// Port for the keep-alive HTTP listener (`HTTP_PORT`).
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Config {
    /// Loads configuration from the environment and an optional TOML file.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("BUMP_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.discord_token.is_empty() {
            return Err(anyhow::anyhow!("Discord token must be set."));
        }

        if result.bump_channel_id == 0 {
            return Err(anyhow::anyhow!("Bump channel ID must be set."));
        }

        if result.bump_role_id == 0 {
            return Err(anyhow::anyhow!("Bump role ID must be set."));
        }

        Ok(result)
    }
}
