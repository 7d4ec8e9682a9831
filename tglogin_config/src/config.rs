use std::path::PathBuf;

use log::{Level as LogLevel};
use serde::Deserialize;

use tglogin_core::signing_key::SigningKey;

fn default_log_level() -> LogLevel { LogLevel::Info }

// Debug is not implemented to keep the bot token out of logs
#[derive(Clone, Deserialize)]
pub struct Config {
    // Properties auto-populated from the environment
    #[serde(skip)]
    pub config_path: String,

    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    // Bot token can be set in config file,
    // read from a separate file, or taken from environment
    #[serde(default)]
    pub(crate) bot_token: String,
    pub bot_token_file: Option<PathBuf>,
}

impl Config {
    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from_bot_token(&self.bot_token)
    }
}
