mod config;
mod loader;

pub use config::Config;
pub use loader::{parse_config, parse_config_str, BOT_TOKEN_ENV_VAR};

pub const SOFTWARE_NAME: &str = "tglogin";
pub const SOFTWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{0}")]
pub struct ConfigError(pub &'static str);
