use std::path::Path;

use super::config::Config;
use super::ConfigError;

pub const BOT_TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

struct EnvConfig {
    config_path: String,
    bot_token: Option<String>,
}

fn parse_env() -> EnvConfig {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    let config_path = std::env::var("CONFIG_PATH")
        .unwrap_or(DEFAULT_CONFIG_PATH.to_string());
    let bot_token = std::env::var(BOT_TOKEN_ENV_VAR).ok()
        .filter(|value| !value.is_empty());
    EnvConfig {
        config_path,
        bot_token,
    }
}

// Expected format: <bot ID>:<secret>
fn validate_bot_token(bot_token: &str) -> Result<(), ConfigError> {
    let (bot_id, secret) = bot_token.split_once(':')
        .ok_or(ConfigError("invalid bot token"))?;
    if bot_id.is_empty() || !bot_id.chars().all(|char| char.is_ascii_digit()) {
        return Err(ConfigError("invalid bot token"));
    };
    if secret.is_empty() || secret.chars().any(|char| char.is_whitespace()) {
        return Err(ConfigError("invalid bot token"));
    };
    Ok(())
}

fn read_bot_token_file(path: &Path) -> Result<String, ConfigError> {
    let bot_token = std::fs::read_to_string(path)
        .map_err(|_| ConfigError("failed to read bot token file"))?;
    Ok(bot_token.trim_end().to_string())
}

fn resolve_bot_token(
    config: &mut Config,
    env_bot_token: Option<String>,
) -> Result<(), ConfigError> {
    if let Some(bot_token) = env_bot_token {
        // Environment takes precedence over config file
        config.bot_token = bot_token;
    } else if let Some(ref path) = config.bot_token_file {
        if !config.bot_token.is_empty() {
            return Err(ConfigError("bot_token and bot_token_file can't be used together"));
        };
        config.bot_token = read_bot_token_file(path)?;
    };
    if config.bot_token.is_empty() {
        return Err(ConfigError("bot token is not set"));
    };
    validate_bot_token(&config.bot_token)?;
    Ok(())
}

/// Parses YAML config.
/// Returns config and the list of unknown parameters.
pub fn parse_config_str(
    config_yaml: &str,
) -> Result<(Config, Vec<String>), ConfigError> {
    let deserializer = serde_yaml::Deserializer::from_str(config_yaml);
    let mut ignored = vec![];
    let config: Config = serde_ignored::deserialize(
        deserializer,
        |path| ignored.push(path.to_string()),
    ).map_err(|_| ConfigError("invalid yaml data"))?;
    Ok((config, ignored))
}

/// Loads configuration from the file set by CONFIG_PATH
/// and from environment variables
pub fn parse_config() -> Result<(Config, Vec<String>), ConfigError> {
    let env = parse_env();
    let config_yaml = std::fs::read_to_string(&env.config_path)
        .map_err(|_| ConfigError("failed to load config file"))?;
    let (mut config, ignored) = parse_config_str(&config_yaml)?;
    let warnings = ignored.into_iter()
        .map(|path| format!("unknown parameter '{path}'"))
        .collect();

    // Set parameters from environment
    config.config_path = env.config_path;
    resolve_bot_token(&mut config, env.bot_token)?;

    Ok((config, warnings))
}

#[cfg(test)]
mod tests {
    use log::Level;
    use serial_test::serial;
    use tglogin_core::signing_key::SigningKey;
    use super::*;

    const BOT_TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

    #[test]
    fn test_parse_config_str() {
        let config_yaml = format!("log_level: debug\nbot_token: \"{BOT_TOKEN}\"\n");
        let (mut config, ignored) = parse_config_str(&config_yaml).unwrap();
        assert_eq!(config.log_level, Level::Debug);
        assert_eq!(ignored.is_empty(), true);
        resolve_bot_token(&mut config, None).unwrap();
        assert_eq!(config.bot_token(), BOT_TOKEN);
    }

    #[test]
    fn test_parse_config_str_defaults() {
        let (config, _) = parse_config_str("bot_token_file: /run/secrets/bot_token").unwrap();
        assert_eq!(config.log_level, Level::Info);
        assert_eq!(config.bot_token(), "");
    }

    #[test]
    fn test_parse_config_str_unknown_parameters() {
        let config_yaml = format!("bot_token: \"{BOT_TOKEN}\"\nbot_tokne_file: token\n");
        let (_, ignored) = parse_config_str(&config_yaml).unwrap();
        assert_eq!(ignored, ["bot_tokne_file"]);
    }

    #[test]
    fn test_parse_config_str_invalid() {
        let error = parse_config_str("log_level: [1, 2]").err().unwrap();
        assert_eq!(error, ConfigError("invalid yaml data"));
    }

    #[test]
    fn test_resolve_bot_token_env_precedence() {
        let config_yaml = "bot_token: \"1:from-config\"";
        let (mut config, _) = parse_config_str(config_yaml).unwrap();
        resolve_bot_token(&mut config, Some(BOT_TOKEN.to_string())).unwrap();
        assert_eq!(config.bot_token(), BOT_TOKEN);
    }

    #[test]
    fn test_resolve_bot_token_from_file() {
        let path = std::env::temp_dir()
            .join(format!("tglogin_test_bot_token_{}", std::process::id()));
        std::fs::write(&path, format!("{BOT_TOKEN}\n")).unwrap();
        let config_yaml = format!("bot_token_file: {}", path.display());
        let (mut config, _) = parse_config_str(&config_yaml).unwrap();
        resolve_bot_token(&mut config, None).unwrap();
        assert_eq!(config.bot_token(), BOT_TOKEN);
        assert_eq!(
            config.signing_key().as_bytes(),
            SigningKey::from_bot_token(BOT_TOKEN).as_bytes(),
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_bot_token_conflict() {
        let config_yaml = format!("bot_token: \"{BOT_TOKEN}\"\nbot_token_file: token");
        let (mut config, _) = parse_config_str(&config_yaml).unwrap();
        let error = resolve_bot_token(&mut config, None).err().unwrap();
        assert_eq!(error, ConfigError("bot_token and bot_token_file can't be used together"));
    }

    #[test]
    fn test_resolve_bot_token_missing() {
        let (mut config, _) = parse_config_str("log_level: warn").unwrap();
        let error = resolve_bot_token(&mut config, None).err().unwrap();
        assert_eq!(error, ConfigError("bot token is not set"));
    }

    #[test]
    fn test_validate_bot_token() {
        assert!(validate_bot_token(BOT_TOKEN).is_ok());
        assert!(validate_bot_token("no-colon").is_err());
        assert!(validate_bot_token("abc:secret").is_err());
        assert!(validate_bot_token(":secret").is_err());
        assert!(validate_bot_token("123:").is_err());
        assert!(validate_bot_token("123:with space").is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env() {
        std::env::set_var("CONFIG_PATH", "/etc/tglogin/config.yaml");
        std::env::set_var(BOT_TOKEN_ENV_VAR, BOT_TOKEN);
        let env = parse_env();
        assert_eq!(env.config_path, "/etc/tglogin/config.yaml");
        assert_eq!(env.bot_token.as_deref(), Some(BOT_TOKEN));
        std::env::remove_var("CONFIG_PATH");
        std::env::remove_var(BOT_TOKEN_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_parse_env_empty_token() {
        std::env::set_var(BOT_TOKEN_ENV_VAR, "");
        let env = parse_env();
        assert_eq!(env.bot_token, None);
        std::env::remove_var(BOT_TOKEN_ENV_VAR);
    }
}
