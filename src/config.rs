// Startup configuration, read from the process environment (after dotenv).
// The core never reads env vars itself; everything it needs arrives through
// this struct, validated once here.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {0} must be a numeric id, got `{1}`")]
    InvalidId(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub application_id: Option<u64>,
    /// When set, slash commands register guild-scoped (instant updates);
    /// otherwise globally (propagation can take up to an hour).
    pub guild_id: Option<u64>,
    /// Channel that receives moderation-action notices.
    pub staff_log_channel_id: Option<u64>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse from any env-shaped lookup, so tests never mutate the real
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        if token.trim().is_empty() {
            return Err(ConfigError::Missing("DISCORD_TOKEN"));
        }

        Ok(Self {
            token,
            application_id: optional_id(&lookup, "APPLICATION_ID")?,
            guild_id: optional_id(&lookup, "GUILD_ID")?,
            staff_log_channel_id: optional_id(&lookup, "STAFF_LOG_CHANNEL_ID")?,
        })
    }
}

fn optional_id(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidId(key, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parse(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let map = env(pairs);
        BotConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn token_is_required() {
        assert_eq!(
            parse(&[]).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
        assert_eq!(
            parse(&[("DISCORD_TOKEN", "  ")]).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
    }

    #[test]
    fn optional_ids_default_to_none() {
        let config = parse(&[("DISCORD_TOKEN", "tok")]).unwrap();
        assert_eq!(config.application_id, None);
        assert_eq!(config.guild_id, None);
        assert_eq!(config.staff_log_channel_id, None);
    }

    #[test]
    fn ids_are_parsed_and_validated() {
        let config = parse(&[
            ("DISCORD_TOKEN", "tok"),
            ("GUILD_ID", "123456789"),
            ("STAFF_LOG_CHANNEL_ID", "42"),
        ])
        .unwrap();
        assert_eq!(config.guild_id, Some(123456789));
        assert_eq!(config.staff_log_channel_id, Some(42));

        let err = parse(&[("DISCORD_TOKEN", "tok"), ("GUILD_ID", "not-a-number")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidId("GUILD_ID", "not-a-number".to_string())
        );
    }
}
