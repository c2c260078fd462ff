//! Startup configuration read from the environment (and `.env`, if present).
use std::env;
use std::fmt;

use serenity::model::id::GuildId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected BOT_TOKEN or DISCORD_TOKEN in the environment")]
    MissingToken,
    #[error("GUILD_ID must be a non-zero number, got '{0}'")]
    InvalidGuildId(String),
}

#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    /// Register commands in this guild only; global registration when unset.
    pub guild_id: Option<GuildId>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real deployments set the variables directly.
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("BOT_TOKEN")
            .or_else(|| lookup("DISCORD_TOKEN"))
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let guild_id = match lookup("GUILD_ID") {
            Some(raw) if !raw.trim().is_empty() => Some(parse_guild_id(&raw)?),
            _ => None,
        };
        Ok(Self { token, guild_id })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

fn parse_guild_id(raw: &str) -> Result<GuildId, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(GuildId::new(id)),
        _ => Err(ConfigError::InvalidGuildId(raw.to_string())),
    }
}
