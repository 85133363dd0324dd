//! Bot configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

/// Configuration loaded from `reelbot.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    /// Bot token, inline.
    #[serde(default)]
    pub token: Option<String>,
    /// Path to a file whose first line is the bot token.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
    /// Default tracing filter; the `RUST_LOG` environment variable wins.
    #[serde(default)]
    pub log: Option<String>,
}

impl BotConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Resolves the bot token: the inline value wins, then the token file.
    pub fn resolve_token(&self) -> anyhow::Result<String> {
        if let Some(token) = &self.token {
            let token = token.trim();
            if token.is_empty() {
                bail!("config `token` is empty");
            }
            return Ok(token.to_string());
        }
        if let Some(path) = &self.token_file {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read token file: {}", path.display()))?;
            let token = raw.lines().next().unwrap_or_default().trim();
            if token.is_empty() {
                bail!("token file {} is empty", path.display());
            }
            return Ok(token.to_string());
        }
        bail!("config needs either `token` or `token_file`")
    }
}
