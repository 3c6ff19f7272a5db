use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::report::address::PostalCodeSource;

const CONFIG_FILE: &str = "cdlis";
const ENV_PREFIX: &str = "CDLIS";

/// Extraction settings: defaults, then `cdlis.toml`, then `CDLIS_*` env vars.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub postal_code_source: PostalCodeSource,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize::<Settings>()
            .context("Invalid settings")?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Apply a command-line override on top of the loaded values.
    pub fn with_postal_code_source(mut self, source: Option<PostalCodeSource>) -> Self {
        if let Some(source) = source {
            self.postal_code_source = source;
        }
        self
    }
}
