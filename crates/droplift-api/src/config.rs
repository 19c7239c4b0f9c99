//! Client configuration loading.
//!
//! Credentials live in an INI file with `[API]`, `[CLIENT]` and `[DESTROY]`
//! sections; see `settings.ini.example` at the repository root. The loaded
//! value is immutable — reconfiguring means constructing a new client.

use std::path::Path;

use ::config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::ConfigError;

/// Immutable client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute URL prefix every request path is appended to.
    pub base: String,
    /// Account client ID, sent as `client_id` on every request.
    pub client_id: String,
    /// Account API key, sent as `api_key` on every request.
    pub api_key: String,
    /// Gate for irreversible destroy operations. Off unless the settings
    /// file sets a truthy `[DESTROY] enable`.
    pub destroy_enabled: bool,
}

// Sections are optional at parse time so the validation below can tell
// "file has nothing in it" apart from "a specific value is missing".
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(alias = "API")]
    api: Option<ApiSection>,
    #[serde(alias = "CLIENT")]
    client: Option<ClientSection>,
    #[serde(alias = "DESTROY")]
    destroy: Option<DestroySection>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    base: Option<String>,
    key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ClientSection {
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DestroySection {
    enable: Option<String>,
}

impl ClientConfig {
    /// Load and validate configuration from an INI settings file.
    ///
    /// Fails fast: an unreadable file, an empty file, or a missing API key
    /// or client ID is an error before any client exists. No network I/O
    /// happens here.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Ini))
            .build()?;
        let raw: RawSettings = settings.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        if raw.api.is_none() && raw.client.is_none() && raw.destroy.is_none() {
            return Err(ConfigError::NoOptions);
        }

        let api = raw.api.unwrap_or_default();
        let client = raw.client.unwrap_or_default();
        let destroy = raw.destroy.unwrap_or_default();

        let api_key = api.key.unwrap_or_default();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let client_id = client.id.unwrap_or_default();
        if client_id.is_empty() {
            return Err(ConfigError::MissingClientId);
        }

        Ok(Self {
            base: api.base.unwrap_or_default(),
            client_id,
            api_key,
            destroy_enabled: destroy.enable.as_deref().is_some_and(is_truthy),
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
