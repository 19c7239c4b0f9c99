//! Error types for the droplift client.

use thiserror::Error;

/// Errors raised while loading client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no options found")]
    NoOptions,

    #[error("missing api key")]
    MissingApiKey,

    #[error("missing client id")]
    MissingClientId,

    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Errors raised by the HTTP transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport failure: {0}")]
    Failed(String),
}

/// Errors raised by API operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required call parameter was empty or absent. The request was never
    /// dispatched.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A destroy operation was attempted while destroys are disabled. The
    /// request was never dispatched.
    #[error("destroy operations are disabled; set enable = 1 under [DESTROY] to allow them")]
    DestroyDisabled,

    #[error("request failed: {0}")]
    Request(#[from] TransportError),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
