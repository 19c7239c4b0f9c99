//! Client bindings for the DigitalOcean v1 provisioning API.
//!
//! Typed method calls become authenticated HTTP GET requests: credentials
//! load once into an immutable [`ClientConfig`], every call builds its URL
//! deterministically from a declarative operation catalog, destroy
//! operations are gated behind an explicit configuration flag, and JSON
//! responses come back as [`serde_json::Value`] with no schema imposed on
//! them.
//!
//! ```no_run
//! use droplift_api::{ApiClient, ClientConfig};
//!
//! # fn main() -> droplift_api::Result<()> {
//! let config = ClientConfig::from_file("settings.ini")?;
//! let client = ApiClient::new(config)?;
//! let droplets = client.list_droplets()?;
//! println!("{droplets}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod transport;

// Re-exports
pub use client::{ApiClient, ClientBuilder, NewDroplet};
pub use config::ClientConfig;
pub use error::{ConfigError, Error, Result, TransportError};
pub use query::{ParamMode, Params, UrlBuilder};
pub use transport::{HttpTransport, Transport};
