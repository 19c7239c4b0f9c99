//! Deterministic URL and query-string assembly.
//!
//! Every request URL is a plain concatenation:
//! `<base><path>?<params>client_id=<id>&api_key=<key>`. Parameter values are
//! interpolated verbatim by default to stay byte-compatible with the legacy
//! wire format; percent-encoding is available as an opt-in mode.

use std::fmt::Write;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// How query parameter values are written into the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
    /// Legacy behavior: values are interpolated as raw strings. The caller
    /// owns making values safe inside a query string.
    #[default]
    Raw,
    /// Percent-encode values. Changes the request shape for values carrying
    /// reserved characters, so it never switches on silently.
    Encoded,
}

/// Builds request URLs from the configured base and the two credential
/// fragments precomputed at construction.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: String,
    uri_id: String,
    uri_key: String,
}

impl UrlBuilder {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base: config.base.clone(),
            uri_id: format!("client_id={}", config.client_id),
            uri_key: format!("api_key={}", config.api_key),
        }
    }

    /// The `client_id=<id>` fragment appended to every request.
    pub fn client_fragment(&self) -> &str {
        &self.uri_id
    }

    /// The `api_key=<key>` fragment appended to every request.
    pub fn key_fragment(&self) -> &str {
        &self.uri_key
    }

    /// Assemble a request URL. `extra`, when non-empty, must already end in
    /// `&` so the credential fragments concatenate cleanly; [`Params`]
    /// upholds that for every pair it writes.
    pub fn build(&self, path: &str, extra: &str) -> String {
        format!("{}{}?{}{}&{}", self.base, path, extra, self.uri_id, self.uri_key)
    }
}

/// Ordered `key=value&` assembler for operations that carry parameters.
///
/// Pairs are emitted in insertion order. Absent optional values are omitted
/// entirely rather than written as empty.
#[derive(Debug)]
pub struct Params {
    buf: String,
    mode: ParamMode,
}

impl Params {
    pub fn new(mode: ParamMode) -> Self {
        Self {
            buf: String::new(),
            mode,
        }
    }

    pub fn pair(mut self, name: &str, value: &str) -> Self {
        match self.mode {
            ParamMode::Raw => {
                let _ = write!(self.buf, "{name}={value}&");
            }
            ParamMode::Encoded => {
                let _ = write!(self.buf, "{name}={}&", urlencoding::encode(value));
            }
        }
        self
    }

    pub fn optional(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.pair(name, v),
            _ => self,
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Check a required call parameter before any request is built.
pub(crate) fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        Err(Error::MissingParameter(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> UrlBuilder {
        UrlBuilder::new(&ClientConfig {
            base: "https://api.example.com/".to_string(),
            client_id: "C".to_string(),
            api_key: "K".to_string(),
            destroy_enabled: false,
        })
    }

    #[test]
    fn credential_fragments_are_precomputed() {
        let urls = builder();

        assert_eq!(urls.client_fragment(), "client_id=C");
        assert_eq!(urls.key_fragment(), "api_key=K");
    }

    #[test]
    fn builds_url_without_extra_params() {
        let url = builder().build("droplets/42/reboot/", "");

        assert_eq!(
            url,
            "https://api.example.com/droplets/42/reboot/?client_id=C&api_key=K"
        );
    }

    #[test]
    fn extra_params_slot_in_before_the_credentials() {
        let url = builder().build("droplets/42/resize/", "size_id=66&");

        assert_eq!(
            url,
            "https://api.example.com/droplets/42/resize/?size_id=66&client_id=C&api_key=K"
        );
    }

    #[test]
    fn raw_mode_keeps_values_verbatim() {
        let params = Params::new(ParamMode::Raw)
            .pair("name", "web 01&x=y")
            .finish();

        assert_eq!(params, "name=web 01&x=y&");
    }

    #[test]
    fn encoded_mode_escapes_reserved_characters() {
        let params = Params::new(ParamMode::Encoded)
            .pair("name", "web 01&x=y")
            .finish();

        assert_eq!(params, "name=web%2001%26x%3Dy&");
    }

    #[test]
    fn pairs_keep_insertion_order() {
        let params = Params::new(ParamMode::Raw)
            .pair("name", "web01")
            .pair("size_id", "66")
            .pair("image_id", "2676")
            .finish();

        assert_eq!(params, "name=web01&size_id=66&image_id=2676&");
    }

    #[test]
    fn absent_optionals_are_omitted_entirely() {
        let params = Params::new(ParamMode::Raw)
            .pair("name", "web01")
            .optional("ssh_key_ids", None)
            .finish();

        assert_eq!(params, "name=web01&");

        let params = Params::new(ParamMode::Raw)
            .pair("name", "web01")
            .optional("ssh_key_ids", Some(""))
            .finish();

        assert_eq!(params, "name=web01&");
    }

    #[test]
    fn require_rejects_empty_values() {
        assert!(matches!(
            require("droplet_id", ""),
            Err(Error::MissingParameter("droplet_id"))
        ));
        assert_eq!(require("droplet_id", "42").unwrap(), "42");
    }
}
