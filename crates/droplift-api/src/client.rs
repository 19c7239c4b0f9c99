//! The API client: parameter validation, dispatch and response decoding.

use std::time::Duration;

use serde_json::Value;

use crate::catalog::{self, OpSpec};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::query::{ParamMode, Params, UrlBuilder, require};
use crate::transport::{HttpTransport, Transport};

/// Droplet creation request.
///
/// Fields are validated in declaration order before any request is built.
#[derive(Debug, Clone)]
pub struct NewDroplet {
    /// Hostname for the new droplet.
    pub name: String,
    /// Image to provision from.
    pub image_id: String,
    /// Region to provision in.
    pub region_id: String,
    /// Size of the new droplet.
    pub size_id: String,
    /// Comma-separated SSH key IDs to install. Omitted from the request
    /// entirely when absent.
    pub ssh_key_ids: Option<String>,
}

/// Synchronous client for the provisioning API.
///
/// Immutable after construction: configuration and the two credential
/// fragments are fixed up front, every method issues exactly one blocking
/// GET, and shared references may dispatch calls concurrently. Responses
/// are decoded JSON handed back as-is; the client imposes no schema.
pub struct ApiClient {
    config: ClientConfig,
    urls: UrlBuilder,
    mode: ParamMode,
    transport: Box<dyn Transport>,
}

/// Configures optional client behavior before construction.
pub struct ClientBuilder {
    config: ClientConfig,
    mode: ParamMode,
    timeout: Option<Duration>,
    transport: Option<Box<dyn Transport>>,
}

impl ClientBuilder {
    /// Switch how query parameter values are written into URLs.
    pub fn param_mode(mut self, mode: ParamMode) -> Self {
        self.mode = mode;
        self
    }

    /// Apply a request timeout to the default transport. Without this the
    /// transport waits indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Substitute the transport. A supplied transport makes `timeout`
    /// irrelevant; it is the implementation's concern.
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(HttpTransport::with_timeout(self.timeout)?),
        };

        Ok(ApiClient {
            urls: UrlBuilder::new(&self.config),
            config: self.config,
            mode: self.mode,
            transport,
        })
    }
}

impl ApiClient {
    /// Build a client with the default HTTP transport and legacy raw
    /// parameter interpolation. Performs no network I/O.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            mode: ParamMode::default(),
            timeout: None,
            transport: None,
        }
    }

    // ---- droplets ----

    /// List all active droplets on the account.
    pub fn list_droplets(&self) -> Result<Value> {
        self.dispatch(&catalog::LIST_DROPLETS, None, self.params())
    }

    /// Full information for one droplet.
    pub fn show_droplet(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::SHOW_DROPLET, droplet_id)
    }

    /// Provision a new droplet.
    pub fn create_droplet(&self, droplet: &NewDroplet) -> Result<Value> {
        let name = require("name", &droplet.name)?;
        let image = require("image_id", &droplet.image_id)?;
        let region = require("region_id", &droplet.region_id)?;
        let size = require("size_id", &droplet.size_id)?;

        // Query order is part of the wire contract and differs from
        // validation order.
        let params = self
            .params()
            .pair("name", name)
            .pair("size_id", size)
            .pair("image_id", image)
            .pair("region_id", region)
            .optional("ssh_key_ids", droplet.ssh_key_ids.as_deref());
        self.dispatch(&catalog::CREATE_DROPLET, None, params)
    }

    /// Reboot a droplet. The preferred remedy for an unresponsive server.
    pub fn reboot_droplet(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::REBOOT_DROPLET, droplet_id)
    }

    /// Power cycle a droplet: off, then back on.
    pub fn power_cycle_droplet(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::POWER_CYCLE_DROPLET, droplet_id)
    }

    /// Cleanly shut a droplet down. The droplet stays on the account.
    pub fn shutdown_droplet(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::SHUTDOWN_DROPLET, droplet_id)
    }

    /// Power a droplet off. The droplet stays on the account.
    pub fn power_off_droplet(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::POWER_OFF_DROPLET, droplet_id)
    }

    /// Power a previously powered-off droplet back on.
    pub fn power_on_droplet(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::POWER_ON_DROPLET, droplet_id)
    }

    /// Reset the root password. The provider reboots the droplet to apply it.
    pub fn reset_root_password(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::RESET_ROOT_PASSWORD, droplet_id)
    }

    /// Resize a droplet, changing its processor and memory allocation.
    pub fn resize_droplet(&self, droplet_id: &str, size_id: &str) -> Result<Value> {
        let id = require("droplet_id", droplet_id)?;
        let size = require("size_id", size_id)?;
        let params = self.params().pair("size_id", size);
        self.dispatch(&catalog::RESIZE_DROPLET, Some(id), params)
    }

    /// Take a named snapshot of a running droplet. May cause a reboot.
    pub fn snapshot_droplet(&self, droplet_id: &str, name: &str) -> Result<Value> {
        let id = require("droplet_id", droplet_id)?;
        let name = require("name", name)?;
        let params = self.params().pair("name", name);
        self.dispatch(&catalog::SNAPSHOT_DROPLET, Some(id), params)
    }

    /// Restore a droplet from an image or snapshot, overwriting its disk.
    pub fn restore_droplet(&self, droplet_id: &str, image_id: &str) -> Result<Value> {
        let id = require("droplet_id", droplet_id)?;
        let image = require("image_id", image_id)?;
        let params = self.params().pair("image_id", image);
        self.dispatch(&catalog::RESTORE_DROPLET, Some(id), params)
    }

    /// Reinstall a droplet from a default image, keeping its IP address.
    pub fn rebuild_droplet(&self, droplet_id: &str, image_id: &str) -> Result<Value> {
        let id = require("droplet_id", droplet_id)?;
        let image = require("image_id", image_id)?;
        let params = self.params().pair("image_id", image);
        self.dispatch(&catalog::REBUILD_DROPLET, Some(id), params)
    }

    /// Enable daily automatic backups for a droplet.
    pub fn enable_backups(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::ENABLE_BACKUPS, droplet_id)
    }

    /// Disable automatic backups for a droplet.
    pub fn disable_backups(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::DISABLE_BACKUPS, droplet_id)
    }

    /// Destroy a droplet. Irreversible; refused unless destroys are enabled
    /// in the settings file.
    pub fn destroy_droplet(&self, droplet_id: &str) -> Result<Value> {
        self.by_id(&catalog::DESTROY_DROPLET, droplet_id)
    }

    // ---- images ----

    /// List all images visible to the account: public images plus the
    /// account's own snapshots and backups.
    pub fn list_images(&self) -> Result<Value> {
        self.dispatch(&catalog::LIST_IMAGES, None, self.params())
    }

    /// Attributes of one image.
    pub fn show_image(&self, image_id: &str) -> Result<Value> {
        self.by_id(&catalog::SHOW_IMAGE, image_id)
    }

    /// Copy an image to another region.
    pub fn transfer_image(&self, image_id: &str, region_id: &str) -> Result<Value> {
        let id = require("image_id", image_id)?;
        let region = require("region_id", region_id)?;
        let params = self.params().pair("region_id", region);
        self.dispatch(&catalog::TRANSFER_IMAGE, Some(id), params)
    }

    /// Destroy an image. Irreversible; refused unless destroys are enabled
    /// in the settings file.
    pub fn destroy_image(&self, image_id: &str) -> Result<Value> {
        self.by_id(&catalog::DESTROY_IMAGE, image_id)
    }

    // ---- SSH keys ----

    /// List the account's public SSH keys.
    pub fn list_ssh_keys(&self) -> Result<Value> {
        self.dispatch(&catalog::LIST_SSH_KEYS, None, self.params())
    }

    /// One SSH key, including its public key material.
    pub fn show_ssh_key(&self, key_id: &str) -> Result<Value> {
        self.by_id(&catalog::SHOW_SSH_KEY, key_id)
    }

    /// Register a new public SSH key on the account.
    pub fn add_ssh_key(&self, name: &str, ssh_pub_key: &str) -> Result<Value> {
        let name = require("name", name)?;
        let key = require("ssh_pub_key", ssh_pub_key)?;
        let params = self.params().pair("name", name).pair("ssh_pub_key", key);
        self.dispatch(&catalog::ADD_SSH_KEY, None, params)
    }

    /// Replace the public key material of an existing SSH key.
    pub fn edit_ssh_key(&self, key_id: &str, ssh_pub_key: &str) -> Result<Value> {
        let id = require("key_id", key_id)?;
        let key = require("ssh_pub_key", ssh_pub_key)?;
        let params = self.params().pair("ssh_pub_key", key);
        self.dispatch(&catalog::EDIT_SSH_KEY, Some(id), params)
    }

    /// Delete an SSH key from the account. Irreversible; refused unless
    /// destroys are enabled in the settings file.
    pub fn destroy_ssh_key(&self, key_id: &str) -> Result<Value> {
        self.by_id(&catalog::DESTROY_SSH_KEY, key_id)
    }

    // ---- regions, sizes, documentation ----

    /// List every region droplets can be provisioned in.
    pub fn list_regions(&self) -> Result<Value> {
        self.dispatch(&catalog::LIST_REGIONS, None, self.params())
    }

    /// List every size droplets can be created with.
    pub fn list_sizes(&self) -> Result<Value> {
        self.dispatch(&catalog::LIST_SIZES, None, self.params())
    }

    /// Fetch the provider's documentation page. The one operation that
    /// returns the body as-is instead of decoding JSON.
    pub fn documentation(&self) -> Result<String> {
        self.fetch(&catalog::DOCUMENTATION, None, self.params())
    }

    // ---- dispatch ----

    fn params(&self) -> Params {
        Params::new(self.mode)
    }

    /// Single-identifier operations share one shape: validate the id,
    /// render the path, dispatch with no extra parameters. The catalog
    /// lists each identifier field first in `required`.
    fn by_id(&self, op: &OpSpec, id: &str) -> Result<Value> {
        let id = require(op.required[0], id)?;
        self.dispatch(op, Some(id), self.params())
    }

    fn dispatch(&self, op: &OpSpec, id: Option<&str>, params: Params) -> Result<Value> {
        let body = self.fetch(op, id, params)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Build the URL, apply the destroy gate, issue one GET and return the
    /// raw body.
    fn fetch(&self, op: &OpSpec, id: Option<&str>, params: Params) -> Result<String> {
        let path = match id {
            Some(id) => op.fill(id),
            None => op.path.to_string(),
        };
        let url = self.urls.build(&path, &params.finish());

        if op.destructive && !self.config.destroy_enabled {
            return Err(Error::DestroyDisabled);
        }

        // Path only; the full URL carries credentials.
        tracing::debug!(op = op.name, "GET {}{}", self.config.base, path);

        Ok(self.transport.get(&url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Transport double that records every URL and replays a canned body.
    struct RecordingTransport {
        response: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl Transport for RecordingTransport {
        fn get(&self, url: &str) -> std::result::Result<String, TransportError> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(self.response.clone())
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn get(&self, _url: &str) -> std::result::Result<String, TransportError> {
            Err(TransportError::Failed("connection refused".to_string()))
        }
    }

    fn config(destroy_enabled: bool) -> ClientConfig {
        ClientConfig {
            base: "https://api.example.com/".to_string(),
            client_id: "C".to_string(),
            api_key: "K".to_string(),
            destroy_enabled,
        }
    }

    fn client_with(
        response: &str,
        destroy_enabled: bool,
    ) -> (ApiClient, Arc<Mutex<Vec<String>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let transport = RecordingTransport {
            response: response.to_string(),
            requests: Arc::clone(&requests),
        };
        let client = ApiClient::builder(config(destroy_enabled))
            .transport(Box::new(transport))
            .build()
            .unwrap();
        (client, requests)
    }

    fn recorded(requests: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        requests.lock().unwrap().clone()
    }

    #[test]
    fn list_droplets_hits_the_droplets_path() {
        let (client, requests) = client_with("{}", false);

        client.list_droplets().unwrap();

        assert_eq!(
            recorded(&requests),
            vec!["https://api.example.com/droplets?client_id=C&api_key=K"]
        );
    }

    #[test]
    fn show_droplet_substitutes_the_identifier() {
        let (client, requests) = client_with("{}", false);

        client.show_droplet("42").unwrap();

        assert_eq!(
            recorded(&requests),
            vec!["https://api.example.com/droplets/42?client_id=C&api_key=K"]
        );
    }

    #[test]
    fn reboot_keeps_the_trailing_slash() {
        let (client, requests) = client_with("{}", false);

        client.reboot_droplet("42").unwrap();

        assert_eq!(
            recorded(&requests),
            vec!["https://api.example.com/droplets/42/reboot/?client_id=C&api_key=K"]
        );
    }

    #[test]
    fn create_droplet_orders_parameters_for_the_wire() {
        let (client, requests) = client_with("{}", false);

        client
            .create_droplet(&NewDroplet {
                name: "web01".to_string(),
                image_id: "2676".to_string(),
                region_id: "1".to_string(),
                size_id: "66".to_string(),
                ssh_key_ids: Some("10,12".to_string()),
            })
            .unwrap();

        assert_eq!(
            recorded(&requests),
            vec![
                "https://api.example.com/droplets/new?name=web01&size_id=66&image_id=2676&region_id=1&ssh_key_ids=10,12&client_id=C&api_key=K"
            ]
        );
    }

    #[test]
    fn create_droplet_omits_absent_ssh_keys() {
        let (client, requests) = client_with("{}", false);

        client
            .create_droplet(&NewDroplet {
                name: "web01".to_string(),
                image_id: "2676".to_string(),
                region_id: "1".to_string(),
                size_id: "66".to_string(),
                ssh_key_ids: None,
            })
            .unwrap();

        assert_eq!(
            recorded(&requests),
            vec![
                "https://api.example.com/droplets/new?name=web01&size_id=66&image_id=2676&region_id=1&client_id=C&api_key=K"
            ]
        );
    }

    #[test]
    fn create_droplet_validates_in_natural_order() {
        let (client, requests) = client_with("{}", false);

        // Everything empty: the name is reported first.
        let err = client
            .create_droplet(&NewDroplet {
                name: String::new(),
                image_id: String::new(),
                region_id: String::new(),
                size_id: String::new(),
                ssh_key_ids: None,
            })
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("name")));

        // Name present: the image is next.
        let err = client
            .create_droplet(&NewDroplet {
                name: "web01".to_string(),
                image_id: String::new(),
                region_id: String::new(),
                size_id: String::new(),
                ssh_key_ids: None,
            })
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("image_id")));

        assert!(recorded(&requests).is_empty());
    }

    #[test]
    fn missing_identifier_never_reaches_the_wire() {
        let (client, requests) = client_with("{}", true);

        assert!(matches!(
            client.show_droplet("").unwrap_err(),
            Error::MissingParameter("droplet_id")
        ));
        assert!(matches!(
            client.show_image("").unwrap_err(),
            Error::MissingParameter("image_id")
        ));
        assert!(matches!(
            client.destroy_ssh_key("").unwrap_err(),
            Error::MissingParameter("key_id")
        ));
        assert!(matches!(
            client.snapshot_droplet("42", "").unwrap_err(),
            Error::MissingParameter("name")
        ));

        assert!(recorded(&requests).is_empty());
    }

    #[test]
    fn destroys_are_refused_while_disabled() {
        let (client, requests) = client_with("{}", false);

        assert!(matches!(
            client.destroy_droplet("42").unwrap_err(),
            Error::DestroyDisabled
        ));
        assert!(matches!(
            client.destroy_image("2676").unwrap_err(),
            Error::DestroyDisabled
        ));
        assert!(matches!(
            client.destroy_ssh_key("7").unwrap_err(),
            Error::DestroyDisabled
        ));

        assert!(recorded(&requests).is_empty());
    }

    #[test]
    fn enabled_destroys_issue_exactly_one_request() {
        let (client, requests) = client_with("{}", true);

        client.destroy_droplet("42").unwrap();

        assert_eq!(
            recorded(&requests),
            vec!["https://api.example.com/droplets/42/destroy/?client_id=C&api_key=K"]
        );
    }

    #[test]
    fn resize_carries_the_size_parameter() {
        let (client, requests) = client_with("{}", false);

        client.resize_droplet("42", "66").unwrap();

        assert_eq!(
            recorded(&requests),
            vec!["https://api.example.com/droplets/42/resize/?size_id=66&client_id=C&api_key=K"]
        );
    }

    #[test]
    fn transfer_image_carries_the_region_parameter() {
        let (client, requests) = client_with("{}", false);

        client.transfer_image("2676", "2").unwrap();

        assert_eq!(
            recorded(&requests),
            vec!["https://api.example.com/images/2676/transfer/?region_id=2&client_id=C&api_key=K"]
        );
    }

    #[test]
    fn add_ssh_key_carries_name_then_key() {
        let (client, requests) = client_with("{}", false);

        client.add_ssh_key("laptop", "ssh-rsa AAAA").unwrap();

        assert_eq!(
            recorded(&requests),
            vec![
                "https://api.example.com/ssh_keys/new/?name=laptop&ssh_pub_key=ssh-rsa AAAA&client_id=C&api_key=K"
            ]
        );
    }

    #[test]
    fn edit_ssh_key_targets_the_key_path() {
        let (client, requests) = client_with("{}", false);

        client.edit_ssh_key("7", "ssh-rsa BBBB").unwrap();

        assert_eq!(
            recorded(&requests),
            vec![
                "https://api.example.com/ssh_keys/7/edit/?ssh_pub_key=ssh-rsa BBBB&client_id=C&api_key=K"
            ]
        );
    }

    #[test]
    fn encoded_mode_escapes_parameter_values() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let transport = RecordingTransport {
            response: "{}".to_string(),
            requests: Arc::clone(&requests),
        };
        let client = ApiClient::builder(config(false))
            .param_mode(ParamMode::Encoded)
            .transport(Box::new(transport))
            .build()
            .unwrap();

        client.add_ssh_key("laptop", "ssh-rsa AAAA").unwrap();

        assert_eq!(
            recorded(&requests),
            vec![
                "https://api.example.com/ssh_keys/new/?name=laptop&ssh_pub_key=ssh-rsa%20AAAA&client_id=C&api_key=K"
            ]
        );
    }

    #[test]
    fn responses_round_trip_as_json_values() {
        let body = r#"{"droplet":{"id":42,"name":"web01","backups":[],"size_id":66}}"#;
        let (client, _requests) = client_with(body, false);

        let value = client.show_droplet("42").unwrap();

        assert_eq!(
            value,
            json!({"droplet": {"id": 42, "name": "web01", "backups": [], "size_id": 66}})
        );
    }

    #[test]
    fn malformed_json_surfaces_as_decode_error() {
        let (client, _requests) = client_with("<html>garbage</html>", false);

        assert!(matches!(
            client.list_regions().unwrap_err(),
            Error::Decode(_)
        ));
    }

    #[test]
    fn documentation_returns_the_raw_body() {
        let body = "<html>not json at all</html>";
        let (client, requests) = client_with(body, false);

        let text = client.documentation().unwrap();

        assert_eq!(text, body);
        assert_eq!(
            recorded(&requests),
            vec!["https://api.example.com/?client_id=C&api_key=K"]
        );
    }

    #[test]
    fn transport_failures_surface_as_request_errors() {
        let client = ApiClient::builder(config(false))
            .transport(Box::new(FailingTransport))
            .build()
            .unwrap();

        assert!(matches!(
            client.list_droplets().unwrap_err(),
            Error::Request(_)
        ));
    }
}
