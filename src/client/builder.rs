use crate::client::config::ClientConfig;
use crate::client::core::CapabilityClient;
use crate::resource::RootResource;
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use url::Url;

/// Builder for [`CapabilityClient`].
///
/// Starts from [`ClientConfig::from_env`]; explicit setters win over the environment.
pub struct CapabilityClientBuilder {
    config: ClientConfig,
    root: Option<RootResource>,
}

impl CapabilityClientBuilder {
    pub fn new() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config, root: None }
    }

    /// Server base URL, e.g. `https://deploy.example.com`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Header carrying the API key. Default `X-Api-Key`.
    pub fn api_key_header(mut self, header: impl Into<String>) -> Self {
        self.config.api_key_header = header.into();
        self
    }

    /// Root document path relative to the base URL. Default `/api`.
    pub fn root_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.config.root_path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs.max(1);
        self
    }

    /// Seed the cache with a root resource already fetched elsewhere.
    pub fn root_resource(mut self, root: RootResource) -> Self {
        self.root = Some(root);
        self
    }

    pub fn build(self) -> Result<CapabilityClient> {
        let raw = self.config.base_url.as_deref().ok_or_else(|| {
            Error::configuration_with_context(
                "Server base URL is not set",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details("set it on the builder or via SERVER_CAPS_URL"),
            )
        })?;

        let base_url = Url::parse(raw).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(raw),
            )
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "Base URL must use http or https",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(raw),
            ));
        }

        let transport = HttpTransport::new(&self.config, &base_url)?;
        tracing::debug!(root_url = %transport.root_url(), "capability client configured");

        Ok(CapabilityClient::new(
            Arc::new(transport),
            self.root.map(Arc::new),
        ))
    }
}

impl Default for CapabilityClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
