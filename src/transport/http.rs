use crate::client::ClientConfig;
use crate::resource::RootResource;
use crate::{Error, Result};
use reqwest::header::{HeaderName, HeaderValue, ACCEPT};
use reqwest::Proxy;
use std::env;
use std::time::Duration;
use url::Url;

pub struct HttpTransport {
    client: reqwest::Client,
    root_url: Url,
    api_key_header: HeaderName,
    api_key: Option<HeaderValue>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, base_url: &Url) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .pool_max_idle_per_host(
                env::var("SERVER_CAPS_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(4),
            );

        if let Ok(proxy_url) = env::var("SERVER_CAPS_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        let root_url = Url::parse(&format!(
            "{}{}",
            base_url.as_str().trim_end_matches('/'),
            config.root_path
        ))
        .map_err(TransportError::InvalidUrl)?;

        let api_key_header = HeaderName::from_bytes(config.api_key_header.as_bytes())
            .map_err(|e| TransportError::Other(format!("invalid API key header name: {}", e)))?;

        let api_key = config
            .api_key
            .as_deref()
            .map(|key| {
                let mut value = HeaderValue::from_str(key).map_err(|_| {
                    TransportError::Other("API key is not a valid header value".to_string())
                })?;
                value.set_sensitive(true);
                Ok::<_, TransportError>(value)
            })
            .transpose()?;

        Ok(Self {
            client,
            root_url,
            api_key_header,
            api_key,
        })
    }

    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    /// `GET` the root document and decode it into a snapshot.
    pub async fn fetch_root(&self) -> Result<RootResource> {
        let mut request = self
            .client
            .get(self.root_url.clone())
            .header(ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            request = request.header(self.api_key_header.clone(), key.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Other(String),
}
