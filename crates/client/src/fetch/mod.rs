//! HTTP fetch client backed by reqwest.
//!
//! - Any status is returned as a response; only transport failures are errors
//! - Max redirects: 5
//! - Max body bytes: optional, unlimited unless configured
//! - Timeout: configurable (default 20s)

use bytes::Bytes;
use reqwest::{Client, Method, header};
use std::time::{Duration, Instant};

use precache_core::{AppConfig, Error, Request, Response};

use crate::network::Network;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "precache/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: unlimited)
    pub max_bytes: Option<usize>,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "precache/0.1".to_string(),
            max_bytes: None,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            ..Default::default()
        }
    }
}

/// HTTP fetch client.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn check_size(&self, len: usize) -> Result<(), Error> {
        match self.config.max_bytes {
            Some(max) if len > max => Err(Error::FetchTooLarge(format!("{len} bytes exceeds {max}"))),
            _ => Ok(()),
        }
    }
}

fn map_send_error(request: &Request, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(format!("{request}: {err}"))
    } else {
        Error::Network(format!("{request}: {err}"))
    }
}

/// Header values that are not valid UTF-8 are dropped rather than rewritten.
fn collect_headers(headers: &header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| match std::str::from_utf8(value.as_bytes()) {
            Ok(value) => Some((name.as_str().to_string(), value.to_string())),
            Err(_) => {
                tracing::debug!(header = %name, "skipping non-UTF-8 header value");
                None
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl Network for FetchClient {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        let start = Instant::now();
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| Error::InvalidInput(format!("invalid method {}: {e}", request.method)))?;

        let response = self
            .http
            .request(method, request.url.clone())
            .send()
            .await
            .map_err(|e| map_send_error(request, e))?;

        if let Some(len) = response.content_length() {
            self.check_size(len as usize)?;
        }

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());

        let body: Bytes = response.bytes().await.map_err(|e| map_send_error(request, e))?;
        self.check_size(body.len())?;

        let fetch_ms = start.elapsed().as_millis() as u64;
        tracing::debug!("fetched {} -> {} {} in {}ms ({} bytes)", request, final_url, status, fetch_ms, body.len());

        Ok(Response { url: final_url, status, headers, body: body.to_vec() })
    }
}
