//! # Giro HTTP
//!
//! [`Transport`] adapter that submits form-encoded requests with `reqwest`.

use std::time::Duration;

use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, instrument};

use giro_types::{Transport, TransportError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Timeouts applied to every gateway request.
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Creates a transport with default timeouts.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(HttpConfig::default())
    }

    pub fn with_config(config: HttpConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wraps an existing client, e.g. one shared with the rest of an application.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    async fn post_form(&self, url: &str, body: String) -> Result<String, TransportError> {
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        debug!(status = status.as_u16(), "Gateway responded");

        if status.is_success() {
            Ok(text)
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}
