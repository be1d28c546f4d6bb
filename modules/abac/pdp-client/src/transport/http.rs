//! XACML over HTTP.

use std::time::Duration;

use abac_sdk::xacml::{XacmlRequest, XacmlResponse};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{StatusCode, Url};
use secrecy::ExposeSecret;
use tracing::{debug, info};

use super::PdpConsumer;
use super::retry::retry_once;
use crate::config::{ConfigError, PdpClientConfig};
use crate::domain::DomainError;

pub const XACML_MEDIA_TYPE: &str = "application/xacml+json";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_LOGGED_BODY: usize = 512;

/// [`PdpConsumer`] posting XACML JSON to the configured endpoint with Basic
/// authentication.
pub struct HttpPdpConsumer {
    client: reqwest::Client,
    endpoint: Url,
    authorization: HeaderValue,
}

impl HttpPdpConsumer {
    /// # Errors
    ///
    /// - `InvalidEndpoint` if the endpoint url does not parse
    /// - `InvalidCredentials` if the credentials cannot form a header value
    /// - `HttpClient` if the HTTP client cannot be built
    pub fn new(cfg: &PdpClientConfig) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&cfg.endpoint_url).map_err(|e| ConfigError::InvalidEndpoint {
            url: cfg.endpoint_url.clone(),
            reason: e.to_string(),
        })?;

        let mut authorization = HeaderValue::from_str(cfg.basic_credentials().expose_secret())
            .map_err(|_| ConfigError::InvalidCredentials)?;
        authorization.set_sensitive(true);

        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(Policy::none())
            .no_proxy()
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            endpoint,
            authorization,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, body: Vec<u8>) -> Result<XacmlResponse, DomainError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .header(CONTENT_TYPE, XACML_MEDIA_TYPE)
            .timeout(REQUEST_TIMEOUT)
            .body(body)
            .send()
            .await
            .map_err(DomainError::Io)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(DomainError::Unauthorized);
        }

        let bytes = response.bytes().await.map_err(DomainError::Io)?;
        if !status.is_success() {
            return Err(DomainError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate(&String::from_utf8_lossy(&bytes)),
            });
        }
        if bytes.is_empty() {
            info!(status = status.as_u16(), "no response body from PDP");
            return Err(DomainError::EmptyResponse {
                status: status.as_u16(),
            });
        }

        serde_json::from_slice(&bytes).map_err(DomainError::Deserialize)
    }
}

impl std::fmt::Debug for HttpPdpConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPdpConsumer")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PdpConsumer for HttpPdpConsumer {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn evaluate(&self, request: &XacmlRequest) -> Result<XacmlResponse, DomainError> {
        let body = serde_json::to_vec(request).map_err(DomainError::Serialize)?;
        debug!(bytes = body.len(), "sending XACML request to PDP");
        retry_once(|| self.send(body.clone())).await
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_LOGGED_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_owned(),
    }
}
