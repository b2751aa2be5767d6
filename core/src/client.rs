//! Request building and response decoding against a single controller.
//!
//! # Design
//! `ControllerClient` holds the controller's base URL, the basic-auth header
//! and a `Transport`. It carries no mutable state between calls, so one client
//! can serve concurrent callers as long as its transport can. Paths are given
//! relative to the base URL (`controller/rest/...`), which keeps controllers
//! mounted under a sub-path working.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use url::Url;

use crate::applications::ApplicationService;
use crate::config::ControllerConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// How much of an unexpected body is kept in error messages.
const CONTENT_SNIPPET_LEN: usize = 120;

/// Synchronous client for one AppDynamics controller.
#[derive(Clone)]
pub struct ControllerClient<T> {
    base_url: Url,
    authorization: Option<String>,
    transport: T,
}

impl ControllerClient<UreqTransport> {
    /// Build a client over a `ureq` transport using the configured credentials.
    pub fn from_config(config: &ControllerConfig) -> Result<Self, ApiError> {
        let client = Self::new(&config.base_url, UreqTransport::new(config.timeout()))?;
        Ok(client.with_basic_auth(&config.username, &config.account, &config.password))
    }
}

impl<T: Transport> ControllerClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self, ApiError> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let url = Url::parse(&normalized)
            .map_err(|e| ApiError::RequestBuild(format!("invalid base url {base_url:?}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::RequestBuild(format!(
                "base url {base_url:?} cannot hold a path"
            )));
        }
        Ok(Self {
            base_url: url,
            authorization: None,
            transport,
        })
    }

    /// Authenticate every request as `username@account`.
    pub fn with_basic_auth(mut self, username: &str, account: &str, password: &str) -> Self {
        let credentials = STANDARD.encode(format!("{username}@{account}:{password}"));
        self.authorization = Some(format!("Basic {credentials}"));
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Application accessor bound to this client.
    pub fn applications(&self) -> ApplicationService<'_, T> {
        ApplicationService::new(self)
    }

    /// Build a request for `path`, relative to the controller base URL.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpRequest, ApiError> {
        if Url::parse(path).is_ok() {
            return Err(ApiError::RequestBuild(format!(
                "expected a path relative to the controller, got {path:?}"
            )));
        }
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::RequestBuild(format!("{path:?}: {e}")))?;

        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(authorization) = &self.authorization {
            headers.push(("authorization".to_string(), authorization.clone()));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method,
            path: url.into(),
            headers,
            body,
        })
    }

    /// Run the round trip without interpreting the response.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.path, "controller request");
        let response = self.transport.execute(request)?;
        tracing::trace!(
            status = response.status,
            bytes = response.body.len(),
            "controller response"
        );
        Ok(response)
    }

    /// Run the round trip and decode a public REST response.
    pub fn execute<D: DeserializeOwned>(&self, request: &HttpRequest) -> Result<D, ApiError> {
        decode_json(&self.send(request)?)
    }

    /// Run the round trip and decode a RESTUI response.
    pub fn execute_restui<D: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<D, ApiError> {
        decode_restui(&self.send(request)?)
    }
}

impl<T> fmt::Debug for ControllerClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.authorization.is_some())
            .finish_non_exhaustive()
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 401 {
        return Err(ApiError::Unauthorized);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

pub(crate) fn decode_json<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// RESTUI answers an unaccepted session with the HTML login page and a 200,
/// so anything that is not a JSON document is reported separately.
pub(crate) fn decode_restui<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    check_status(response)?;
    let body = response.body.trim_start();
    if !(body.starts_with('{') || body.starts_with('[')) {
        return Err(ApiError::UnexpectedContent(
            body.chars().take(CONTENT_SNIPPET_LEN).collect(),
        ));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
