// crates/logo-check-service/src/http.rs
// ============================================================================
// Module: HTTP Verification Service
// Description: Remote logo verification over HTTP.
// Purpose: Reach the verification service without coupling the trigger to a transport.
// Dependencies: logo-check-core, logo-check-config, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`HttpVerificationService`] posts one request per verification to
//! `{base_url}/v1/records/{record_id}/logo-match` and maps HTTP statuses onto
//! the [`VerificationError`] taxonomy. The record id is percent-encoded as a
//! single path segment and forwarded verbatim in the JSON body.
//! Invariants:
//! - Redirects are not followed.
//! - Response bodies larger than [`MAX_RESPONSE_BYTES`] are rejected while
//!   streaming, before the excess is buffered.
//! - Auth headers are validated once at construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use logo_check_config::ServiceConfig;
use logo_check_core::MatchReport;
use logo_check_core::RecordId;
use logo_check_core::VerificationError;
use logo_check_core::VerificationRequest;
use logo_check_core::VerificationService;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde_json::json;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted response body size in bytes.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Header carrying the activation identifier.
pub const CORRELATION_HEADER: &str = "x-correlation-id";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing the HTTP service.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HttpServiceError {
    /// Base URL cannot be used to build endpoint paths.
    #[error("invalid service base url: {0}")]
    InvalidBaseUrl(String),
    /// Auth token cannot be encoded as a header value.
    #[error("invalid auth token")]
    InvalidAuthToken,
    /// HTTP client could not be built.
    #[error("http client build failed: {0}")]
    ClientBuild(String),
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// HTTP-backed verification service.
///
/// # Invariants
/// - `base_url` can be a base for path segments and has no trailing `/`.
pub struct HttpVerificationService {
    /// Service base URL.
    base_url: Url,
    /// Pre-validated authorization header value.
    authorization: Option<HeaderValue>,
    /// HTTP client configured with timeouts.
    client: Client,
}

impl HttpVerificationService {
    /// Builds a service from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpServiceError`] when the base URL, token, or client is unusable.
    pub fn new(config: &ServiceConfig) -> Result<Self, HttpServiceError> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|err| HttpServiceError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpServiceError::InvalidBaseUrl(
                "url cannot carry path segments".to_string(),
            ));
        }
        let trimmed = base_url.path().trim_end_matches('/').to_string();
        base_url.set_path(&trimmed);
        let authorization = config
            .auth_token
            .as_ref()
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| HttpServiceError::InvalidAuthToken)
            })
            .transpose()?;
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| HttpServiceError::ClientBuild(err.to_string()))?;
        Ok(Self {
            base_url,
            authorization,
            client,
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the endpoint URL for a record.
    fn endpoint(&self, record_id: &RecordId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v1", "records", record_id.as_str(), "logo-match"]);
        }
        url
    }

    /// Builds request headers for one verification call.
    fn build_headers(&self, request: &VerificationRequest<'_>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = &self.authorization {
            headers.insert(reqwest::header::AUTHORIZATION, value.clone());
        }
        headers.insert(CORRELATION_HEADER, HeaderValue::from(request.activation_id().get()));
        headers
    }
}

#[async_trait]
impl VerificationService for HttpVerificationService {
    async fn check_logo_match(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<MatchReport, VerificationError> {
        let record_id = request.record_id();
        let response = self
            .client
            .post(self.endpoint(record_id))
            .headers(self.build_headers(request))
            .json(&json!({ "record_id": record_id.as_str() }))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    VerificationError::Unavailable("verification request timed out".to_string())
                } else {
                    VerificationError::Unavailable(err.to_string())
                }
            })?;
        match response.status() {
            status if status.is_success() => {
                let body = read_response_limited(response).await?;
                let value = serde_json::from_slice(&body)
                    .map_err(|err| VerificationError::InvalidResponse(err.to_string()))?;
                Ok(MatchReport::new(value))
            }
            StatusCode::NOT_FOUND => Err(VerificationError::Rejected("record not found".to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(VerificationError::Rejected("not authorized".to_string()))
            }
            status @ (StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY) => Err(
                VerificationError::Rejected(format!("verification refused: status {status}")),
            ),
            status => Err(VerificationError::Unavailable(format!(
                "verification service error: status {status}"
            ))),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body, stopping as soon as it exceeds [`MAX_RESPONSE_BYTES`].
async fn read_response_limited(mut response: Response) -> Result<Vec<u8>, VerificationError> {
    if response
        .content_length()
        .is_some_and(|len| usize::try_from(len).map_or(true, |len| len > MAX_RESPONSE_BYTES))
    {
        return Err(response_too_large());
    }
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|err| VerificationError::Unavailable(err.to_string()))?
    {
        if body.len().saturating_add(chunk.len()) > MAX_RESPONSE_BYTES {
            return Err(response_too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Returns the error for oversized response bodies.
fn response_too_large() -> VerificationError {
    VerificationError::InvalidResponse(format!(
        "response exceeds {MAX_RESPONSE_BYTES} bytes"
    ))
}
