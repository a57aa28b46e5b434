//! HTTP backend abstraction for the synthesis service.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest. There is intentionally no retry logic and no explicit
//! timeout: every failure is terminal for the attempt, and the call
//! relies on the transport's defaults.

use async_trait::async_trait;
use url::Url;

use crate::client::SynthesisRequest;
use crate::error::{SynthError, SynthResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can POST a synthesis request and return the
/// raw binary response payload.
///
/// This is an implementation detail — external code should use
/// [`SynthClient`](crate::client::SynthClient).
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` as JSON to `url` and return the response bytes.
    ///
    /// Any 2xx status is a success; any other status is an error.
    async fn post_binary(&self, url: &Url, body: &SynthesisRequest) -> SynthResult<Vec<u8>>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_binary(&self, url: &Url, body: &SynthesisRequest) -> SynthResult<Vec<u8>> {
        let response = self.client.post(url.as_str()).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthError::RequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
