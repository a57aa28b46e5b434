//! Synthesis client — one POST per utterance, binary audio back.

use async_trait::async_trait;
use serde::Serialize;

use retrovox_voice::{SpeakError, SpeechSynthesizer};

use crate::config::SynthConfig;
use crate::error::SynthResult;
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default synthesis client using the reqwest HTTP backend.
pub type DefaultSynthClient = SynthClient<ReqwestBackend>;

// ============================================================================
// Request body
// ============================================================================

/// JSON body of a synthesis request.
///
/// `normalize_text` is always enabled — the service expands numbers,
/// abbreviations and the like before synthesis, and the client has no
/// reason to opt out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisRequest {
    /// Text to synthesize. May be long; the service handles chunking.
    pub text: String,

    /// Ask the service to normalize the text before synthesis.
    pub normalize_text: bool,
}

impl SynthesisRequest {
    /// Build a request for `text` with normalization enabled.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            normalize_text: true,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the remote synthesis service.
///
/// Generic over an HTTP backend for testing; use [`DefaultSynthClient`]
/// in production code.
pub struct SynthClient<B: HttpBackend> {
    backend: B,
    config: SynthConfig,
}

impl DefaultSynthClient {
    /// Create a new client with the given configuration.
    #[must_use]
    pub fn new(config: SynthConfig) -> Self {
        Self {
            backend: ReqwestBackend::new(),
            config,
        }
    }
}

impl<B: HttpBackend> SynthClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: SynthConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// Synthesize `text` into an encoded audio payload.
    ///
    /// Issues exactly one request; a transport failure or non-success
    /// status is terminal for the attempt.
    pub async fn synthesize_speech(&self, text: &str) -> SynthResult<Vec<u8>> {
        let url = self.config.synthesize_url()?;
        let request = SynthesisRequest::new(text);

        tracing::debug!(url = %url, chars = request.text.len(), "Requesting speech synthesis");

        let audio = self.backend.post_binary(&url, &request).await?;

        tracing::debug!(bytes = audio.len(), "Synthesis response received");
        Ok(audio)
    }
}

// ============================================================================
// SpeechSynthesizer port implementation
// ============================================================================

/// The conversion to [`SpeakError`] lives here, in `retrovox-synth`, so
/// that `retrovox-voice` never needs to import this crate. The dependency
/// arrow stays one-way.
#[async_trait]
impl<B: HttpBackend> SpeechSynthesizer for SynthClient<B> {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeakError> {
        self.synthesize_speech(text)
            .await
            .map_err(|e| SpeakError::SynthesisFailed(e.to_string()))
    }
}
