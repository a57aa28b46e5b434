//! Remote speech-synthesis client for retrovox.
//!
//! Talks to the synthesis backend over HTTP: one `POST` per utterance with
//! a JSON body, a binary audio payload back. The client implements the
//! [`SpeechSynthesizer`](retrovox_voice::SpeechSynthesizer) port so the
//! speak controller never sees the transport.
//!
//! There is deliberately no retry, backoff, or explicit timeout here —
//! every failed attempt is terminal and reported as-is.

// Allow private types in public type alias - DefaultSynthClient is meant to
// be used through the SpeechSynthesizer trait, not its internal generic
// structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultSynthClient, SynthClient, SynthesisRequest};

// Configuration
pub use config::{BACKEND_URL_ENV, DEFAULT_BASE_URL, SynthConfig};

// Errors
pub use error::{SynthError, SynthResult};
