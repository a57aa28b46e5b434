//! Speak controller for retrovox — the synthesize-and-play core.
//!
//! This crate owns the tri-state controller that turns a line of text into
//! audible speech via a remote synthesis collaborator:
//!
//! - [`controller`] — the `Idle → Loading → Speaking` state machine and its
//!   single user-triggerable action.
//! - [`playback`] — the [`PlaybackSink`] abstraction plus the rodio-backed
//!   [`AudioPlayback`] implementation.
//! - [`synth`] — the [`SpeechSynthesizer`] port through which the controller
//!   sees the remote synthesis service.
//! - [`error`] — crate error types.
//!
//! Frontends construct a [`SpeakController`], feed it text, press the
//! trigger, and consume [`SpeakEvent`]s from the returned channel.

pub mod controller;
pub mod error;
pub mod playback;
pub mod synth;

// Re-export key types for convenience
pub use controller::{SpeakController, SpeakEvent, SpeakState};
pub use error::SpeakError;
pub use playback::{AudioPlayback, PlaybackDoneCallback, PlaybackSink};
pub use synth::SpeechSynthesizer;
