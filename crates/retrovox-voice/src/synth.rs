//! Synthesizer port — the controller's view of the synthesis collaborator.
//!
//! The [`SpeakController`](crate::controller::SpeakController) operates on a
//! trait object (`Box<dyn SpeechSynthesizer>`) so that the remote HTTP
//! client can be swapped for a mock without touching the state machine.

use crate::error::SpeakError;

/// Backend-agnostic speech synthesizer.
///
/// Implementations must be `Send + Sync` so the controller can be driven
/// from an async context. The `synthesize` method is async (via
/// [`async_trait`]) because the production implementation performs a
/// network round-trip.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` into an encoded audio payload.
    ///
    /// # Returns
    /// The raw bytes of the audio response. The format is opaque to the
    /// controller; the playback sink decodes it.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeakError>;
}
