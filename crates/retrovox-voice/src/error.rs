//! Speak controller error types.

/// Errors that can occur while synthesizing or playing speech.
#[derive(Debug, thiserror::Error)]
pub enum SpeakError {
    /// Failed to open the audio output stream.
    #[error("Failed to open audio output stream: {0}")]
    OutputStreamError(String),

    /// Failed to decode the synthesized audio or start playing it.
    #[error("Failed to start playback: {0}")]
    PlaybackStartError(String),

    /// The synthesis collaborator failed — transport error or an
    /// unsuccessful response status. Terminal for this attempt.
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),
}
