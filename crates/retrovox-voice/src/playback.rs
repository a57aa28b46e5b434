//! Audio playback module — utterance output via `rodio`.
//!
//! Plays one synthesized utterance at a time. The playback resource (the
//! rodio sink holding the decoded audio) is scoped to a single speak cycle:
//! it is released on explicit stop, on natural completion, and before a new
//! utterance is started.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::SpeakError;

/// Callback invoked when playback finishes naturally (queued audio drained).
pub type PlaybackDoneCallback = Box<dyn FnOnce() + Send + 'static>;

/// Abstraction over an audio output sink for utterance playback.
///
/// Implementations hold at most one live playback resource. Starting a new
/// utterance releases the previous resource first.
///
/// Not a `Send` trait: the rodio output stream is tied to the thread that
/// opened it, and the controller drives the sink from a single logical
/// event loop anyway. Only the drain callback crosses threads.
///
/// # Implementations
/// - [`AudioPlayback`] — rodio output on the local default device
/// - test mocks — record calls, no audio hardware
pub trait PlaybackSink {
    /// Decode `audio` and begin playing it, releasing any previous resource.
    ///
    /// Decode and sink-creation failures are playback-start failures; no
    /// resource is left live when an error is returned.
    fn play(&mut self, audio: Vec<u8>) -> Result<(), SpeakError>;

    /// Stop playback immediately: halt, reset position, release the resource.
    fn stop(&mut self);

    /// Whether audio is currently playing.
    fn is_playing(&self) -> bool;

    /// Register a one-shot callback that fires when the queued audio drains
    /// naturally. An explicit [`stop`](PlaybackSink::stop) suppresses it.
    ///
    /// `callback` must be `Send + 'static` because it is dispatched from a
    /// background watcher thread.
    fn on_playback_complete(&self, callback: PlaybackDoneCallback);
}

/// Audio playback handle for synthesized speech.
///
/// Wraps `rodio` for audio output on the default device. One utterance is
/// live at a time; [`play`](PlaybackSink::play) stops whatever came before.
pub struct AudioPlayback {
    /// rodio output stream (must be kept alive).
    _stream: OutputStream,

    /// Handle used to create sinks.
    stream_handle: OutputStreamHandle,

    /// Current playback sink (if any).
    sink: Option<Arc<Sink>>,

    /// Whether the *current* utterance is playing. A fresh flag is created
    /// per utterance so a stale drain watcher can never observe a newer
    /// utterance's flag and report a spurious completion.
    is_playing: Arc<AtomicBool>,
}

impl AudioPlayback {
    /// Create a new audio playback instance using the default output device.
    pub fn new() -> Result<Self, SpeakError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SpeakError::OutputStreamError(e.to_string()))?;

        tracing::info!("Audio playback initialized on default output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            is_playing: Arc::new(AtomicBool::new(false)),
        })
    }
}

impl PlaybackSink for AudioPlayback {
    fn play(&mut self, audio: Vec<u8>) -> Result<(), SpeakError> {
        // Release any previous utterance first
        self.stop();

        let source = Decoder::new(Cursor::new(audio))
            .map_err(|e| SpeakError::PlaybackStartError(e.to_string()))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SpeakError::OutputStreamError(e.to_string()))?;
        sink.append(source);

        self.is_playing = Arc::new(AtomicBool::new(true));
        self.sink = Some(Arc::new(sink));

        tracing::debug!("Audio playback started");
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            tracing::debug!("Audio playback stopped");
        }
        self.is_playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }

    fn on_playback_complete(&self, callback: PlaybackDoneCallback) {
        let Some(sink) = self.sink.clone() else {
            return;
        };
        if sink.empty() {
            return;
        }

        let is_playing = Arc::clone(&self.is_playing);

        // `Sink` is Send in rodio 0.20+, so it can move into a background
        // thread. `sleep_until_end()` blocks until the queue drains or
        // `stop()` is called (which drops the internal sources, causing
        // sleep_until_end to return immediately).
        std::thread::spawn(move || {
            sink.sleep_until_end();

            // If stop() was called, is_playing is already false and the
            // resource was already released — nothing more to do.
            if !is_playing.swap(false, Ordering::SeqCst) {
                return;
            }

            tracing::debug!("Playback finished naturally");
            callback();
        });
    }
}
