//! Speak controller — the synthesize-and-play state machine.
//!
//! The controller drives one utterance at a time through three states:
//!
//! ```text
//!   Idle --(trigger, text non-empty)--> Loading --(audio received,
//!        playback started)--> Speaking --(trigger | drain | error)--> Idle
//! ```
//!
//! A single trigger action toggles between starting synthesis and stopping
//! playback. Exactly one synthesis request is outstanding at a time: the
//! trigger is a no-op while `Loading`, independent of whatever disabling
//! the frontend applies to its own controls.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::SpeakError;
use crate::playback::PlaybackSink;
use crate::synth::SpeechSynthesizer;

// ── Speak state machine ────────────────────────────────────────────

/// Current state of the speak controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeakState {
    /// Nothing in flight — waiting for the user to press the trigger.
    Idle,

    /// A synthesis request is outstanding; the trigger is suppressed.
    Loading,

    /// Playing back the synthesized utterance.
    Speaking,
}

// ── Events emitted by the controller ───────────────────────────────

/// Events emitted by the controller to the frontend layer.
#[derive(Debug, Clone)]
pub enum SpeakEvent {
    /// Controller state changed.
    StateChanged(SpeakState),

    /// Playback of an utterance started.
    SpeakingStarted,

    /// Playback finished — explicitly stopped, or drained naturally
    /// (in the latter case the frontend feeds this back via
    /// [`SpeakController::finish_playback`]).
    SpeakingFinished,

    /// A synthesis or playback attempt failed.
    Error(String),
}

// ── Speak controller ───────────────────────────────────────────────

/// The synthesize-and-play orchestrator.
///
/// Owns the current `text`, the tri-state [`SpeakState`], and the playback
/// collaborator. Emits [`SpeakEvent`]s via a channel for the frontend to
/// consume. Constructed once per session; there are no globals.
pub struct SpeakController {
    /// Current state.
    state: SpeakState,

    /// Latest user input. May be empty.
    text: String,

    /// Remote synthesis collaborator.
    synth: Box<dyn SpeechSynthesizer>,

    /// Audio output collaborator — holds the per-utterance resource.
    playback: Box<dyn PlaybackSink>,

    /// Event sender channel.
    event_tx: mpsc::UnboundedSender<SpeakEvent>,
}

impl SpeakController {
    /// Create a new controller wired to the given collaborators.
    ///
    /// Returns the controller and a receiver for [`SpeakEvent`]s.
    #[must_use]
    pub fn new(
        synth: Box<dyn SpeechSynthesizer>,
        playback: Box<dyn PlaybackSink>,
    ) -> (Self, mpsc::UnboundedReceiver<SpeakEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Self {
            state: SpeakState::Idle,
            text: String::new(),
            synth,
            playback,
            event_tx,
        };

        (controller, event_rx)
    }

    /// Get the current controller state.
    #[must_use]
    pub const fn state(&self) -> SpeakState {
        self.state
    }

    /// Get the current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the current text with the latest user input.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether an utterance is currently being spoken.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.state == SpeakState::Speaking
    }

    // ── Trigger action ─────────────────────────────────────────────

    /// Press the trigger: start synthesis, or stop active playback.
    ///
    /// - `Speaking`: stops playback immediately, releases the resource,
    ///   returns to `Idle`. No network call.
    /// - `Loading`: no-op — re-entrant triggers are suppressed at the
    ///   logic layer, not just by frontend disablement.
    /// - `Idle`: no-op when the trimmed text is empty; otherwise issues
    ///   one synthesis request and starts playback. Any failure (network,
    ///   non-success status, playback start) is terminal for the attempt:
    ///   it is logged, an [`SpeakEvent::Error`] is emitted, and the state
    ///   returns to `Idle`. No retry.
    pub async fn toggle(&mut self) -> Result<(), SpeakError> {
        match self.state {
            SpeakState::Speaking => {
                self.stop_speaking();
                Ok(())
            }
            SpeakState::Loading => {
                tracing::debug!("Trigger ignored while a synthesis request is in flight");
                Ok(())
            }
            SpeakState::Idle => {
                if self.text.trim().is_empty() {
                    tracing::debug!("Trigger ignored: no text to speak");
                    return Ok(());
                }
                self.speak().await
            }
        }
    }

    /// Stop any active playback immediately and return to `Idle`.
    pub fn stop_speaking(&mut self) {
        self.playback.stop();
        self.emit(SpeakEvent::SpeakingFinished);
        self.set_state(SpeakState::Idle);
    }

    /// Acknowledge natural playback completion.
    ///
    /// Called by the frontend when the drain watcher's
    /// [`SpeakEvent::SpeakingFinished`] arrives. Releases the drained
    /// resource and transitions `Speaking → Idle`. A no-op in any other
    /// state, so stale notifications are harmless.
    pub fn finish_playback(&mut self) {
        if self.state != SpeakState::Speaking {
            return;
        }
        self.playback.stop();
        self.set_state(SpeakState::Idle);
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Run one synthesis attempt. `Loading` is always left once the
    /// attempt settles, on success and failure alike.
    async fn speak(&mut self) -> Result<(), SpeakError> {
        self.set_state(SpeakState::Loading);

        match self.synthesize_and_play().await {
            Ok(()) => {
                self.set_state(SpeakState::Speaking);
                self.emit(SpeakEvent::SpeakingStarted);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Speech synthesis attempt failed");
                self.emit(SpeakEvent::Error(e.to_string()));
                self.set_state(SpeakState::Idle);
                Err(e)
            }
        }
    }

    /// Request audio for the current text and hand it to the playback sink.
    async fn synthesize_and_play(&mut self) -> Result<(), SpeakError> {
        let audio = self.synth.synthesize(&self.text).await?;
        tracing::debug!(bytes = audio.len(), "Received synthesized audio");

        self.playback.play(audio)?;

        // The watcher only reports natural completion; an explicit stop
        // suppresses the callback inside the sink.
        let event_tx = self.event_tx.clone();
        self.playback.on_playback_complete(Box::new(move || {
            let _ = event_tx.send(SpeakEvent::SpeakingFinished);
        }));

        Ok(())
    }

    /// Transition to a new state and emit a state-change event.
    fn set_state(&mut self, new_state: SpeakState) {
        if self.state != new_state {
            tracing::debug!(old = ?self.state, new = ?new_state, "Speak state transition");
            self.state = new_state;
            self.emit(SpeakEvent::StateChanged(new_state));
        }
    }

    /// Emit an event (best-effort — if the receiver is dropped, log and move on).
    fn emit(&self, event: SpeakEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Speak event receiver dropped");
        }
    }

    // ── Test support ───────────────────────────────────────────────

    /// Force the controller into a state without running a transition.
    ///
    /// Exists so integration tests can exercise guards (e.g. the `Loading`
    /// no-op) that are otherwise unreachable from single-threaded test code.
    #[doc(hidden)]
    pub fn set_state_for_test(&mut self, state: SpeakState) {
        self.state = state;
    }
}

impl Drop for SpeakController {
    fn drop(&mut self) {
        self.playback.stop();
    }
}
