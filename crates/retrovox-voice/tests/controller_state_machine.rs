//! Integration tests for the `SpeakController` state machine.
//!
//! These tests drive the controller through its state transitions using
//! mock synthesizer/playback collaborators. No real audio hardware or
//! network access is required — the mocks return canned responses instantly.
//!
//! # What is tested
//!
//! - Initial idle state after construction
//! - Empty-text trigger no-op
//! - Successful trigger: `Idle → Loading → Speaking`, playback resource live
//! - Failed synthesis (network error / non-success status): back to `Idle`,
//!   no playback resource created
//! - Playback-start failure: back to `Idle`, resource released
//! - Trigger while `Speaking`: stop, release, back to `Idle`, no request
//! - Trigger while `Loading`: suppressed at the logic layer
//! - Natural drain notification: `Speaking → Idle`, resource released
//! - No resource leak across repeated speak/stop cycles

use std::sync::{Arc, Mutex};

use retrovox_voice::{
    PlaybackDoneCallback, PlaybackSink, SpeakController, SpeakError, SpeakEvent, SpeakState,
    SpeechSynthesizer,
};

// ── Mock collaborators ─────────────────────────────────────────────

/// A minimal synthesizer that records requests and returns a canned result.
struct MockSynth {
    /// `None` means success (a short canned payload); `Some(msg)` fails
    /// every request with that message.
    failure: Option<String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockSynth {
    fn ok() -> (Self, Arc<Mutex<Vec<String>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        (
            Self { failure: None, requests: Arc::clone(&requests) },
            requests,
        )
    }

    fn failing(message: impl Into<String>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        (
            Self { failure: Some(message.into()), requests: Arc::clone(&requests) },
            requests,
        )
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSynth {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeakError> {
        self.requests.lock().unwrap().push(text.to_owned());
        match &self.failure {
            None => Ok(vec![0x52, 0x49, 0x46, 0x46]), // canned payload
            Some(msg) => Err(SpeakError::SynthesisFailed(msg.clone())),
        }
    }
}

/// Observable state of the mock playback sink.
#[derive(Default)]
struct SinkState {
    /// A playback resource currently exists.
    live: bool,
    play_calls: usize,
    stop_calls: usize,
    /// Make the next `play` fail after releasing the previous resource.
    fail_play: bool,
    /// Pending drain callback, if registered.
    callback: Option<PlaybackDoneCallback>,
}

struct MockPlayback {
    state: Arc<Mutex<SinkState>>,
}

impl MockPlayback {
    fn new() -> (Self, Arc<Mutex<SinkState>>) {
        let state = Arc::new(Mutex::new(SinkState::default()));
        (Self { state: Arc::clone(&state) }, state)
    }

    fn failing() -> (Self, Arc<Mutex<SinkState>>) {
        let (sink, state) = Self::new();
        state.lock().unwrap().fail_play = true;
        (sink, state)
    }
}

impl PlaybackSink for MockPlayback {
    fn play(&mut self, _audio: Vec<u8>) -> Result<(), SpeakError> {
        let mut s = self.state.lock().unwrap();
        // Per the trait contract, the previous resource is released first.
        s.live = false;
        if s.fail_play {
            return Err(SpeakError::PlaybackStartError("decode failed".to_owned()));
        }
        s.play_calls += 1;
        s.live = true;
        Ok(())
    }

    fn stop(&mut self) {
        let mut s = self.state.lock().unwrap();
        s.stop_calls += 1;
        s.live = false;
        s.callback = None;
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().live
    }

    fn on_playback_complete(&self, callback: PlaybackDoneCallback) {
        self.state.lock().unwrap().callback = Some(callback);
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Drain all pending events from the event receiver and return them.
fn drain_events(rx: &mut tokio::sync::mpsc::UnboundedReceiver<SpeakEvent>) -> Vec<SpeakEvent> {
    let mut events = Vec::new();
    while let Ok(e) = rx.try_recv() {
        events.push(e);
    }
    events
}

/// Collect only the `SpeakState` values from `StateChanged` events.
fn states_from(events: &[SpeakEvent]) -> Vec<SpeakState> {
    events
        .iter()
        .filter_map(|e| {
            if let SpeakEvent::StateChanged(s) = e {
                Some(*s)
            } else {
                None
            }
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────

#[test]
fn initial_state_is_idle() {
    let (synth, _) = MockSynth::ok();
    let (sink, _) = MockPlayback::new();
    let (controller, _rx) = SpeakController::new(Box::new(synth), Box::new(sink));
    assert_eq!(controller.state(), SpeakState::Idle);
    assert!(!controller.is_speaking());
}

#[tokio::test]
async fn empty_text_trigger_sends_no_request() {
    let (synth, requests) = MockSynth::ok();
    let (sink, _) = MockPlayback::new();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    controller.toggle().await.unwrap();

    assert_eq!(controller.state(), SpeakState::Idle);
    assert!(requests.lock().unwrap().is_empty(), "no request expected");
    assert!(drain_events(&mut rx).is_empty(), "no events expected");
}

#[tokio::test]
async fn successful_trigger_reaches_speaking() {
    let (synth, requests) = MockSynth::ok();
    let (sink, sink_state) = MockPlayback::new();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    controller.set_text("Hello");
    controller.toggle().await.unwrap();

    assert_eq!(controller.state(), SpeakState::Speaking);
    assert_eq!(requests.lock().unwrap().as_slice(), ["Hello"]);
    assert!(sink_state.lock().unwrap().live, "playback resource should be live");

    let events = drain_events(&mut rx);
    assert_eq!(
        states_from(&events),
        [SpeakState::Loading, SpeakState::Speaking],
        "expected Idle → Loading → Speaking transitions"
    );
    assert!(
        events.iter().any(|e| matches!(e, SpeakEvent::SpeakingStarted)),
        "expected SpeakingStarted, got {events:?}"
    );
}

#[tokio::test]
async fn failed_synthesis_returns_to_idle() {
    let (synth, _) = MockSynth::failing("Synthesis request failed with status 500");
    let (sink, sink_state) = MockPlayback::new();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    controller.set_text("Test");
    let err = controller.toggle().await.unwrap_err();
    assert!(matches!(err, SpeakError::SynthesisFailed(_)), "got {err:?}");

    assert_eq!(controller.state(), SpeakState::Idle);
    let s = sink_state.lock().unwrap();
    assert_eq!(s.play_calls, 0, "no playback resource should be created");
    assert!(!s.live);
    drop(s);

    let events = drain_events(&mut rx);
    assert_eq!(states_from(&events), [SpeakState::Loading, SpeakState::Idle]);
    assert!(
        events.iter().any(|e| matches!(e, SpeakEvent::Error(_))),
        "expected an Error event, got {events:?}"
    );
}

#[tokio::test]
async fn playback_start_failure_returns_to_idle() {
    let (synth, requests) = MockSynth::ok();
    let (sink, sink_state) = MockPlayback::failing();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    controller.set_text("Hello");
    let err = controller.toggle().await.unwrap_err();
    assert!(matches!(err, SpeakError::PlaybackStartError(_)), "got {err:?}");

    assert_eq!(controller.state(), SpeakState::Idle);
    assert_eq!(requests.lock().unwrap().len(), 1, "the request itself succeeded");
    assert!(!sink_state.lock().unwrap().live, "no resource left live");

    let events = drain_events(&mut rx);
    assert_eq!(states_from(&events), [SpeakState::Loading, SpeakState::Idle]);
}

#[tokio::test]
async fn trigger_while_speaking_stops_and_releases() {
    let (synth, requests) = MockSynth::ok();
    let (sink, sink_state) = MockPlayback::new();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    controller.set_text("Hello");
    controller.toggle().await.unwrap();
    assert_eq!(controller.state(), SpeakState::Speaking);
    let _ = drain_events(&mut rx);

    // Second press: stop, regardless of whether audio was still playing.
    controller.toggle().await.unwrap();

    assert_eq!(controller.state(), SpeakState::Idle);
    assert_eq!(requests.lock().unwrap().len(), 1, "stop must not issue a request");
    let s = sink_state.lock().unwrap();
    assert!(!s.live, "playback resource must be released");
    assert!(s.stop_calls >= 1);
    drop(s);

    let events = drain_events(&mut rx);
    assert!(
        events.iter().any(|e| matches!(e, SpeakEvent::SpeakingFinished)),
        "expected SpeakingFinished, got {events:?}"
    );
    assert_eq!(states_from(&events), [SpeakState::Idle]);
}

#[tokio::test]
async fn trigger_while_loading_is_suppressed() {
    let (synth, requests) = MockSynth::ok();
    let (sink, _) = MockPlayback::new();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    controller.set_text("Hello");
    controller.set_state_for_test(SpeakState::Loading);

    controller.toggle().await.unwrap();

    assert_eq!(controller.state(), SpeakState::Loading);
    assert!(requests.lock().unwrap().is_empty(), "re-entrant trigger must not request");
    assert!(drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn natural_completion_returns_to_idle() {
    let (synth, _) = MockSynth::ok();
    let (sink, sink_state) = MockPlayback::new();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    controller.set_text("Hello");
    controller.toggle().await.unwrap();
    let _ = drain_events(&mut rx);

    // Fire the drain watcher's callback, as the sink would on natural end.
    let callback = sink_state.lock().unwrap().callback.take().expect("callback registered");
    callback();

    let events = drain_events(&mut rx);
    assert!(
        events.iter().any(|e| matches!(e, SpeakEvent::SpeakingFinished)),
        "expected SpeakingFinished from the drain watcher, got {events:?}"
    );

    // The frontend feeds the notification back into the controller.
    controller.finish_playback();

    assert_eq!(controller.state(), SpeakState::Idle);
    assert!(!sink_state.lock().unwrap().live, "drained resource must be released");
}

#[tokio::test]
async fn repeated_cycles_do_not_leak_resources() {
    let (synth, requests) = MockSynth::ok();
    let (sink, sink_state) = MockPlayback::new();
    let (mut controller, mut rx) = SpeakController::new(Box::new(synth), Box::new(sink));

    for cycle in 0..3 {
        controller.set_text(format!("utterance {cycle}"));
        controller.toggle().await.unwrap();
        assert_eq!(controller.state(), SpeakState::Speaking);
        assert!(sink_state.lock().unwrap().live);

        controller.toggle().await.unwrap();
        assert_eq!(controller.state(), SpeakState::Idle);
        assert!(!sink_state.lock().unwrap().live, "cycle {cycle} leaked a resource");
    }

    assert_eq!(requests.lock().unwrap().len(), 3);
    assert_eq!(sink_state.lock().unwrap().play_calls, 3);
    let _ = drain_events(&mut rx);
}
