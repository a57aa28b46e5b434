//! Interactive speak session — the terminal stand-in for the original's
//! text field and speak button.
//!
//! Each entered line replaces the current text and presses the trigger; an
//! empty line presses the trigger with whatever text is already set. While
//! an utterance is playing, pressing Enter stops it. Pending controller
//! events are drained and dispatched before each prompt, so a playback that
//! finished while the user was typing is acknowledged before the next
//! action.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use retrovox_voice::{SpeakController, SpeakEvent, SpeakState};

/// Label of the trigger for the given state — a pure function of the
/// controller state and whether the (trimmed) text is empty.
#[must_use]
pub const fn trigger_label(state: SpeakState, text_is_empty: bool) -> &'static str {
    match state {
        SpeakState::Loading => "... synthesizing",
        SpeakState::Speaking => "[stop]",
        SpeakState::Idle => {
            if text_is_empty {
                "[speak] (type a message)"
            } else {
                "[speak]"
            }
        }
    }
}

/// Whether the trigger would do anything — mirrors the original control's
/// enabled/disabled rule.
#[must_use]
pub const fn trigger_enabled(state: SpeakState, text_is_empty: bool) -> bool {
    match state {
        SpeakState::Loading => false,
        SpeakState::Speaking => true,
        SpeakState::Idle => !text_is_empty,
    }
}

/// Dispatch all pending controller events.
///
/// `SpeakingFinished` is fed back via `finish_playback` so the drain
/// watcher's notification completes the `Speaking → Idle` transition.
/// Errors were already logged by the controller; here they are echoed to
/// the terminal.
fn pump_events(
    controller: &mut SpeakController,
    events: &mut mpsc::UnboundedReceiver<SpeakEvent>,
) {
    while let Ok(event) = events.try_recv() {
        match event {
            SpeakEvent::SpeakingFinished => controller.finish_playback(),
            SpeakEvent::Error(message) => eprintln!("synthesis error: {message}"),
            SpeakEvent::StateChanged(_) | SpeakEvent::SpeakingStarted => {}
        }
    }
}

/// Run the interactive session until Ctrl-C / Ctrl-D.
pub async fn run(
    controller: &mut SpeakController,
    events: &mut mpsc::UnboundedReceiver<SpeakEvent>,
) -> anyhow::Result<()> {
    println!("Type your message and press Enter to speak it.");
    println!("Press Enter again while speaking to stop; Ctrl-D exits.");

    let mut editor = DefaultEditor::new()?;

    loop {
        pump_events(controller, events);

        let text_is_empty = controller.text().trim().is_empty();
        let prompt = format!("{} > ", trigger_label(controller.state(), text_is_empty));

        match editor.readline(&prompt) {
            Ok(line) => {
                // Playback may have drained while the user was typing.
                pump_events(controller, events);

                let line = line.trim();
                if !line.is_empty() {
                    let _ = editor.add_history_entry(line);
                    controller.set_text(line);
                }

                let text_is_empty = controller.text().trim().is_empty();
                if !trigger_enabled(controller.state(), text_is_empty) {
                    println!("(type a message first)");
                    continue;
                }

                // Failures are reported through the event channel and
                // surfaced by the next pump.
                let _ = controller.toggle().await;
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Speak `text` once and wait for playback to finish.
pub async fn speak_once(
    controller: &mut SpeakController,
    events: &mut mpsc::UnboundedReceiver<SpeakEvent>,
    text: &str,
) -> anyhow::Result<()> {
    controller.set_text(text);
    controller.toggle().await?;

    // Empty input is a no-op; nothing to wait for.
    if controller.state() != SpeakState::Speaking {
        return Ok(());
    }

    while let Some(event) = events.recv().await {
        match event {
            SpeakEvent::SpeakingFinished => {
                controller.finish_playback();
                break;
            }
            SpeakEvent::Error(message) => anyhow::bail!("synthesis failed: {message}"),
            SpeakEvent::StateChanged(_) | SpeakEvent::SpeakingStarted => {}
        }
    }

    Ok(())
}
