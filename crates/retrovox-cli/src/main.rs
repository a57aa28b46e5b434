//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together: the
//! reqwest-backed synthesis client and the rodio playback sink are
//! constructed here and injected into the speak controller. Everything
//! below this file works against the controller's ports.

use clap::Parser;

use retrovox_cli::{Cli, session};
use retrovox_synth::{DefaultSynthClient, SynthConfig};
use retrovox_voice::{AudioPlayback, SpeakController};

fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter("retrovox=debug,retrovox_cli=debug,retrovox_voice=debug,retrovox_synth=debug")
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments (the backend-url flag is env-aware)
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    let config = SynthConfig::resolve(cli.backend_url)?;
    tracing::info!(base_url = %config.base_url, "Using synthesis backend");

    let synthesizer = DefaultSynthClient::new(config);
    let playback = AudioPlayback::new()?;
    let (mut controller, mut events) =
        SpeakController::new(Box::new(synthesizer), Box::new(playback));

    if cli.text.is_empty() {
        session::run(&mut controller, &mut events).await
    } else {
        let text = cli.text.join(" ");
        session::speak_once(&mut controller, &mut events, &text).await
    }
}
