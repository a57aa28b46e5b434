//! Command-line parser for the retrovox frontend.

use clap::Parser;

use retrovox_synth::BACKEND_URL_ENV;

/// Command-line interface definition for the retrovox frontend.
///
/// With trailing text, the tool speaks it once and exits; without, it
/// starts an interactive session.
#[derive(Parser)]
#[command(name = "retrovox")]
#[command(about = "Type text, send it to a speech-synthesis backend, play the result")]
#[command(version)]
pub struct Cli {
    /// Base URL of the synthesis backend (empty falls back to the default)
    #[arg(long = "backend-url", env = BACKEND_URL_ENV)]
    pub backend_url: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Text to speak once; omit to start an interactive session
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}
