//! Terminal frontend for retrovox.
//!
//! The binary in `main.rs` is the composition root: it wires the synthesis
//! client and the local audio playback into a
//! [`SpeakController`](retrovox_voice::SpeakController) and hands control
//! to either the interactive [`session`] loop or the one-shot speak path.

pub mod parser;
pub mod session;

pub use parser::Cli;
