//! Audio output on top of rodio. One mixer owns the output stream for the
//! process lifetime; one-shot clips play on detached sinks so playback
//! never blocks the presentation loop.

mod mixer;

pub use mixer::{ClipId, Mixer};
