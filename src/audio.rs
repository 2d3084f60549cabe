//! Fire-and-forget sound cues.
//!
//! Playback failure must never affect the simulation, so sinks take no
//! Result anywhere and swallow I/O errors.

use std::io::{stderr, Write};

/// Gameplay moments worth a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    GameOver,
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Silence, for `--mute` and for tests
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell. The closest thing to audio a TUI has without
/// an asset pipeline.
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, _cue: SoundCue) {
        let mut out = stderr();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}
