//! The end-of-timer sound.

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub trait AudioCue {
    fn play(&self) -> Result<()>;
    fn stop(&self);
    fn is_playing(&self) -> bool;
}

static TIMER_AUDIO: OnceLock<TimerAudio> = OnceLock::new();

/// Process-wide player that rings the terminal bell.
pub struct TimerAudio {
    enabled: AtomicBool,
    playing: AtomicBool,
}

impl TimerAudio {
    pub fn instance() -> &'static TimerAudio {
        TIMER_AUDIO.get_or_init(|| TimerAudio {
            enabled: AtomicBool::new(true),
            playing: AtomicBool::new(false),
        })
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

impl AudioCue for TimerAudio {
    fn play(&self) -> Result<()> {
        if !self.enabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.playing.store(true, Ordering::SeqCst);
        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .context("Failed to ring terminal bell")
    }

    fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

/// Player that makes no sound but counts plays.
#[derive(Default)]
pub struct SilentAudio {
    plays: AtomicUsize,
    playing: AtomicBool,
}

impl SilentAudio {
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AudioCue for SilentAudio {
    fn play(&self) -> Result<()> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}
