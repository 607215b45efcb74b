//! Sound playback system for the Pomodoro Timer.
//!
//! This module provides the audible alarm at each phase transition:
//!
//! - Cue file playback (the primary alarm)
//! - A generated fallback tone
//! - Non-blocking audio playback
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   AlarmPlayer    │ ← Fallback chain, never fails
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundPlayer    │────▶│  Cue file        │
//! │   (rodio)        │     ├──────────────────┤
//! │                  │────▶│  Generated tone  │
//! └──────────────────┘     └──────────────────┘
//!          │ no device
//!          ▼
//!    terminal bell  →  silence
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomodoro_timer::sound::{try_create_player, AlarmPlayer};
//!
//! let alarm = AlarmPlayer::new(try_create_player(false), "conga.wav");
//! let outcome = alarm.play_alarm();
//! println!("alarm played via {outcome}");
//! ```

mod alarm;
mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use alarm::{AlarmOutcome, AlarmPlayer};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{
    CuePattern, SoundSource, ALARM_GAP, ALARM_REPEATS, DEFAULT_CUE_FILE, FALLBACK_TONE_DURATION,
    FALLBACK_TONE_HZ,
};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound source following `pattern`.
    ///
    /// This method must be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource, pattern: CuePattern) -> Result<(), SoundError>;

    /// Returns true if the audio device can be used.
    fn is_available(&self) -> bool;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource, pattern: CuePattern) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source, pattern)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<(SoundSource, CuePattern)>>,
    disabled: AtomicBool,
    unavailable: AtomicBool,
    fail_files: AtomicBool,
    fail_tones: AtomicBool,
}

impl MockSoundPlayer {
    /// Creates an available, enabled mock that plays everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a lost or present audio device.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Makes every file cue fail with `FileNotFound`.
    pub fn set_fail_files(&self, fail: bool) {
        self.fail_files.store(fail, Ordering::SeqCst);
    }

    /// Makes every tone cue fail with `PlaybackError`.
    pub fn set_fail_tones(&self, fail: bool) {
        self.fail_tones.store(fail, Ordering::SeqCst);
    }

    /// Number of recorded plays.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// Recorded plays, oldest first.
    #[must_use]
    pub fn get_play_calls(&self) -> Vec<(SoundSource, CuePattern)> {
        self.lock_calls().clone()
    }

    /// Forgets all recorded plays.
    pub fn clear_calls(&self) {
        self.lock_calls().clear();
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(SoundSource, CuePattern)>> {
        self.play_calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource, pattern: CuePattern) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        match source {
            SoundSource::File { path } if self.fail_files.load(Ordering::SeqCst) => {
                return Err(SoundError::FileNotFound(path.display().to_string()));
            }
            SoundSource::Tone { .. } if self.fail_tones.load(Ordering::SeqCst) => {
                return Err(SoundError::PlaybackError("Mock failure".to_string()));
            }
            _ => {}
        }
        self.lock_calls().push((source.clone(), pattern));
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}
