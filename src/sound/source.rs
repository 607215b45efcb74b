//! Sound sources and playback patterns.
//!
//! A cue is either an audio file on disk or a tone generated at runtime.
//! The tone needs no resources and serves as the fallback when the file
//! cannot be played.

use std::path::PathBuf;
use std::time::Duration;

/// Default primary cue, resolved relative to the working directory.
pub const DEFAULT_CUE_FILE: &str = "conga.wav";

/// Frequency of the fallback tone.
pub const FALLBACK_TONE_HZ: f32 = 880.0;

/// Length of one fallback tone beep.
pub const FALLBACK_TONE_DURATION: Duration = Duration::from_millis(200);

/// Number of times the alarm cue is played.
pub const ALARM_REPEATS: u32 = 3;

/// Silence between two alarm repetitions.
pub const ALARM_GAP: Duration = Duration::from_millis(200);

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundSource {
    /// An audio file (wav, mp3, flac, ogg).
    File {
        /// The path to the sound file.
        path: PathBuf,
    },
    /// A generated sine tone.
    Tone {
        /// Tone frequency in Hz.
        frequency_hz: f32,
        /// Length of one beep.
        duration: Duration,
    },
}

impl SoundSource {
    /// Creates a file sound source.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a tone sound source.
    #[must_use]
    pub fn tone(frequency_hz: f32, duration: Duration) -> Self {
        Self::Tone {
            frequency_hz,
            duration,
        }
    }

    /// The built-in fallback beep.
    #[must_use]
    pub fn fallback_tone() -> Self {
        Self::tone(FALLBACK_TONE_HZ, FALLBACK_TONE_DURATION)
    }

    /// Returns a short human-readable name for logging.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::File { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Tone { frequency_hz, .. } => format!("tone {frequency_hz}Hz"),
        }
    }
}

/// How many times a cue is played and how far apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuePattern {
    /// Number of plays (at least one is always made)
    pub repeats: u32,
    /// Silence inserted before every play but the first
    pub gap: Duration,
}

impl CuePattern {
    /// Play once.
    #[must_use]
    pub const fn once() -> Self {
        Self {
            repeats: 1,
            gap: Duration::ZERO,
        }
    }

    /// The phase-transition alarm pattern.
    #[must_use]
    pub const fn alarm() -> Self {
        Self {
            repeats: ALARM_REPEATS,
            gap: ALARM_GAP,
        }
    }

    /// Total wall-clock length of the pattern for a cue of `cue_length`.
    #[must_use]
    pub fn total_duration(&self, cue_length: Duration) -> Duration {
        let plays = self.repeats.max(1);
        cue_length * plays + self.gap * (plays - 1)
    }
}

impl Default for CuePattern {
    fn default() -> Self {
        Self::once()
    }
}
