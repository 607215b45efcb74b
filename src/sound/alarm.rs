//! Phase-transition alarm with graceful degradation.
//!
//! The alarm tries, in order: the primary cue file, the generated fallback
//! tone, and the terminal bell. If every step fails the alarm is silent.
//! Failures are logged and never returned, so the countdown is never held
//! up by audio.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::player::RodioSoundPlayer;
use super::source::{CuePattern, SoundSource};
use super::SoundPlayer;

/// ASCII BEL, the terminal's default beep.
const BELL: &[u8] = b"\x07";

/// Which step of the alarm chain produced sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    /// The configured cue file played
    Primary,
    /// The generated tone played instead
    FallbackTone,
    /// No audio device; the terminal bell was rung
    Bell,
    /// Nothing could be played
    Silent,
}

impl fmt::Display for AlarmOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmOutcome::Primary => write!(f, "primary cue"),
            AlarmOutcome::FallbackTone => write!(f, "fallback tone"),
            AlarmOutcome::Bell => write!(f, "terminal bell"),
            AlarmOutcome::Silent => write!(f, "silence"),
        }
    }
}

/// Plays the alarm cue through an optional sound player.
///
/// `player` is `None` when no audio device could be opened.
pub struct AlarmPlayer<P: SoundPlayer = RodioSoundPlayer> {
    player: Option<P>,
    primary: SoundSource,
    fallback: SoundSource,
    pattern: CuePattern,
    bell_enabled: bool,
}

impl<P: SoundPlayer> AlarmPlayer<P> {
    /// Creates an alarm that plays `cue_file` three times.
    pub fn new(player: Option<P>, cue_file: impl Into<PathBuf>) -> Self {
        Self {
            player,
            primary: SoundSource::file(cue_file),
            fallback: SoundSource::fallback_tone(),
            pattern: CuePattern::alarm(),
            bell_enabled: true,
        }
    }

    /// Enables or disables the terminal bell step.
    pub fn with_bell(mut self, enabled: bool) -> Self {
        self.bell_enabled = enabled;
        self
    }

    /// Replaces the playback pattern of the primary cue.
    pub fn with_pattern(mut self, pattern: CuePattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Returns the sound player, if an audio device is available.
    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    /// Returns true if alarms are currently muted.
    pub fn is_muted(&self) -> bool {
        match &self.player {
            Some(player) => player.is_disabled(),
            None => !self.bell_enabled,
        }
    }

    /// Toggles mute and returns the new muted flag.
    pub fn toggle_mute(&mut self) -> bool {
        match &self.player {
            Some(player) if player.is_disabled() => player.enable(),
            Some(player) => player.disable(),
            None => self.bell_enabled = !self.bell_enabled,
        }
        self.is_muted()
    }

    /// Plays the alarm, degrading step by step on failure.
    pub fn play_alarm(&self) -> AlarmOutcome {
        let player = self.player.as_ref().filter(|player| {
            let available = player.is_available();
            if !available {
                warn!("audio device unavailable, skipping sound cues");
            }
            available
        });

        if let Some(player) = player {
            if player.is_disabled() {
                debug!("alarm muted");
                return AlarmOutcome::Silent;
            }

            match player.play(&self.primary, self.pattern) {
                Ok(()) => return AlarmOutcome::Primary,
                Err(e) if e.should_fallback() => {
                    warn!(
                        cue = %self.primary.name(),
                        "alarm cue failed, using fallback tone: {} ({})",
                        e,
                        e.suggestion()
                    );
                    match player.play(&self.fallback, self.pattern) {
                        Ok(()) => return AlarmOutcome::FallbackTone,
                        Err(e) => warn!("fallback tone failed: {}", e),
                    }
                }
                Err(e) => warn!("audio device failed: {} ({})", e, e.suggestion()),
            }
        }

        if self.bell_enabled {
            match ring_bell() {
                Ok(()) => return AlarmOutcome::Bell,
                Err(e) => warn!("terminal bell failed: {}", e),
            }
        }

        debug!("alarm silent");
        AlarmOutcome::Silent
    }
}

impl<P: SoundPlayer> fmt::Debug for AlarmPlayer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlarmPlayer")
            .field("has_player", &self.player.is_some())
            .field("primary", &self.primary)
            .field("pattern", &self.pattern)
            .field("bell_enabled", &self.bell_enabled)
            .finish()
    }
}

fn ring_bell() -> std::io::Result<()> {
    let mut stderr = std::io::stderr().lock();
    stderr.write_all(BELL)?;
    stderr.flush()
}
