//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, PlayError, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{CuePattern, SoundSource};

/// Amplitude applied to the generated tone.
const TONE_VOLUME: f32 = 0.25;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; every cue gets its own detached sink and keeps
/// playing after `play` returns.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Plays a sound source following `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sound file cannot be read
    /// - The audio format cannot be decoded
    /// - No sink can be created on the output stream
    pub fn play(&self, source: &SoundSource, pattern: CuePattern) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::File { path } => {
                debug!("Playing sound file: {}", path.display());
                self.play_file(path, pattern)
            }
            SoundSource::Tone {
                frequency_hz,
                duration,
            } => {
                debug!(
                    length = ?pattern.total_duration(*duration),
                    "Playing tone: {}Hz",
                    frequency_hz
                );
                self.play_tone(*frequency_hz, *duration, pattern)
            }
        }
    }

    /// Reads and decodes a sound file, then queues it `pattern.repeats` times.
    fn play_file(&self, path: &Path, pattern: CuePattern) -> Result<(), SoundError> {
        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?
            .into();

        // Decode every copy before the sink exists so a corrupt file plays nothing.
        let decoders = (0..pattern.repeats.max(1))
            .map(|_| Decoder::new(Cursor::new(Arc::clone(&bytes))))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SoundError::DecodeError(format!("{}: {}", path.display(), e)))?;

        let sink = self.new_sink()?;
        for (i, decoder) in decoders.into_iter().enumerate() {
            sink.append(decoder.delay(gap_before(i, pattern)));
        }
        Self::detach(sink, pattern);
        Ok(())
    }

    /// Generates a sine tone and queues it `pattern.repeats` times.
    fn play_tone(
        &self,
        frequency_hz: f32,
        duration: Duration,
        pattern: CuePattern,
    ) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        for i in 0..pattern.repeats.max(1) {
            let tone = SineWave::new(frequency_hz)
                .take_duration(duration)
                .amplify(TONE_VOLUME)
                .delay(gap_before(i as usize, pattern));
            sink.append(tone);
        }
        Self::detach(sink, pattern);
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| match e {
            PlayError::NoDevice => SoundError::StreamError(e.to_string()),
            _ => SoundError::PlaybackError(e.to_string()),
        })
    }

    fn detach(sink: Sink, pattern: CuePattern) {
        sink.detach(); // Non-blocking: sound continues after function returns
        debug!(repeats = pattern.repeats, "Sound playback started (detached)");
    }

    /// Returns true if the audio system is available.
    ///
    /// The output stream is opened during construction, so an existing
    /// player always has a device.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }
}

/// Silence inserted before the `index`-th play of a pattern.
fn gap_before(index: usize, pattern: CuePattern) -> Duration {
    if index == 0 {
        Duration::ZERO
    } else {
        pattern.gap
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, alarm falls back to the terminal bell: {}", e);
            None
        }
    }
}
