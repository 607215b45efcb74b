//! Presenter for the Pomodoro Timer.
//!
//! [`App`] owns the timer engine and runs the single-threaded event loop:
//!
//! ```text
//! stdin line ──▶ UserCommand ──▶ TimerEngine ──▶ TimerEvent ──▶ render / alarm
//!                                     ▲
//! TokioScheduler ── fired TickHandle ─┘
//! ```
//!
//! Commands and ticks are handled on the same task, one at a time, so the
//! engine never needs a lock.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{Display, DisplayModel, UserCommand};
use crate::engine::{TickHandle, TimerEngine, TimerEvent, TokioScheduler};
use crate::sound::{AlarmOutcome, AlarmPlayer, RodioSoundPlayer, SoundPlayer};
use crate::types::{TimerConfig, TimerPhase};

/// ANSI sequence that returns to column 0 and clears the line.
const CLEAR_LINE: &str = "\r\x1b[2K";

/// How state is written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single status line redrawn in place
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// The presenter: engine, alarm and output.
pub struct App<W: Write, P: SoundPlayer = RodioSoundPlayer> {
    engine: TimerEngine<TokioScheduler>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    fired: mpsc::UnboundedReceiver<TickHandle>,
    alarm: Option<AlarmPlayer<P>>,
    mode: OutputMode,
    out: W,
}

impl<W: Write, P: SoundPlayer> App<W, P> {
    /// Creates the presenter. `alarm` is `None` when sound is switched off.
    pub fn new(
        config: TimerConfig,
        alarm: Option<AlarmPlayer<P>>,
        mode: OutputMode,
        out: W,
    ) -> Self {
        let (scheduler, fired) = TokioScheduler::new();
        let (event_tx, events) = mpsc::unbounded_channel();
        Self {
            engine: TimerEngine::new(config, scheduler, event_tx),
            events,
            fired,
            alarm,
            mode,
            out,
        }
    }

    /// Runs until `quit`, end of input, or Ctrl-C.
    ///
    /// `input` yields one user command line per message; the loop ends when
    /// its sender is dropped.
    pub async fn run(&mut self, mut input: mpsc::UnboundedReceiver<String>) -> Result<()> {
        self.render()?;

        loop {
            tokio::select! {
                line = input.recv() => {
                    match line {
                        Some(line) => {
                            if self.handle_line(&line)? {
                                break;
                            }
                        }
                        None => {
                            debug!("input closed");
                            break;
                        }
                    }
                }
                Some(handle) = self.fired.recv() => {
                    self.handle_tick(handle)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    debug!("interrupted");
                    break;
                }
            }
        }

        self.finish()
    }

    /// Handles one line of user input. Returns true if the app should exit.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        match UserCommand::parse(line) {
            Some(command) => self.handle_command(command),
            None if line.trim().is_empty() => Ok(false),
            None => {
                self.message(&Display::unknown_command(line))?;
                Ok(false)
            }
        }
    }

    /// Applies a user command. Returns true if the app should exit.
    pub fn handle_command(&mut self, command: UserCommand) -> Result<bool> {
        debug!(%command, "user command");
        match command {
            UserCommand::Start => self.engine.start(),
            UserCommand::Pause => self.engine.pause(),
            UserCommand::Reset => self.engine.reset(),
            UserCommand::Status => match self.mode {
                OutputMode::Text => {
                    let block = Display::status_block(self.engine.state());
                    self.message(block.trim_end())?;
                }
                OutputMode::Json => self.render()?,
            },
            UserCommand::Mute => {
                let muted = match self.alarm.as_mut() {
                    Some(alarm) => alarm.toggle_mute(),
                    None => true,
                };
                self.message(Display::mute_message(muted))?;
            }
            UserCommand::Help => self.message(Display::help_text().trim_end())?,
            UserCommand::Quit => return Ok(true),
        }
        self.drain_events()?;
        Ok(false)
    }

    /// Delivers a fired scheduler tick to the engine.
    pub fn handle_tick(&mut self, handle: TickHandle) -> Result<()> {
        self.engine.on_tick_fired(handle);
        self.drain_events()
    }

    /// Waits for the next scheduled tick and handles it.
    ///
    /// Returns false if the scheduler is gone.
    pub async fn process_next_tick(&mut self) -> Result<bool> {
        match self.fired.recv().await {
            Some(handle) => {
                self.handle_tick(handle)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &TimerEngine<TokioScheduler> {
        &self.engine
    }

    /// Returns the alarm player, if sound is on.
    pub fn alarm(&self) -> Option<&AlarmPlayer<P>> {
        self.alarm.as_ref()
    }

    /// Returns the output writer.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Processes queued engine events, then redraws once.
    fn drain_events(&mut self) -> Result<()> {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            changed = true;
            match event {
                TimerEvent::Alarm { completed } => self.ring(completed)?,
                TimerEvent::PhaseSwitched {
                    phase,
                    sessions_completed,
                } => {
                    info!(%phase, sessions_completed, "ready for next phase");
                }
                other => debug!(?other, "timer event"),
            }
        }
        if changed {
            self.render()?;
        }
        Ok(())
    }

    fn ring(&mut self, completed: TimerPhase) -> Result<()> {
        let outcome: Option<AlarmOutcome> = self.alarm.as_ref().map(|alarm| alarm.play_alarm());
        debug!(%completed, ?outcome, "alarm");
        match self.mode {
            OutputMode::Text => self.message(Display::alarm_message(completed)),
            OutputMode::Json => {
                let line = Display::alarm_json(completed, outcome);
                writeln!(self.out, "{}", line).context("failed to write output")?;
                self.out.flush().context("failed to flush output")
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let state = self.engine.state();
        match self.mode {
            OutputMode::Text => {
                let line = Display::status_line(&DisplayModel::from_state(state));
                write!(self.out, "{}{}", CLEAR_LINE, line).context("failed to write output")?;
            }
            OutputMode::Json => {
                let line =
                    Display::snapshot_json(state).context("failed to serialize timer state")?;
                writeln!(self.out, "{}", line).context("failed to write output")?;
            }
        }
        self.out.flush().context("failed to flush output")
    }

    /// Prints a message above the status line and redraws it.
    fn message(&mut self, text: &str) -> Result<()> {
        match self.mode {
            OutputMode::Text => {
                writeln!(self.out, "{}{}", CLEAR_LINE, text).context("failed to write output")?;
                self.render()
            }
            OutputMode::Json => {
                writeln!(self.out, "{}", Display::message_json(text))
                    .context("failed to write output")?;
                self.out.flush().context("failed to flush output")
            }
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.engine.reset();
        if self.mode == OutputMode::Text {
            writeln!(self.out).context("failed to write output")?;
        }
        self.out.flush().context("failed to flush output")
    }
}

// ============================================================================
// Tests
// ============================================================================
