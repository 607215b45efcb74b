//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module formats:
//! - The live status line (clock, phase message, session count)
//! - The detailed status block
//! - Alarm, help and error messages
//!
//! Everything returns strings; the presenter decides where they go.

use crate::cli::input::UserCommand;
use crate::sound::AlarmOutcome;
use crate::types::{format_clock, TimerPhase, TimerSnapshot, TimerState};

// ============================================================================
// DisplayModel
// ============================================================================

/// What the presenter shows for a given timer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    /// Remaining time as `MM:SS`
    pub clock: String,
    /// Phase status message
    pub status: &'static str,
    /// Session counter text
    pub progress: String,
    /// Whether the start control is usable
    pub start_enabled: bool,
    /// Whether the countdown is suspended
    pub paused: bool,
}

impl DisplayModel {
    /// Builds the display model from the timer state.
    pub fn from_state(state: &TimerState) -> Self {
        Self {
            clock: format_clock(state.remaining_seconds),
            status: state.phase.status_message(),
            progress: format!("Sessions completed: {}", state.sessions_completed),
            start_enabled: !state.running,
            paused: state.paused,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// One-line status, redrawn on every change.
    pub fn status_line(model: &DisplayModel) -> String {
        let paused = if model.paused { " (paused)" } else { "" };
        let start = if model.start_enabled {
            "  [s] start"
        } else {
            ""
        };
        format!(
            "[{}] {}{} | {}{}",
            model.clock, model.status, paused, model.progress, start
        )
    }

    /// Multi-line status shown by the `status` command.
    pub fn status_block(state: &TimerState) -> String {
        let model = DisplayModel::from_state(state);
        let condition = match (state.running, state.paused) {
            (false, _) => "idle",
            (true, true) => "paused",
            (true, false) => "running",
        };

        let mut block = String::new();
        block.push_str("Pomodoro Timer Status\n");
        block.push_str("─────────────────────────────\n");
        block.push_str(&format!("Phase: {}\n", state.phase));
        block.push_str(&format!("State: {}\n", condition));
        block.push_str(&format!("Remaining: {}\n", model.clock));
        block.push_str(&format!("{}\n", model.progress));
        block
    }

    /// Snapshot as a single JSON line.
    pub fn snapshot_json(state: &TimerState) -> serde_json::Result<String> {
        serde_json::to_string(&TimerSnapshot::from_state(state))
    }

    /// Announcement printed when a phase runs out.
    pub fn alarm_message(completed: TimerPhase) -> &'static str {
        match completed {
            TimerPhase::Work => "Work session complete! Take a break!",
            TimerPhase::Break => "Break is over. Time to focus!",
        }
    }

    /// Alarm announcement as a JSON line.
    pub fn alarm_json(completed: TimerPhase, outcome: Option<AlarmOutcome>) -> String {
        serde_json::json!({
            "alarm": completed,
            "message": Self::alarm_message(completed),
            "sound": outcome.map(|o| o.to_string()),
        })
        .to_string()
    }

    /// Free-form message as a JSON line.
    pub fn message_json(message: &str) -> String {
        serde_json::json!({ "message": message }).to_string()
    }

    /// Command list shown by `help`.
    pub fn help_text() -> String {
        let mut text = String::from("Commands:\n");
        for command in UserCommand::ALL {
            text.push_str(&format!(
                "  {}, {:<7} {}\n",
                command.shortcut(),
                command.as_str(),
                command.description()
            ));
        }
        text
    }

    /// Message for input that is not a command.
    pub fn unknown_command(input: &str) -> String {
        format!("Unknown command '{}'. Type 'help' for a list.", input.trim())
    }

    /// Message after toggling mute.
    pub fn mute_message(muted: bool) -> &'static str {
        if muted {
            "Alarm sound muted"
        } else {
            "Alarm sound on"
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
