//! Interactive commands typed while the timer runs.
//!
//! Each line of standard input is one command. Commands are
//! case-insensitive and have one-letter shortcuts.

use std::fmt;
use std::io::{BufRead, ErrorKind};

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Commands the user can issue to the running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Start the countdown of the current phase
    Start,
    /// Pause, or resume if already paused
    Pause,
    /// Return to the initial state
    Reset,
    /// Print a detailed status block
    Status,
    /// Toggle alarm sounds
    Mute,
    /// Print the command list
    Help,
    /// Exit the program
    Quit,
}

impl UserCommand {
    /// Every command, in help order.
    pub const ALL: [UserCommand; 7] = [
        UserCommand::Start,
        UserCommand::Pause,
        UserCommand::Reset,
        UserCommand::Status,
        UserCommand::Mute,
        UserCommand::Help,
        UserCommand::Quit,
    ];

    /// Parses one input line.
    ///
    /// Returns `None` for blank or unrecognised input.
    pub fn parse(line: &str) -> Option<Self> {
        let command = match line.trim().to_ascii_lowercase().as_str() {
            "s" | "start" => UserCommand::Start,
            "p" | "pause" | "resume" => UserCommand::Pause,
            "r" | "reset" => UserCommand::Reset,
            "t" | "status" => UserCommand::Status,
            "m" | "mute" | "unmute" => UserCommand::Mute,
            "h" | "?" | "help" => UserCommand::Help,
            "q" | "quit" | "exit" => UserCommand::Quit,
            _ => return None,
        };
        Some(command)
    }

    /// Returns the canonical command name.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserCommand::Start => "start",
            UserCommand::Pause => "pause",
            UserCommand::Reset => "reset",
            UserCommand::Status => "status",
            UserCommand::Mute => "mute",
            UserCommand::Help => "help",
            UserCommand::Quit => "quit",
        }
    }

    /// Returns the one-letter shortcut.
    pub fn shortcut(&self) -> char {
        match self {
            UserCommand::Start => 's',
            UserCommand::Pause => 'p',
            UserCommand::Reset => 'r',
            UserCommand::Status => 't',
            UserCommand::Mute => 'm',
            UserCommand::Help => 'h',
            UserCommand::Quit => 'q',
        }
    }

    /// Returns a human-readable description of this command.
    pub fn description(&self) -> &'static str {
        match self {
            UserCommand::Start => "start the countdown",
            UserCommand::Pause => "pause / resume",
            UserCommand::Reset => "reset timer and session count",
            UserCommand::Status => "show detailed status",
            UserCommand::Mute => "toggle alarm sound",
            UserCommand::Help => "show this help",
            UserCommand::Quit => "exit",
        }
    }
}

impl fmt::Display for UserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads stdin lines on a dedicated thread.
///
/// A blocking thread keeps an unfinished terminal read from holding up
/// runtime shutdown. The channel closes at end of input.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        forward_lines(std::io::stdin().lock(), &tx);
        debug!("stdin reader finished");
    });
    rx
}

/// Sends every line of `reader` to `tx` until end of input.
///
/// Invalid UTF-8 is replaced rather than treated as an error, so a garbled
/// line reaches the presenter as an unknown command.
fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::UnboundedSender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("failed to read stdin: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_names() {
        for command in UserCommand::ALL {
            assert_eq!(UserCommand::parse(command.as_str()), Some(command));
        }
    }

    #[test]
    fn test_parse_shortcuts() {
        for command in UserCommand::ALL {
            let shortcut = command.shortcut().to_string();
            assert_eq!(UserCommand::parse(&shortcut), Some(command));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(UserCommand::parse("resume"), Some(UserCommand::Pause));
        assert_eq!(UserCommand::parse("unmute"), Some(UserCommand::Mute));
        assert_eq!(UserCommand::parse("?"), Some(UserCommand::Help));
        assert_eq!(UserCommand::parse("exit"), Some(UserCommand::Quit));
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(UserCommand::parse("  START \n"), Some(UserCommand::Start));
        assert_eq!(UserCommand::parse("\tPause"), Some(UserCommand::Pause));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(UserCommand::parse(""), None);
        assert_eq!(UserCommand::parse("   "), None);
        assert_eq!(UserCommand::parse("stop"), None);
        assert_eq!(UserCommand::parse("start now"), None);
    }

    #[test]
    fn test_shortcuts_are_unique() {
        let mut shortcuts: Vec<char> = UserCommand::ALL.iter().map(|c| c.shortcut()).collect();
        shortcuts.sort_unstable();
        shortcuts.dedup();
        assert_eq!(shortcuts.len(), UserCommand::ALL.len());
    }

    #[test]
    fn test_forward_lines_replaces_invalid_utf8() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_lines(&b"\xff\nstatus\r\nquit"[..], &tx);

        let garbled = rx.try_recv().unwrap();
        assert_eq!(garbled, "\u{FFFD}");
        assert_eq!(UserCommand::parse(&garbled), None);
        assert_eq!(rx.try_recv().unwrap(), "status");
        assert_eq!(rx.try_recv().unwrap(), "quit");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_lines_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        // Returns instead of spinning on a closed channel
        forward_lines(&b"start\npause\n"[..], &tx);
    }

    #[test]
    fn test_display() {
        assert_eq!(UserCommand::Reset.to_string(), "reset");
    }
}
