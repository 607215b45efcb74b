//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sound::DEFAULT_CUE_FILE;
use crate::types::{TimerConfig, MAX_BREAK_MINUTES, MAX_WORK_MINUTES};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - alternating work and break countdowns in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-timer",
    version,
    about = "Terminal Pomodoro timer with audible phase alarms",
    long_about = "Counts down a work phase, rings an alarm, then counts down a break.\n\
                  Type commands on stdin while it runs: start, pause, reset, status, mute, help, quit.",
    args_conflicts_with_subcommands = true,
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (runs the timer when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Timer options
    #[command(flatten)]
    pub run: RunArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Arguments
// ============================================================================

/// Arguments for running the timer
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Work duration in minutes (1-120)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=MAX_WORK_MINUTES as i64)
    )]
    pub work: u32,

    /// Break duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=MAX_BREAK_MINUTES as i64)
    )]
    pub break_time: u32,

    /// Sound file played at each phase transition
    #[arg(short, long, default_value = DEFAULT_CUE_FILE)]
    pub sound: PathBuf,

    /// Disable alarm sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Print state as JSON lines instead of a status line
    #[arg(long)]
    pub json: bool,

    /// Start the first work phase immediately
    #[arg(short, long)]
    pub autostart: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            work: 25,
            break_time: 5,
            sound: PathBuf::from(DEFAULT_CUE_FILE),
            no_sound: false,
            json: false,
            autostart: false,
        }
    }
}

impl RunArgs {
    /// Builds the phase durations from the arguments.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::default()
            .with_work_minutes(self.work)
            .with_break_minutes(self.break_time)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["pomodoro-timer"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert_eq!(cli.run.work, 25);
            assert_eq!(cli.run.break_time, 5);
            assert_eq!(cli.run.sound, PathBuf::from("conga.wav"));
            assert!(!cli.run.no_sound);
            assert!(!cli.run.json);
            assert!(!cli.run.autostart);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["pomodoro-timer", "--verbose"]);
            assert!(cli.verbose);

            let cli = Cli::parse_from(["pomodoro-timer", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["pomodoro-timer", "completions", "bash"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Bash
                })
            ));
        }

        #[test]
        fn test_parse_completions_invalid_shell() {
            let result = Cli::try_parse_from(["pomodoro-timer", "completions", "cmd"]);
            assert!(result.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // RunArgs Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_parse_all_options() {
            let cli = Cli::parse_from([
                "pomodoro-timer",
                "--work",
                "50",
                "--break-time",
                "10",
                "--sound",
                "bell.wav",
                "--no-sound",
                "--json",
                "--autostart",
            ]);
            assert_eq!(cli.run.work, 50);
            assert_eq!(cli.run.break_time, 10);
            assert_eq!(cli.run.sound, PathBuf::from("bell.wav"));
            assert!(cli.run.no_sound);
            assert!(cli.run.json);
            assert!(cli.run.autostart);
        }

        #[test]
        fn test_parse_short_options() {
            let cli = Cli::parse_from(["pomodoro-timer", "-w", "30", "-b", "3", "-a"]);
            assert_eq!(cli.run.work, 30);
            assert_eq!(cli.run.break_time, 3);
            assert!(cli.run.autostart);
        }

        #[test]
        fn test_work_range() {
            assert!(Cli::try_parse_from(["pomodoro-timer", "--work", "0"]).is_err());
            assert!(Cli::try_parse_from(["pomodoro-timer", "--work", "121"]).is_err());
            assert!(Cli::try_parse_from(["pomodoro-timer", "--work", "120"]).is_ok());
        }

        #[test]
        fn test_break_range() {
            assert!(Cli::try_parse_from(["pomodoro-timer", "--break-time", "0"]).is_err());
            assert!(Cli::try_parse_from(["pomodoro-timer", "--break-time", "61"]).is_err());
            assert!(Cli::try_parse_from(["pomodoro-timer", "--break-time", "60"]).is_ok());
        }

        #[test]
        fn test_timer_config() {
            let args = RunArgs {
                work: 50,
                break_time: 10,
                ..RunArgs::default()
            };
            let config = args.timer_config();
            assert_eq!(config.work_seconds, 3000);
            assert_eq!(config.break_seconds, 600);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_default_matches_parse() {
            let cli = Cli::parse_from(["pomodoro-timer"]);
            let default = RunArgs::default();
            assert_eq!(cli.run.work, default.work);
            assert_eq!(cli.run.break_time, default.break_time);
            assert_eq!(cli.run.sound, default.sound);
            assert_eq!(
                cli.run.timer_config(),
                TimerConfig::default()
            );
        }
    }
}
