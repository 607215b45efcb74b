//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Argument definitions using clap derive
//! - `input`: Interactive commands read from stdin
//! - `display`: Output formatting

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, RunArgs};
pub use display::{Display, DisplayModel};
pub use input::{spawn_stdin_reader, UserCommand};
