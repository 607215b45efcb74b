//! Pomodoro Timer CLI - a terminal productivity tool
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - an alarm, then 5 minutes of break
//! - press start again for the next phase

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use pomodoro_timer::app::{App, OutputMode};
use pomodoro_timer::cli::{spawn_stdin_reader, Cli, Commands, Display, RunArgs, UserCommand};
use pomodoro_timer::sound::{try_create_player, AlarmPlayer, RodioSoundPlayer};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the timer display.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_timer(cli.run).await,
    }
}

/// Runs the interactive timer until the user quits.
async fn run_timer(args: RunArgs) -> Result<()> {
    let config = args.timer_config();
    config.validate().context("invalid timer durations")?;

    let alarm = if args.no_sound {
        None
    } else {
        Some(AlarmPlayer::new(try_create_player(false), &args.sound))
    };
    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let mut app: App<_, RodioSoundPlayer> = App::new(config, alarm, mode, std::io::stdout());
    if args.autostart {
        app.handle_command(UserCommand::Start)?;
    }
    app.run(spawn_stdin_reader()).await
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
