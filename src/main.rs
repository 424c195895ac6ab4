//! Plays chess against the built-in engines from the terminal.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use plum_play::engines::difficulty::Difficulty;
use plum_play::game_state::chess_types::Color;
use plum_play::presentation::command_loop::run_stdio_loop;
use plum_play::rules::standard_rules::StandardRules;
use plum_play::session::input_translator::BoardGeometry;
use plum_play::session::session_config::SessionConfig;
use plum_play::session::turn_scheduler::TurnScheduler;

#[derive(Debug, Parser)]
#[command(name = "plum_play", version, about = "Play chess against a bot in the terminal")]
struct Args {
    /// Difficulty highlighted on the start menu (easy, medium, hard).
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Colour you play (white or black).
    #[arg(long, default_value = "white", value_parser = Color::parse)]
    color: Color,

    /// Minimum time an engine move appears to take, in milliseconds.
    #[arg(long, default_value_t = 500)]
    think_ms: u64,

    /// Board size in pixels for `click` coordinates.
    #[arg(long, default_value_t = 600)]
    board_size: u32,

    /// Start from this FEN instead of the standard position.
    #[arg(long)]
    fen: Option<String>,

    /// Log filter, e.g. `info` or `plum_play=debug`. Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

fn init_tracing(log: Option<&str>) {
    let filter = match log {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let initial_position = match args.fen.as_deref() {
        Some(fen) => match StandardRules::from_fen(fen) {
            Ok(rules) => rules,
            Err(err) => {
                error!(%err, "cannot start from the given position");
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => StandardRules::new_game(),
    };

    let config = SessionConfig {
        player_color: args.color,
        default_difficulty: args.difficulty,
        min_think_time: Duration::from_millis(args.think_ms),
        geometry: BoardGeometry {
            size: args.board_size,
            ..BoardGeometry::default()
        },
    };
    info!(?config, "session configured");

    let mut scheduler = TurnScheduler::with_standard_engines(initial_position, &config);
    match run_stdio_loop(&mut scheduler) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
