//! Line-oriented front-end driving a session from stdin.
//!
//! Each line is parsed into one command and fed to the scheduler as a
//! session event; the text presentation redraws after every step.

use std::io::{self, BufRead, Write};

use crate::engines::difficulty::Difficulty;
use crate::game_state::chess_types::PieceKind;
use crate::presentation::presentation_trait::Presentation;
use crate::presentation::text_board::TextPresentation;
use crate::rules::board_square::BoardSquare;
use crate::rules::rules_trait::Rules;
use crate::session::session_errors::SessionResult;
use crate::session::turn_scheduler::{SessionEvent, TurnScheduler};

const HELP_TEXT: &str = "\
Commands:
  difficulty <easy|medium|hard>  highlight a difficulty on the menu
  start [difficulty]             start a game
  click <x> <y>                  click a screen pixel
  square <e2>                    click the centre of a square
  promote <q|r|b|n>              choose the promotion piece
  new                            start a new game
  flip                           flip the board
  show                           redraw the board
  legal                          list legal moves
  help                           show this help
  quit                           exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Difficulty(Difficulty),
    Start(Option<Difficulty>),
    Click { x: i32, y: i32 },
    Square(BoardSquare),
    Promote(PieceKind),
    New,
    Flip,
    Show,
    Legal,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (keyword.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("difficulty", [level]) => Command::Difficulty(level.parse()?),
        ("start", []) => Command::Start(None),
        ("start", [level]) => Command::Start(Some(level.parse()?)),
        ("click", [x, y]) => Command::Click {
            x: x.parse().map_err(|_| format!("Invalid x coordinate: {x}"))?,
            y: y.parse().map_err(|_| format!("Invalid y coordinate: {y}"))?,
        },
        ("square", [square]) => Command::Square(square.parse()?),
        ("promote", [piece]) => Command::Promote(parse_promotion_piece(piece)?),
        ("new", []) => Command::New,
        ("flip", []) => Command::Flip,
        ("show", []) => Command::Show,
        ("legal", []) => Command::Legal,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("Unknown command: {}", line.trim())),
    };

    Ok(Some(command))
}

fn parse_promotion_piece(text: &str) -> Result<PieceKind, String> {
    let mut chars = text.chars();
    match (chars.next().and_then(PieceKind::from_letter), chars.next()) {
        (Some(piece), None) if piece.is_promotion_choice() => Ok(piece),
        _ => Err(format!("Invalid promotion piece: {text} (expected q, r, b or n)")),
    }
}

pub struct CommandLoop<W: Write> {
    presentation: TextPresentation<W>,
}

impl<W: Write> CommandLoop<W> {
    pub fn new(presentation: TextPresentation<W>) -> Self {
        Self { presentation }
    }

    pub fn into_presentation(self) -> TextPresentation<W> {
        self.presentation
    }

    /// Draws the opening frame.
    pub fn greet<R: Rules + Clone>(&mut self, scheduler: &TurnScheduler<R>) -> SessionResult<()> {
        self.presentation.render(&scheduler.snapshot())?;
        writeln!(self.presentation.writer_mut(), "Type 'help' for commands.")?;
        Ok(())
    }

    /// Handles one line. Returns `true` when the loop should stop.
    pub fn handle_command<R: Rules + Clone>(
        &mut self,
        scheduler: &mut TurnScheduler<R>,
        line: &str,
    ) -> SessionResult<bool> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(false),
            Err(err) => {
                writeln!(
                    self.presentation.writer_mut(),
                    "{err}. Type 'help' for commands."
                )?;
                return Ok(false);
            }
        };

        let event = match command {
            Command::Difficulty(difficulty) => SessionEvent::SelectDifficulty(difficulty),
            Command::Start(difficulty) => {
                SessionEvent::StartGame(difficulty.unwrap_or(scheduler.state().difficulty))
            }
            Command::Click { x, y } => SessionEvent::Click { x, y },
            Command::Square(square) => {
                let (x, y) = scheduler
                    .geometry()
                    .square_center(square, scheduler.state().orientation);
                SessionEvent::Click { x, y }
            }
            Command::Promote(piece) => SessionEvent::ChoosePromotion(piece),
            Command::New => SessionEvent::NewGame,
            Command::Flip => SessionEvent::FlipBoard,
            Command::Show => {
                self.presentation.render(&scheduler.snapshot())?;
                return Ok(false);
            }
            Command::Legal => {
                let moves: Vec<String> = scheduler
                    .state()
                    .position
                    .legal_moves()?
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                writeln!(self.presentation.writer_mut(), "{}", moves.join(" "))?;
                return Ok(false);
            }
            Command::Help => {
                writeln!(self.presentation.writer_mut(), "{HELP_TEXT}")?;
                return Ok(false);
            }
            Command::Quit => return Ok(true),
        };

        scheduler.process(event, &mut self.presentation)?;
        Ok(false)
    }
}

pub fn run_stdio_loop<R: Rules + Clone>(scheduler: &mut TurnScheduler<R>) -> SessionResult<()> {
    let stdin = io::stdin();
    let mut command_loop = CommandLoop::new(TextPresentation::new(io::stdout()));
    command_loop.greet(scheduler)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if command_loop.handle_command(scheduler, &line)? {
            break;
        }
    }

    Ok(())
}
