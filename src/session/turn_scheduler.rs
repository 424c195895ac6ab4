//! Top-level session state machine.
//!
//! Every event is a transition from one `SessionState` value to the next. The
//! scheduler clones the current state, runs the transition, and swaps the
//! result in only when it succeeds, so a collaborator failure never leaves a
//! half-applied state behind. Engine turns run synchronously behind a
//! minimum thinking time.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::engines::difficulty::{build_engine, Difficulty};
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::PieceKind;
use crate::presentation::presentation_trait::Presentation;
use crate::rules::chess_move::ChessMove;
use crate::rules::rules_trait::Rules;
use crate::rules::standard_rules::StandardRules;
use crate::session::input_translator::{resolve, BoardGeometry, Orientation};
use crate::session::move_arbiter::{attempt_move, commit_promotion, ArbiterVerdict};
use crate::session::selection::SelectionState;
use crate::session::session_config::SessionConfig;
use crate::session::session_errors::{SessionError, SessionResult};
use crate::session::session_state::{
    bot_turn_text, thinking_text, your_turn_text, SessionMode, SessionSnapshot, SessionState,
    PROMOTION_PROMPT,
};
use crate::session::termination::{evaluate, GameOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SelectDifficulty(Difficulty),
    StartGame(Difficulty),
    Click { x: i32, y: i32 },
    ChoosePromotion(PieceKind),
    NewGame,
    FlipBoard,
}

pub type EngineFactory<R> = Box<dyn Fn(Difficulty) -> Box<dyn Engine<R>>>;

/// Minimum wall time an engine turn appears to take.
#[derive(Debug, Clone, Copy)]
pub struct ThinkingFloor {
    minimum: Duration,
}

impl ThinkingFloor {
    pub const fn new(minimum: Duration) -> Self {
        Self { minimum }
    }

    #[inline]
    pub fn minimum(&self) -> Duration {
        self.minimum
    }

    /// Sleeps out whatever is left of the floor since `started` and returns
    /// how long it slept.
    pub fn pad_since(&self, started: Instant) -> Duration {
        let remaining = self.minimum.saturating_sub(started.elapsed());
        if !remaining.is_zero() {
            debug!(?remaining, "padding engine turn");
            thread::sleep(remaining);
        }
        remaining
    }
}

pub struct TurnScheduler<R> {
    state: SessionState<R>,
    initial_position: R,
    engine: Option<Box<dyn Engine<R>>>,
    engine_factory: EngineFactory<R>,
    geometry: BoardGeometry,
    thinking_floor: ThinkingFloor,
}

impl TurnScheduler<StandardRules> {
    /// Scheduler whose engines come from the difficulty factory.
    pub fn with_standard_engines(initial_position: StandardRules, config: &SessionConfig) -> Self {
        Self::new(initial_position, config, Box::new(build_engine))
    }
}

impl<R: Rules + Clone> TurnScheduler<R> {
    pub fn new(initial_position: R, config: &SessionConfig, engine_factory: EngineFactory<R>) -> Self {
        let state = SessionState::at_menu(
            initial_position.clone(),
            config.player_color,
            Orientation::for_player(config.player_color),
            config.default_difficulty,
        );

        Self {
            state,
            initial_position,
            engine: None,
            engine_factory,
            geometry: config.geometry,
            thinking_floor: ThinkingFloor::new(config.min_think_time),
        }
    }

    #[inline]
    pub fn state(&self) -> &SessionState<R> {
        &self.state
    }

    #[inline]
    pub fn mode(&self) -> SessionMode {
        self.state.mode
    }

    #[inline]
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn engine_name(&self) -> Option<&str> {
        self.engine.as_ref().map(|engine| engine.name())
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_, R> {
        SessionSnapshot::of(&self.state)
    }

    /// Applies one event. Never runs the engine.
    pub fn handle_event(&mut self, event: SessionEvent) -> SessionResult<()> {
        let current = self.state.clone();

        let next = match event {
            SessionEvent::SelectDifficulty(difficulty) => select_difficulty(current, difficulty),
            SessionEvent::StartGame(difficulty) => {
                if current.mode != SessionMode::Menu {
                    debug!(mode = ?current.mode, "start ignored outside the menu");
                    current
                } else {
                    let mut engine = (self.engine_factory)(difficulty);
                    engine.new_game();
                    let next = start_game(current, difficulty, &self.initial_position)?;
                    info!(engine = engine.name(), %difficulty, "engine ready");
                    self.engine = Some(engine);
                    next
                }
            }
            SessionEvent::Click { x, y } => on_click(current, x, y, &self.geometry)?,
            SessionEvent::ChoosePromotion(piece) => on_promotion_choice(current, piece)?,
            SessionEvent::NewGame => {
                if current.mode == SessionMode::Menu {
                    debug!("new game ignored on the menu");
                    current
                } else {
                    if let Some(engine) = self.engine.as_mut() {
                        engine.new_game();
                    }
                    let difficulty = current.difficulty;
                    start_game(current, difficulty, &self.initial_position)?
                }
            }
            SessionEvent::FlipBoard => flip_board(current),
        };

        self.state = next;
        Ok(())
    }

    /// Runs the pending engine turn, if there is one. Returns only after the
    /// engine move is applied and the thinking floor has passed.
    pub fn play_engine_turn(&mut self) -> SessionResult<()> {
        if self.state.mode != SessionMode::EngineTurn {
            debug!(mode = ?self.state.mode, "no engine turn pending");
            return Ok(());
        }
        if self.state.outcome.is_terminal() {
            warn!(outcome = ?self.state.outcome, "engine turn requested after the game ended");
            self.state.mode = SessionMode::GameOver;
            return Ok(());
        }

        let engine = self.engine.as_mut().ok_or(SessionError::EngineMissing)?;

        let started = Instant::now();
        let chosen = engine.choose_move(&self.state.position)?;
        self.thinking_floor.pad_since(started);

        let engine_name = engine.name().to_owned();
        let next = apply_engine_move(self.state.clone(), chosen, &engine_name)?;
        self.state = next;
        Ok(())
    }

    /// Handles one event to completion: apply it, render, and when it hands
    /// the move to the engine, play that turn and render again.
    pub fn process<P: Presentation<R> + ?Sized>(
        &mut self,
        event: SessionEvent,
        presentation: &mut P,
    ) -> SessionResult<()> {
        self.handle_event(event)?;
        presentation.render(&self.snapshot())?;

        if self.state.mode == SessionMode::EngineTurn {
            let thinking = thinking_text(self.state.difficulty);
            if self.state.status != thinking {
                // Shown while the engine works; the session keeps its own status.
                let mut frame = self.state.clone();
                frame.status = thinking;
                presentation.render(&SessionSnapshot::of(&frame))?;
            }
            self.play_engine_turn()?;
            presentation.render(&self.snapshot())?;
        }
        Ok(())
    }
}

fn select_difficulty<R>(mut state: SessionState<R>, difficulty: Difficulty) -> SessionState<R> {
    if state.mode == SessionMode::Menu {
        debug!(%difficulty, "difficulty selected");
        state.difficulty = difficulty;
    }
    state
}

/// Fresh game from `initial`, keeping orientation and player colour.
fn start_game<R: Rules + Clone>(
    state: SessionState<R>,
    difficulty: Difficulty,
    initial: &R,
) -> SessionResult<SessionState<R>> {
    let next = SessionState {
        mode: SessionMode::AwaitingSelection,
        position: initial.clone(),
        selection: SelectionState::default(),
        pending_promotion: None,
        outcome: GameOutcome::Ongoing,
        status: String::new(),
        difficulty,
        ..state
    };
    info!(%difficulty, player = next.player_color.display_name(), "game started");
    settle_turn(next, true)
}

/// Evaluates the position after a ply (or at game start) and decides who
/// moves next.
fn settle_turn<R: Rules>(
    mut state: SessionState<R>,
    at_start: bool,
) -> SessionResult<SessionState<R>> {
    state.outcome = evaluate(&state.position, state.player_color)?;

    if let Some(message) = state.outcome.result_message() {
        info!(outcome = ?state.outcome, ply = state.position.ply_count(), "game over");
        state.mode = SessionMode::GameOver;
        state.status = message.to_owned();
    } else if state.position.side_to_move() == state.player_color {
        state.mode = SessionMode::AwaitingSelection;
        state.status = your_turn_text(state.player_color);
    } else {
        state.mode = SessionMode::EngineTurn;
        state.status = if at_start {
            bot_turn_text(state.engine_color())
        } else {
            thinking_text(state.difficulty)
        };
    }
    Ok(state)
}

fn on_click<R: Rules>(
    mut state: SessionState<R>,
    x: i32,
    y: i32,
    geometry: &BoardGeometry,
) -> SessionResult<SessionState<R>> {
    if !matches!(
        state.mode,
        SessionMode::AwaitingSelection | SessionMode::PendingDestination
    ) {
        debug!(mode = ?state.mode, x, y, "click ignored");
        return Ok(state);
    }

    let Some(square) = resolve(x, y, geometry, state.orientation) else {
        debug!(x, y, "click outside the board");
        return Ok(state);
    };
    let own_piece = matches!(
        state.position.piece_at(square),
        Some((color, _)) if color == state.player_color
    );

    let Some(origin) = state
        .selection
        .selected()
        .filter(|_| state.mode == SessionMode::PendingDestination)
    else {
        if own_piece {
            debug!(%square, "piece selected");
            state.selection.select(square);
            state.mode = SessionMode::PendingDestination;
        }
        return Ok(state);
    };

    if square == origin {
        debug!(%square, "selection cleared");
        state.selection.clear();
        state.mode = SessionMode::AwaitingSelection;
        return Ok(state);
    }
    if own_piece {
        debug!(%square, "piece reselected");
        state.selection.select(square);
        return Ok(state);
    }

    let player_color = state.player_color;
    match attempt_move(&mut state.position, origin, square, player_color)? {
        ArbiterVerdict::Applied(chess_move) => {
            info!(%chess_move, ply = state.position.ply_count(), "player moved");
            state.selection.clear();
            settle_turn(state, false)
        }
        ArbiterVerdict::RequiresPromotionChoice(pending) => {
            state.pending_promotion = Some(pending);
            state.mode = SessionMode::AwaitingPromotionChoice;
            state.status = PROMOTION_PROMPT.to_owned();
            Ok(state)
        }
        ArbiterVerdict::Illegal => {
            state.selection.clear();
            state.mode = SessionMode::AwaitingSelection;
            Ok(state)
        }
    }
}

fn on_promotion_choice<R: Rules>(
    mut state: SessionState<R>,
    piece: PieceKind,
) -> SessionResult<SessionState<R>> {
    if state.mode != SessionMode::AwaitingPromotionChoice || !piece.is_promotion_choice() {
        debug!(mode = ?state.mode, ?piece, "promotion choice ignored");
        return Ok(state);
    }

    let verdict = match state.pending_promotion.take() {
        Some(pending) => commit_promotion(&mut state.position, pending, piece)?,
        None => {
            warn!("promotion choice without a pending promotion");
            ArbiterVerdict::Illegal
        }
    };
    state.selection.clear();

    match verdict {
        ArbiterVerdict::Applied(chess_move) => {
            info!(%chess_move, ply = state.position.ply_count(), "player promoted");
            settle_turn(state, false)
        }
        _ => {
            state.mode = SessionMode::AwaitingSelection;
            state.status = your_turn_text(state.player_color);
            Ok(state)
        }
    }
}

fn flip_board<R>(mut state: SessionState<R>) -> SessionState<R> {
    if state.mode == SessionMode::Menu {
        debug!("flip ignored on the menu");
        return state;
    }
    state.orientation = state.orientation.flipped();
    state.selection.clear();
    if state.mode == SessionMode::PendingDestination {
        state.mode = SessionMode::AwaitingSelection;
    }
    debug!(orientation = ?state.orientation, "board flipped");
    state
}

fn apply_engine_move<R: Rules>(
    mut state: SessionState<R>,
    chosen: ChessMove,
    engine_name: &str,
) -> SessionResult<SessionState<R>> {
    if !state.position.is_legal(&chosen)? {
        return Err(SessionError::IllegalEngineMove {
            engine: engine_name.to_owned(),
            chess_move: chosen,
        });
    }

    state.position.apply_move(&chosen)?;
    info!(engine = engine_name, %chosen, ply = state.position.ply_count(), "engine moved");
    settle_turn(state, false)
}
