//! Game state and core simulation types
//!
//! The `Engine` owns everything a session mutates: the board, the actor and the
//! clock. Collaborators read it through accessors and drive it through
//! `try_move`, `advance_tick` and `reset`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::tick::{TickInput, TickReport, tick};
use crate::error::ConfigError;
use crate::settings::Settings;

/// A move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid delta (y grows downward, toward the start lane)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// WASD key mapping
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The player token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pos: IVec2,
}

impl Actor {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            pos: IVec2::new(x as i32, y as i32),
        }
    }

    /// Start cell: bottom lane, middle column
    pub fn start_for(board: &Board) -> Self {
        Self::new(board.width() / 2, board.height() - 1)
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> usize {
        self.pos.x as usize
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.pos.y as usize
    }

    /// Candidate cell for a move, `None` if it would leave the board
    pub fn step(&self, direction: Direction, board: &Board) -> Option<IVec2> {
        let candidate = self.pos + direction.delta();
        board.contains(candidate).then_some(candidate)
    }

    pub(super) fn set_pos(&mut self, pos: IVec2) {
        self.pos = pos;
    }
}

/// Discrete tick counter and scroll schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClockSnapshot")]
pub struct SimulationClock {
    tick_count: u64,
    scroll_period: u64,
}

impl SimulationClock {
    pub fn new(scroll_period: u64) -> Result<Self, ConfigError> {
        if scroll_period == 0 {
            return Err(ConfigError::ZeroScrollPeriod);
        }
        Ok(Self {
            tick_count: 0,
            scroll_period,
        })
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn scroll_period(&self) -> u64 {
        self.scroll_period
    }

    /// Lanes scroll on this tick
    #[inline]
    pub fn is_scroll_tick(&self) -> bool {
        self.tick_count % self.scroll_period == 0
    }

    pub(super) fn advance(&mut self) {
        self.tick_count += 1;
    }

    pub(super) fn restart(&mut self) {
        self.tick_count = 0;
    }
}

#[derive(Deserialize)]
struct ClockSnapshot {
    tick_count: u64,
    scroll_period: u64,
}

impl TryFrom<ClockSnapshot> for SimulationClock {
    type Error = ConfigError;

    fn try_from(snapshot: ClockSnapshot) -> Result<Self, Self::Error> {
        let mut clock = Self::new(snapshot.scroll_period)?;
        clock.tick_count = snapshot.tick_count;
        Ok(clock)
    }
}

/// Session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Playing,
    Lost,
    Won,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Playing
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Playing => "PLAYING",
            Outcome::Lost => "LOST",
            Outcome::Won => "WON",
        }
    }
}

/// What `reset` does with the tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockPolicy {
    /// Tick counter returns to 0, so lanes replay from their initial phase
    #[default]
    Restart,
    /// Tick counter keeps running across retries
    Continue,
}

/// Notifications produced by a tick or reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Actor accepted a move
    Moved { from: IVec2, to: IVec2 },
    /// Lanes scrolled on this tick
    Scrolled { tick: u64 },
    /// Actor was on a hazard after the scroll
    Lost { at: IVec2, tick: u64 },
    /// Actor reached the goal lane
    Won { tick: u64 },
    /// Session restarted
    Reset,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EngineSnapshot")]
pub struct Engine {
    pub(super) board: Board,
    pub(super) actor: Actor,
    pub(super) clock: SimulationClock,
    pub(super) outcome: Outcome,
    /// Layout restored on reset
    initial_board: Board,
    start: Actor,
    clock_policy: ClockPolicy,
}

/// Wire form of an engine. Restoring one re-runs the construction checks.
#[derive(Deserialize)]
struct EngineSnapshot {
    board: Board,
    actor: Actor,
    clock: SimulationClock,
    outcome: Outcome,
    initial_board: Board,
    start: Actor,
    clock_policy: ClockPolicy,
}

impl TryFrom<EngineSnapshot> for Engine {
    type Error = ConfigError;

    fn try_from(snapshot: EngineSnapshot) -> Result<Self, Self::Error> {
        let EngineSnapshot {
            board,
            actor,
            clock,
            outcome,
            initial_board,
            start,
            clock_policy,
        } = snapshot;
        if board.width() != initial_board.width() || board.height() != initial_board.height() {
            return Err(ConfigError::BadSnapshot("board and initial board differ in size"));
        }
        if !board.contains(actor.pos()) {
            return Err(ConfigError::BadSnapshot("actor is off the board"));
        }
        if !initial_board.contains(start.pos()) {
            return Err(ConfigError::BadSnapshot("start cell is off the board"));
        }
        if initial_board.is_hazard(start.x(), start.y()) {
            return Err(ConfigError::StartOnHazard {
                x: start.x(),
                y: start.y(),
            });
        }
        Ok(Self {
            board,
            actor,
            clock,
            outcome,
            initial_board,
            start,
            clock_policy,
        })
    }
}

impl Engine {
    /// Create an engine with the actor at the start cell.
    ///
    /// Fails if the scroll period is zero or the start cell is a hazard.
    pub fn new(board: Board, scroll_period: u64) -> Result<Self, ConfigError> {
        let clock = SimulationClock::new(scroll_period)?;
        let start = Actor::start_for(&board);
        if board.is_hazard(start.x(), start.y()) {
            return Err(ConfigError::StartOnHazard {
                x: start.x(),
                y: start.y(),
            });
        }
        Ok(Self {
            initial_board: board.clone(),
            board,
            actor: start,
            clock,
            outcome: Outcome::Playing,
            start,
            clock_policy: ClockPolicy::default(),
        })
    }

    /// Create an engine from settings (layout, speeds, period, clock policy)
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let board = Board::from_layout(settings.lanes.as_slice(), &settings.speeds)?;
        Ok(Self::new(board, settings.scroll_period)?.with_clock_policy(settings.clock_policy))
    }

    pub fn with_clock_policy(mut self, policy: ClockPolicy) -> Self {
        self.clock_policy = policy;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn initial_board(&self) -> &Board {
        &self.initial_board
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn start(&self) -> &Actor {
        &self.start
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn tick_count(&self) -> u64 {
        self.clock.tick_count()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn clock_policy(&self) -> ClockPolicy {
        self.clock_policy
    }

    /// Move the actor one cell if the target is on the board.
    ///
    /// Hazards are not checked here; the next tick evaluates them. Returns
    /// `false` (and leaves the actor alone) for off-board targets or once the
    /// session has ended.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        if self.outcome.is_terminal() {
            return false;
        }
        match self.actor.step(direction, &self.board) {
            Some(pos) => {
                self.actor.set_pos(pos);
                true
            }
            None => false,
        }
    }

    /// Advance one tick with an optional move (no-op once LOST/WON)
    pub fn advance_tick(&mut self, direction: Option<Direction>) -> TickReport {
        tick(self, &TickInput { direction })
    }

    /// Restore the initial layout, start cell and PLAYING
    pub fn reset(&mut self) -> GameEvent {
        self.board.clone_from(&self.initial_board);
        self.actor = self.start;
        self.outcome = Outcome::Playing;
        if self.clock_policy == ClockPolicy::Restart {
            self.clock.restart();
        }
        log::info!(
            "Session reset (tick counter {})",
            self.clock.tick_count()
        );
        GameEvent::Reset
    }
}
