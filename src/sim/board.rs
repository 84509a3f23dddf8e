//! Lane grid and circular scrolling
//!
//! A board is an ordered stack of lanes (lane 0 is the goal lane at the top).
//! Each lane is a ring of cells that shifts by its own speed on every scroll step.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{EMPTY_CHAR, HAZARD_CHAR};
use crate::error::ConfigError;
use crate::wrap_index;

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Hazard,
}

impl Cell {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            HAZARD_CHAR => Some(Cell::Hazard),
            EMPTY_CHAR => Some(Cell::Empty),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Cell::Hazard => HAZARD_CHAR,
            Cell::Empty => EMPTY_CHAR,
        }
    }

    #[inline]
    pub fn is_hazard(self) -> bool {
        self == Cell::Hazard
    }
}

/// Which way a lane's hazards travel (renderers pick sprites by this)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Left,
    Right,
    Stationary,
}

/// One row of the board with a uniform scroll speed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    cells: Vec<Cell>,
    /// Cells per scroll step (negative = left, positive = right)
    speed: i32,
}

impl Lane {
    pub fn new(cells: Vec<Cell>, speed: i32) -> Self {
        Self { cells, speed }
    }

    /// Parse a layout row (`x` = hazard, `.` = empty)
    pub fn parse(row: &str, speed: i32, lane: usize) -> Result<Self, ConfigError> {
        let cells = row
            .chars()
            .enumerate()
            .map(|(column, c)| {
                Cell::from_char(c).ok_or(ConfigError::UnknownCell {
                    lane,
                    column,
                    found: c,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(cells, speed))
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn speed(&self) -> i32 {
        self.speed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn heading(&self) -> Heading {
        match self.speed.signum() {
            -1 => Heading::Left,
            1 => Heading::Right,
            _ => Heading::Stationary,
        }
    }

    pub fn cell(&self, x: usize) -> Option<Cell> {
        self.cells.get(x).copied()
    }

    pub fn hazard_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_hazard()).count()
    }

    /// Cell that will sit at column `x` after `steps` more scroll steps
    pub fn cell_after_steps(&self, x: usize, steps: u64) -> Option<Cell> {
        if self.cells.is_empty() || x >= self.cells.len() {
            return None;
        }
        // Widened so any step count is valid
        let len = self.cells.len() as i128;
        let shift = i128::from(self.speed) * i128::from(steps);
        let source = (x as i128 - shift).rem_euclid(len) as usize;
        Some(self.cells[source])
    }

    /// Circular shift by `speed`, computed into `scratch` and swapped in whole.
    ///
    /// After the call `scratch` holds the previous cells and can be reused.
    pub fn scroll(&mut self, scratch: &mut Vec<Cell>) {
        if self.speed == 0 || self.cells.is_empty() {
            return;
        }
        let width = self.cells.len();
        scratch.clear();
        scratch.resize(width, Cell::Empty);
        for (i, &cell) in self.cells.iter().enumerate() {
            scratch[wrap_index(i as i64 + i64::from(self.speed), width)] = cell;
        }
        std::mem::swap(&mut self.cells, scratch);
    }

    /// Layout string for this lane
    pub fn to_layout_string(&self) -> String {
        self.cells.iter().map(|c| c.as_char()).collect()
    }
}

/// The lane grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    width: usize,
    height: usize,
    lanes: Vec<Lane>,
    /// Reused scroll buffer (never observable)
    #[serde(skip)]
    scratch: Vec<Cell>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.lanes == other.lanes
    }
}

impl Eq for Board {}

/// Wire form of a board; dimensions are re-checked against the lanes
#[derive(Deserialize)]
struct BoardSnapshot {
    width: usize,
    height: usize,
    lanes: Vec<Lane>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = ConfigError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let board = Board::new(snapshot.lanes)?;
        if board.width != snapshot.width || board.height != snapshot.height {
            return Err(ConfigError::BadSnapshot("board size does not match its lanes"));
        }
        Ok(board)
    }
}

impl Board {
    /// Build a board from lanes, checking that every lane has the same non-zero width
    pub fn new(lanes: Vec<Lane>) -> Result<Self, ConfigError> {
        let height = lanes.len();
        let width = lanes.first().map(Lane::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if let Some((lane, bad)) = lanes.iter().enumerate().find(|(_, l)| l.len() != width) {
            return Err(ConfigError::RaggedLane {
                lane,
                len: bad.len(),
                width,
            });
        }
        Ok(Self {
            width,
            height,
            lanes,
            scratch: Vec::with_capacity(width),
        })
    }

    /// Build a board from layout rows and a per-lane speed table
    pub fn from_layout<S: AsRef<str>>(rows: &[S], speeds: &[i32]) -> Result<Self, ConfigError> {
        if rows.len() != speeds.len() {
            return Err(ConfigError::SpeedCountMismatch {
                speeds: speeds.len(),
                lanes: rows.len(),
            });
        }
        let lanes = rows
            .iter()
            .zip(speeds)
            .enumerate()
            .map(|(i, (row, &speed))| Lane::parse(row.as_ref(), speed, i))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(lanes)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn speed(&self, lane: usize) -> i32 {
        self.lanes.get(lane).map(Lane::speed).unwrap_or(0)
    }

    pub fn heading(&self, lane: usize) -> Heading {
        self.lanes
            .get(lane)
            .map(Lane::heading)
            .unwrap_or(Heading::Stationary)
    }

    /// Whether a grid coordinate lies on the board
    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.lanes.get(y).and_then(|lane| lane.cell(x))
    }

    /// Off-board coordinates are never hazards
    pub fn is_hazard(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(Cell::is_hazard)
    }

    /// Scroll one lane by its speed. Unknown lane indices are ignored.
    pub fn scroll_lane(&mut self, lane: usize) {
        let Some(lane) = self.lanes.get_mut(lane) else {
            return;
        };
        lane.scroll(&mut self.scratch);
    }

    /// Scroll every lane once
    pub fn scroll_all(&mut self) {
        for lane in &mut self.lanes {
            lane.scroll(&mut self.scratch);
        }
    }

    /// Layout strings, one per lane
    pub fn to_layout(&self) -> Vec<String> {
        self.lanes.iter().map(Lane::to_layout_string).collect()
    }
}
