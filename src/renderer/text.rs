//! Plain-text frames
//!
//! One character per cell (`x` hazard, `.` empty, `F` actor) followed by a
//! status line.

use std::fmt;

use crate::consts::ACTOR_CHAR;
use crate::sim::{Engine, Outcome};

/// Borrowed text view of an engine
#[derive(Debug, Clone, Copy)]
pub struct TextFrame<'a> {
    engine: &'a Engine,
    status: bool,
}

impl<'a> TextFrame<'a> {
    pub fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            status: true,
        }
    }

    /// Grid only, no status line
    pub fn grid_only(mut self) -> Self {
        self.status = false;
        self
    }

    fn status_line(&self) -> String {
        match self.engine.outcome() {
            Outcome::Playing => format!(
                "tick {} | Use W, A, S, D to move. Reach the top to win!",
                self.engine.tick_count()
            ),
            Outcome::Lost => format!("tick {} | GAME OVER", self.engine.tick_count()),
            Outcome::Won => format!(
                "tick {} | CONGRATULATIONS! YOU WIN",
                self.engine.tick_count()
            ),
        }
    }
}

impl fmt::Display for TextFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = self.engine.actor();
        for (y, lane) in self.engine.board().lanes().iter().enumerate() {
            for (x, cell) in lane.cells().iter().enumerate() {
                if x == actor.x() && y == actor.y() {
                    write!(f, "{}", ACTOR_CHAR)?;
                } else {
                    write!(f, "{}", cell.as_char())?;
                }
            }
            writeln!(f)?;
        }
        if self.status {
            writeln!(f, "{}", self.status_line())?;
        }
        Ok(())
    }
}

/// Render a full frame (grid + status line)
pub fn render_frame(engine: &Engine) -> String {
    TextFrame::new(engine).to_string()
}
