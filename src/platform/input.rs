//! Per-tick input sources
//!
//! A source yields at most one move per tick. Key polling belongs to the
//! driver; sources here are deterministic.

use std::collections::VecDeque;

use crate::sim::{Autopilot, Direction, Engine};

pub trait InputSource {
    /// Move for the coming tick, `None` to wait
    fn next_move(&mut self, engine: &Engine) -> Option<Direction>;
}

impl InputSource for Autopilot {
    fn next_move(&mut self, engine: &Engine) -> Option<Direction> {
        self.choose(engine)
    }
}

/// Replays a fixed list of moves, then waits forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    moves: VecDeque<Option<Direction>>,
}

impl ScriptedInput {
    pub fn new(moves: impl IntoIterator<Item = Option<Direction>>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// One tick per character: WASD moves, anything else waits
    pub fn from_keys(keys: &str) -> Self {
        Self::new(keys.chars().map(Direction::from_key))
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_move(&mut self, _engine: &Engine) -> Option<Direction> {
        self.moves.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_scripted_keys() {
        let engine = Engine::from_settings(&Settings::default()).unwrap();
        let mut input = ScriptedInput::from_keys("wa.D");
        assert_eq!(input.remaining(), 4);
        assert_eq!(input.next_move(&engine), Some(Direction::Up));
        assert_eq!(input.next_move(&engine), Some(Direction::Left));
        assert_eq!(input.next_move(&engine), None);
        assert_eq!(input.next_move(&engine), Some(Direction::Right));
        assert_eq!(input.next_move(&engine), None);
        assert_eq!(input.remaining(), 0);
    }
}
