//! Idle/demo mode - a seeded bot that plays the game
//!
//! Looks exactly one tick ahead: a move is safe if the target cell holds no
//! hazard once this tick's scroll (if any) has been applied.

use glam::IVec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Direction, Engine};

/// Chance of sidestepping instead of waiting when UP is blocked
const SIDESTEP_CHANCE: f64 = 0.35;

/// Seeded demo player
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick the move for the coming tick (`None` = wait)
    pub fn choose(&mut self, engine: &Engine) -> Option<Direction> {
        if engine.outcome().is_terminal() {
            return None;
        }
        let pos = engine.actor().pos();

        if Self::safe_next_tick(engine, pos + Direction::Up.delta()) {
            return Some(Direction::Up);
        }

        let stay_safe = Self::safe_next_tick(engine, pos);
        if stay_safe && !self.rng.random_bool(SIDESTEP_CHANCE) {
            return None;
        }

        let mut sidesteps = [Direction::Left, Direction::Right];
        sidesteps.shuffle(&mut self.rng);
        let escape = sidesteps
            .into_iter()
            .chain(std::iter::once(Direction::Down))
            .find(|d| Self::safe_next_tick(engine, pos + d.delta()));

        if escape.is_none() && !stay_safe {
            log::debug!("Autopilot boxed in at ({}, {})", pos.x, pos.y);
        }
        escape
    }

    /// Target is on the board and hazard-free after this tick's scroll
    pub fn safe_next_tick(engine: &Engine, target: IVec2) -> bool {
        let board = engine.board();
        if !board.contains(target) {
            return false;
        }
        let steps = u64::from(engine.clock().is_scroll_tick());
        board
            .lane(target.y as usize)
            .and_then(|lane| lane.cell_after_steps(target.x as usize, steps))
            .is_some_and(|cell| !cell.is_hazard())
    }
}
