//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed ticks only, no wall-clock time
//! - Seeded RNG only (autopilot)
//! - No rendering, audio or input-device dependencies

pub mod autopilot;
pub mod board;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use board::{Board, Cell, Heading, Lane};
pub use collision::{actor_at_goal, actor_on_hazard, evaluate};
pub use state::{Actor, ClockPolicy, Direction, Engine, GameEvent, Outcome, SimulationClock};
pub use tick::{TickInput, TickReport, tick};
