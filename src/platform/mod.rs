//! Platform abstraction layer
//!
//! Everything a driver needs around the simulation:
//! - Time: fixed-step pacing from wall-clock deltas
//! - Input: per-tick move sources (scripted keys, autopilot)

pub mod input;
pub mod time;

pub use input::{InputSource, ScriptedInput};
pub use time::FixedStep;
