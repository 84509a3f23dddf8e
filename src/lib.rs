//! Lane Hopper - a fixed-tick lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lane scrolling, collisions, win/loss state)
//! - `settings`: Data-driven board layout and pacing
//! - `renderer`: Read-only text frames of the simulation
//! - `platform`: Fixed-step pacing and input sources
//! - `session`: Session runner with retry policy and one-shot notifications

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use session::{Session, SessionObserver, SessionSummary};
pub use settings::Settings;
pub use sim::{Direction, Engine, Outcome, TickInput, TickReport};

/// Game configuration constants
pub mod consts {
    /// Reference board width (cells per lane)
    pub const BOARD_WIDTH: usize = 64;
    /// Reference board height (number of lanes)
    pub const BOARD_HEIGHT: usize = 10;
    /// Lanes scroll once every this many ticks
    pub const SCROLL_PERIOD: u64 = 5;
    /// Wall-clock length of one tick (ms)
    pub const TICK_INTERVAL_MS: u64 = 200;
    /// Maximum ticks run per pacer update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Layout character for a hazard cell
    pub const HAZARD_CHAR: char = 'x';
    /// Layout character for an empty cell
    pub const EMPTY_CHAR: char = '.';
    /// Frame character for the actor
    pub const ACTOR_CHAR: char = 'F';

    /// Reference lane layout, goal lane first, start lane last
    pub const REFERENCE_LANES: [&str; BOARD_HEIGHT] = [
        "xxx..xxx..xxx..xxxxxxxxxxxxxxx..xxxxxxxxxxxxxxxxxxxxxxxxx..xxxxx",
        "...xxxx..xxxxxx.......xxxx.....xx...xxxx.....xxxxxx...xxxxx.....",
        "....xxxx.....xxxx.....xxxx.......xxxxxxx.....xx....xxxxxx.......",
        "..xxx.....xxx.....xxx.....xxx...xxx....xx....xxxx....xx......xx.",
        "................................................................",
        "....xxxx.......xxxx.........xxxx.......xxxx......xxxx....xxxx...",
        ".....xx...xx...xx......xx....xx.......xx..xx.xx......xx.......xx",
        "..xxx.....xx......xxxx..xx......xxxx......xxxx.......xxx...xxx..",
        "..xx.....xx.......xx.....xx.....xx..xx.xx........xx....xx.......",
        "................................................................",
    ];

    /// Reference per-lane speeds (cells per scroll step)
    pub const REFERENCE_SPEEDS: [i32; BOARD_HEIGHT] = [0, -2, 1, -1, 0, 2, -1, -1, 1, 0];
}

/// Wrap a signed offset into `[0, len)` (Euclidean modulo)
#[inline]
pub fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}
