//! Session runner
//!
//! Drives one `Engine` tick by tick from an input source, tells an observer
//! about every tick and (once) about every LOST/WON, and decides whether a
//! loss is retried. Audio cues and "play again?" prompts hang off the observer.

use serde::Serialize;

use crate::error::ConfigError;
use crate::platform::InputSource;
use crate::settings::Settings;
use crate::sim::{Engine, Outcome, TickReport};

/// Hooks for render/audio collaborators. All methods default to no-ops.
pub trait SessionObserver {
    fn on_tick(&mut self, _engine: &Engine, _report: &TickReport) {}

    /// Called once per entry into LOST or WON, before any retry reset
    fn on_outcome(&mut self, _engine: &Engine, _outcome: Outcome) {}

    fn on_reset(&mut self, _engine: &Engine) {}
}

impl SessionObserver for () {}

/// Logs the cues a GUI front end would play as sounds
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_tick(&mut self, _engine: &Engine, report: &TickReport) {
        if report.moved {
            log::trace!("cue: move");
        }
    }

    fn on_outcome(&mut self, engine: &Engine, outcome: Outcome) {
        match outcome {
            Outcome::Lost => log::info!("cue: hit (tick {})", engine.tick_count()),
            Outcome::Won => log::info!("cue: victory (tick {})", engine.tick_count()),
            Outcome::Playing => {}
        }
    }
}

/// Totals for a finished (or interrupted) session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Attempts started, including retries
    pub attempts: u32,
    pub wins: u32,
    pub losses: u32,
    /// Ticks driven across all attempts
    pub ticks: u64,
    /// Outcome of the last attempt
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    retries_left: u32,
    attempts: u32,
    wins: u32,
    losses: u32,
    ticks: u64,
    finished: bool,
    replay_wins: bool,
}

impl Session {
    /// `retries` is how many losses are answered with a reset (wins too, see
    /// `with_replay_wins`)
    pub fn new(engine: Engine, retries: u32) -> Self {
        Self {
            engine,
            retries_left: retries,
            attempts: 1,
            wins: 0,
            losses: 0,
            ticks: 0,
            finished: false,
            replay_wins: false,
        }
    }

    /// Offer "play again" after a win as well; wins then draw on the same retries
    pub fn with_replay_wins(mut self, replay_wins: bool) -> Self {
        self.replay_wins = replay_wins;
        self
    }

    pub fn from_settings(settings: &Settings, retries: u32) -> Result<Self, ConfigError> {
        Ok(Self::new(Engine::from_settings(settings)?, retries))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run a single tick
    pub fn step<I, O>(&mut self, input: &mut I, observer: &mut O) -> TickReport
    where
        I: InputSource + ?Sized,
        O: SessionObserver + ?Sized,
    {
        if self.finished {
            return self.engine.advance_tick(None);
        }

        let direction = input.next_move(&self.engine);
        let report = self.engine.advance_tick(direction);
        self.ticks += 1;
        observer.on_tick(&self.engine, &report);

        if report.entered_terminal() {
            match report.outcome {
                Outcome::Lost => self.losses += 1,
                Outcome::Won => self.wins += 1,
                Outcome::Playing => {}
            }
            observer.on_outcome(&self.engine, report.outcome);

            let replay = match report.outcome {
                Outcome::Lost => true,
                Outcome::Won => self.replay_wins,
                Outcome::Playing => false,
            };
            if replay && self.retries_left > 0 {
                self.retries_left -= 1;
                self.attempts += 1;
                log::info!(
                    "Retrying (attempt {}, {} retries left)",
                    self.attempts,
                    self.retries_left
                );
                self.engine.reset();
                observer.on_reset(&self.engine);
            } else {
                self.finished = true;
                log::info!(
                    "Session over: {} after {} ticks",
                    report.outcome.as_str(),
                    self.ticks
                );
            }
        }
        report
    }

    /// Step until the session ends or `max_ticks` ticks have been driven
    pub fn run<I, O>(&mut self, input: &mut I, observer: &mut O, max_ticks: u64) -> SessionSummary
    where
        I: InputSource + ?Sized,
        O: SessionObserver + ?Sized,
    {
        while !self.finished && self.ticks < max_ticks {
            self.step(input, observer);
        }
        if !self.finished {
            log::warn!("Tick budget of {} exhausted", max_ticks);
        }
        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            attempts: self.attempts,
            wins: self.wins,
            losses: self.losses,
            ticks: self.ticks,
            outcome: self.engine.outcome(),
        }
    }
}
