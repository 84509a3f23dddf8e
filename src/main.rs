//! Lane Hopper entry point
//!
//! Headless demo driver: the autopilot plays a session against the engine,
//! optionally paced in real time, printing a text frame after every tick.
//!
//! Usage:
//!   lane-hopper --seed 7 --retries 3
//!   RUST_LOG=debug lane-hopper --config board.json --realtime
//!   lane-hopper --quiet --json --retries 2 --replay-wins

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use lane_hopper::platform::{FixedStep, InputSource};
use lane_hopper::renderer::render_frame;
use lane_hopper::session::LogObserver;
use lane_hopper::sim::Autopilot;
use lane_hopper::{Engine, Outcome, Session, SessionObserver, Settings, TickReport};

#[derive(Parser, Debug)]
#[command(name = "lane-hopper")]
#[command(about = "Run a lane-crossing session driven by the autopilot")]
struct Args {
    /// JSON settings file (reference board when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Autopilot seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Tick budget across all attempts
    #[arg(long, default_value_t = 5_000)]
    max_ticks: u64,

    /// Override the tick interval (ms)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Losses answered with a reset
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Also answer wins with a reset (shares the --retries budget)
    #[arg(long)]
    replay_wins: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Pace ticks at the configured interval instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print only the final frame and summary
    #[arg(long)]
    quiet: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Prints frames and forwards cues to the log
struct Console {
    quiet: bool,
    cues: LogObserver,
}

impl SessionObserver for Console {
    fn on_tick(&mut self, engine: &Engine, report: &TickReport) {
        self.cues.on_tick(engine, report);
        if !self.quiet {
            print!("{}", render_frame(engine));
        }
    }

    fn on_outcome(&mut self, engine: &Engine, outcome: Outcome) {
        self.cues.on_outcome(engine, outcome);
        if !self.quiet {
            match outcome {
                Outcome::Lost => println!("\nGAME OVER\n"),
                Outcome::Won => println!("\nCONGRATULATIONS!\nYOU WIN\n"),
                Outcome::Playing => {}
            }
        }
    }

    fn on_reset(&mut self, _engine: &Engine) {
        if !self.quiet {
            println!("Play again...\n");
        }
    }
}

fn run_realtime(
    session: &mut Session,
    input: &mut dyn InputSource,
    observer: &mut Console,
    pacer: &mut FixedStep,
    max_ticks: u64,
) {
    let mut last = Instant::now();
    let mut driven = 0;
    while !session.is_finished() && driven < max_ticks {
        std::thread::sleep(pacer.until_next());
        let now = Instant::now();
        let due = pacer.advance(now - last);
        last = now;
        for _ in 0..due {
            if session.is_finished() || driven >= max_ticks {
                break;
            }
            let report = session.step(&mut *input, &mut *observer);
            driven += 1;
            if report.entered_terminal() && !session.is_finished() {
                // Retried attempt starts on a fresh cadence
                pacer.reset();
                last = Instant::now();
                break;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(ms) = args.tick_ms {
        settings.tick_interval_ms = ms;
    }

    if args.dump_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let mut session = Session::from_settings(&settings, args.retries)
        .context("invalid board configuration")?
        .with_replay_wins(args.replay_wins);
    let mut autopilot = Autopilot::new(args.seed);
    let mut console = Console {
        quiet: args.quiet,
        cues: LogObserver,
    };

    log::info!(
        "Lane Hopper starting: {}x{} board, scroll every {} ticks, seed {}",
        session.engine().board().width(),
        session.engine().board().height(),
        settings.scroll_period,
        args.seed
    );

    if args.realtime {
        let mut pacer = FixedStep::from_settings(&settings);
        run_realtime(
            &mut session,
            &mut autopilot,
            &mut console,
            &mut pacer,
            args.max_ticks,
        );
    } else {
        session.run(&mut autopilot, &mut console, args.max_ticks);
    }

    let summary = session.summary();
    if args.quiet {
        print!("{}", render_frame(session.engine()));
    }
    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }
    println!(
        "{} | attempts {} | wins {} | losses {} | ticks {}",
        summary.outcome.as_str(),
        summary.attempts,
        summary.wins,
        summary.losses,
        summary.ticks
    );
    Ok(())
}
