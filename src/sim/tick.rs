//! Fixed timestep simulation tick
//!
//! Order within a tick: apply the pending move, scroll lanes if this is a
//! scroll tick, then check the actor's cell against the post-scroll board.

use super::collision;
use super::state::{Direction, Engine, GameEvent, Outcome};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// At most one move per tick
    pub direction: Option<Direction>,
}

impl From<Option<Direction>> for TickInput {
    fn from(direction: Option<Direction>) -> Self {
        Self { direction }
    }
}

/// What happened during one call to `tick`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick index that was evaluated
    pub tick: u64,
    pub outcome: Outcome,
    /// A move was accepted this tick
    pub moved: bool,
    /// Lanes scrolled this tick
    pub scrolled: bool,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// This tick moved the session into LOST or WON
    pub fn entered_terminal(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::Lost { .. } | GameEvent::Won { .. }))
    }
}

/// Advance the engine by one tick
pub fn tick(engine: &mut Engine, input: &TickInput) -> TickReport {
    let tick_index = engine.clock.tick_count();

    // Terminal states are absorbing until reset
    if engine.outcome.is_terminal() {
        return TickReport {
            tick: tick_index,
            outcome: engine.outcome,
            ..Default::default()
        };
    }

    let mut report = TickReport {
        tick: tick_index,
        ..Default::default()
    };

    if let Some(direction) = input.direction {
        let from = engine.actor.pos();
        if engine.try_move(direction) {
            report.moved = true;
            report.events.push(GameEvent::Moved {
                from,
                to: engine.actor.pos(),
            });
        }
    }

    if engine.clock.is_scroll_tick() {
        engine.board.scroll_all();
        report.scrolled = true;
        report.events.push(GameEvent::Scrolled { tick: tick_index });
    }

    engine.outcome = collision::evaluate(&engine.board, &engine.actor);
    match engine.outcome {
        Outcome::Lost => {
            let at = engine.actor.pos();
            log::info!("Hazard hit at ({}, {}) on tick {}", at.x, at.y, tick_index);
            report.events.push(GameEvent::Lost {
                at,
                tick: tick_index,
            });
        }
        Outcome::Won => {
            log::info!("Goal reached on tick {}", tick_index);
            report.events.push(GameEvent::Won { tick: tick_index });
        }
        Outcome::Playing => {}
    }

    engine.clock.advance();
    report.outcome = engine.outcome;

    log::debug!(
        "tick {}: actor=({}, {}) moved={} scrolled={} outcome={}",
        tick_index,
        engine.actor.x(),
        engine.actor.y(),
        report.moved,
        report.scrolled,
        report.outcome.as_str()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::Board;
    use crate::sim::state::ClockPolicy;
    use glam::IVec2;
    use proptest::prelude::*;

    fn engine(rows: &[&str], speeds: &[i32], period: u64) -> Engine {
        Engine::new(Board::from_layout(rows, speeds).unwrap(), period).unwrap()
    }

    #[test]
    fn test_tick_scrolls_lane_without_move() {
        let mut e = engine(&["........", "x.......", "........"], &[0, 2, 0], 1);
        assert_eq!(e.actor().pos(), IVec2::new(4, 2));

        let report = e.advance_tick(None);
        assert_eq!(e.board().lane(1).unwrap().to_layout_string(), "..x.....");
        assert_eq!(e.actor().pos(), IVec2::new(4, 2));
        assert_eq!(report.outcome, Outcome::Playing);
        assert!(report.scrolled);
        assert!(!report.moved);
        assert_eq!(e.tick_count(), 1);
    }

    #[test]
    fn test_tick_move_onto_hazard_loses_same_tick() {
        let mut e = engine(&["........", "..x.....", "........"], &[0, 1, 0], 2);

        // Tick 0 scrolls: hazard 2 -> 3
        let report = e.advance_tick(Some(Direction::Left));
        assert_eq!(report.outcome, Outcome::Playing);
        assert_eq!(e.actor().pos(), IVec2::new(3, 2));
        assert_eq!(e.board().lane(1).unwrap().to_layout_string(), "...x....");

        // Tick 1 does not scroll: stepping up lands on the hazard
        let report = e.advance_tick(Some(Direction::Up));
        assert!(!report.scrolled);
        assert_eq!(report.outcome, Outcome::Lost);
        assert!(report.entered_terminal());
        assert_eq!(
            report.events.last(),
            Some(&GameEvent::Lost {
                at: IVec2::new(3, 1),
                tick: 1
            })
        );

        // Tick 2 would be a scroll tick, but the session is over
        let report = e.advance_tick(None);
        assert!(!report.scrolled);
        assert!(report.events.is_empty());
        assert_eq!(e.board().lane(1).unwrap().to_layout_string(), "...x....");
        assert_eq!(e.tick_count(), 2);
    }

    #[test]
    fn test_hazard_scrolling_into_actor_loses() {
        let mut e = engine(&["....", "....", "x..."], &[0, 0, 2], 1);
        assert_eq!(e.advance_tick(None).outcome, Outcome::Lost);
    }

    #[test]
    fn test_stepping_into_vacated_cell_is_safe() {
        // Hazard at column 2 of lane 1 moves away as the actor steps in
        let mut e = engine(&["....", "..x.", "...."], &[0, 1, 0], 1);
        let report = e.advance_tick(Some(Direction::Up));
        assert_eq!(e.actor().pos(), IVec2::new(2, 1));
        assert_eq!(report.outcome, Outcome::Playing);
    }

    #[test]
    fn test_walk_up_wins_on_goal_lane() {
        let mut e = engine(&["x.....", "......", "x.....", "......"], &[0, 0, 1, 0], 1);
        assert_eq!(e.advance_tick(Some(Direction::Up)).outcome, Outcome::Playing);
        assert_eq!(e.advance_tick(Some(Direction::Up)).outcome, Outcome::Playing);
        let report = e.advance_tick(Some(Direction::Up));
        assert_eq!(e.actor().y(), 0);
        assert_eq!(report.outcome, Outcome::Won);
        assert!(report.events.contains(&GameEvent::Won { tick: 2 }));
    }

    #[test]
    fn test_scroll_only_on_period_ticks() {
        let mut e = engine(&["....", "x...", "...."], &[0, 1, 0], 3);
        for t in 0..9u64 {
            let before = e.board().clone();
            let report = e.advance_tick(None);
            assert_eq!(report.scrolled, t % 3 == 0);
            assert_eq!(e.board() != &before, t % 3 == 0, "tick {}", t);
        }
    }

    #[test]
    fn test_terminal_state_absorbs_ticks_and_moves() {
        let mut e = engine(&["....", "x...", "...."], &[0, 1, 0], 1);
        e.advance_tick(Some(Direction::Up));
        e.advance_tick(Some(Direction::Up));
        assert_eq!(e.outcome(), Outcome::Won);
        assert_eq!(e.board().lane(1).unwrap().to_layout_string(), "..x.");

        let snapshot = e.clone();
        for d in Direction::ALL {
            let report = e.advance_tick(Some(d));
            assert_eq!(report.outcome, Outcome::Won);
            assert!(!report.scrolled);
            assert!(report.events.is_empty());
            assert!(!e.try_move(d));
        }
        // A scroll on any of those ticks would have moved the hazard on
        assert_eq!(e.board().lane(1).unwrap().to_layout_string(), "..x.");
        assert_eq!(e, snapshot);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut e = engine(&["......", "x.x...", "..xx..", "......"], &[0, -1, 2, 0], 1);
        let initial = e.board().clone();
        let start = *e.actor();
        for d in [Direction::Left, Direction::Up, Direction::Right] {
            e.advance_tick(Some(d));
        }
        assert_ne!(e.board(), &initial);

        assert_eq!(e.reset(), GameEvent::Reset);
        assert_eq!(e.board(), &initial);
        assert_eq!(e.actor(), &start);
        assert_eq!(e.outcome(), Outcome::Playing);
        assert_eq!(e.tick_count(), 0);
    }

    #[test]
    fn test_reset_continue_policy_keeps_tick_count() {
        let mut e = engine(&["....", "....", "...."], &[0, 1, 0], 5)
            .with_clock_policy(ClockPolicy::Continue);
        for _ in 0..7 {
            e.advance_tick(None);
        }
        e.reset();
        assert_eq!(e.tick_count(), 7);
        assert_eq!(e.board(), e.initial_board());
    }

    #[test]
    fn test_determinism() {
        let rows = ["xx..xx..", "..xx..x.", "x...x...", "........"];
        let speeds = [0, -1, 2, 0];
        let mut e1 = engine(&rows, &speeds, 2);
        let mut e2 = engine(&rows, &speeds, 2);
        let inputs = [
            Some(Direction::Left),
            None,
            Some(Direction::Up),
            Some(Direction::Right),
            None,
        ];
        for input in inputs {
            let r1 = e1.advance_tick(input);
            let r2 = e2.advance_tick(input);
            assert_eq!(r1, r2);
        }
        assert_eq!(e1, e2);
    }

    /// Random boards whose lane 1 carries a single hazard that moves every scroll
    fn arb_layout() -> impl Strategy<Value = (Vec<String>, Vec<i32>)> {
        (4usize..10, 3usize..7).prop_flat_map(|(width, height)| {
            (
                prop::collection::vec(
                    prop::collection::vec(prop::bool::weighted(0.3), width),
                    height,
                ),
                prop::collection::vec(-3i32..=3, height),
                1i32..=3,
                prop::bool::ANY,
            )
                .prop_map(move |(mut grid, mut speeds, runner, leftward)| {
                    grid[1] = (0..width).map(|x| x == 0).collect();
                    speeds[1] = if leftward { -runner } else { runner };
                    grid[height - 1][width / 2] = false;
                    let rows: Vec<String> = grid
                        .iter()
                        .map(|row| {
                            row.iter()
                                .map(|&h| if h { 'x' } else { '.' })
                                .collect::<String>()
                        })
                        .collect();
                    (rows, speeds)
                })
        })
    }

    fn direction_for(choice: usize) -> Option<Direction> {
        match choice {
            0..=2 => Some(Direction::Up),
            3 => Some(Direction::Down),
            4 => Some(Direction::Left),
            5 => Some(Direction::Right),
            _ => None,
        }
    }

    proptest! {
        #[test]
        fn prop_terminal_absorbs(
            (rows, speeds) in arb_layout(),
            period in 1u64..4,
            choices in prop::collection::vec(0usize..7, 1..80),
        ) {
            let board = Board::from_layout(rows.as_slice(), &speeds).unwrap();
            let mut e = Engine::new(board, period).unwrap();
            let mut settled: Option<Engine> = None;

            for choice in choices {
                let report = e.advance_tick(direction_for(choice));
                if let Some(frozen) = &settled {
                    prop_assert!(report.events.is_empty());
                    prop_assert!(!report.moved && !report.scrolled);
                    prop_assert_eq!(report.outcome, frozen.outcome());
                    prop_assert_eq!(e.tick_count(), frozen.tick_count());
                    prop_assert_eq!(e.actor(), frozen.actor());
                    prop_assert_eq!(e.board(), frozen.board());
                } else if e.outcome().is_terminal() {
                    prop_assert!(report.entered_terminal());
                    settled = Some(e.clone());
                }
            }

            if let Some(frozen) = settled {
                // The frozen board is not scroll-invariant, so a stray scroll would show
                let mut scrolled = frozen.board().clone();
                scrolled.scroll_all();
                prop_assert_ne!(&scrolled, frozen.board());
            }
        }
    }
}
