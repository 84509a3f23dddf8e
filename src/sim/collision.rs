//! Terminal-condition checks
//!
//! Only the actor's current cell is tested; cells crossed between two
//! evaluations are never considered.

use super::board::Board;
use super::state::{Actor, Outcome};

/// Actor occupies a hazard cell
#[inline]
pub fn actor_on_hazard(board: &Board, actor: &Actor) -> bool {
    board.is_hazard(actor.x(), actor.y())
}

/// Actor stands in the goal lane (lane 0)
#[inline]
pub fn actor_at_goal(actor: &Actor) -> bool {
    actor.y() == 0
}

/// Outcome for the current board and actor. A hazard wins over the goal.
pub fn evaluate(board: &Board, actor: &Actor) -> Outcome {
    if actor_on_hazard(board, actor) {
        Outcome::Lost
    } else if actor_at_goal(actor) {
        Outcome::Won
    } else {
        Outcome::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_layout(&["x...", ".x..", "...."], &[0, 0, 0]).unwrap()
    }

    #[test]
    fn test_safe_cell_keeps_playing() {
        assert_eq!(evaluate(&board(), &Actor::new(2, 1)), Outcome::Playing);
        assert_eq!(evaluate(&board(), &Actor::new(0, 2)), Outcome::Playing);
    }

    #[test]
    fn test_hazard_loses() {
        assert!(actor_on_hazard(&board(), &Actor::new(1, 1)));
        assert_eq!(evaluate(&board(), &Actor::new(1, 1)), Outcome::Lost);
    }

    #[test]
    fn test_goal_wins() {
        assert!(actor_at_goal(&Actor::new(3, 0)));
        assert_eq!(evaluate(&board(), &Actor::new(3, 0)), Outcome::Won);
    }

    #[test]
    fn test_hazard_in_goal_lane_loses() {
        assert_eq!(evaluate(&board(), &Actor::new(0, 0)), Outcome::Lost);
    }
}
