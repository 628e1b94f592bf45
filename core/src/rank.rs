//! Maze to index.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::cut::Choice;
use crate::error::{MazeDefect, MazeError};
use crate::maze::Maze;
use crate::table::CountTable;

impl CountTable {
    /// Position of `maze` in the canonical order.
    ///
    /// Replays the recurrence along the maze's own choices, adding up the
    /// mazes reachable through every earlier choice at each cell.
    pub fn rank(&self, maze: &Maze) -> Result<BigUint, MazeError> {
        if maze.grid() != self.grid() {
            return Err(MazeDefect::GridMismatch.into());
        }
        maze.validate()?;

        let sweep = self.sweep();
        let mut rank = BigUint::zero();
        let mut state = 0;

        for step in 0..self.steps() {
            let along = sweep.along_edge(step).is_some_and(|e| maze.bit(e));
            let across = sweep.across_edge(step).is_some_and(|e| maze.bit(e));
            let actual = Choice::new(along, across);

            for choice in Choice::ALL.into_iter().take_while(|&c| c < actual) {
                if let Some(next) = self.successor(step, state, choice) {
                    rank += self.count_at(step + 1, next);
                }
            }

            state = self
                .successor(step, state, actual)
                .ok_or(MazeDefect::Disconnected)?;
        }

        if self.count_at(self.steps(), state).is_zero() {
            return Err(MazeDefect::Disconnected.into());
        }
        Ok(rank)
    }
}
