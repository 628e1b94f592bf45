//! The count engine: a layered transfer table over cut states.
//!
//! Layer `k` holds every cut state reachable after visiting `k` cells, and
//! for each state the arena index of its successor under each choice. A
//! backward pass then gives each state the number of ways to finish the
//! maze from it. The table is built iteratively, so its depth is bounded by
//! memory rather than the call stack.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::cut::{Choice, CutState};
use crate::error::MazeError;
use crate::grid::{Grid, Sweep};

/// Widest frontier the transfer table accepts by default.
///
/// The number of cut states grows like the Catalan numbers of the span.
pub const MAX_SPAN: usize = 10;

/// Successor arena indices, one slot per [`Choice`].
type Links = [Option<u32>; 4];

/// Precomputed counts for one grid, shared by ranking and unranking.
#[derive(Debug, Clone)]
pub struct CountTable {
    grid: Grid,
    sweep: Sweep,
    /// `links[k][s]`: successors of state `s` of layer `k`.
    links: Vec<Vec<Links>>,
    /// `counts[k][s]`: mazes completing state `s` of layer `k`.
    counts: Vec<Vec<BigUint>>,
}

impl CountTable {
    /// Build the table for `grid` with the default span limit.
    pub fn build(grid: Grid) -> Result<Self, MazeError> {
        Self::build_with_limit(grid, MAX_SPAN)
    }

    /// Build the table, refusing grids whose shorter side exceeds `max_span`.
    pub fn build_with_limit(grid: Grid, max_span: usize) -> Result<Self, MazeError> {
        let sweep = grid.sweep();
        let span = sweep.span();
        // labels are u8 and u8::MAX is reserved
        let max = max_span.min(u8::MAX as usize - 1);
        if span > max {
            return Err(MazeError::SpanTooWide { span, max });
        }

        let steps = sweep.steps();
        let mut links: Vec<Vec<Links>> = Vec::with_capacity(steps);
        let mut layer = vec![CutState::empty(span)];

        for step in 0..steps {
            let (slice, pos) = sweep.locate(step);
            let mut next: Vec<CutState> = Vec::new();
            let mut arena: BTreeMap<CutState, u32> = BTreeMap::new();
            let mut layer_links = Vec::with_capacity(layer.len());

            for state in &layer {
                let mut row: Links = [None; 4];
                for choice in Choice::ALL {
                    let Some(succ) = state.advance(pos, slice > 0, choice) else {
                        continue;
                    };
                    let id = match arena.get(&succ) {
                        Some(&id) => id,
                        None => {
                            let id = next.len() as u32;
                            arena.insert(succ.clone(), id);
                            next.push(succ);
                            id
                        }
                    };
                    row[choice.index()] = Some(id);
                }
                layer_links.push(row);
            }

            links.push(layer_links);
            layer = next;
        }

        let mut counts: Vec<Vec<BigUint>> = vec![Vec::new(); steps + 1];
        counts[steps] = layer
            .iter()
            .map(|s| if s.is_connected() { BigUint::one() } else { BigUint::zero() })
            .collect();

        for step in (0..steps).rev() {
            let later = &counts[step + 1];
            let current: Vec<BigUint> = links[step]
                .iter()
                .map(|row| row.iter().flatten().map(|&id| &later[id as usize]).sum())
                .collect();
            counts[step] = current;
        }

        let table = Self { grid, sweep, links, counts };
        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            span,
            states = table.state_count(),
            "built count table"
        );
        Ok(table)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of perfect mazes on the grid.
    pub fn count(&self) -> &BigUint {
        &self.counts[0][0]
    }

    /// Total number of cut states over all layers.
    pub fn state_count(&self) -> usize {
        self.counts.iter().map(Vec::len).sum()
    }

    pub(crate) fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    pub(crate) fn steps(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn successor(&self, step: usize, state: usize, choice: Choice) -> Option<usize> {
        self.links[step][state][choice.index()].map(|id| id as usize)
    }

    /// Mazes completing `state` of layer `step`.
    pub(crate) fn count_at(&self, step: usize, state: usize) -> &BigUint {
        &self.counts[step][state]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_of(width: usize, height: usize) -> BigUint {
        let grid = Grid::new(width, height).unwrap();
        CountTable::build(grid).unwrap().count().clone()
    }

    #[test]
    fn test_single_row_or_column_is_a_path() {
        for n in 1..8 {
            assert_eq!(count_of(n, 1), BigUint::one());
            assert_eq!(count_of(1, n), BigUint::one());
        }
    }

    #[test]
    fn test_known_counts() {
        assert_eq!(count_of(2, 2), BigUint::from(4u32));
        assert_eq!(count_of(3, 3), BigUint::from(192u32));
        assert_eq!(count_of(4, 4), BigUint::from(100_352u32));
        assert_eq!(count_of(5, 5), BigUint::from(557_568_000u64));
    }

    #[test]
    fn test_ladder_counts() {
        let expected = [1u32, 4, 15, 56, 209, 780];
        for (i, &n) in expected.iter().enumerate() {
            assert_eq!(count_of(i + 1, 2), BigUint::from(n));
            assert_eq!(count_of(2, i + 1), BigUint::from(n));
        }
    }

    #[test]
    fn test_symmetric_in_width_and_height() {
        assert_eq!(count_of(3, 5), count_of(5, 3));
        assert_eq!(count_of(4, 6), count_of(6, 4));
    }

    #[test]
    fn test_span_limit() {
        let grid = Grid::new(20, 5).unwrap();
        assert_eq!(
            CountTable::build_with_limit(grid, 4).unwrap_err(),
            MazeError::SpanTooWide { span: 5, max: 4 }
        );
        assert!(CountTable::build_with_limit(grid, 5).is_ok());
    }

    #[test]
    fn test_state_count_is_bounded() {
        let table = CountTable::build(Grid::new(6, 4).unwrap()).unwrap();
        // one root, one final layer, a handful of partitions of 4 in between
        assert!(table.state_count() > 24);
        assert!(table.state_count() < 24 * 64);
    }
}
