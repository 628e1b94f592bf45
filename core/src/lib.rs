//! Random access to perfect mazes
//!
//! A perfect maze on a `W` x `H` grid is a spanning tree of the grid graph.
//! This crate counts those trees exactly and maps between mazes and their
//! positions in a fixed total order, without enumerating anything:
//!
//! - [`count`]: number of perfect mazes on the grid
//! - [`unrank`]: the maze at a given index
//! - [`rank`]: the index of a given maze
//!
//! All three replay one transfer recurrence over frontier partitions, see
//! [`CountTable`]. Build a table once to serve many calls for the same grid.
//!
//! The crate is no_std compatible; enable the `std` feature on hosts.

#![no_std]

extern crate alloc;

mod cut;
pub mod determinant;
pub mod error;
pub mod grid;
pub mod maze;
mod rank;
pub mod rng;
pub mod table;
mod unrank;

// Re-export commonly used types for convenience
pub use determinant::count_by_determinant;
pub use error::{MazeDefect, MazeError};
pub use grid::{Edge, Grid, Orientation};
pub use maze::Maze;
pub use num_bigint::{BigInt, BigUint};
pub use rng::SeededIndex;
pub use table::{CountTable, MAX_SPAN};

/// Number of perfect mazes on a `width` x `height` grid.
///
/// Grids whose shorter side exceeds [`MAX_SPAN`] are counted with the
/// determinant method instead of the transfer table.
pub fn count(width: usize, height: usize) -> Result<BigUint, MazeError> {
    let grid = Grid::new(width, height)?;
    match CountTable::build(grid) {
        Ok(table) => Ok(table.count().clone()),
        Err(MazeError::SpanTooWide { .. }) => count_by_determinant(width, height),
        Err(e) => Err(e),
    }
}

/// The maze at position `index`; negative or too-large indices are
/// [`MazeError::OutOfRangeIndex`].
///
/// Grids whose shorter side exceeds [`MAX_SPAN`] hit the capacity limit
/// [`MazeError::SpanTooWide`].
pub fn unrank(width: usize, height: usize, index: &BigInt) -> Result<Maze, MazeError> {
    let table = CountTable::build(Grid::new(width, height)?)?;
    table.unrank_signed(index)
}

/// Position of `maze` among the mazes of a `width` x `height` grid.
///
/// Subject to the same [`MAX_SPAN`] capacity limit as [`unrank`].
pub fn rank(width: usize, height: usize, maze: &Maze) -> Result<BigUint, MazeError> {
    let table = CountTable::build(Grid::new(width, height)?)?;
    table.rank(maze)
}

/// The maze named by a 32-bit seed: a seeded draw below the count, unranked.
pub fn maze_from_seed(width: usize, height: usize, seed: u32) -> Result<Maze, MazeError> {
    let table = CountTable::build(Grid::new(width, height)?)?;
    let index = SeededIndex::new(seed).below(table.count());
    table.unrank(&index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_count_small_grids() {
        assert_eq!(count(1, 1).unwrap(), BigUint::one());
        assert_eq!(count(2, 2).unwrap(), BigUint::from(4u32));
        assert_eq!(count(2, 3).unwrap(), BigUint::from(15u32));
        assert_eq!(count(9, 1).unwrap(), BigUint::one());
    }

    #[test]
    fn test_count_invalid_dimensions() {
        assert_eq!(
            count(0, 5).unwrap_err(),
            MazeError::InvalidDimensions { width: 0, height: 5 }
        );
        assert!(unrank(3, 0, &BigInt::from(0)).is_err());
    }

    #[test]
    fn test_count_overflowing_dimensions() {
        assert_eq!(
            count(usize::MAX, 2).unwrap_err(),
            MazeError::InvalidDimensions { width: usize::MAX, height: 2 }
        );
        assert!(rank(2, usize::MAX, &unrank(2, 2, &BigInt::from(0)).unwrap()).is_err());
        assert!(unrank(usize::MAX, usize::MAX, &BigInt::from(0)).is_err());
    }

    #[test]
    fn test_wide_grid_falls_back_to_determinant() {
        let side = MAX_SPAN + 1;
        let wide = count(side, side).unwrap();
        assert_eq!(wide, count_by_determinant(side, side).unwrap());
        // grows strictly with the grid
        assert!(wide > count_by_determinant(side, side - 1).unwrap());
        assert_eq!(
            unrank(side, side, &BigInt::from(0)).unwrap_err(),
            MazeError::SpanTooWide { span: side, max: MAX_SPAN }
        );
    }

    #[test]
    fn test_unrank_bounds() {
        let last = unrank(2, 2, &BigInt::from(3)).unwrap();
        assert_eq!(rank(2, 2, &last).unwrap(), BigUint::from(3u32));
        assert_eq!(
            unrank(2, 2, &BigInt::from(4)).unwrap_err(),
            MazeError::OutOfRangeIndex { index: BigInt::from(4), count: BigUint::from(4u32) }
        );
        assert!(matches!(
            unrank(2, 2, &BigInt::from(-1)),
            Err(MazeError::OutOfRangeIndex { .. })
        ));
    }

    #[test]
    fn test_maze_from_seed() {
        let a = maze_from_seed(6, 5, 2918957128).unwrap();
        let b = maze_from_seed(6, 5, 2918957128).unwrap();
        assert_eq!(a, b);
        assert!(a.validate().is_ok());
        assert_eq!(a.passage_count(), 29);
    }

    #[test]
    fn test_count_monotone() {
        for w in 1..6 {
            for h in 1..6 {
                let c = count(w, h).unwrap();
                assert!(count(w + 1, h).unwrap() >= c);
                assert!(count(w, h + 1).unwrap() >= c);
            }
        }
    }
}
