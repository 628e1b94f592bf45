//! Index to maze.

use alloc::vec;

use num_bigint::{BigInt, BigUint};

use crate::cut::Choice;
use crate::error::MazeError;
use crate::maze::Maze;
use crate::table::CountTable;

impl CountTable {
    /// The maze at position `index` of the canonical order.
    ///
    /// At every cell the choices are tried in canonical order; a choice is
    /// taken once the remaining index falls below the number of mazes that
    /// follow it, otherwise that number is subtracted and the next choice is
    /// tried.
    pub fn unrank(&self, index: &BigUint) -> Result<Maze, MazeError> {
        let total = self.count();
        if index >= total {
            return Err(MazeError::OutOfRangeIndex {
                index: BigInt::from(index.clone()),
                count: total.clone(),
            });
        }

        let grid = self.grid();
        let sweep = self.sweep();
        let mut bits = vec![false; grid.edge_count()];
        let mut remaining = index.clone();
        let mut state = 0;

        for step in 0..self.steps() {
            let mut taken = None;
            for choice in Choice::ALL {
                let Some(next) = self.successor(step, state, choice) else {
                    continue;
                };
                let weight = self.count_at(step + 1, next);
                if remaining < *weight {
                    taken = Some((choice, next));
                    break;
                }
                remaining -= weight;
            }

            // every state's count is the sum of its successors' counts
            let Some((choice, next)) = taken else {
                unreachable!("remaining index exceeds the mazes below step {step}");
            };

            if let (true, Some(edge)) = (choice.along(), sweep.along_edge(step)) {
                bits[edge] = true;
            }
            if let (true, Some(edge)) = (choice.across(), sweep.across_edge(step)) {
                bits[edge] = true;
            }
            state = next;
        }

        Ok(Maze::from_parts(grid, bits))
    }

    /// Like [`CountTable::unrank`] for a signed index; negative indices are
    /// out of range.
    pub fn unrank_signed(&self, index: &BigInt) -> Result<Maze, MazeError> {
        match index.to_biguint() {
            Some(index) => self.unrank(&index),
            None => Err(MazeError::OutOfRangeIndex {
                index: index.clone(),
                count: self.count().clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::string::String;

    use num_traits::One;

    use super::*;
    use crate::grid::Grid;

    fn table(width: usize, height: usize) -> CountTable {
        CountTable::build(Grid::new(width, height).unwrap()).unwrap()
    }

    #[test]
    fn test_2x2_enumerates_every_tree() {
        let table = table(2, 2);
        let mazes: BTreeSet<String> = (0u32..4)
            .map(|i| table.unrank(&BigUint::from(i)).unwrap().to_bit_string())
            .collect();
        let expected: BTreeSet<String> = ["0111", "1011", "1101", "1110"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(mazes, expected);
    }

    #[test]
    fn test_first_and_last_index() {
        let table = table(4, 3);
        let last = table.count() - BigUint::one();
        let first = table.unrank(&BigUint::from(0u32)).unwrap();
        let final_maze = table.unrank(&last).unwrap();
        assert!(first.validate().is_ok());
        assert!(final_maze.validate().is_ok());
        assert_ne!(first, final_maze);
    }

    #[test]
    fn test_out_of_range() {
        let table = table(2, 2);
        assert_eq!(
            table.unrank(&BigUint::from(4u32)).unwrap_err(),
            MazeError::OutOfRangeIndex { index: BigInt::from(4), count: BigUint::from(4u32) }
        );
        assert_eq!(
            table.unrank_signed(&BigInt::from(-1)).unwrap_err(),
            MazeError::OutOfRangeIndex { index: BigInt::from(-1), count: BigUint::from(4u32) }
        );
        assert!(table.unrank_signed(&BigInt::from(3)).is_ok());
    }

    #[test]
    fn test_paths_have_one_maze() {
        let maze = table(5, 1).unrank(&BigUint::from(0u32)).unwrap();
        assert_eq!(maze.to_bit_string(), "1111");
        let maze = table(1, 4).unrank(&BigUint::from(0u32)).unwrap();
        assert_eq!(maze.to_bit_string(), "111");
    }
}
