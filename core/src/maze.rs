//! Perfect mazes as fixed-order edge bit sets.
//!
//! A maze stores one flag per candidate edge of its grid, in the canonical
//! order of [`Grid::edge_index`]: `true` means the passage is open and the
//! edge belongs to the spanning tree. This is the representation produced by
//! unranking, consumed by ranking and handed to renderers.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{MazeDefect, MazeError};
use crate::grid::{Edge, Grid};

/// A spanning tree of a [`Grid`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Maze {
    grid: Grid,
    bits: Vec<bool>,
}

impl Maze {
    /// Wrap bits produced by the recurrence, which are trees by construction.
    pub(crate) fn from_parts(grid: Grid, bits: Vec<bool>) -> Self {
        let maze = Self { grid, bits };
        debug_assert!(maze.validate().is_ok());
        maze
    }

    /// Build a maze from one flag per candidate edge, checking it is a
    /// spanning tree.
    pub fn from_bits(grid: Grid, bits: Vec<bool>) -> Result<Self, MazeError> {
        if bits.len() != grid.edge_count() {
            return Err(MazeDefect::LengthMismatch {
                expected: grid.edge_count(),
                found: bits.len(),
            }
            .into());
        }
        let maze = Self { grid, bits };
        maze.validate()?;
        Ok(maze)
    }

    /// Parse a string of `0` and `1` characters in canonical edge order.
    pub fn from_bit_string(grid: Grid, s: &str) -> Result<Self, MazeError> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(MazeDefect::InvalidBit(other)),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        Self::from_bits(grid, bits)
    }

    /// Build a maze from its open passages, in any order.
    pub fn from_edges<I>(grid: Grid, edges: I) -> Result<Self, MazeError>
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut bits = vec![false; grid.edge_count()];
        for edge in edges {
            let index = grid.edge_index(edge).ok_or(MazeDefect::GridMismatch)?;
            bits[index] = true;
        }
        Self::from_bits(grid, bits)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub(crate) fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    /// Number of open passages; `W*H - 1` for every valid maze.
    pub fn passage_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn has_edge(&self, edge: Edge) -> bool {
        self.grid.edge_index(edge).is_some_and(|i| self.bits[i])
    }

    /// Open passages in canonical order.
    pub fn open_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &open)| open)
            .filter_map(move |(i, _)| self.grid.edge_at(i))
    }

    /// Check that the open passages form a spanning tree of the grid.
    pub fn validate(&self) -> Result<(), MazeDefect> {
        let expected = self.grid.edge_count();
        if self.bits.len() != expected {
            return Err(MazeDefect::LengthMismatch { expected, found: self.bits.len() });
        }

        let cells = self.grid.cell_count();
        let passages = self.passage_count();
        if passages != cells - 1 {
            return Err(MazeDefect::WrongEdgeCount { expected: cells - 1, found: passages });
        }

        let mut sets = DisjointSet::new(cells);
        for edge in self.open_edges() {
            let ((x0, y0), (x1, y1)) = edge.endpoints();
            let a = self.grid.cell_index(x0, y0);
            let b = self.grid.cell_index(x1, y1);
            if !sets.union(a, b) {
                return Err(MazeDefect::Cycle);
            }
        }

        if sets.components != 1 {
            return Err(MazeDefect::Disconnected);
        }
        Ok(())
    }

    /// Convert the maze to a binary wall grid.
    ///
    /// The result has `2H + 1` rows of `2W + 1` entries: `0` is wall, `1` is
    /// open. Cell `(x, y)` sits at row `2y + 1`, column `2x + 1`; the outer
    /// border is always wall.
    pub fn to_binary_grid(&self) -> Vec<Vec<u8>> {
        let rows = self.grid.height() * 2 + 1;
        let cols = self.grid.width() * 2 + 1;
        let mut grid = vec![vec![0u8; cols]; rows];

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                grid[y * 2 + 1][x * 2 + 1] = 1;
            }
        }
        for edge in self.open_edges() {
            let ((x0, y0), (x1, y1)) = edge.endpoints();
            grid[y0 + y1 + 1][x0 + x1 + 1] = 1;
        }

        grid
    }
}

/// Union-find over cell indices.
struct DisjointSet {
    parent: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect(), components: n }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Join the sets of `a` and `b`; false if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        self.components -= 1;
        true
    }
}
