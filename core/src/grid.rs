//! The rectangular lattice, its candidate edges and their canonical numbering.
//!
//! Edges are numbered horizontal-first:
//! - horizontal edge `(x,y)-(x+1,y)` has index `y * (W-1) + x`
//! - vertical edge `(x,y)-(x,y+1)` has index `(W-1) * H + y * W + x`
//!
//! This numbering is the bit order of every [`Maze`](crate::Maze) and must
//! never change: stored indices and bit strings depend on it.

use crate::error::MazeError;

/// Direction of a candidate edge, named after the axis it runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Joins `(x,y)` to `(x+1,y)`.
    Horizontal,
    /// Joins `(x,y)` to `(x,y+1)`.
    Vertical,
}

/// A candidate edge, identified by its top-left endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub x: usize,
    pub y: usize,
    pub orientation: Orientation,
}

impl Edge {
    pub const fn horizontal(x: usize, y: usize) -> Self {
        Self { x, y, orientation: Orientation::Horizontal }
    }

    pub const fn vertical(x: usize, y: usize) -> Self {
        Self { x, y, orientation: Orientation::Vertical }
    }

    /// Both cells joined by this edge, top-left one first.
    pub fn endpoints(&self) -> ((usize, usize), (usize, usize)) {
        match self.orientation {
            Orientation::Horizontal => ((self.x, self.y), (self.x + 1, self.y)),
            Orientation::Vertical => ((self.x, self.y), (self.x, self.y + 1)),
        }
    }
}

/// A `width` x `height` grid of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid, rejecting empty dimensions and grids whose cell or
    /// edge count does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        // edge count is 2WH - W - H, so 2WH bounds every size derived below
        width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(2))
            .ok_or(MazeError::InvalidDimensions { width, height })?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of cell `(x, y)`.
    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn horizontal_edge_count(&self) -> usize {
        (self.width - 1) * self.height
    }

    /// Number of candidate edges, i.e. the length of a maze bit vector.
    pub fn edge_count(&self) -> usize {
        self.horizontal_edge_count() + self.width * (self.height - 1)
    }

    /// Canonical index of `edge`, or `None` if it does not lie in this grid.
    pub fn edge_index(&self, edge: Edge) -> Option<usize> {
        match edge.orientation {
            Orientation::Horizontal if edge.x < self.width - 1 && edge.y < self.height => {
                Some(edge.y * (self.width - 1) + edge.x)
            }
            Orientation::Vertical if edge.x < self.width && edge.y < self.height - 1 => {
                Some(self.horizontal_edge_count() + edge.y * self.width + edge.x)
            }
            _ => None,
        }
    }

    /// Inverse of [`Grid::edge_index`].
    pub fn edge_at(&self, index: usize) -> Option<Edge> {
        let horizontal = self.horizontal_edge_count();
        if index < horizontal {
            let row = self.width - 1;
            Some(Edge::horizontal(index % row, index / row))
        } else if index < self.edge_count() {
            let i = index - horizontal;
            Some(Edge::vertical(i % self.width, i / self.width))
        } else {
            None
        }
    }

    /// All candidate edges in canonical order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.edge_count()).filter_map(move |i| self.edge_at(i))
    }

    /// The slice-by-slice visiting order used by the count engine.
    pub(crate) fn sweep(&self) -> Sweep {
        Sweep::new(*self)
    }
}

/// Visiting order of the transfer recurrence.
///
/// The frontier runs along the shorter side of the grid: with `H <= W` the
/// slices are columns, otherwise rows. Step `k` visits position `k % span`
/// of slice `k / span`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sweep {
    grid: Grid,
    columns: bool,
    span: usize,
}

impl Sweep {
    fn new(grid: Grid) -> Self {
        let columns = grid.height <= grid.width;
        let span = if columns { grid.height } else { grid.width };
        Self { grid, columns, span }
    }

    pub(crate) fn span(&self) -> usize {
        self.span
    }

    pub(crate) fn steps(&self) -> usize {
        self.grid.cell_count()
    }

    /// `(slice, position)` visited at `step`.
    pub(crate) fn locate(&self, step: usize) -> (usize, usize) {
        (step / self.span, step % self.span)
    }

    /// Edge to the previous position of the same slice.
    pub(crate) fn along_edge(&self, step: usize) -> Option<usize> {
        let (slice, pos) = self.locate(step);
        if pos == 0 {
            return None;
        }
        let edge = if self.columns {
            Edge::vertical(slice, pos - 1)
        } else {
            Edge::horizontal(pos - 1, slice)
        };
        self.grid.edge_index(edge)
    }

    /// Edge to the same position of the previous slice.
    pub(crate) fn across_edge(&self, step: usize) -> Option<usize> {
        let (slice, pos) = self.locate(step);
        if slice == 0 {
            return None;
        }
        let edge = if self.columns {
            Edge::horizontal(slice - 1, pos)
        } else {
            Edge::vertical(pos, slice - 1)
        };
        self.grid.edge_index(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 3),
            Err(MazeError::InvalidDimensions { width: 0, height: 3 })
        );
        assert!(Grid::new(4, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(MazeError::InvalidDimensions { width: usize::MAX, height: 2 })
        );
        // the cell count fits but the edge count would not
        let half = usize::MAX / 2 + 1;
        assert!(Grid::new(half, 1).is_err());
        assert!(Grid::new(1 << 15, 1 << 15).is_ok());
    }

    #[test]
    fn test_edge_count() {
        assert_eq!(Grid::new(1, 1).unwrap().edge_count(), 0);
        assert_eq!(Grid::new(2, 2).unwrap().edge_count(), 4);
        assert_eq!(Grid::new(3, 2).unwrap().edge_count(), 7);
        assert_eq!(Grid::new(5, 1).unwrap().edge_count(), 4);
    }

    #[test]
    fn test_edge_numbering_is_horizontal_first() {
        let grid = Grid::new(3, 2).unwrap();
        let edges: Vec<Edge> = grid.edges().collect();
        assert_eq!(
            edges,
            [
                Edge::horizontal(0, 0),
                Edge::horizontal(1, 0),
                Edge::horizontal(0, 1),
                Edge::horizontal(1, 1),
                Edge::vertical(0, 0),
                Edge::vertical(1, 0),
                Edge::vertical(2, 0),
            ]
        );
        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(grid.edge_index(*edge), Some(i));
        }
    }

    #[test]
    fn test_edges_outside_grid() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.edge_index(Edge::horizontal(2, 0)), None);
        assert_eq!(grid.edge_index(Edge::vertical(0, 1)), None);
        assert_eq!(grid.edge_at(7), None);
        assert_eq!(grid.edge_index(Edge::horizontal(usize::MAX, 0)), None);
        assert_eq!(grid.edge_index(Edge::vertical(0, usize::MAX)), None);
    }

    #[test]
    fn test_sweep_follows_shorter_side() {
        // 3 wide, 2 high: columns of height 2
        let sweep = Grid::new(3, 2).unwrap().sweep();
        assert_eq!(sweep.span(), 2);
        assert_eq!(sweep.locate(3), (1, 1));
        assert_eq!(sweep.along_edge(0), None);
        assert_eq!(sweep.across_edge(0), None);
        // cell (1,1): along = vertical (1,0), across = horizontal (0,1)
        assert_eq!(sweep.along_edge(3), Some(5));
        assert_eq!(sweep.across_edge(3), Some(2));

        // 2 wide, 3 high: rows of width 2
        let grid = Grid::new(2, 3).unwrap();
        let sweep = grid.sweep();
        assert_eq!(sweep.span(), 2);
        // step 3 is cell (1,1): along = horizontal (0,1), across = vertical (1,0)
        assert_eq!(sweep.along_edge(3), grid.edge_index(Edge::horizontal(0, 1)));
        assert_eq!(sweep.across_edge(3), grid.edge_index(Edge::vertical(1, 0)));
    }
}
