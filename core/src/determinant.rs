//! Maze counting through the planar dual of the grid.
//!
//! By the matrix-tree theorem the number of spanning trees equals the
//! determinant of the dual graph's reduced Laplacian. With the outer face
//! dropped, that Laplacian is block tridiagonal: `H-1` block rows of size
//! `W-1`, the tridiagonal matrix `M` (4 on the diagonal, -1 beside it) on
//! the block diagonal and `-I` next to it. Its determinant is `det(U_H)`
//! for the block recurrence
//!
//! ```text
//! U_0 = 0,  U_1 = I,  U_{k+1} = M U_k - U_{k-1}
//! ```
//!
//! Every `U_k` is a polynomial in `M`, so all of them are symmetric and
//! commute. `U_H` is reached in `log2(H)` doubling steps:
//!
//! ```text
//! U_{2k-1} = U_k^2 - U_{k-1}^2
//! U_{2k}   = U_k (U_{k+1} - U_{k-1})
//! ```
//!
//! and one fraction-free Bareiss elimination of the `(W-1)`-square result
//! gives the count. Independent of the transfer table, this also covers
//! grids too wide for [`CountTable`](crate::CountTable).

use alloc::vec::Vec;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::error::MazeError;
use crate::grid::Grid;

/// `n`-th triangular number, the offset of row `n` in packed storage.
fn tri(n: usize) -> usize {
    n * (n + 1) / 2
}

/// A symmetric matrix, lower triangle packed row by row.
#[derive(Clone, Debug, PartialEq)]
struct SymMatrix {
    n: usize,
    entries: Vec<BigInt>,
}

impl SymMatrix {
    fn zero(n: usize) -> Self {
        Self { n, entries: alloc::vec![BigInt::zero(); tri(n)] }
    }

    /// `value` times the identity.
    fn scalar(n: usize, value: i32) -> Self {
        let mut m = Self::zero(n);
        for i in 0..n {
            m.entries[tri(i) + i] = BigInt::from(value);
        }
        m
    }

    fn at(&self, i: usize, j: usize) -> &BigInt {
        let (i, j) = if i < j { (j, i) } else { (i, j) };
        &self.entries[tri(i) + j]
    }

    fn at_mut(&mut self, i: usize, j: usize) -> &mut BigInt {
        let (i, j) = if i < j { (j, i) } else { (i, j) };
        &mut self.entries[tri(i) + j]
    }

    /// Product of two commuting symmetric matrices, itself symmetric.
    fn mul(&self, other: &Self) -> Self {
        let mut out = Self::zero(self.n);
        for i in 0..self.n {
            for j in 0..=i {
                let cell = &mut out.entries[tri(i) + j];
                for k in 0..self.n {
                    *cell += self.at(i, k) * other.at(k, j);
                }
            }
        }
        out
    }

    /// `M * self` for the tridiagonal `M` with 4 on the diagonal and -1 on
    /// both neighbouring diagonals.
    fn mul_tridiagonal(&self) -> Self {
        let n = self.n;
        let mut out = Self::zero(n);
        for i in 0..n {
            for j in 0..=i {
                let mut cell: BigInt = self.at(i, j) << 2u32;
                if i > 0 {
                    cell -= self.at(i - 1, j);
                }
                if i + 1 < n {
                    cell -= self.at(i + 1, j);
                }
                out.entries[tri(i) + j] = cell;
            }
        }
        out
    }

    fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.entries.iter_mut().zip(&other.entries) {
            *a -= b;
        }
    }

    /// Determinant by Bareiss elimination on the lower triangle.
    ///
    /// Symmetric elimination keeps the matrix symmetric, so `(j, k)` with
    /// `j > k` stands in for `(k, j)`. Leading minors must be nonzero,
    /// which holds for positive definite input.
    fn determinant(mut self) -> BigInt {
        let n = self.n;
        if n == 0 {
            return BigInt::one();
        }

        let mut previous = BigInt::one();
        for k in 0..n - 1 {
            let pivot = self.at(k, k).clone();
            for i in k + 1..n {
                let mik = self.at(i, k).clone();
                for j in k + 1..=i {
                    let updated = (self.at(i, j) * &pivot - &mik * self.at(j, k)) / &previous;
                    *self.at_mut(i, j) = updated;
                }
            }
            previous = pivot;
        }
        self.at(n - 1, n - 1).clone()
    }
}

/// `U_height` of the block recurrence, with blocks of size `n`.
fn dual_block(n: usize, height: usize) -> SymMatrix {
    // (a, b, c) = (U_{k-1}, U_k, U_{k+1}), starting from k = 0
    let mut a = SymMatrix::scalar(n, -1);
    let mut b = SymMatrix::zero(n);
    let mut c = SymMatrix::scalar(n, 1);

    for shift in (0..usize::BITS - height.leading_zeros()).rev() {
        // k -> 2k
        let mut doubled_a = b.mul(&b);
        doubled_a.sub_assign(&a.mul(&a));
        let mut doubled_b = b.mul(&c);
        doubled_b.sub_assign(&a.mul(&b));
        a = doubled_a;
        b = doubled_b;

        // k -> k + 1
        if (height >> shift) & 1 == 1 {
            let mut next = b.mul_tridiagonal();
            next.sub_assign(&a);
            a = core::mem::replace(&mut b, next);
        }

        c = b.mul_tridiagonal();
        c.sub_assign(&a);
    }
    b
}

/// Number of perfect mazes on a `width` x `height` grid.
pub fn count_by_determinant(width: usize, height: usize) -> Result<BigUint, MazeError> {
    Grid::new(width, height)?;
    // the count is symmetric; keep the blocks small and the recurrence long
    let (short, long) = if width <= height { (width, height) } else { (height, width) };
    let det = dual_block(short - 1, long).determinant();
    tracing::debug!(width, height, bits = det.bits(), "counted by determinant");
    // the dual's reduced Laplacian is positive definite
    Ok(det.to_biguint().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CountTable;

    #[test]
    fn test_known_counts() {
        assert_eq!(count_by_determinant(1, 1).unwrap(), BigUint::one());
        assert_eq!(count_by_determinant(2, 2).unwrap(), BigUint::from(4u32));
        assert_eq!(count_by_determinant(3, 3).unwrap(), BigUint::from(192u32));
        assert_eq!(count_by_determinant(4, 4).unwrap(), BigUint::from(100_352u32));
        assert_eq!(count_by_determinant(5, 5).unwrap(), BigUint::from(557_568_000u32));
    }

    #[test]
    fn test_ladders() {
        let expected = [1u32, 4, 15, 56, 209, 780];
        for (i, &n) in expected.iter().enumerate() {
            assert_eq!(count_by_determinant(2, i + 1).unwrap(), BigUint::from(n));
            assert_eq!(count_by_determinant(i + 1, 2).unwrap(), BigUint::from(n));
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(count_by_determinant(7, 1).unwrap(), BigUint::one());
        assert_eq!(count_by_determinant(1, 7).unwrap(), BigUint::one());
    }

    #[test]
    fn test_recurrence_matches_iteration() {
        // U_{k+1} = M U_k - U_{k-1}, stepped one block row at a time
        let n = 3;
        let mut previous = SymMatrix::zero(n);
        let mut current = SymMatrix::scalar(n, 1);
        for height in 1..=17 {
            assert_eq!(dual_block(n, height), current, "U_{height}");
            let mut next = current.mul_tridiagonal();
            next.sub_assign(&previous);
            previous = core::mem::replace(&mut current, next);
        }
    }

    #[test]
    fn test_agrees_with_transfer_table() {
        for width in 1..9 {
            for height in 1..8 {
                let grid = Grid::new(width, height).unwrap();
                let table = CountTable::build(grid).unwrap();
                assert_eq!(
                    &count_by_determinant(width, height).unwrap(),
                    table.count(),
                    "{width}x{height}"
                );
            }
        }
    }

    #[test]
    fn test_large_grid() {
        let count = count_by_determinant(30, 30).unwrap();
        assert_eq!(count.bits(), 1437);
        assert_eq!(count_by_determinant(30, 29).unwrap(), count_by_determinant(29, 30).unwrap());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            count_by_determinant(0, 4).unwrap_err(),
            MazeError::InvalidDimensions { width: 0, height: 4 }
        );
        assert!(count_by_determinant(usize::MAX, 3).is_err());
    }
}
