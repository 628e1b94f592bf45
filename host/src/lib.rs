//! Host-side services around the maze ranking core.
//!
//! Adds what a long-running program needs on top of the pure algorithms in
//! `maze_rank_core`: a shared table cache with an explicit lifetime,
//! configuration from the environment, random selection, count summaries
//! and JSON records.

pub mod cache;
pub mod config;
pub mod record;

use maze_rank_core::{BigUint, Grid, Maze, MazeError, SeededIndex};
use num_bigint::RandBigInt;
use rand::Rng;
use serde::Serialize;

pub use cache::TableCache;
pub use config::CacheConfig;
pub use record::{load_record, save_record, MazeRecord};

/// The size of a grid's maze space, as printed by the `count` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSummary {
    pub width: usize,
    pub height: usize,
    #[serde(serialize_with = "serialize_decimal")]
    pub count: BigUint,
    /// Bits needed to store any index.
    pub optimal_bits: u64,
    /// Bits of the naive one-bit-per-edge encoding.
    pub naive_bits: u64,
    /// Fraction of the naive encoding saved by storing an index instead.
    pub saving: f64,
}

impl CountSummary {
    pub fn new(width: usize, height: usize, count: BigUint) -> Result<Self, MazeError> {
        let grid = Grid::new(width, height)?;
        let optimal_bits = count.bits();
        let naive_bits = grid.edge_count() as u64;
        let saving = if naive_bits == 0 {
            0.0
        } else {
            1.0 - optimal_bits as f64 / naive_bits as f64
        };
        Ok(Self {
            width,
            height,
            count,
            optimal_bits,
            naive_bits,
            saving,
        })
    }

    /// Count a grid through `cache` and summarise it.
    pub fn compute(cache: &TableCache, width: usize, height: usize) -> Result<Self, MazeError> {
        let count = cache.count(width, height)?;
        Self::new(width, height, count)
    }
}

fn serialize_decimal<S: serde::Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Uniform index in `[0, count)`; `count` is at least one for every grid.
pub fn random_index<R: Rng + ?Sized>(count: &BigUint, rng: &mut R) -> BigUint {
    rng.gen_biguint_below(count)
}

/// A uniformly random maze and its index.
pub fn random_maze<R: Rng + ?Sized>(
    cache: &TableCache,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<(BigUint, Maze), MazeError> {
    let table = cache.table(width, height)?;
    let index = random_index(table.count(), rng);
    tracing::debug!("Drew index {} for {}x{} grid", index, width, height);
    let maze = table.unrank(&index)?;
    Ok((index, maze))
}

/// The maze named by a 32-bit seed, reproducible across runs and platforms.
pub fn seeded_maze(
    cache: &TableCache,
    width: usize,
    height: usize,
    seed: u32,
) -> Result<(BigUint, Maze), MazeError> {
    let table = cache.table(width, height)?;
    let index = SeededIndex::new(seed).below(table.count());
    let maze = table.unrank(&index)?;
    Ok((index, maze))
}
