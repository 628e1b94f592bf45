//! Shared, read-mostly cache of count tables.
//!
//! A table depends only on the grid, so one built table can serve every
//! rank and unrank call for that grid, from any thread. The cache is an
//! explicit value: create it with [`TableCache::new`], share it by reference
//! or `Arc`, and drop or [`clear`](TableCache::clear) it to release memory.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use maze_rank_core::{
    count_by_determinant, BigInt, BigUint, CountTable, Grid, Maze, MazeError,
};

use crate::config::CacheConfig;

#[derive(Default)]
struct Entries {
    tables: HashMap<Grid, Arc<CountTable>>,
    /// Insertion order, oldest first.
    order: VecDeque<Grid>,
}

/// Count tables keyed by grid, evicted oldest-first.
pub struct TableCache {
    config: CacheConfig,
    entries: RwLock<Entries>,
}

impl TableCache {
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            "Creating table cache (max_entries={}, max_span={})",
            config.max_entries,
            config.max_span
        );
        Self {
            config,
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The table for a grid, building it on first use.
    pub fn table(&self, width: usize, height: usize) -> Result<Arc<CountTable>, MazeError> {
        let grid = Grid::new(width, height)?;
        if let Some(table) = self.read().tables.get(&grid) {
            return Ok(Arc::clone(table));
        }

        tracing::info!("Building count table for {}x{} grid", width, height);
        let table = Arc::new(CountTable::build_with_limit(grid, self.config.max_span)?);
        tracing::info!(
            "Count table ready: {} states, {} mazes",
            table.state_count(),
            table.count()
        );

        if self.config.max_entries == 0 {
            return Ok(table);
        }

        let mut entries = self.write();
        // another caller may have built it while we were not holding the lock
        if let Some(existing) = entries.tables.get(&grid) {
            return Ok(Arc::clone(existing));
        }
        while entries.tables.len() >= self.config.max_entries {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.tables.remove(&oldest);
            tracing::debug!("Evicted count table for {}x{}", oldest.width(), oldest.height());
        }
        entries.tables.insert(grid, Arc::clone(&table));
        entries.order.push_back(grid);
        Ok(table)
    }

    /// Number of mazes on the grid; too-wide grids are counted by determinant.
    pub fn count(&self, width: usize, height: usize) -> Result<BigUint, MazeError> {
        match self.table(width, height) {
            Ok(table) => Ok(table.count().clone()),
            Err(MazeError::SpanTooWide { span, max }) => {
                tracing::info!(
                    "Span {} exceeds table limit {}, counting by determinant",
                    span,
                    max
                );
                count_by_determinant(width, height)
            }
            Err(e) => Err(e),
        }
    }

    pub fn unrank(&self, width: usize, height: usize, index: &BigInt) -> Result<Maze, MazeError> {
        self.table(width, height)?.unrank_signed(index)
    }

    /// Rank a maze against the table of its own grid.
    pub fn rank(&self, maze: &Maze) -> Result<BigUint, MazeError> {
        let grid = maze.grid();
        self.table(grid.width(), grid.height())?.rank(maze)
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.read().tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached table.
    pub fn clear(&self) {
        let mut entries = self.write();
        entries.tables.clear();
        entries.order.clear();
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
