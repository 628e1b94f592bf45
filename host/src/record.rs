//! JSON records pairing a maze with its index.

use std::fs;

use maze_rank_core::{BigUint, Grid, Maze, MazeError};
use serde::{Deserialize, Serialize};

/// A maze together with its position in the canonical order.
///
/// `index` is stored as a decimal string since it routinely exceeds every
/// JSON number type; `edges` is the canonical bit string of the maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRecord {
    pub width: usize,
    pub height: usize,
    #[serde(with = "decimal")]
    pub index: BigUint,
    pub edges: String,
}

impl MazeRecord {
    pub fn new(index: BigUint, maze: &Maze) -> Self {
        let grid = maze.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            index,
            edges: maze.to_bit_string(),
        }
    }

    /// Rebuild and validate the maze described by this record.
    pub fn to_maze(&self) -> Result<Maze, MazeError> {
        let grid = Grid::new(self.width, self.height)?;
        Maze::from_bit_string(grid, &self.edges)
    }
}

pub fn save_record(record: &MazeRecord, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_record(path: &str) -> Result<MazeRecord, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;

    // Validate file size (prevent loading gigabytes into memory)
    if json.len() > 10_000_000 {
        return Err("Record file is too large (max 10MB)".into());
    }

    let record: MazeRecord = serde_json::from_str(&json)?;
    Ok(record)
}

/// Serde adapter storing a `BigUint` as a decimal string.
mod decimal {
    use maze_rank_core::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.trim().parse().map_err(de::Error::custom)
    }
}
