use alloc::string::String;
use alloc::vec::Vec;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Portable copy of a grid: tile values in row-major order plus dimensions.
/// Used to keep a finished game's board for later display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: Coord,
    pub height: Coord,
    pub tiles: Vec<Option<Tile>>,
}

impl Snapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        let (height, width) = grid.size();
        Self {
            width,
            height,
            tiles: grid.cells().iter().copied().collect(),
        }
    }

    pub fn to_grid(&self) -> Result<Grid> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidSnapshot);
        }
        let shape = (usize::from(self.height), usize::from(self.width));
        let cells = Array2::from_shape_vec(shape, self.tiles.clone()).map_err(|err| {
            log::debug!("Snapshot rejected: {err}");
            GameError::InvalidSnapshot
        })?;
        Ok(Grid::from_cells(cells))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            log::warn!("Snapshot could not be encoded: {err}");
            GameError::MalformedSnapshot
        })
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(data).map_err(|err| {
            log::debug!("Snapshot could not be decoded: {err}");
            GameError::MalformedSnapshot
        })?;
        // shape check up front so a bad record fails here, not on display
        snapshot.to_grid()?;
        Ok(snapshot)
    }
}

impl Grid {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_grid(self)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        snapshot.to_grid()
    }
}
