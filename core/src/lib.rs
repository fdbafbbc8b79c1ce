#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use autoplay::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use grid::*;
pub use group::*;
pub use mode::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod autoplay;
mod engine;
mod error;
mod event;
mod grid;
mod group;
mod mode;
mod snapshot;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, columns)`
    pub size: Coord2,
    pub seed: u64,
    /// Pacing hint forwarded with every [`EngineEvent::Resolved`].
    pub resolve_delay: Duration,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (8, 8);
    pub const DEFAULT_RESOLVE_DELAY: Duration = Duration::from_millis(350);

    pub const fn new_unchecked(size: Coord2, seed: u64) -> Self {
        Self {
            size,
            seed,
            resolve_delay: Self::DEFAULT_RESOLVE_DELAY,
        }
    }

    pub fn new((rows, cols): Coord2, seed: u64) -> Self {
        if rows == 0 || cols == 0 {
            log::warn!("Grid size {rows}x{cols} clamped to at least 1x1");
        }
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        Self::new_unchecked((rows, cols), seed)
    }

    pub const fn with_resolve_delay(mut self, resolve_delay: Duration) -> Self {
        self.resolve_delay = resolve_delay;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_zero_dimensions() {
        let config = GameConfig::new((0, 5), 1);

        assert_eq!(config.size, (1, 5));
        assert_eq!(config.total_cells(), 5);
        assert_eq!(config.resolve_delay, GameConfig::DEFAULT_RESOLVE_DELAY);
    }
}
