use alloc::format;
use alloc::string::String;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::*;

/// Two neighbours link when their values add up to the target. A group is a
/// chain of such links and every link in it scores the target once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeNMode {
    target: u8,
    name: String,
}

impl MakeNMode {
    pub const DEFAULT_TARGET: u8 = 13;
    pub const MIN_TARGET: u8 = 2;

    pub fn new(target: u8) -> Self {
        let target = if target < Self::MIN_TARGET {
            log::warn!("Make-N target {target} too small, using {}", Self::MIN_TARGET);
            Self::MIN_TARGET
        } else {
            target
        };
        Self {
            target,
            name: format!("Make {target}"),
        }
    }

    pub fn target(&self) -> u8 {
        self.target
    }
}

impl Default for MakeNMode {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TARGET)
    }
}

impl GameMode for MakeNMode {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_tile(&self, rng: &mut dyn RngCore) -> Tile {
        Tile::new(rng.random_range(1..self.target))
    }

    fn matches(&self, a: Tile, b: Tile) -> bool {
        u16::from(a.value()) + u16::from(b.value()) == u16::from(self.target)
    }

    fn score_for(&self, group: &Group) -> Score {
        let links = Score::try_from(group.len().saturating_sub(1)).unwrap_or(Score::MAX);
        links.saturating_mul(self.target.into())
    }
}
