use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::*;

/// Regular rules without a game over.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlimitedMode {
    rules: RegularMode,
}

impl UnlimitedMode {
    pub fn new(rules: RegularMode) -> Self {
        Self { rules }
    }
}

impl GameMode for UnlimitedMode {
    fn name(&self) -> &str {
        "Unlimited"
    }

    fn generate_tile(&self, rng: &mut dyn RngCore) -> Tile {
        self.rules.generate_tile(rng)
    }

    fn matches(&self, a: Tile, b: Tile) -> bool {
        self.rules.matches(a, b)
    }

    fn score_for(&self, group: &Group) -> Score {
        self.rules.score_for(group)
    }

    fn is_terminal(&self, _grid: &Grid) -> bool {
        false
    }
}
