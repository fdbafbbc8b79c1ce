use alloc::boxed::Box;
use core::fmt;
use core::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::*;
pub use lucky::*;
pub use make_n::*;
pub use regular::*;
pub use unlimited::*;

mod lucky;
mod make_n;
mod regular;
mod unlimited;

/// Rule set for one game variant. Implementations are immutable once built;
/// the engine only ever talks to this trait.
pub trait GameMode: fmt::Debug {
    fn name(&self) -> &str;

    /// Draws the value for a newly created tile.
    fn generate_tile(&self, rng: &mut dyn RngCore) -> Tile;

    /// Whether two orthogonally adjacent tiles belong to the same group.
    fn matches(&self, a: Tile, b: Tile) -> bool;

    fn score_for(&self, group: &Group) -> Score;

    /// Whether the settled `grid` ends the game.
    fn is_terminal(&self, grid: &Grid) -> bool {
        !has_any_group(grid, self)
    }

    /// Charges available at the start of a game.
    fn starting_power(&self) -> PowerCount {
        1
    }

    /// Points for removing `tile` with a power charge, if any.
    fn removal_score(&self, _tile: Tile) -> Option<Score> {
        None
    }
}

/// The fixed set of modes a host can start a game with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Regular,
    MakeN,
    Lucky,
    Unlimited,
}

impl ModeKind {
    pub const ALL: [ModeKind; 4] = [Self::Regular, Self::MakeN, Self::Lucky, Self::Unlimited];

    pub const fn name(self) -> &'static str {
        use ModeKind::*;
        match self {
            Regular => "regular",
            MakeN => "make13",
            Lucky => "lucky7",
            Unlimited => "unlimited",
        }
    }

    /// Builds the mode with its default parameters.
    pub fn build(self) -> Box<dyn GameMode> {
        use ModeKind::*;
        match self {
            Regular => Box::new(RegularMode::default()),
            MakeN => Box::new(MakeNMode::default()),
            Lucky => Box::new(LuckyMode::default()),
            Unlimited => Box::new(UnlimitedMode::default()),
        }
    }
}

impl Default for ModeKind {
    fn default() -> Self {
        Self::Regular
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModeKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let matches = |candidates: &[&str]| {
            candidates
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(name))
        };

        if matches(&["regular"]) {
            Ok(Self::Regular)
        } else if matches(&["make13", "make-n", "maken", "make_n"]) {
            Ok(Self::MakeN)
        } else if matches(&["lucky7", "lucky"]) {
            Ok(Self::Lucky)
        } else if matches(&["unlimited", "endless"]) {
            Ok(Self::Unlimited)
        } else {
            Err(GameError::UnknownMode)
        }
    }
}

/// `n²`, shared by the modes that reward group size.
pub(crate) fn size_score(group: &Group) -> Score {
    let size = Score::try_from(group.len()).unwrap_or(Score::MAX);
    size.saturating_mul(size)
}
