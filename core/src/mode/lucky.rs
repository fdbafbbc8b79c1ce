use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::size_score;
use crate::*;

/// Regular rules plus a wild tile that links with any neighbour. Groups
/// holding a wild tile score a multiple of the regular amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckyMode {
    rules: RegularMode,
    wild_one_in: u32,
    bonus_multiplier: Score,
}

impl LuckyMode {
    pub const WILD: Tile = Tile::new(7);
    pub const DEFAULT_WILD_ONE_IN: u32 = 12;
    pub const DEFAULT_BONUS_MULTIPLIER: Score = 2;

    /// `wild_one_in` is the inverse probability of drawing the wild tile.
    pub fn new(wild_one_in: u32, bonus_multiplier: Score) -> Self {
        Self {
            rules: RegularMode::new(1..=6),
            wild_one_in: wild_one_in.max(1),
            bonus_multiplier,
        }
    }

    pub fn is_wild(tile: Tile) -> bool {
        tile == Self::WILD
    }
}

impl Default for LuckyMode {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WILD_ONE_IN, Self::DEFAULT_BONUS_MULTIPLIER)
    }
}

impl GameMode for LuckyMode {
    fn name(&self) -> &str {
        "Lucky 7"
    }

    fn generate_tile(&self, rng: &mut dyn RngCore) -> Tile {
        if rng.random_ratio(1, self.wild_one_in) {
            Self::WILD
        } else {
            self.rules.generate_tile(rng)
        }
    }

    fn matches(&self, a: Tile, b: Tile) -> bool {
        Self::is_wild(a) || Self::is_wild(b) || self.rules.matches(a, b)
    }

    fn score_for(&self, group: &Group) -> Score {
        let base = size_score(group);
        if group.tiles().any(Self::is_wild) {
            base.saturating_mul(self.bonus_multiplier)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn wild_matches_anything() {
        let mode = LuckyMode::default();

        assert!(mode.matches(LuckyMode::WILD, Tile::new(3)));
        assert!(mode.matches(Tile::new(1), LuckyMode::WILD));
        assert!(mode.matches(Tile::new(4), Tile::new(4)));
        assert!(!mode.matches(Tile::new(4), Tile::new(5)));
    }

    #[test]
    fn always_wild_when_one_in_one() {
        let mode = LuckyMode::new(1, 2);
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..20 {
            assert_eq!(mode.generate_tile(&mut rng), LuckyMode::WILD);
        }
    }

    #[test]
    fn wild_group_gets_bonus() {
        let mode = LuckyMode::new(12, 3);
        let plain = Grid::from_rows(&[&[2, 2]]).unwrap();
        let lucky = Grid::from_rows(&[&[2, 7]]).unwrap();

        let plain = find_group_containing(&plain, &mode, (0, 0)).unwrap().unwrap();
        let lucky = find_group_containing(&lucky, &mode, (0, 0)).unwrap().unwrap();

        assert_eq!(mode.score_for(&plain), 4);
        assert_eq!(mode.score_for(&lucky), 12);
    }
}
