use core::ops::RangeInclusive;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::size_score;
use crate::*;

/// Equal neighbours form groups; larger groups score quadratically more; the
/// game ends once no group is left.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularMode {
    min_value: u8,
    max_value: u8,
}

impl RegularMode {
    pub const DEFAULT_VALUES: RangeInclusive<u8> = 1..=5;

    pub fn new(values: RangeInclusive<u8>) -> Self {
        let (min_value, max_value) = values.into_inner();
        if min_value > max_value {
            log::warn!("Empty tile range {min_value}..={max_value}, using {min_value} only");
            return Self {
                min_value,
                max_value: min_value,
            };
        }
        Self {
            min_value,
            max_value,
        }
    }

    pub fn values(&self) -> RangeInclusive<u8> {
        self.min_value..=self.max_value
    }
}

impl Default for RegularMode {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VALUES)
    }
}

impl GameMode for RegularMode {
    fn name(&self) -> &str {
        "Regular"
    }

    fn generate_tile(&self, rng: &mut dyn RngCore) -> Tile {
        Tile::new(rng.random_range(self.values()))
    }

    fn matches(&self, a: Tile, b: Tile) -> bool {
        a == b
    }

    fn score_for(&self, group: &Group) -> Score {
        size_score(group)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn generated_tiles_stay_in_range() {
        let mode = RegularMode::new(2..=4);
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..200 {
            let tile = mode.generate_tile(&mut rng);
            assert!((2..=4).contains(&tile.value()));
        }
    }

    #[test]
    fn empty_range_collapses_to_start() {
        assert_eq!(RegularMode::new(5..=1).values(), 5..=5);
    }

    #[test]
    fn score_grows_with_group_size() {
        let mode = RegularMode::default();
        let small = Grid::from_rows(&[&[1, 1, 2]]).unwrap();
        let large = Grid::from_rows(&[&[1, 1, 1]]).unwrap();

        let small = find_group_containing(&small, &mode, (0, 0)).unwrap().unwrap();
        let large = find_group_containing(&large, &mode, (0, 0)).unwrap().unwrap();

        assert_eq!(mode.score_for(&small), 4);
        assert_eq!(mode.score_for(&large), 9);
    }

    #[test]
    fn terminal_only_without_groups() {
        let mode = RegularMode::default();

        assert!(!mode.is_terminal(&Grid::from_rows(&[&[1, 1], &[2, 3]]).unwrap()));
        assert!(mode.is_terminal(&Grid::from_rows(&[&[1, 2], &[2, 1]]).unwrap()));
    }
}
