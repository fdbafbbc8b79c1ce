use rand::Rng;

/// Decides when the player earns a power charge: after every scoring move a
/// die with `sides` faces is rolled and a charge is granted if it shows one
/// of the `winning` faces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerGrantPolicy {
    sides: u32,
    winning: Vec<u32>,
}

impl PowerGrantPolicy {
    pub fn new(sides: u32, winning: Vec<u32>) -> Self {
        let sides = sides.max(1);
        let mut winning: Vec<_> = winning
            .into_iter()
            .filter(|face| (1..=sides).contains(face))
            .collect();
        winning.sort_unstable();
        winning.dedup();
        Self { sides, winning }
    }

    /// Chance of a grant per roll, in `0.0..=1.0`.
    pub fn chance(&self) -> f64 {
        self.winning.len() as f64 / f64::from(self.sides)
    }

    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let face = rng.random_range(1..=self.sides);
        self.winning.contains(&face)
    }
}

impl Default for PowerGrantPolicy {
    fn default() -> Self {
        Self::new(10, vec![1, 10])
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn default_grants_two_in_ten() {
        let policy = PowerGrantPolicy::default();
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(policy.chance(), 0.2);
        let grants = (0..10_000).filter(|_| policy.roll(&mut rng)).count();
        assert!((1_500..2_500).contains(&grants), "{grants} grants");
    }

    #[test]
    fn faces_outside_the_die_are_dropped() {
        let policy = PowerGrantPolicy::new(6, vec![0, 3, 3, 9]);

        assert_eq!(policy.winning, [3]);
    }

    #[test]
    fn never_and_always() {
        let mut rng = SmallRng::seed_from_u64(1);
        let never = PowerGrantPolicy::new(4, vec![]);
        let always = PowerGrantPolicy::new(2, vec![1, 2]);

        for _ in 0..100 {
            assert!(!never.roll(&mut rng));
            assert!(always.roll(&mut rng));
        }
    }
}
