//! The single process-wide PRNG (spec.md §5: "All randomized choices … draw
//! from a single process-wide PRNG whose seed is part of the configuration;
//! given a seed, the entire partitioning pipeline is deterministic.").
//!
//! The driver owns one `Rng` and passes it by mutable reference down into
//! the coarsener and refiner (spec.md §9: "Not a process singleton.").

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng as _, SeedableRng};
use serde::{Deserialize, Serialize};

pub struct Rng(StdRng);

impl Rng {
    pub fn from_seed(seed: u64) -> Self {
        Rng(StdRng::seed_from_u64(seed))
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }

    pub fn flip_coin(&mut self) -> bool {
        self.0.random_bool(0.5)
    }

    pub fn random_range(&mut self, upper_exclusive: usize) -> usize {
        self.0.random_range(0..upper_exclusive)
    }
}

/// Mirrors `kahypar::{FirstRatingWins, LastRatingWins, RandomRatingWins}`
/// (`original_source/kahypar/partition/coarsening/policies/rating_tie_breaking_policy.h`)
/// literally: `accept_equal` answers whether a *new* candidate with a rating
/// equal to the current best should replace it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakingPolicy {
    FirstWins,
    LastWins,
    Random,
}

impl TieBreakingPolicy {
    pub fn accept_equal(self, rng: &mut Rng) -> bool {
        match self {
            TieBreakingPolicy::FirstWins => false,
            TieBreakingPolicy::LastWins => true,
            TieBreakingPolicy::Random => rng.flip_coin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_shuffle() {
        let mut a = Rng::from_seed(7);
        let mut b = Rng::from_seed(7);
        let mut va: Vec<u32> = (0..50).collect();
        let mut vb: Vec<u32> = (0..50).collect();
        a.shuffle(&mut va);
        b.shuffle(&mut vb);
        assert_eq!(va, vb);
    }

    #[test]
    fn first_wins_never_accepts_equal() {
        let mut rng = Rng::from_seed(1);
        for _ in 0..10 {
            assert!(!TieBreakingPolicy::FirstWins.accept_equal(&mut rng));
        }
    }

    #[test]
    fn last_wins_always_accepts_equal() {
        let mut rng = Rng::from_seed(1);
        for _ in 0..10 {
            assert!(TieBreakingPolicy::LastWins.accept_equal(&mut rng));
        }
    }
}
