//! Seeded randomness for random participants.
//!
//! Every random bot owns its own `GameRng`. A session seeded once on the
//! command line hands each bot a forked stream, so replaying the same seed
//! replays the same moves regardless of how many bots draw in between.
//!
//! ```
//! use rust_tbg::core::GameRng;
//!
//! let mut root = GameRng::new(42);
//! let mut bot = root.fork();
//!
//! let moves = ["0:1", "1:2", "2:3"];
//! assert!(bot.choose(&moves).is_some());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Golden-ratio step keeps forked seeds far apart.
const FORK_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream remembering the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Stream seeded from the thread RNG, for unseeded sessions.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the next child stream. The n-th fork of a given seed is
    /// always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STEP)))
    }

    /// Uniform pick among `options`; `None` when there is nothing to pick.
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut self.stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picks(rng: &mut GameRng, n: usize) -> Vec<u32> {
        let options: Vec<u32> = (0..9).collect();
        (0..n).map(|_| *rng.choose(&options).unwrap()).collect()
    }

    #[test]
    fn test_same_seed_same_picks() {
        assert_eq!(picks(&mut GameRng::new(42), 50), picks(&mut GameRng::new(42), 50));
    }

    #[test]
    fn test_forks_are_reproducible_and_distinct() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        let (first_a, second_a) = (a.fork(), a.fork());
        let (first_b, _) = (b.fork(), b.fork());

        assert_eq!(first_a.seed(), first_b.seed());
        assert_ne!(first_a.seed(), second_a.seed());
        assert_ne!(first_a.seed(), a.seed());
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = GameRng::new(1);
        let none: [u8; 0] = [];
        assert!(rng.choose(&none).is_none());
        assert_eq!(rng.choose(&[5]), Some(&5));
    }
}
