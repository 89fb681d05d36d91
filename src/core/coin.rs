//! CoinCaster: three-coin tosses from an injected random source
//!
//! Each toss counts the backs among three fair coins, giving the
//! binomial(3, 0.5) distribution 1/8, 3/8, 3/8, 1/8 over 0..=3.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::types::CoinToss;
use crate::{COINS_PER_TOSS, LINE_COUNT};

/// Coin tosser over any uniform generator
#[derive(Debug, Clone)]
pub struct CoinCaster<R> {
    rng: R,
}

impl CoinCaster<ChaCha8Rng> {
    /// Deterministic caster; the same seed replays the same tosses
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Deterministic caster keyed by a phrase (SHA-256 of its UTF-8 bytes)
    pub fn from_phrase(phrase: &str) -> Self {
        Self::new(ChaCha8Rng::from_seed(phrase_seed(phrase)))
    }

    /// Caster seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: RngCore> CoinCaster<R> {
    /// Wrap a caller-supplied generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// One toss of three coins; returns the number of backs
    pub fn toss_coin(&mut self) -> CoinToss {
        let coins: [bool; COINS_PER_TOSS as usize] = std::array::from_fn(|_| self.rng.gen_bool(0.5));
        CoinToss::from_coins(coins)
    }

    /// Six tosses; index 0 is the first draw (bottom line)
    pub fn cast_six_lines(&mut self) -> [CoinToss; LINE_COUNT] {
        std::array::from_fn(|_| self.toss_coin())
    }

    /// Give back the generator
    pub fn into_inner(self) -> R {
        self.rng
    }
}

/// 32-byte seed for a phrase
pub fn phrase_seed(phrase: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(phrase.as_bytes());
    hasher.finalize().into()
}

// =============================================================================
// TESTS
// =============================================================================
