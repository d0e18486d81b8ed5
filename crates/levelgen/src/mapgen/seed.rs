//! Deterministic seed mixing and the pseudo-random streams used by generation.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub(crate) const TERRAIN_STREAM: u64 = 0;
pub(crate) const CREATURE_STREAM: u64 = 1;

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A seed for callers that did not supply one.
pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed_stream(entropy, TERRAIN_STREAM)
}

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Integer draws in the shapes the builders need.
pub(crate) struct LevelRng {
    inner: ChaCha8Rng,
}

impl LevelRng {
    pub(crate) fn new(seed: u64, stream: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, stream)) }
    }

    /// Uniform in `0..bound`; a non-positive bound yields 0.
    pub(crate) fn below(&mut self, bound: i32) -> i32 {
        if bound <= 1 {
            return 0;
        }
        (self.inner.next_u64() % bound as u64) as i32
    }

    pub(crate) fn chance(&mut self, one_in: i32) -> bool {
        self.below(one_in) == 0
    }

    pub(crate) fn coin_flip(&mut self) -> bool {
        self.inner.next_u64() & 1 == 1
    }
}
