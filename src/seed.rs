//! Deterministic seed derivation.
//!
//! Every random draw in an invocation comes from a ChaCha8 stream whose seed is a
//! pure function of the session seed, a stream identifier (category index or
//! [`RANDOM_STREAM`]), a case index and an attempt number. Nothing depends on
//! the order in which cases are generated.

use crate::{BitWidth, Error, Operation, Result};
use core::fmt;
use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, SeedableRng, TryRngCore};

/// Stream identifier of the uniformly random corpus.
pub const RANDOM_STREAM: u64 = u64::MAX;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 finalizer.
#[inline]
const fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[inline]
const fn absorb(state: u64, value: u64) -> u64 {
    mix(state ^ mix(value.wrapping_add(GOLDEN_GAMMA)))
}

/// The single top-level seed of one generator invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionSeed(u64);

impl SessionSeed {
    /// Use an explicit seed.
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Draw a fresh seed from the operating system.
    pub fn from_os_rng() -> Result<Self> {
        OsRng
            .try_next_u64()
            .map(Self)
            .map_err(|e| Error::Rng(e.to_string()))
    }

    /// Use `seed` if given, otherwise draw one from the operating system.
    pub fn resolve(seed: Option<u64>) -> Result<Self> {
        match seed {
            Some(seed) => Ok(Self(seed)),
            None => Self::from_os_rng(),
        }
    }

    /// The raw seed value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Seed of one `(operation, width)` invocation when many are driven from one master seed.
    pub const fn for_invocation(self, op: Operation, width: BitWidth) -> Self {
        let op = match op {
            Operation::Add => 0,
            Operation::Subtract => 1,
        };
        Self(absorb(absorb(mix(self.0), op), width.get() as u64))
    }
}

impl fmt::Display for SessionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Derive the stream seed for one case: `(session, stream, case) -> seed`.
pub const fn derive_seed(session: SessionSeed, stream: u64, case: u64) -> u64 {
    absorb(absorb(mix(session.0.wrapping_add(GOLDEN_GAMMA)), stream), case)
}

/// Remix a stream seed for a retry. Attempt `0` is the stream seed itself.
pub const fn retry_seed(seed: u64, attempt: u32) -> u64 {
    match attempt {
        0 => seed,
        n => absorb(seed, n as u64),
    }
}

/// Fresh random stream for one attempt at one case.
pub fn case_rng(session: SessionSeed, stream: u64, case: u64, attempt: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(retry_seed(derive_seed(session, stream, case), attempt))
}
