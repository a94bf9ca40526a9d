//! Invocation parameters: operand width, operation and corpus sizes.

use crate::{Limb, Operand};
use core::{fmt, str::FromStr};
use num_bigint::BigInt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors. Fatal to an invocation, raised before any generation begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The operation selector was neither `add` nor `sub`.
    #[error("invalid operation {0:?}: expected \"add\" or \"sub\"")]
    InvalidOperation(String),

    /// The requested bit width is outside the supported range.
    #[error("bit width {0} out of range: expected {min}..={max}", min = BitWidth::MIN, max = BitWidth::MAX)]
    BitWidthOutOfRange(u32),
}

/// Operand size in bits, validated to lie in `[BitWidth::MIN, BitWidth::MAX]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitWidth(u32);

impl BitWidth {
    /// Smallest supported operand width.
    pub const MIN: u32 = 256;

    /// Largest supported operand width.
    pub const MAX: u32 = 131_072;

    /// Validate a bit width.
    pub const fn new(bits: u32) -> Result<Self, ConfigError> {
        if bits < Self::MIN || bits > Self::MAX {
            return Err(ConfigError::BitWidthOutOfRange(bits));
        }
        Ok(Self(bits))
    }

    /// The width in bits.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Number of whole limbs the limb-wise constructions iterate over.
    #[inline]
    pub const fn limbs(self) -> usize {
        (self.0 / Limb::BITS) as usize
    }

    /// Half the width, used for the bounded second operand of the carry chain cases.
    #[inline]
    pub const fn half(self) -> u32 {
        self.0 / 2
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = ConfigError;

    fn try_from(bits: u32) -> Result<Self, ConfigError> {
        Self::new(bits)
    }
}

/// The arithmetic operation the vectors exercise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`, which may be negative.
    Subtract,
}

impl Operation {
    /// The selector used on the command line and in output paths.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "sub",
        }
    }

    /// Reference result of this operation, computed exactly.
    pub fn apply(self, a: &Operand, b: &Operand) -> BigInt {
        let a = BigInt::from(a.as_biguint().clone());
        let b = BigInt::from(b.as_biguint().clone());
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s {
            "add" => Ok(Self::Add),
            "sub" => Ok(Self::Subtract),
            other => Err(ConfigError::InvalidOperation(other.to_owned())),
        }
    }
}

/// Corpus sizes, output location and seeding for a generator invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of uniformly random vectors.
    pub random_cases: usize,
    /// Number of curated vectors, split across the five categories.
    pub special_cases: usize,
    /// Rows per write when streaming the random corpus.
    pub batch_size: usize,
    /// Attempts per case before a construction failure becomes fatal.
    pub max_attempts: u32,
    /// Root directory of the `<operation>/<bits>/` tree.
    pub output_root: PathBuf,
    /// Session seed; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Default number of random vectors per invocation.
    pub const RANDOM_CASES: usize = 100_000;

    /// Default number of curated vectors per invocation.
    pub const SPECIAL_CASES: usize = 1_000;

    /// Default batch size for the random corpus.
    pub const BATCH_SIZE: usize = 1_000;

    /// Default attempts per case.
    pub const MAX_ATTEMPTS: u32 = 8;

    /// Default output root.
    pub const OUTPUT_ROOT: &'static str = "cases";

    /// Set the random corpus size.
    pub fn with_random_cases(mut self, n: usize) -> Self {
        self.random_cases = n;
        self
    }

    /// Set the curated corpus size.
    pub fn with_special_cases(mut self, n: usize) -> Self {
        self.special_cases = n;
        self
    }

    /// Set the random corpus batch size. Zero is treated as one.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n.max(1);
        self
    }

    /// Set the per-case attempt budget. Zero is treated as one.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    /// Set the output root.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Fix the session seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// `<root>/<operation>/<bits>`
    pub fn output_dir(&self, op: Operation, width: BitWidth) -> PathBuf {
        self.output_root
            .join(op.as_str())
            .join(width.get().to_string())
    }

    /// Path of the random corpus for `(op, width)`.
    pub fn random_path(&self, op: Operation, width: BitWidth) -> PathBuf {
        self.output_dir(op, width).join("random.csv.gz")
    }

    /// Path of the curated corpus for `(op, width)`.
    pub fn special_path(&self, op: Operation, width: BitWidth) -> PathBuf {
        self.output_dir(op, width).join("special.csv.gz")
    }

    /// The output root.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            random_cases: Self::RANDOM_CASES,
            special_cases: Self::SPECIAL_CASES,
            batch_size: Self::BATCH_SIZE,
            max_attempts: Self::MAX_ATTEMPTS,
            output_root: PathBuf::from(Self::OUTPUT_ROOT),
            seed: None,
        }
    }
}
