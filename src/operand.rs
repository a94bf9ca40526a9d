//! Multi-precision operands.
//!
//! An [`Operand`] is built limb by limb but exposed as a single arbitrary-precision
//! non-negative integer. Category constructions may compose limbs wider than
//! [`Limb::BITS`], so an operand is not clamped to its nominal bit width.

mod builder;
mod chain;
mod rand;

pub use self::{
    builder::LimbBuilder,
    chain::{ChainProfile, borrow_chain, carry_chain},
};

use crate::{Limb, Word};
use core::{fmt, ops::Add};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Arbitrary-precision non-negative integer operand.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Operand(BigUint);

impl Operand {
    /// The value `0`.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// `2^bits - 1`: every bit below `bits` set.
    pub fn all_ones(bits: u32) -> Self {
        Self((BigUint::one() << bits) - 1u32)
    }

    /// Build an operand from limbs stored least significant first.
    pub fn from_limbs(limbs: &[Limb]) -> Self {
        Self::from_words(limbs.iter().map(|limb| limb.0))
    }

    pub(crate) fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let digits = words
            .into_iter()
            .flat_map(|w| [w as u32, (w >> 32) as u32])
            .collect();
        Self(BigUint::new(digits))
    }

    /// Returns this operand with bit `bit` set.
    pub fn with_bit(self, bit: u32) -> Self {
        Self(self.0 | (BigUint::one() << bit))
    }

    /// Number of significant bits (`0` for zero).
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Is this operand zero?
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Limb `i`, counting from the least significant. Zero above the top limb.
    pub fn limb(&self, i: usize) -> Limb {
        self.0.iter_u64_digits().nth(i).map_or(Limb::ZERO, Limb)
    }

    /// All limbs, least significant first. Empty for zero.
    pub fn limbs(&self) -> Vec<Limb> {
        self.0.iter_u64_digits().map(Limb).collect()
    }

    /// Borrow the underlying big integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Unwrap into the underlying big integer.
    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl From<u64> for Operand {
    fn from(n: u64) -> Self {
        Self(BigUint::from(n))
    }
}

impl From<Limb> for Operand {
    fn from(limb: Limb) -> Self {
        Self::from(limb.0)
    }
}

impl From<BigUint> for Operand {
    fn from(n: BigUint) -> Self {
        Self(n)
    }
}

impl Add<&Operand> for &Operand {
    type Output = Operand;

    fn add(self, rhs: &Operand) -> Operand {
        Operand(&self.0 + &rhs.0)
    }
}

impl Add<Limb> for &Operand {
    type Output = Operand;

    fn add(self, rhs: Limb) -> Operand {
        Operand(&self.0 + rhs.0)
    }
}

impl fmt::LowerHex for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
