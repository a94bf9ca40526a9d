//! Big integers are represented as an array of smaller machine-word integers
//! called "limbs".
//!
//! Unlike a general-purpose bignum library the limb width here is not tied to
//! the target's pointer width: the kernels under test operate on 64-bit limbs,
//! so test vectors must be built from 64-bit limbs on every host.

mod add;
mod rand;
mod sub;

use core::fmt;

/// Inner integer type that the [`Limb`] newtype wraps.
pub type Word = u64;

/// Unsigned wide integer type: double the width of [`Word`].
pub type WideWord = u128;

/// A single 64-bit digit of a multi-precision operand.
///
/// All bits of the inner [`Word`] are used.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Limb(pub Word);

impl Limb {
    /// The value `0`.
    pub const ZERO: Self = Limb(0);

    /// The value `1`.
    pub const ONE: Self = Limb(1);

    /// Maximum value this [`Limb`] can express.
    pub const MAX: Self = Limb(Word::MAX);

    /// Size of the inner integer in bits.
    pub const BITS: u32 = 64;

    /// Size of the inner integer in bytes.
    pub const BYTES: usize = 8;

    /// Highest bit in a [`Limb`].
    pub const HI_BIT: u32 = Limb::BITS - 1;

    /// Is this limb equal to [`Limb::ZERO`]?
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `Limb::MAX - self`, the value that makes `self + x` saturate the limb
    /// without carrying out of it.
    #[inline]
    #[must_use]
    pub const fn complement(self) -> Self {
        Limb(!self.0)
    }

    /// Returns this limb with its most significant bit forced set.
    #[inline]
    #[must_use]
    pub const fn with_hi_bit(self) -> Self {
        Limb(self.0 | (1 << Self::HI_BIT))
    }

    /// Widens this limb into a [`WideWord`].
    #[inline]
    #[must_use]
    pub const fn to_wide(self) -> WideWord {
        self.0 as WideWord
    }
}

impl From<Word> for Limb {
    #[inline]
    fn from(n: Word) -> Limb {
        Limb(n)
    }
}

impl From<u32> for Limb {
    #[inline]
    fn from(n: u32) -> Limb {
        Limb(n.into())
    }
}

impl From<Limb> for Word {
    #[inline]
    fn from(limb: Limb) -> Word {
        limb.0
    }
}

impl fmt::Debug for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Limb(0x{self:X})")
    }
}

impl fmt::Display for Limb {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Limb {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{:0width$x}", &self.0, width = Self::BYTES * 2)
    }
}

impl fmt::UpperHex for Limb {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{:0width$X}", &self.0, width = Self::BYTES * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::Limb;

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Limb(42)), "Limb(0x000000000000002A)");
    }

    #[test]
    fn lower_hex() {
        assert_eq!(format!("{:x}", Limb(0xabc)), "0000000000000abc");
        assert_eq!(format!("{:#x}", Limb::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn complement_saturates() {
        let x = Limb(0x1234_5678_9abc_def0);
        let (sum, carry) = x.overflowing_add(x.complement());
        assert_eq!(sum, Limb::MAX);
        assert_eq!(carry, Limb::ZERO);
    }

    #[test]
    fn with_hi_bit() {
        assert_eq!(Limb::ZERO.with_hi_bit(), Limb(1 << 63));
        assert_eq!(Limb::MAX.with_hi_bit(), Limb::MAX);
    }
}
