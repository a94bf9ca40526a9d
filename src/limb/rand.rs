//! Random number generator support

use super::{Limb, Word};
use rand_core::RngCore;

impl Limb {
    /// Generate a uniformly random limb over its full range.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self(rng.next_u64())
    }

    /// Generate a uniformly random limb in `[0, 2^bit_length)`.
    ///
    /// `bit_length` is clamped to [`Limb::BITS`]. One full word is drawn from
    /// `rng` regardless of `bit_length`, so the stream position never depends
    /// on the requested width.
    pub fn random_bits<R: RngCore + ?Sized>(rng: &mut R, bit_length: u32) -> Self {
        let word = rng.next_u64();
        Self(word & mask(bit_length))
    }

    /// Flip a fair coin.
    pub fn coin<R: RngCore + ?Sized>(rng: &mut R) -> bool {
        rng.next_u32() & 1 == 1
    }
}

/// Mask selecting the low `bits` bits of a [`Word`].
#[inline]
pub(crate) const fn mask(bits: u32) -> Word {
    match bits {
        0 => 0,
        b if b >= Word::BITS => Word::MAX,
        b => Word::MAX >> (Word::BITS - b),
    }
}

#[cfg(test)]
mod tests {
    use super::mask;
    use crate::Limb;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    #[test]
    fn masks() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(8), 0xff);
        assert_eq!(mask(32), 0xffff_ffff);
        assert_eq!(mask(64), u64::MAX);
        assert_eq!(mask(100), u64::MAX);
    }

    #[test]
    fn random_bits_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for bits in [1, 7, 16, 32, 63] {
            for _ in 0..32 {
                let x = Limb::random_bits(&mut rng, bits);
                assert!(x.0 < 1 << bits);
            }
        }

        assert_eq!(Limb::random_bits(&mut rng, 0), Limb::ZERO);
    }

    #[test]
    fn random_is_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(Limb::random(&mut a), Limb::random(&mut b));
    }
}
