//! Random number generator support

use super::Operand;
use crate::Limb;
use rand_core::RngCore;

impl Operand {
    /// Generate an operand uniformly distributed in `[0, 2^bit_length)`.
    ///
    /// Limbs are drawn least significant first; the top limb is masked down to the
    /// bits that remain, so `ceil(bit_length / 64)` words are always consumed.
    pub fn random_bits<R: RngCore + ?Sized>(rng: &mut R, bit_length: u32) -> Self {
        if bit_length == 0 {
            return Self::zero();
        }

        let nlimbs = bit_length.div_ceil(Limb::BITS) as usize;
        let partial = bit_length % Limb::BITS;

        let mut limbs = Vec::with_capacity(nlimbs);
        for _ in 0..nlimbs - 1 {
            limbs.push(Limb::random(rng));
        }
        limbs.push(match partial {
            0 => Limb::random(rng),
            bits => Limb::random_bits(rng, bits),
        });

        Self::from_limbs(&limbs)
    }
}
