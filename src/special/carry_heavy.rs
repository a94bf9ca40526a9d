//! Frequent, irregular carries.

use super::{CaseBuilder, CaseContext, Category};
use crate::{Limb, LimbBuilder, Operation, Result, TestVector};
use rand_chacha::ChaCha8Rng;

/// Width of the random amount subtracted from [`Limb::MAX`] by [`carry_prone_limb`].
const BIAS_BITS: u32 = 32;

/// A limb within `2^32` of [`Limb::MAX`]: almost any full-range addend carries out.
pub(super) fn carry_prone_limb(rng: &mut ChaCha8Rng) -> Limb {
    Limb::MAX.wrapping_sub(Limb::random_bits(rng, BIAS_BITS))
}

/// Full-range `A`; `B` alternates between near-saturated limbs (even positions)
/// and full-range limbs with the top bit set (odd positions). Subtraction reuses
/// the same operands, so its results may be negative.
#[derive(Copy, Clone, Debug)]
pub(crate) struct CarryHeavy;

impl CaseBuilder for CarryHeavy {
    fn category(&self) -> Category {
        Category::CarryHeavy
    }

    fn build(&self, ctx: &CaseContext, rng: &mut ChaCha8Rng) -> Result<TestVector> {
        let limbs = ctx.width.limbs();
        let mut a = LimbBuilder::with_capacity(limbs);
        let mut b = LimbBuilder::with_capacity(limbs);

        for j in 0..limbs {
            a.push(Limb::random(rng));
            b.push(if j % 2 == 0 {
                carry_prone_limb(rng)
            } else {
                Limb::random(rng).with_hi_bit()
            });
        }

        let comment = match ctx.op {
            Operation::Add => "Carry-heavy: frequent carries with alternating pattern",
            Operation::Subtract => "Carry-heavy: random subtraction",
        };

        Ok(TestVector::new(ctx.op, a.finish(), b.finish()).with_comment(comment))
    }
}
