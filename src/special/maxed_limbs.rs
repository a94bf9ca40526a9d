//! Saturated and zero limb pairs.

use super::{CaseBuilder, CaseContext, Category};
use crate::{Limb, LimbBuilder, Operation, Result, TestVector};
use rand_chacha::ChaCha8Rng;

/// Every limb pair sums to `2^64 - 1`. For the first half of the subtraction cases
/// the pairs are equal instead, so every result limb is zero.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MaxedOrZeroLimbs;

impl CaseBuilder for MaxedOrZeroLimbs {
    fn category(&self) -> Category {
        Category::MaxedOrZeroLimbs
    }

    fn build(&self, ctx: &CaseContext, rng: &mut ChaCha8Rng) -> Result<TestVector> {
        let limbs = ctx.width.limbs();
        let equal = ctx.op == Operation::Subtract && ctx.index < ctx.count / 2;

        let mut a = LimbBuilder::with_capacity(limbs);
        let mut b = LimbBuilder::with_capacity(limbs);
        for _ in 0..limbs {
            let k = Limb::random(rng);
            a.push(k);
            b.push(if equal { k } else { k.complement() });
        }

        let comment = match (ctx.op, equal) {
            (Operation::Add, _) => "Maxed-out limbs: each limb sum = 2^64 - 1",
            (Operation::Subtract, true) => "Zero limbs: each limb A_i = B_i; result = 0",
            (Operation::Subtract, false) => "Complement limbs: each limb A_i + B_i = 2^64 - 1",
        };

        Ok(TestVector::new(ctx.op, a.finish(), b.finish()).with_comment(comment))
    }
}
