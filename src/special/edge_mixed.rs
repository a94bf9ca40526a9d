//! Boundary values and mixed propagation.

use super::{CaseBuilder, CaseContext, Category, carry_heavy::carry_prone_limb};
use crate::{Limb, LimbBuilder, Operand, Result, TestVector};
use rand_chacha::ChaCha8Rng;

/// Sub-pattern of an edge case, by quarter of the category's count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EdgePattern {
    /// `A = 0`, `B = 2^N - 1`.
    ZeroMax,
    /// `A = 2^N - 1`, `B = 0`.
    MaxZero,
    /// `A = 2^N - 1`, `B` a random 32-bit value.
    MaxSmall,
    /// Complementary limbs at even positions, carry-prone limbs at odd positions.
    Mixed,
}

impl EdgePattern {
    pub(crate) const fn for_case(index: usize, count: usize) -> Self {
        if index < count / 4 {
            Self::ZeroMax
        } else if index < count / 2 {
            Self::MaxZero
        } else if index < 3 * count / 4 {
            Self::MaxSmall
        } else {
            Self::Mixed
        }
    }
}

/// Canonical boundary operands plus a hybrid of the maxed-limb and carry-heavy rules.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EdgeMixed;

impl CaseBuilder for EdgeMixed {
    fn category(&self) -> Category {
        Category::EdgeMixed
    }

    fn build(&self, ctx: &CaseContext, rng: &mut ChaCha8Rng) -> Result<TestVector> {
        let max = || Operand::all_ones(ctx.width.get());

        let (a, b, comment) = match EdgePattern::for_case(ctx.index, ctx.count) {
            EdgePattern::ZeroMax => (Operand::zero(), max(), "Edge case: A=0 B=max"),
            EdgePattern::MaxZero => (max(), Operand::zero(), "Edge case: A=max B=0"),
            EdgePattern::MaxSmall => (
                max(),
                Operand::from(Limb::random_bits(rng, 32)),
                "Edge case: A=max B=small",
            ),
            EdgePattern::Mixed => {
                let limbs = ctx.width.limbs();
                let mut a = LimbBuilder::with_capacity(limbs);
                let mut b = LimbBuilder::with_capacity(limbs);
                for j in 0..limbs {
                    if j % 2 == 0 {
                        let k = Limb::random(rng);
                        a.push(k);
                        b.push(k.complement());
                    } else {
                        a.push(Limb::random(rng));
                        b.push(carry_prone_limb(rng));
                    }
                }
                (
                    a.finish(),
                    b.finish(),
                    "Mixed propagation: alternating maxed and carry-prone limbs",
                )
            }
        };

        Ok(TestVector::new(ctx.op, a, b).with_comment(comment))
    }
}
