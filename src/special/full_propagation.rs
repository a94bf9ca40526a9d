//! Maximum-length ripple carry and borrow.

use super::{CaseBuilder, CaseContext, Category};
use crate::{Limb, Operand, Operation, Result, TestVector};
use rand_chacha::ChaCha8Rng;

/// Cases below this index use a small incrementing second operand.
const SMALL_CASES: usize = 100;

/// `A = 0xFFFF...FF` against `B = 1` (or `B = A` for subtraction), then small and
/// half-width second operands.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FullPropagation;

impl CaseBuilder for FullPropagation {
    fn category(&self) -> Category {
        Category::FullPropagation
    }

    fn build(&self, ctx: &CaseContext, rng: &mut ChaCha8Rng) -> Result<TestVector> {
        let a = Operand::all_ones(ctx.width.limbs() as u32 * Limb::BITS);
        let chain = match ctx.op {
            Operation::Add => "carry",
            Operation::Subtract => "borrow",
        };

        let (b, comment) = match ctx.index {
            0 => match ctx.op {
                Operation::Add => (
                    Operand::from(1u64),
                    "Full carry chain: A=0xFFFF...FF B=1 R=0x10000...00".to_owned(),
                ),
                Operation::Subtract => (
                    a.clone(),
                    "Full borrow chain: A=0xFFFF...FF B=0xFFFF...FF R=0".to_owned(),
                ),
            },
            i if i < SMALL_CASES => {
                let b = i as u64 + 1;
                (
                    Operand::from(b),
                    format!("Full {chain} chain: A=0xFFFF...FF B={b}"),
                )
            }
            _ => {
                let half = ctx.width.half();
                (
                    Operand::random_bits(rng, half).with_bit(half - 1),
                    format!("Full {chain} chain: A=0xFFFF...FF B=large"),
                )
            }
        };

        Ok(TestVector::new(ctx.op, a, b).with_comment(comment))
    }
}
