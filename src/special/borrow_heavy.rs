//! Local borrows under a globally positive difference.

use super::{CaseBuilder, CaseContext, Category};
use crate::{Limb, LimbBuilder, Operand, Operation, Result, TestVector};
use rand_chacha::ChaCha8Rng;

/// `A` is nudged at most `2^8 - 1` below `B` in a borrowing limb.
const NUDGE_BITS: u32 = 8;

/// Width of the amount added to `B` in a non-borrowing limb.
const RAISE_BITS: u32 = 32;

/// Width of the whole-number gap used to restore `A > B`.
const DELTA_BITS: u32 = 16;

/// Draws a delta in `[1, 2^16]`.
fn small_delta(rng: &mut ChaCha8Rng) -> Limb {
    Limb(Limb::random_bits(rng, DELTA_BITS).0 + 1)
}

/// Random full-width `B`; each limb of `A` is either slightly below the matching
/// limb of `B` (forcing a local borrow) or raised above it by up to 32 bits, on a
/// fair coin. If the composed `A` is not above `B`, it is reset to `B + delta`.
///
/// Raised limbs may exceed 64 bits; the overflow is OR-ed into the next limb up.
#[derive(Copy, Clone, Debug)]
pub(crate) struct BorrowHeavy;

impl CaseBuilder for BorrowHeavy {
    fn category(&self) -> Category {
        Category::BorrowHeavy
    }

    fn build(&self, ctx: &CaseContext, rng: &mut ChaCha8Rng) -> Result<TestVector> {
        let limbs = ctx.width.limbs();
        let b_limbs = Operand::random_bits(rng, ctx.width.get()).limbs();

        let mut a = LimbBuilder::with_capacity(limbs);
        let mut b = LimbBuilder::with_capacity(limbs);
        for j in (0..limbs).rev() {
            let b_j = b_limbs.get(j).copied().unwrap_or(Limb::ZERO);
            let a_j = if Limb::coin(rng) {
                let nudge = Limb::random_bits(rng, NUDGE_BITS);
                b_j.checked_sub(nudge).unwrap_or(b_j).to_wide()
            } else {
                b_j.to_wide() + Limb::random_bits(rng, RAISE_BITS).to_wide()
            };
            a.push_wide(a_j);
            b.push(b_j);
        }

        let b = b.finish();
        let mut a = a.finish();
        let reset = a <= b;
        if reset {
            a = &b + small_delta(rng);
        }

        let comment = match (ctx.op, reset) {
            (Operation::Subtract, false) => "Borrow-heavy: frequent borrows",
            (Operation::Subtract, true) => "Borrow-heavy: frequent borrows; A reset to B + delta",
            (Operation::Add, _) => "Borrow-heavy: random addition",
        };

        Ok(TestVector::new(ctx.op, a, b).with_comment(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::BorrowHeavy;
    use crate::{
        BitWidth, CaseBuilder, CaseContext, Operation, SessionSeed, borrow_chain, seed::case_rng,
    };
    use num_bigint::Sign;

    fn ctx(op: Operation, index: usize) -> CaseContext {
        CaseContext {
            width: BitWidth::new(2048).unwrap(),
            op,
            index,
            count: 64,
        }
    }

    #[test]
    fn difference_is_positive() {
        for index in 0..64 {
            let mut rng = case_rng(SessionSeed::new(5), 3, index, 0);
            let v = BorrowHeavy
                .build(&ctx(Operation::Subtract, index as usize), &mut rng)
                .unwrap();
            assert!(v.a > v.b);
            assert_eq!(v.result.sign(), Sign::Plus);
        }
    }

    #[test]
    fn addition_reuses_the_construction() {
        for index in 0..8 {
            let sub = BorrowHeavy
                .build(
                    &ctx(Operation::Subtract, index as usize),
                    &mut case_rng(SessionSeed::new(7), 3, index, 0),
                )
                .unwrap();
            let add = BorrowHeavy
                .build(
                    &ctx(Operation::Add, index as usize),
                    &mut case_rng(SessionSeed::new(7), 3, index, 0),
                )
                .unwrap();

            assert_eq!((&add.a, &add.b), (&sub.a, &sub.b));
            assert_eq!(add.result, Operation::Add.apply(&add.a, &add.b));
            assert_eq!(add.comment.as_deref(), Some("Borrow-heavy: random addition"));
        }
    }

    #[test]
    fn borrows_occur_without_reset() {
        let mut borrowed = false;
        for index in 0..64 {
            let mut rng = case_rng(SessionSeed::new(6), 3, index, 0);
            let v = BorrowHeavy
                .build(&ctx(Operation::Subtract, index as usize), &mut rng)
                .unwrap();
            if v.comment.as_deref() == Some("Borrow-heavy: frequent borrows") {
                borrowed |= borrow_chain(&v.a, &v.b).carries > 0;
            }
        }
        assert!(borrowed);
    }
}
