//! Carry and borrow propagation profiles.
//!
//! Walks a pair of operands the way a limb-wise adder or subtractor would and
//! records which limb positions produce a carry (or borrow) out. Used to report
//! what each category actually provoked.

use super::Operand;
use crate::Limb;

/// Carry or borrow activity across the limbs of one operand pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainProfile {
    /// Limb positions examined.
    pub limbs: usize,
    /// Positions that produced a carry (borrow) out.
    pub carries: usize,
    /// Longest run of consecutive positions producing a carry (borrow) out.
    pub longest_run: usize,
    /// Whether a carry (borrow) leaves the most significant limb.
    pub carry_out: bool,
}

impl ChainProfile {
    fn record(&mut self, carried: bool, run: &mut usize) {
        self.limbs += 1;
        if carried {
            self.carries += 1;
            *run += 1;
            self.longest_run = self.longest_run.max(*run);
        } else {
            *run = 0;
        }
        self.carry_out = carried;
    }
}

fn limb_pairs(a: &Operand, b: &Operand) -> impl Iterator<Item = (Limb, Limb)> {
    let a = a.limbs();
    let b = b.limbs();
    let n = a.len().max(b.len());
    (0..n).map(move |i| {
        (
            a.get(i).copied().unwrap_or(Limb::ZERO),
            b.get(i).copied().unwrap_or(Limb::ZERO),
        )
    })
}

/// Profile the carries of `a + b`.
pub fn carry_chain(a: &Operand, b: &Operand) -> ChainProfile {
    let mut profile = ChainProfile::default();
    let mut carry = Limb::ZERO;
    let mut run = 0;

    for (x, y) in limb_pairs(a, b) {
        (_, carry) = x.carrying_add(y, carry);
        profile.record(!carry.is_zero(), &mut run);
    }

    profile
}

/// Profile the borrows of `a - b`.
pub fn borrow_chain(a: &Operand, b: &Operand) -> ChainProfile {
    let mut profile = ChainProfile::default();
    let mut borrow = Limb::ZERO;
    let mut run = 0;

    for (x, y) in limb_pairs(a, b) {
        (_, borrow) = x.borrowing_sub(y, borrow);
        profile.record(!borrow.is_zero(), &mut run);
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::{borrow_chain, carry_chain};
    use crate::{Limb, Operand};

    #[test]
    fn full_carry_chain() {
        let profile = carry_chain(&Operand::all_ones(256), &Operand::from(1u64));
        assert_eq!(profile.limbs, 4);
        assert_eq!(profile.carries, 4);
        assert_eq!(profile.longest_run, 4);
        assert!(profile.carry_out);
    }

    #[test]
    fn complementary_limbs_never_carry() {
        let a = Operand::from_limbs(&[Limb(5), Limb(9)]);
        let b = Operand::from_limbs(&[Limb(5).complement(), Limb(9).complement()]);
        let profile = carry_chain(&a, &b);
        assert_eq!(profile.carries, 0);
        assert!(!profile.carry_out);
    }

    #[test]
    fn full_borrow_chain() {
        let a = Operand::zero().with_bit(256);
        let profile = borrow_chain(&a, &Operand::from(1u64));
        assert_eq!(profile.limbs, 5);
        assert_eq!(profile.longest_run, 4);
        assert!(!profile.carry_out);
    }

    #[test]
    fn negative_difference_borrows_out() {
        let profile = borrow_chain(&Operand::from(1u64), &Operand::from(2u64));
        assert_eq!(profile.carries, 1);
        assert!(profile.carry_out);
    }

    #[test]
    fn interrupted_run() {
        let a = Operand::from_limbs(&[Limb::MAX, Limb(0), Limb::MAX, Limb::MAX]);
        let b = Operand::from_limbs(&[Limb::ONE, Limb(0), Limb::ONE, Limb(0)]);
        let profile = carry_chain(&a, &b);
        assert_eq!(profile.carries, 3);
        assert_eq!(profile.longest_run, 2);
    }
}
