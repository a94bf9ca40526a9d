//! Limb subtraction

use crate::{Limb, primitives::borrowing_sub};

impl Limb {
    /// Computes `self - (rhs + borrow)`, returning the result along with the new borrow.
    ///
    /// The borrow is either [`Limb::ZERO`] or [`Limb::MAX`].
    #[inline(always)]
    #[must_use]
    pub const fn borrowing_sub(self, rhs: Limb, borrow: Limb) -> (Limb, Limb) {
        let (res, borrow) = borrowing_sub(self.0, rhs.0, borrow.0);
        (Limb(res), Limb(borrow))
    }

    /// Perform checked subtraction, returning `None` on underflow.
    #[inline]
    #[must_use]
    pub const fn checked_sub(self, rhs: Limb) -> Option<Limb> {
        match self.borrowing_sub(rhs, Limb::ZERO) {
            (res, Limb::ZERO) => Some(res),
            _ => None,
        }
    }

    /// Perform wrapping subtraction, discarding underflow and wrapping around
    /// the boundary of the type.
    #[inline(always)]
    #[must_use]
    pub const fn wrapping_sub(&self, rhs: Self) -> Self {
        Limb(self.0.wrapping_sub(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use crate::Limb;

    #[test]
    fn borrowing_sub_no_borrow() {
        let (res, borrow) = Limb::ONE.borrowing_sub(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::ZERO);
        assert_eq!(borrow, Limb::ZERO);
    }

    #[test]
    fn borrowing_sub_with_borrow() {
        let (res, borrow) = Limb::ZERO.borrowing_sub(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::MAX);
        assert_eq!(borrow, Limb::MAX);
    }

    #[test]
    fn borrowing_sub_propagates_incoming_borrow() {
        let (res, borrow) = Limb::ZERO.borrowing_sub(Limb::ZERO, Limb::MAX);
        assert_eq!(res, Limb::MAX);
        assert_eq!(borrow, Limb::MAX);
    }

    #[test]
    fn checked_sub() {
        assert_eq!(Limb(5).checked_sub(Limb(3)), Some(Limb(2)));
        assert_eq!(Limb(3).checked_sub(Limb(5)), None);
    }

    #[test]
    fn wrapping_sub_with_borrow() {
        assert_eq!(Limb::ZERO.wrapping_sub(Limb::ONE), Limb::MAX);
    }
}
