//! Labelled test vectors and their CSV row encoding.

use crate::{Operand, Operation};
use num_bigint::BigInt;
use std::fmt::Write as _;

/// Header of the uniformly random corpus.
pub const RANDOM_HEADER: &str = "num1,num2,result";

/// Header of the curated corpus.
pub const SPECIAL_HEADER: &str = "num1,num2,result,comment";

/// One operand pair and its reference result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestVector {
    /// First operand.
    pub a: Operand,
    /// Second operand.
    pub b: Operand,
    /// `a + b` or `a - b`, exact and possibly negative.
    pub result: BigInt,
    /// How the pair was constructed, for triage.
    pub comment: Option<String>,
}

impl TestVector {
    /// Label `(a, b)` with the reference result of `op`.
    pub fn new(op: Operation, a: Operand, b: Operand) -> Self {
        let result = op.apply(&a, &b);
        Self {
            a,
            b,
            result,
            comment: None,
        }
    }

    /// Attach a construction comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Encode as `<a>,<b>,<result>[,<comment>]` in lowercase hexadecimal.
    ///
    /// Negative results carry a leading `-`. Commas inside the comment are replaced
    /// with `;` so the row keeps a fixed field count.
    pub fn to_row(&self) -> String {
        let mut row = String::new();
        // Writing to a `String` cannot fail.
        let _ = write!(row, "{:x},{:x},{:x}", self.a, self.b, self.result);
        if let Some(comment) = &self.comment {
            row.push(',');
            row.extend(comment.chars().map(|c| if c == ',' { ';' } else { c }));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::TestVector;
    use crate::{Operand, Operation};

    #[test]
    fn add_row() {
        let v = TestVector::new(Operation::Add, Operand::from(0xffu64), Operand::from(1u64));
        assert_eq!(v.to_row(), "ff,1,100");
    }

    #[test]
    fn negative_result_is_sign_prefixed() {
        let v = TestVector::new(
            Operation::Subtract,
            Operand::from(1u64),
            Operand::from(0x11u64),
        );
        assert_eq!(v.to_row(), "1,11,-10");
    }

    #[test]
    fn zero_result() {
        let v = TestVector::new(Operation::Subtract, Operand::from(7u64), Operand::from(7u64));
        assert_eq!(v.to_row(), "7,7,0");
    }

    #[test]
    fn comment_commas_are_replaced() {
        let v = TestVector::new(Operation::Add, Operand::zero(), Operand::zero())
            .with_comment("Edge case: A=0, B=0");
        assert_eq!(v.to_row(), "0,0,0,Edge case: A=0; B=0");
        assert_eq!(v.to_row().split(',').count(), 4);
    }
}
