//! Curated test vectors.
//!
//! The requested count is split across five [`Category`]s, each a limb-level
//! construction rule aimed at one internal state of a 64-bit-limb adder or
//! subtractor. Every case draws from its own stream,
//! `case_rng(session, category, index, attempt)`, so a category (or a single
//! case) can be regenerated in isolation.

mod borrow_heavy;
mod carry_heavy;
mod edge_mixed;
mod full_propagation;
mod maxed_limbs;

use crate::{
    BitWidth, Error, Operation, Result, RowSink, SPECIAL_HEADER, SessionSeed, TestVector,
    borrow_chain, carry_chain, seed::case_rng,
};
use core::fmt;
use rand_chacha::ChaCha8Rng;

/// Operand-construction policy of a curated vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// All-ones first operand: a carry (borrow) ripples through every limb.
    FullPropagation,
    /// Limb pairs that sum to `2^64 - 1`, or are equal for half the subtraction cases.
    MaxedOrZeroLimbs,
    /// Second operand biased toward saturated limbs so carries are frequent but irregular.
    CarryHeavy,
    /// Local limb borrows under a globally positive difference.
    BorrowHeavy,
    /// Boundary values plus a hybrid saturated/carry-prone pattern.
    EdgeMixed,
}

impl Category {
    /// Every category, in generation order.
    pub const ALL: [Category; 5] = [
        Self::FullPropagation,
        Self::MaxedOrZeroLimbs,
        Self::CarryHeavy,
        Self::BorrowHeavy,
        Self::EdgeMixed,
    ];

    /// Position in [`Category::ALL`], also the category's seed stream.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name used in logs and errors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullPropagation => "full-propagation",
            Self::MaxedOrZeroLimbs => "maxed-or-zero-limbs",
            Self::CarryHeavy => "carry-heavy",
            Self::BorrowHeavy => "borrow-heavy",
            Self::EdgeMixed => "edge-mixed",
        }
    }

    /// The construction rule of this category.
    pub fn builder(self) -> &'static dyn CaseBuilder {
        match self {
            Self::FullPropagation => &full_propagation::FullPropagation,
            Self::MaxedOrZeroLimbs => &maxed_limbs::MaxedOrZeroLimbs,
            Self::CarryHeavy => &carry_heavy::CarryHeavy,
            Self::BorrowHeavy => &borrow_heavy::BorrowHeavy,
            Self::EdgeMixed => &edge_mixed::EdgeMixed,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-category case counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts([usize; 5]);

impl CategoryCounts {
    /// Split `total` evenly; the first `total % 5` categories get one extra case.
    pub const fn partition(total: usize) -> Self {
        let base = total / Category::ALL.len();
        let remainder = total % Category::ALL.len();
        let mut counts = [base; 5];
        let mut i = 0;
        while i < remainder {
            counts[i] += 1;
            i += 1;
        }
        Self(counts)
    }

    /// Count of `category`.
    pub const fn get(&self, category: Category) -> usize {
        self.0[category.index()]
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Number of cases in the categories before `category`.
    pub fn offset(&self, category: Category) -> usize {
        self.0[..category.index()].iter().sum()
    }

    /// Counts in category order.
    pub const fn as_array(&self) -> [usize; 5] {
        self.0
    }

    fn set(&mut self, category: Category, count: usize) {
        self.0[category.index()] = count;
    }
}

/// Everything a [`CaseBuilder`] needs to know about the case it builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CaseContext {
    /// Operand width.
    pub width: BitWidth,
    /// Operation the vector is labelled for.
    pub op: Operation,
    /// Index of the case within its category.
    pub index: usize,
    /// Number of cases requested for the category.
    pub count: usize,
}

/// A limb-level construction rule for one category.
pub trait CaseBuilder {
    /// Category this rule implements.
    fn category(&self) -> Category;

    /// Build the case described by `ctx`, drawing all randomness from `rng`.
    fn build(&self, ctx: &CaseContext, rng: &mut ChaCha8Rng) -> Result<TestVector>;
}

/// Generated curated vectors, in category order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialBatch {
    /// All vectors.
    pub vectors: Vec<TestVector>,
    /// Counts requested per category.
    pub requested: CategoryCounts,
    /// Counts produced per category.
    pub produced: CategoryCounts,
}

impl SpecialBatch {
    /// The vectors of one category.
    pub fn category(&self, category: Category) -> &[TestVector] {
        let start = self.produced.offset(category);
        &self.vectors[start..start + self.produced.get(category)]
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Builds the curated corpus for one `(width, operation)` pair.
#[derive(Copy, Clone, Debug)]
pub struct SpecialVectorGenerator {
    width: BitWidth,
    op: Operation,
}

impl SpecialVectorGenerator {
    /// Generator for `op` on `width`-bit operands.
    pub const fn new(width: BitWidth, op: Operation) -> Self {
        Self { width, op }
    }

    /// Generate `total` vectors across all five categories.
    pub fn generate(
        &self,
        session: SessionSeed,
        total: usize,
        max_attempts: u32,
    ) -> Result<SpecialBatch> {
        let requested = CategoryCounts::partition(total);
        let mut batch = SpecialBatch {
            vectors: Vec::with_capacity(total),
            requested,
            produced: CategoryCounts::default(),
        };

        for category in Category::ALL {
            let vectors =
                self.generate_category(category, session, requested.get(category), max_attempts)?;
            batch.produced.set(category, vectors.len());
            batch.vectors.extend(vectors);
        }

        // Exhausted cases abort above, so every category reaches its target.
        debug_assert_eq!(batch.produced, requested);
        tracing::info!(
            width = %self.width,
            op = %self.op,
            generated = batch.len(),
            requested = total,
            "generated special test cases"
        );

        Ok(batch)
    }

    /// Generate the `count` cases of one category, exactly as a full run would.
    pub fn generate_category(
        &self,
        category: Category,
        session: SessionSeed,
        count: usize,
        max_attempts: u32,
    ) -> Result<Vec<TestVector>> {
        self.fill(category.builder(), session, count, max_attempts)
    }

    /// Run `builder` for `count` cases, retrying failed cases on fresh streams.
    pub fn fill<B: CaseBuilder + ?Sized>(
        &self,
        builder: &B,
        session: SessionSeed,
        count: usize,
        max_attempts: u32,
    ) -> Result<Vec<TestVector>> {
        let category = builder.category();
        let max_attempts = max_attempts.max(1);
        let mut vectors = Vec::with_capacity(count);

        for index in 0..count {
            let ctx = CaseContext {
                width: self.width,
                op: self.op,
                index,
                count,
            };

            let mut attempt = 0;
            loop {
                let mut rng = case_rng(session, category.index() as u64, index as u64, attempt);
                match builder.build(&ctx, &mut rng) {
                    Ok(vector) => {
                        vectors.push(vector);
                        break;
                    }
                    Err(err) => {
                        attempt += 1;
                        tracing::warn!(%category, index, attempt, %err, "special case failed");
                        if attempt >= max_attempts {
                            return Err(Error::CaseExhausted {
                                category: category.name(),
                                index,
                                attempts: attempt,
                            });
                        }
                    }
                }
            }
        }

        let longest = vectors
            .iter()
            .map(|v| match self.op {
                Operation::Add => carry_chain(&v.a, &v.b),
                Operation::Subtract => borrow_chain(&v.a, &v.b),
            })
            .map(|profile| profile.longest_run)
            .max()
            .unwrap_or(0);

        tracing::info!(
            %category,
            generated = vectors.len(),
            longest_chain = longest,
            limbs = self.width.limbs(),
            "generated category"
        );

        Ok(vectors)
    }

    /// Write the header and every row of `batch` in one pass.
    pub fn write<S: RowSink + ?Sized>(&self, batch: &SpecialBatch, sink: &mut S) -> Result<()> {
        let mut rows = Vec::with_capacity(batch.len() + 1);
        rows.push(SPECIAL_HEADER.to_owned());
        rows.extend(batch.vectors.iter().map(TestVector::to_row));
        sink.append(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseBuilder, CaseContext, Category, CategoryCounts, SpecialVectorGenerator};
    use crate::{BitWidth, Error, Operand, Operation, Result, SessionSeed, TestVector};
    use core::cell::Cell;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn partition() {
        assert_eq!(CategoryCounts::partition(0).as_array(), [0; 5]);
        assert_eq!(CategoryCounts::partition(3).as_array(), [1, 1, 1, 0, 0]);
        assert_eq!(CategoryCounts::partition(10).as_array(), [2; 5]);
        assert_eq!(
            CategoryCounts::partition(1003).as_array(),
            [201, 201, 201, 200, 200]
        );
    }

    #[test]
    fn offsets() {
        let counts = CategoryCounts::partition(12);
        assert_eq!(counts.offset(Category::FullPropagation), 0);
        assert_eq!(counts.offset(Category::MaxedOrZeroLimbs), 3);
        assert_eq!(counts.offset(Category::EdgeMixed), 10);
    }

    #[test]
    fn category_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(category.builder().category(), *category);
        }
    }

    /// Fails the first attempt of every case.
    struct Flaky {
        calls: Cell<usize>,
    }

    impl CaseBuilder for Flaky {
        fn category(&self) -> Category {
            Category::CarryHeavy
        }

        fn build(&self, ctx: &CaseContext, _rng: &mut ChaCha8Rng) -> Result<TestVector> {
            let calls = self.calls.get();
            self.calls.set(calls + 1);
            if calls % 2 == 0 {
                return Err(Error::Construction {
                    category: "carry-heavy",
                    index: ctx.index,
                    reason: "injected".into(),
                });
            }
            Ok(TestVector::new(ctx.op, Operand::from(1u64), Operand::from(2u64)))
        }
    }

    fn generator() -> SpecialVectorGenerator {
        SpecialVectorGenerator::new(BitWidth::new(256).unwrap(), Operation::Add)
    }

    #[test]
    fn failed_cases_are_retried() {
        let flaky = Flaky {
            calls: Cell::new(0),
        };
        let vectors = generator()
            .fill(&flaky, SessionSeed::new(3), 5, 2)
            .unwrap();
        assert_eq!(vectors.len(), 5);
        assert_eq!(flaky.calls.get(), 10);
    }

    #[test]
    fn exhausted_case_is_fatal() {
        let flaky = Flaky {
            calls: Cell::new(0),
        };
        let err = generator()
            .fill(&flaky, SessionSeed::new(3), 5, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CaseExhausted {
                category: "carry-heavy",
                index: 0,
                attempts: 1
            }
        ));
    }

    #[test]
    fn batch_slices_by_category() {
        let batch = generator().generate(SessionSeed::new(1), 7, 1).unwrap();
        assert_eq!(batch.len(), 7);
        assert_eq!(batch.produced, batch.requested);
        assert_eq!(batch.category(Category::FullPropagation).len(), 2);
        assert_eq!(batch.category(Category::EdgeMixed).len(), 1);
    }
}
