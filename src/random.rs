//! Uniformly random test vectors.

use crate::{
    BitWidth, Error, Operand, Operation, RANDOM_HEADER, Result, RowSink, SessionSeed, TestVector,
    seed::case_rng,
};
use rand_chacha::ChaCha8Rng;

/// Outcome of a random corpus run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomReport {
    /// Vectors requested.
    pub requested: usize,
    /// Vectors written.
    pub emitted: usize,
    /// Attempts that failed and were retried.
    pub retries: usize,
}

/// Draws operand pairs uniformly from `[0, 2^N)` and streams them to a sink in batches.
#[derive(Copy, Clone, Debug)]
pub struct RandomVectorGenerator {
    width: BitWidth,
    op: Operation,
}

impl RandomVectorGenerator {
    /// Generator for `op` on `width`-bit operands.
    pub const fn new(width: BitWidth, op: Operation) -> Self {
        Self { width, op }
    }

    /// One uniformly random vector.
    pub fn sample(&self, rng: &mut ChaCha8Rng) -> Result<TestVector> {
        let a = Operand::random_bits(rng, self.width.get());
        let b = Operand::random_bits(rng, self.width.get());
        Ok(TestVector::new(self.op, a, b))
    }

    /// Write the header and `count` vectors to `sink`, `batch_size` rows at a time.
    ///
    /// All draws come from the single [`RANDOM_STREAM`](crate::RANDOM_STREAM) of
    /// `session`. A failed draw is retried on the same, advanced stream; a case that
    /// fails `max_attempts` times aborts the run.
    pub fn generate<S: RowSink + ?Sized>(
        &self,
        session: SessionSeed,
        count: usize,
        batch_size: usize,
        max_attempts: u32,
        sink: &mut S,
    ) -> Result<RandomReport> {
        self.generate_with(session, count, batch_size, max_attempts, sink, |rng| {
            self.sample(rng)
        })
    }

    pub(crate) fn generate_with<S, F>(
        &self,
        session: SessionSeed,
        count: usize,
        batch_size: usize,
        max_attempts: u32,
        sink: &mut S,
        mut sample: F,
    ) -> Result<RandomReport>
    where
        S: RowSink + ?Sized,
        F: FnMut(&mut ChaCha8Rng) -> Result<TestVector>,
    {
        let batch_size = batch_size.max(1);
        let max_attempts = max_attempts.max(1);
        let mut rng = case_rng(session, crate::RANDOM_STREAM, 0, 0);
        let mut batch = Vec::with_capacity(batch_size.min(count));
        let mut report = RandomReport {
            requested: count,
            emitted: 0,
            retries: 0,
        };

        sink.append(&[RANDOM_HEADER.to_owned()])?;

        for index in 0..count {
            let mut attempt = 0;
            let vector = loop {
                match sample(&mut rng) {
                    Ok(vector) => break vector,
                    Err(err) => {
                        attempt += 1;
                        report.retries += 1;
                        tracing::warn!(index, attempt, %err, "random case failed");
                        if attempt >= max_attempts {
                            return Err(Error::CaseExhausted {
                                category: "random",
                                index,
                                attempts: attempt,
                            });
                        }
                    }
                }
            };

            batch.push(vector.to_row());
            report.emitted += 1;

            if batch.len() >= batch_size {
                sink.append(&batch)?;
                tracing::debug!(rows = batch.len(), written = report.emitted, "flushed batch");
                batch.clear();
            }
        }

        if !batch.is_empty() {
            sink.append(&batch)?;
        }

        debug_assert_eq!(report.emitted, report.requested);
        tracing::info!(
            width = %self.width,
            op = %self.op,
            emitted = report.emitted,
            requested = report.requested,
            "generated random test cases"
        );

        Ok(report)
    }
}
