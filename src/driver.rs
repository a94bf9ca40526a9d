//! Invocation entry points: one `(operation, width)` pair, or the whole matrix.

use crate::{
    BitWidth, CategoryCounts, Error, GeneratorConfig, GzipSink, Operation, RandomReport,
    RandomVectorGenerator, Result, SessionSeed, SpecialVectorGenerator,
};
use std::{
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::{Duration, Instant},
};

/// Both operations, in matrix order.
pub const ALL_OPERATIONS: [Operation; 2] = [Operation::Add, Operation::Subtract];

/// Bit widths covered by a full matrix run.
pub const DEFAULT_WIDTHS: [u32; 10] = [
    256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536, 131072,
];

/// What one invocation wrote.
#[derive(Clone, Debug)]
pub struct InvocationReport {
    /// Operation.
    pub op: Operation,
    /// Operand width.
    pub width: BitWidth,
    /// Session seed; pass it back to replay the run.
    pub seed: SessionSeed,
    /// Random corpus outcome.
    pub random: RandomReport,
    /// Curated vectors produced per category.
    pub special: CategoryCounts,
    /// Random corpus file.
    pub random_path: PathBuf,
    /// Curated corpus file.
    pub special_path: PathBuf,
    /// Wall-clock time.
    pub elapsed: Duration,
}

/// Generate and write both corpora for `(op, width)`.
pub fn run_invocation(
    config: &GeneratorConfig,
    op: Operation,
    width: BitWidth,
) -> Result<InvocationReport> {
    let seed = SessionSeed::resolve(config.seed)?;
    run_seeded(config, op, width, seed)
}

fn run_seeded(
    config: &GeneratorConfig,
    op: Operation,
    width: BitWidth,
    seed: SessionSeed,
) -> Result<InvocationReport> {
    let start = Instant::now();
    tracing::info!(
        %op,
        %width,
        random = config.random_cases,
        special = config.special_cases,
        %seed,
        "generating test cases"
    );

    let random_path = config.random_path(op, width);
    let mut sink = GzipSink::open(&random_path)?;
    let random = RandomVectorGenerator::new(width, op).generate(
        seed,
        config.random_cases,
        config.batch_size,
        config.max_attempts,
        &mut sink,
    )?;
    sink.close()?;

    let special_path = config.special_path(op, width);
    let generator = SpecialVectorGenerator::new(width, op);
    let batch = generator.generate(seed, config.special_cases, config.max_attempts)?;
    let mut sink = GzipSink::open(&special_path)?;
    generator.write(&batch, &mut sink)?;
    sink.close()?;

    let elapsed = start.elapsed();
    tracing::info!(
        %op,
        %width,
        elapsed_ms = elapsed.as_millis() as u64,
        random = %random_path.display(),
        special = %special_path.display(),
        "test cases written"
    );

    Ok(InvocationReport {
        op,
        width,
        seed,
        random,
        special: batch.produced,
        random_path,
        special_path,
        elapsed,
    })
}

/// Outcome of one matrix entry.
#[derive(Debug)]
pub struct MatrixOutcome {
    /// Operation.
    pub op: Operation,
    /// Operand width.
    pub width: BitWidth,
    /// Report, or the error that stopped the invocation.
    pub result: Result<InvocationReport>,
}

/// Tally of a matrix run, in completion order.
#[derive(Debug, Default)]
pub struct MatrixReport {
    /// One entry per `(operation, width)` pair.
    pub outcomes: Vec<MatrixOutcome>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

impl MatrixReport {
    /// Invocations that completed.
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Invocations that failed.
    pub fn failures(&self) -> usize {
        self.outcomes.len() - self.successes()
    }

    /// Did every invocation complete?
    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

/// Run every `(op, width)` pair on `jobs` worker threads.
///
/// Invocations share nothing: each writes its own two files and draws from its own
/// session seed, derived from the master seed with [`SessionSeed::for_invocation`].
/// A failing (or panicking) invocation is recorded and does not stop the others.
pub fn run_matrix(
    config: &GeneratorConfig,
    ops: &[Operation],
    widths: &[BitWidth],
    jobs: usize,
) -> Result<MatrixReport> {
    let master = SessionSeed::resolve(config.seed)?;
    let tasks: Vec<(Operation, BitWidth)> = ops
        .iter()
        .flat_map(|&op| widths.iter().map(move |&width| (op, width)))
        .collect();
    let total = tasks.len();
    let workers = jobs.clamp(1, total.max(1));

    tracing::info!(tasks = total, workers, %master, "starting matrix generation");

    let start = Instant::now();
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();
    let mut report = MatrixReport::default();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let (tasks, next) = (&tasks, &next);
            scope.spawn(move || {
                while let Some(&(op, width)) = tasks.get(next.fetch_add(1, Ordering::Relaxed)) {
                    let seed = master.for_invocation(op, width);
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        run_seeded(config, op, width, seed)
                    }))
                    .unwrap_or_else(|_| Err(Error::WorkerPanicked(format!("{op} {width}"))));
                    if tx.send(MatrixOutcome { op, width, result }).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        for outcome in rx {
            match &outcome.result {
                Ok(_) => tracing::info!(
                    done = report.outcomes.len() + 1,
                    total,
                    op = %outcome.op,
                    width = %outcome.width,
                    "completed"
                ),
                Err(err) => tracing::error!(
                    done = report.outcomes.len() + 1,
                    total,
                    op = %outcome.op,
                    width = %outcome.width,
                    %err,
                    "failed"
                ),
            }
            report.outcomes.push(outcome);
        }
    });

    report.elapsed = start.elapsed();
    if report.is_success() {
        tracing::info!(total, elapsed_s = report.elapsed.as_secs(), "all test cases generated");
    } else {
        tracing::warn!(
            failed = report.failures(),
            total,
            "some test case invocations failed"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_WIDTHS, MatrixOutcome, MatrixReport};
    use crate::{BitWidth, Error, Operation};

    #[test]
    fn default_widths_are_valid() {
        for bits in DEFAULT_WIDTHS {
            assert!(BitWidth::new(bits).is_ok());
        }
    }

    #[test]
    fn tally() {
        let width = BitWidth::new(256).unwrap();
        let report = MatrixReport {
            outcomes: vec![MatrixOutcome {
                op: Operation::Add,
                width,
                result: Err(Error::WorkerPanicked("add 256".into())),
            }],
            ..Default::default()
        };
        assert_eq!(report.successes(), 0);
        assert_eq!(report.failures(), 1);
        assert!(!report.is_success());
        assert!(MatrixReport::default().is_success());
    }
}
