//! Test-vector synthesis for multi-precision addition and subtraction kernels.
//!
//! # About
//! A limb-wise adder or subtractor has a handful of internal states that
//! uniformly random operands almost never reach: a carry rippling through
//! every limb, every limb sitting at its maximum, a borrow that is needed
//! locally while the whole-number difference stays positive. This crate
//! produces two corpora per `(operation, bit width)` pair:
//!
//! - a large set of uniformly random operand pairs ([`RandomVectorGenerator`]),
//! - a smaller curated set built limb by limb to provoke those states
//!   ([`SpecialVectorGenerator`]).
//!
//! Every vector is labelled with a reference result computed by
//! [`num_bigint`], and every random draw comes from a ChaCha stream derived
//! from a single [`SessionSeed`], so a run can be replayed byte for byte.
//!
//! # Output
//! Vectors are written as gzip-compressed CSV with lowercase hexadecimal
//! fields (`num1,num2,result[,comment]`), under
//! `cases/<operation>/<bits>/{random,special}.csv.gz`.

#![forbid(unsafe_code, clippy::unwrap_used)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod config;
mod driver;
mod error;
mod limb;
mod operand;
mod primitives;
mod random;
mod seed;
mod sink;
mod special;
mod vector;

pub use crate::{
    config::{BitWidth, ConfigError, GeneratorConfig, Operation},
    driver::{
        ALL_OPERATIONS, DEFAULT_WIDTHS, InvocationReport, MatrixOutcome, MatrixReport, run_invocation,
        run_matrix,
    },
    error::{Error, Result},
    limb::{Limb, WideWord, Word},
    operand::{ChainProfile, LimbBuilder, Operand, borrow_chain, carry_chain},
    random::{RandomReport, RandomVectorGenerator},
    seed::{RANDOM_STREAM, SessionSeed, case_rng, derive_seed, retry_seed},
    sink::{CsvSink, GzipSink, RowSink},
    special::{
        CaseBuilder, CaseContext, Category, CategoryCounts, SpecialBatch, SpecialVectorGenerator,
    },
    vector::{RANDOM_HEADER, SPECIAL_HEADER, TestVector},
};

pub use num_bigint;
