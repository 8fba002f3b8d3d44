//! Generic fork-join execution framework
//!
//! Every workload in forkbench is expressed as the same divide-and-conquer
//! recursion: split a [`WorkRange`] at its midpoint until single units
//! remain, compute each unit with a leaf closure, and fold the results back
//! up with a combine closure.
//!
//! # Executors
//!
//! - [`ForkJoinExecutor`]: owns a bounded rayon pool. Each split forks one
//!   half and computes the other inline, then joins.
//! - [`SequentialExecutor`]: the same recursion, left before right, on the
//!   calling thread. Used as the correctness oracle and timing baseline.
//!
//! Both offer two entry points:
//!
//! - `reduce`: leaves produce values, `combine` merges them (scalar
//!   reductions such as summing downloaded bytes).
//! - `divide_mut`: leaves receive disjoint `&mut` regions of a shared buffer
//!   carved out with `split_at_mut`, so concurrent writes never overlap
//!   (matrix rows, merge sort runs).
//!
//! # Example
//!
//! ```rust
//! use forkbench::forkjoin::ExecutionStrategy;
//!
//! let values = [10u64, 20, 30];
//! let strategy = ExecutionStrategy::parallel(2)?;
//! let total = strategy.reduce(values.len(), |i| Ok(values[i]), |a, b| Ok(a + b))?;
//! assert_eq!(total, 60);
//! # Ok::<(), forkbench::Error>(())
//! ```

pub mod core;
pub mod range;

pub use self::core::{ExecutionStrategy, ForkJoinExecutor, SequentialExecutor};
pub use range::WorkRange;
