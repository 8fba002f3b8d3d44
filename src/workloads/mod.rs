//! Benchmark workloads built on the fork-join executors
//!
//! | Workload | Leaf | Combine |
//! |----------|------|---------|
//! | [`download`] | fetch one image, count its bytes | sum |
//! | [`matrix`] | compute one output row in place | none (disjoint rows) |
//! | [`sort`] | single element, already sorted | stable two-way merge |
//!
//! Every entry point takes an [`ExecutionStrategy`](crate::forkjoin::ExecutionStrategy),
//! so the sequential oracle and the parallel run share the same leaf and
//! combine code.

pub mod download;
pub mod matrix;
pub mod sort;
