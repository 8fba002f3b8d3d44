//! # forkbench - sequential vs fork-join parallel benchmarks
//!
//! Measures how much a recursive divide-and-conquer decomposition gains over
//! a plain sequential evaluation of the same algorithm, on three workloads:
//!
//! - **download**: fetch a batch of images over HTTP and sum their sizes
//! - **matrix**: multiply two random square matrices
//! - **sort**: merge sort a random integer array
//!
//! Both strategies share one recursion ([`forkjoin`]); the parallel one runs
//! the two halves of every split through `rayon::join` on a bounded pool.
//!
//! ## Quick Start
//!
//! ```bash
//! forkbench sort --length 100000 --runs 3
//! forkbench matrix --size 200 --workers 4 --format json
//! forkbench all
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod forkjoin;
pub mod workloads;

pub use cli::{Cli, Output};
pub use config::ForkbenchConfig;
pub use error::{Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
