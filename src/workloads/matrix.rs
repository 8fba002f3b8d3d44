//! Dense integer matrix multiplication.
//!
//! The product is computed row by row: each leaf owns exactly one output row
//! and writes it in place, so no combine step is needed once all leaves have
//! joined.

use crate::error::{Error, Result};
use crate::forkjoin::{ExecutionStrategy, WorkRange};
use rand::Rng;

/// Row-major matrix of `i64`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build from nested rows, rejecting rows of differing lengths
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Random matrix with entries in `0..max_value`
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, max_value: i64, rng: &mut R) -> Self {
        let max_value = max_value.max(1);
        let data = (0..rows * cols)
            .map(|_| rng.gen_range(0..max_value))
            .collect();
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[i64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

/// Compute `C = A * B`.
///
/// Fails with [`Error::DimensionMismatch`] before any work is scheduled when
/// `A.cols != B.rows`. Arithmetic wraps on overflow, identically for every
/// strategy.
pub fn multiply(strategy: &ExecutionStrategy, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols != b.rows {
        return Err(Error::DimensionMismatch {
            a_rows: a.rows,
            a_cols: a.cols,
            b_rows: b.rows,
            b_cols: b.cols,
        });
    }

    let mut product = Matrix::zeros(a.rows, b.cols);
    strategy.divide_mut(
        &mut product.data,
        a.rows,
        |range, row| {
            row_product(a, b, range, row);
            Ok(())
        },
        // rows are disjoint; nothing to merge
        |_, _, _| Ok(()),
    )?;
    Ok(product)
}

fn row_product(a: &Matrix, b: &Matrix, range: WorkRange, out: &mut [i64]) {
    let i = range.low();
    let a_row = a.row(i);
    for (k, cell) in out.iter_mut().enumerate() {
        *cell = a_row
            .iter()
            .enumerate()
            .fold(0i64, |sum, (j, &a_ij)| {
                sum.wrapping_add(a_ij.wrapping_mul(b.get(j, k)))
            });
    }
}
