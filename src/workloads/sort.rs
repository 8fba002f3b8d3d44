//! Merge sort over the fork-join executors.
//!
//! Single elements are already sorted; all work happens in the merge, which
//! runs after both halves of a region have joined.

use crate::error::Result;
use crate::forkjoin::ExecutionStrategy;
use rand::Rng;
use std::cmp::Ordering;

/// Sort `data` in place in non-decreasing order. Stable.
pub fn merge_sort<T>(strategy: &ExecutionStrategy, data: &mut [T]) -> Result<()>
where
    T: Ord + Clone + Send,
{
    merge_sort_by(strategy, data, T::cmp)
}

/// Sort `data` in place with `compare`. Stable: equal elements keep their
/// input order.
pub fn merge_sort_by<T, F>(strategy: &ExecutionStrategy, data: &mut [T], compare: F) -> Result<()>
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let len = data.len();
    strategy.divide_mut(
        data,
        len,
        |_, _| Ok(()),
        |_, mid, region| {
            merge(region, mid, &compare);
            Ok(())
        },
    )
}

/// Merge the sorted runs `region[..mid]` and `region[mid..]` back into
/// `region`. On ties the left run wins.
pub fn merge<T, F>(region: &mut [T], mid: usize, compare: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let left = region[..mid].to_vec();
    let right = region[mid..].to_vec();

    let (mut l, mut r) = (0, 0);
    for slot in region.iter_mut() {
        let take_left = match (left.get(l), right.get(r)) {
            (Some(a), Some(b)) => compare(a, b) != Ordering::Greater,
            (Some(_), None) => true,
            _ => false,
        };
        if take_left {
            *slot = left[l].clone();
            l += 1;
        } else {
            *slot = right[r].clone();
            r += 1;
        }
    }
}

/// Uniformly random `i32` values
pub fn random_array<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(i32::MIN..=i32::MAX)).collect()
}
