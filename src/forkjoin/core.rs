use crate::error::Result;
use crate::forkjoin::range::WorkRange;

/// Fork-join executor backed by a bounded rayon pool.
///
/// Every split hands one half to the pool and runs the other inline, then
/// blocks at the join until both halves are done. Work beyond the pool size
/// queues on the workers' deques instead of spawning new threads.
#[derive(Debug)]
pub struct ForkJoinExecutor {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl ForkJoinExecutor {
    pub fn new(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("forkbench-worker-{i}"))
            .build()?;
        tracing::debug!("Fork-join pool started with {} workers", workers);
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Recursively reduce `len` indexed leaves with `combine`.
    ///
    /// `leaf` receives the index of a single unit. An empty input yields
    /// `R::default()` without calling either closure. The first error raised by
    /// a leaf or combine step fails the whole call.
    pub fn reduce<R, L, C>(&self, len: usize, leaf: L, combine: C) -> Result<R>
    where
        R: Default + Send,
        L: Fn(usize) -> Result<R> + Sync,
        C: Fn(R, R) -> Result<R> + Sync,
    {
        if len == 0 {
            return Ok(R::default());
        }
        self.pool
            .install(|| fork_reduce(WorkRange::covering(len), &leaf, &combine))
    }

    /// Recursively divide `data`, made of `units` equal-sized units, into
    /// disjoint mutable regions.
    ///
    /// `leaf` receives a single-unit range and exactly that unit's region.
    /// `combine` receives the parent range, the split offset within its region
    /// and the region itself, after both halves have completed.
    pub fn divide_mut<T, L, C>(
        &self,
        data: &mut [T],
        units: usize,
        leaf: L,
        combine: C,
    ) -> Result<()>
    where
        T: Send,
        L: Fn(WorkRange, &mut [T]) -> Result<()> + Sync,
        C: Fn(WorkRange, usize, &mut [T]) -> Result<()> + Sync,
    {
        let Some(stride) = unit_stride(data.len(), units) else {
            return Ok(());
        };
        self.pool.install(|| {
            fork_divide(WorkRange::covering(units), data, stride, &leaf, &combine)
        })
    }
}

fn fork_reduce<R, L, C>(range: WorkRange, leaf: &L, combine: &C) -> Result<R>
where
    R: Send,
    L: Fn(usize) -> Result<R> + Sync,
    C: Fn(R, R) -> Result<R> + Sync,
{
    match range.split() {
        None => leaf(range.low()),
        Some((left, right)) => {
            let (left, right) = rayon::join(
                || fork_reduce(left, leaf, combine),
                || fork_reduce(right, leaf, combine),
            );
            combine(left?, right?)
        }
    }
}

fn fork_divide<T, L, C>(
    range: WorkRange,
    data: &mut [T],
    stride: usize,
    leaf: &L,
    combine: &C,
) -> Result<()>
where
    T: Send,
    L: Fn(WorkRange, &mut [T]) -> Result<()> + Sync,
    C: Fn(WorkRange, usize, &mut [T]) -> Result<()> + Sync,
{
    match range.split() {
        None => leaf(range, data),
        Some((left, right)) => {
            let offset = left.len() * stride;
            let (left_data, right_data) = data.split_at_mut(offset);
            let (left_done, right_done) = rayon::join(
                || fork_divide(left, left_data, stride, leaf, combine),
                || fork_divide(right, right_data, stride, leaf, combine),
            );
            left_done?;
            right_done?;
            combine(range, offset, data)
        }
    }
}

/// Same recursion as [`ForkJoinExecutor`], run left-then-right on the calling
/// thread. Serves as the correctness oracle and the timing baseline.
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn reduce<R, L, C>(len: usize, leaf: L, combine: C) -> Result<R>
    where
        R: Default,
        L: Fn(usize) -> Result<R>,
        C: Fn(R, R) -> Result<R>,
    {
        if len == 0 {
            return Ok(R::default());
        }
        Self::reduce_range(WorkRange::covering(len), &leaf, &combine)
    }

    fn reduce_range<R, L, C>(range: WorkRange, leaf: &L, combine: &C) -> Result<R>
    where
        L: Fn(usize) -> Result<R>,
        C: Fn(R, R) -> Result<R>,
    {
        match range.split() {
            None => leaf(range.low()),
            Some((left, right)) => {
                let left = Self::reduce_range(left, leaf, combine)?;
                let right = Self::reduce_range(right, leaf, combine)?;
                combine(left, right)
            }
        }
    }

    pub fn divide_mut<T, L, C>(
        data: &mut [T],
        units: usize,
        leaf: L,
        combine: C,
    ) -> Result<()>
    where
        L: Fn(WorkRange, &mut [T]) -> Result<()>,
        C: Fn(WorkRange, usize, &mut [T]) -> Result<()>,
    {
        let Some(stride) = unit_stride(data.len(), units) else {
            return Ok(());
        };
        Self::divide_range(WorkRange::covering(units), data, stride, &leaf, &combine)
    }

    fn divide_range<T, L, C>(
        range: WorkRange,
        data: &mut [T],
        stride: usize,
        leaf: &L,
        combine: &C,
    ) -> Result<()>
    where
        L: Fn(WorkRange, &mut [T]) -> Result<()>,
        C: Fn(WorkRange, usize, &mut [T]) -> Result<()>,
    {
        match range.split() {
            None => leaf(range, data),
            Some((left, right)) => {
                let offset = left.len() * stride;
                let (left_data, right_data) = data.split_at_mut(offset);
                Self::divide_range(left, left_data, stride, leaf, combine)?;
                Self::divide_range(right, right_data, stride, leaf, combine)?;
                combine(range, offset, data)
            }
        }
    }
}

/// Elements per unit, or `None` when there is nothing to divide.
fn unit_stride(data_len: usize, units: usize) -> Option<usize> {
    if units == 0 {
        return None;
    }
    assert_eq!(
        data_len % units,
        0,
        "data length {data_len} is not a multiple of {units} units"
    );
    Some(data_len / units)
}

/// Execution strategy for choosing between parallel and sequential
#[derive(Debug)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel(ForkJoinExecutor),
}

impl ExecutionStrategy {
    pub fn parallel(workers: usize) -> Result<Self> {
        Ok(ExecutionStrategy::Parallel(ForkJoinExecutor::new(workers)?))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExecutionStrategy::Sequential => "sequential",
            ExecutionStrategy::Parallel(_) => "parallel",
        }
    }

    /// Worker threads used by this strategy
    pub fn workers(&self) -> usize {
        match self {
            ExecutionStrategy::Sequential => 1,
            ExecutionStrategy::Parallel(executor) => executor.workers(),
        }
    }

    pub fn reduce<R, L, C>(&self, len: usize, leaf: L, combine: C) -> Result<R>
    where
        R: Default + Send,
        L: Fn(usize) -> Result<R> + Sync,
        C: Fn(R, R) -> Result<R> + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => SequentialExecutor::reduce(len, leaf, combine),
            ExecutionStrategy::Parallel(executor) => executor.reduce(len, leaf, combine),
        }
    }

    pub fn divide_mut<T, L, C>(
        &self,
        data: &mut [T],
        units: usize,
        leaf: L,
        combine: C,
    ) -> Result<()>
    where
        T: Send,
        L: Fn(WorkRange, &mut [T]) -> Result<()> + Sync,
        C: Fn(WorkRange, usize, &mut [T]) -> Result<()> + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => {
                SequentialExecutor::divide_mut(data, units, leaf, combine)
            }
            ExecutionStrategy::Parallel(executor) => {
                executor.divide_mut(data, units, leaf, combine)
            }
        }
    }

    /// Calculate optimal workers based on available system resources and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// # Examples
    /// ```rust
    /// use forkbench::forkjoin::ExecutionStrategy;
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(0, 100);
    /// assert!(workers >= 1);
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(2, 100);
    /// assert!(workers <= 2);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means use percentage calculation only
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}
