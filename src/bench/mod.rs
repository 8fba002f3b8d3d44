//! Benchmark harness comparing a sequential and a parallel implementation
//!
//! For each strategy the harness computes one untimed result, then averages
//! `runs` timed evaluations. Every evaluation receives fresh input from a
//! setup closure whose cost is excluded from the measurement. The untimed
//! results must match exactly or the comparison fails with
//! [`Error::Consistency`].

use crate::error::{Error, Result};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Sequential,
    Parallel,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Sequential => write!(f, "sequential"),
            Phase::Parallel => write!(f, "parallel"),
        }
    }
}

/// Timing summary of one workload
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub workload: String,
    pub runs: usize,
    pub workers: usize,
    pub sequential_ms: f64,
    pub parallel_ms: f64,
    /// `sequential_ms / parallel_ms`, 0 when the parallel time is too small to measure
    pub speedup: f64,
    /// `100 * speedup / workers`
    pub efficiency_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl BenchmarkReport {
    pub fn new(
        workload: impl Into<String>,
        runs: usize,
        workers: usize,
        sequential: Duration,
        parallel: Duration,
    ) -> Self {
        let sequential_ms = sequential.as_secs_f64() * 1000.0;
        let parallel_ms = parallel.as_secs_f64() * 1000.0;
        let speedup = if parallel_ms > 0.0 {
            sequential_ms / parallel_ms
        } else {
            0.0
        };
        let efficiency_percent = 100.0 * speedup / workers.max(1) as f64;

        Self {
            workload: workload.into(),
            runs,
            workers,
            sequential_ms,
            parallel_ms,
            speedup,
            efficiency_percent,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Verified result of a comparison together with its timings
#[derive(Debug)]
pub struct Comparison<R> {
    pub result: R,
    pub report: BenchmarkReport,
}

type ProgressFn<'a> = Box<dyn Fn(Phase, usize, usize) + 'a>;

pub struct Harness<'a> {
    runs: usize,
    workers: usize,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> Harness<'a> {
    pub fn new(runs: usize, workers: usize) -> Self {
        Self {
            runs,
            workers,
            progress: None,
        }
    }

    /// Report each finished timed run as `(phase, run, total_runs)`
    pub fn with_progress(mut self, progress: impl Fn(Phase, usize, usize) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn compare<S, R, Setup, Seq, Par>(
        &self,
        workload: &str,
        mut setup: Setup,
        mut sequential: Seq,
        mut parallel: Par,
    ) -> Result<Comparison<R>>
    where
        R: PartialEq,
        Setup: FnMut() -> S,
        Seq: FnMut(S) -> Result<R>,
        Par: FnMut(S) -> Result<R>,
    {
        if self.runs == 0 {
            return Err(Error::config("runs", "must be at least 1"));
        }

        tracing::info!("Evaluating sequential {}", workload);
        let sequential_result = sequential(setup())?;
        let sequential_time = self.average(Phase::Sequential, &mut setup, &mut sequential)?;

        tracing::info!("Evaluating parallel {} ({} workers)", workload, self.workers);
        let parallel_result = parallel(setup())?;
        let parallel_time = self.average(Phase::Parallel, &mut setup, &mut parallel)?;

        if sequential_result != parallel_result {
            return Err(Error::Consistency {
                workload: workload.to_string(),
            });
        }

        let report = BenchmarkReport::new(
            workload,
            self.runs,
            self.workers,
            sequential_time,
            parallel_time,
        );
        tracing::debug!(
            "{}: sequential {:.1} ms, parallel {:.1} ms",
            workload,
            report.sequential_ms,
            report.parallel_ms
        );

        Ok(Comparison {
            result: sequential_result,
            report,
        })
    }

    fn average<S, R>(
        &self,
        phase: Phase,
        setup: &mut impl FnMut() -> S,
        run: &mut impl FnMut(S) -> Result<R>,
    ) -> Result<Duration> {
        let mut total = Duration::ZERO;
        for i in 0..self.runs {
            let input = setup();
            let start = Instant::now();
            run(input)?;
            total += start.elapsed();

            if let Some(progress) = &self.progress {
                progress(phase, i + 1, self.runs);
            }
        }
        Ok(total / self.runs as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::Mutex;

    #[test]
    fn test_report_derived_metrics() {
        let report = BenchmarkReport::new(
            "sort",
            5,
            4,
            Duration::from_millis(400),
            Duration::from_millis(100),
        );
        assert!((report.sequential_ms - 400.0).abs() < 1e-9);
        assert!((report.parallel_ms - 100.0).abs() < 1e-9);
        assert!((report.speedup - 4.0).abs() < 1e-9);
        assert!((report.efficiency_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_zero_parallel_time() {
        let report = BenchmarkReport::new("x", 1, 2, Duration::from_millis(3), Duration::ZERO);
        assert_eq!(report.speedup, 0.0);
        assert_eq!(report.efficiency_percent, 0.0);
    }

    #[test]
    fn test_report_serializes_without_empty_detail() {
        let report = BenchmarkReport::new("matrix", 1, 1, Duration::ZERO, Duration::ZERO);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["workload"], "matrix");
        assert!(json.get("detail").is_none());

        let json = serde_json::to_value(report.with_detail("4 x 4")).unwrap();
        assert_eq!(json["detail"], "4 x 4");
    }

    #[test]
    fn test_compare_runs_fresh_setup_each_time() {
        let setups = Cell::new(0);
        let harness = Harness::new(3, 2);
        let comparison = harness
            .compare(
                "sum",
                || {
                    setups.set(setups.get() + 1);
                    vec![3, 1, 2]
                },
                |mut v: Vec<i32>| {
                    v.sort();
                    Ok(v)
                },
                |mut v: Vec<i32>| {
                    v.sort_unstable();
                    Ok(v)
                },
            )
            .unwrap();
        assert_eq!(comparison.result, vec![1, 2, 3]);
        // one untimed + three timed runs per strategy
        assert_eq!(setups.get(), 8);
        assert_eq!(comparison.report.runs, 3);
        assert_eq!(comparison.report.workers, 2);
    }

    #[test]
    fn test_compare_detects_inconsistent_results() {
        let harness = Harness::new(1, 2);
        let result = harness.compare("broken", || 2, |x: i32| Ok(x * 2), |x: i32| Ok(x * 3));
        match result {
            Err(Error::Consistency { workload }) => assert_eq!(workload, "broken"),
            other => panic!("expected consistency error, got {other:?}"),
        }
    }

    #[test]
    fn test_compare_propagates_run_error() {
        let harness = Harness::new(2, 2);
        let result = harness.compare(
            "failing",
            || (),
            |_| Ok(1),
            |_| Err::<i32, _>(Error::leaf(0, "boom")),
        );
        assert!(matches!(result, Err(Error::Leaf { .. })));
    }

    #[test]
    fn test_compare_rejects_zero_runs() {
        let harness = Harness::new(0, 2);
        let result = harness.compare("none", || (), |_| Ok(()), |_| Ok(()));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_progress_reports_every_run() {
        let seen = Mutex::new(Vec::new());
        let harness = Harness::new(2, 1).with_progress(|phase, run, total| {
            seen.lock().unwrap().push((phase, run, total));
        });
        harness
            .compare("noop", || (), |_| Ok(()), |_| Ok(()))
            .unwrap();
        drop(harness);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                (Phase::Sequential, 1, 2),
                (Phase::Sequential, 2, 2),
                (Phase::Parallel, 1, 2),
                (Phase::Parallel, 2, 2),
            ]
        );
    }
}
