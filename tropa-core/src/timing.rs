//! Timing instrumentation for wrapping core operations.
//!
//! Correctness never depends on anything here; callers that want per-phase
//! timings wrap calls in [`Metrics::observe`] and dump the summaries when
//! done.

use std::fmt;
use std::time::{Duration, Instant};

use hashbrown::HashMap;
use log::info;

/// Monotonic elapsed-time probe.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch(Instant);

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Aggregate of the recorded samples for one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub count: usize,
    pub last: Duration,
    pub mean_secs: f64,
    pub stddev_secs: f64,
}

impl fmt::Display for TimingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}+-{:.4} sec over {} runs",
            self.mean_secs, self.stddev_secs, self.count
        )
    }
}

/// Registry of labelled duration samples.
///
/// One instance per measuring context; not shared across threads.
#[derive(Debug, Default)]
pub struct Metrics {
    samples: HashMap<&'static str, Vec<Duration>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &'static str, elapsed: Duration) {
        self.samples.entry(label).or_default().push(elapsed);
    }

    /// Run `op`, recording its wall time under `label`.
    pub fn observe<T>(&mut self, label: &'static str, op: impl FnOnce() -> T) -> T {
        let watch = Stopwatch::start();
        let result = op();
        self.record(label, watch.elapsed());
        result
    }

    pub fn last(&self, label: &str) -> Option<Duration> {
        self.samples.get(label).and_then(|runs| runs.last().copied())
    }

    pub fn summary(&self, label: &str) -> Option<TimingSummary> {
        let runs = self.samples.get(label).filter(|runs| !runs.is_empty())?;
        let secs: Vec<f64> = runs.iter().map(Duration::as_secs_f64).collect();
        let mean = secs.iter().sum::<f64>() / secs.len() as f64;
        let variance = if secs.len() > 1 {
            secs.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (secs.len() - 1) as f64
        } else {
            0.0
        };
        Some(TimingSummary {
            count: runs.len(),
            last: *runs.last()?,
            mean_secs: mean,
            stddev_secs: variance.sqrt(),
        })
    }

    /// Log every label's summary at info level.
    pub fn log_summaries(&self) {
        let mut labels: Vec<&&str> = self.samples.keys().collect();
        labels.sort_unstable();
        for label in labels {
            if let Some(summary) = self.summary(label) {
                info!("{label}: {summary}");
            }
        }
    }
}
