//! Observation hooks for a running search.
//!
//! A [`SearchSink`] is called synchronously by the search loop on every
//! accepted improvement and, optionally, every `report_interval` iterations.
//! Errors returned by a sink are logged and counted but never stop the
//! search.

use serde::{Deserialize, Serialize};

use super::Phase;

/// Error type sinks may return.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Snapshot of one outer iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub iteration: usize,
    /// Current tour cost after the iteration's phase completed.
    pub cost: f64,
    /// Best cost so far.
    pub best_cost: f64,
    pub tenure: usize,
    /// Whether this iteration found a new best tour.
    pub improved: bool,
    pub phase: Phase,
}

/// Receiver of iteration records.
///
/// Closures of the form `FnMut(&TraceRecord) -> Result<(), SinkError>`
/// implement this trait.
pub trait SearchSink {
    fn on_iteration(&mut self, record: &TraceRecord) -> Result<(), SinkError>;
}

impl<F> SearchSink for F
where
    F: FnMut(&TraceRecord) -> Result<(), SinkError>,
{
    fn on_iteration(&mut self, record: &TraceRecord) -> Result<(), SinkError> {
        self(record)
    }
}

/// Sink that ignores every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl SearchSink for NoopSink {
    fn on_iteration(&mut self, _record: &TraceRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that keeps every record it receives.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    records: Vec<TraceRecord>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TraceRecord> {
        self.records
    }

    /// Serializes the collected records as a JSON array.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }
}

impl SearchSink for TraceRecorder {
    fn on_iteration(&mut self, record: &TraceRecord) -> Result<(), SinkError> {
        self.records.push(*record);
        Ok(())
    }
}

/// Forwards only records whose best cost beats the last one forwarded.
///
/// The "last recorded best" belongs to this adapter, so a caller running
/// several sessions keeps one filter per session and can carry the value
/// from one run to the next with [`with_last_recorded_best`].
///
/// [`with_last_recorded_best`]: Self::with_last_recorded_best
///
/// # Examples
///
/// ```
/// use u_drilling::tabu::{BestSnapshotFilter, Phase, SearchSink, TraceRecord, TraceRecorder};
///
/// let mut filter = BestSnapshotFilter::new(TraceRecorder::new());
/// let mut record = TraceRecord {
///     iteration: 1, cost: 10.0, best_cost: 10.0, tenure: 3, improved: true, phase: Phase::Intensify,
/// };
/// filter.on_iteration(&record).unwrap();
/// record.iteration = 2;
/// filter.on_iteration(&record).unwrap(); // same best: dropped
/// assert_eq!(filter.last_recorded_best(), 10.0);
/// assert_eq!(filter.into_inner().records().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BestSnapshotFilter<S> {
    inner: S,
    last_recorded_best: f64,
}

impl<S: SearchSink> BestSnapshotFilter<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            last_recorded_best: f64::INFINITY,
        }
    }

    /// Starts from a best value recorded by an earlier session.
    pub fn with_last_recorded_best(mut self, value: f64) -> Self {
        self.last_recorded_best = value;
        self
    }

    pub fn last_recorded_best(&self) -> f64 {
        self.last_recorded_best
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SearchSink> SearchSink for BestSnapshotFilter<S> {
    fn on_iteration(&mut self, record: &TraceRecord) -> Result<(), SinkError> {
        if record.best_cost < self.last_recorded_best {
            self.last_recorded_best = record.best_cost;
            self.inner.on_iteration(record)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(iteration: usize, best_cost: f64) -> TraceRecord {
        TraceRecord {
            iteration,
            cost: best_cost,
            best_cost,
            tenure: 2,
            improved: false,
            phase: Phase::Normal,
        }
    }

    #[test]
    fn test_recorder_collects() {
        let mut rec = TraceRecorder::new();
        rec.on_iteration(&record(1, 5.0)).unwrap();
        rec.on_iteration(&record(2, 4.0)).unwrap();
        assert_eq!(rec.records().len(), 2);
        assert_eq!(rec.into_records()[1].iteration, 2);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |r: &TraceRecord| -> Result<(), SinkError> {
                seen.push(r.iteration);
                Ok(())
            };
            sink.on_iteration(&record(7, 1.0)).unwrap();
        }
        assert_eq!(seen, vec![7]);
    }

    #[test]
    fn test_filter_carries_session_best() {
        let mut filter =
            BestSnapshotFilter::new(TraceRecorder::new()).with_last_recorded_best(4.5);
        filter.on_iteration(&record(1, 5.0)).unwrap();
        filter.on_iteration(&record(2, 4.0)).unwrap();
        filter.on_iteration(&record(3, 4.0)).unwrap();
        filter.on_iteration(&record(4, 3.0)).unwrap();
        assert_eq!(filter.last_recorded_best(), 3.0);
        let kept: Vec<usize> = filter
            .into_inner()
            .records()
            .iter()
            .map(|r| r.iteration)
            .collect();
        assert_eq!(kept, vec![2, 4]);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_to_json() {
        let mut rec = TraceRecorder::new();
        rec.on_iteration(&record(1, 2.0)).unwrap();
        let json = rec.to_json().unwrap();
        assert!(json.contains("\"phase\":\"Normal\""));
    }
}
