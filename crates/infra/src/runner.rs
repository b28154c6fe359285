use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use bidwise_core::{TenderId, VendorId};
use bidwise_engine::{BidScoringEngine, RecommendationBatch, ScoringConfig};
use bidwise_tendering::{Bid, Tender, Vendor};

/// One tender's complete scoring input, assembled by the caller's read side.
#[derive(Debug, Clone)]
pub struct TenderSnapshot {
    pub tender: Tender,
    pub bids: Vec<Bid>,
    pub vendors: HashMap<VendorId, Vendor>,
}

/// Read side supplying snapshots; implemented by the caller over its storage.
pub trait TenderSnapshotSource: Send + Sync + 'static {
    fn snapshot(&self, tender_id: TenderId) -> Result<TenderSnapshot, SnapshotError>;
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("tender not found")]
    NotFound,

    #[error("snapshot unavailable: {0}")]
    Unavailable(String),
}

/// Receiver for freshly computed recommendation batches.
///
/// Batches are derived insights, not domain events: sinks typically persist
/// the scores back onto bid records or hand them to a presentation layer.
pub trait RecommendationSink: Send + Sync + 'static {
    fn publish(&self, batch: RecommendationBatch);
}

/// In-memory sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRecommendationSink {
    inner: Mutex<Vec<RecommendationBatch>>,
}

impl InMemoryRecommendationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<RecommendationBatch> {
        self.inner.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl RecommendationSink for InMemoryRecommendationSink {
    fn publish(&self, batch: RecommendationBatch) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.push(batch);
        }
    }
}

enum Control {
    Recompute,
    Shutdown,
}

/// Configuration for the tender evaluation worker.
#[derive(Debug, Clone)]
pub struct EvaluationRunner {
    /// Periodic recompute cadence.
    pub interval: Duration,
    /// Snapshot/scoring retries per cycle before waiting for the next tick.
    pub max_retries: u32,
    /// Base for exponential retry backoff.
    pub base_backoff: Duration,
    pub config: ScoringConfig,
}

impl Default for EvaluationRunner {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            max_retries: 5,
            base_backoff: Duration::from_millis(250),
            config: ScoringConfig::default(),
        }
    }
}

/// Handle for a running evaluation worker (shutdown + recompute hook).
#[derive(Debug)]
pub struct EvaluationRunnerHandle {
    control: mpsc::Sender<Control>,
    join: Option<thread::JoinHandle<()>>,
}

impl EvaluationRunnerHandle {
    /// Request an out-of-cycle recompute, e.g. after a new bid arrives.
    ///
    /// Requests queued while a cycle runs are coalesced into one.
    pub fn trigger(&self) {
        let _ = self.control.send(Control::Recompute);
    }

    /// Gracefully stop the worker thread.
    pub fn shutdown(mut self) {
        let _ = self.control.send(Control::Shutdown);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl EvaluationRunner {
    /// Spawn a worker evaluating one tender on a cadence.
    ///
    /// Runs once on startup, then on every tick or trigger. Failures are
    /// logged and retried with bounded exponential backoff; they never
    /// propagate out of the thread.
    pub fn spawn<S, K>(
        &self,
        name: &'static str,
        tender_id: TenderId,
        source: Arc<S>,
        sink: Arc<K>,
    ) -> EvaluationRunnerHandle
    where
        S: TenderSnapshotSource,
        K: RecommendationSink,
    {
        let (control_tx, control_rx) = mpsc::channel::<Control>();
        let runner = self.clone();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || runner_loop(name, tender_id, runner, control_rx, source, sink))
            .expect("failed to spawn evaluation runner thread");

        EvaluationRunnerHandle {
            control: control_tx,
            join: Some(join),
        }
    }
}

fn runner_loop<S, K>(
    name: &'static str,
    tender_id: TenderId,
    runner: EvaluationRunner,
    control_rx: mpsc::Receiver<Control>,
    source: Arc<S>,
    sink: Arc<K>,
) where
    S: TenderSnapshotSource,
    K: RecommendationSink,
{
    info!(runner = name, tender_id = %tender_id, "evaluation runner started");

    let engine = BidScoringEngine::new(runner.config.clone());

    loop {
        evaluate_with_retries(name, tender_id, &runner, &engine, source.as_ref(), sink.as_ref());

        // Wait for the next tick or an explicit trigger; shutdown wins.
        match control_rx.recv_timeout(runner.interval) {
            Ok(Control::Shutdown) => break,
            Ok(Control::Recompute) | Err(RecvTimeoutError::Timeout) => {
                // Coalesce triggers that piled up while we were computing.
                let mut shutdown = false;
                while let Ok(control) = control_rx.try_recv() {
                    if matches!(control, Control::Shutdown) {
                        shutdown = true;
                        break;
                    }
                }
                if shutdown {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!(runner = name, tender_id = %tender_id, "evaluation runner stopped");
}

fn evaluate_with_retries<S, K>(
    name: &'static str,
    tender_id: TenderId,
    runner: &EvaluationRunner,
    engine: &BidScoringEngine,
    source: &S,
    sink: &K,
) where
    S: TenderSnapshotSource,
    K: RecommendationSink,
{
    for attempt in 0..=runner.max_retries {
        if attempt > 0 {
            thread::sleep(backoff(runner.base_backoff, attempt));
        }

        let snapshot = match source.snapshot(tender_id) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(
                    runner = name,
                    tender_id = %tender_id,
                    attempt,
                    %error,
                    "failed to load tender snapshot"
                );
                continue;
            }
        };

        let batch = engine.recommendations(&snapshot.bids, &snapshot.vendors, &snapshot.tender);
        sink.publish(batch);
        return;
    }

    warn!(
        runner = name,
        tender_id = %tender_id,
        retries = runner.max_retries,
        "giving up on this cycle; will retry on the next tick"
    );
}

/// Exponential backoff: base * 2^(attempt-1), capped at 10s.
fn backoff(base: Duration, attempt: u32) -> Duration {
    let pow = 1u32 << attempt.saturating_sub(1).min(10);
    let ms = base.as_millis().saturating_mul(u128::from(pow));
    Duration::from_millis(ms.min(10_000) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidwise_core::BidId;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    struct FixedSource {
        snapshot: TenderSnapshot,
        calls: AtomicU32,
    }

    impl TenderSnapshotSource for FixedSource {
        fn snapshot(&self, _: TenderId) -> Result<TenderSnapshot, SnapshotError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.snapshot.clone())
        }
    }

    struct FailingSource;

    impl TenderSnapshotSource for FailingSource {
        fn snapshot(&self, _: TenderId) -> Result<TenderSnapshot, SnapshotError> {
            Err(SnapshotError::Unavailable("read model lagging".to_string()))
        }
    }

    fn snapshot() -> TenderSnapshot {
        let tender = Tender::new(
            TenderId::new(),
            "Fleet maintenance",
            "services",
            120_000.0,
            Utc::now(),
        )
        .unwrap();
        let vendor = Vendor::new(VendorId::new(), "Vendor", 4.0, 6, 3, 4.2).unwrap();
        let bid = Bid::new(
            BidId::new(),
            tender.id_typed(),
            vendor.id_typed(),
            95_000.0,
            "Structured plan with testing, documentation and monitoring from day one, \
             staffed by an experienced team following an agreed methodology.",
            60,
        )
        .unwrap();

        TenderSnapshot {
            tender,
            bids: vec![bid],
            vendors: HashMap::from([(vendor.id_typed(), vendor)]),
        }
    }

    fn wait_for_batches(sink: &InMemoryRecommendationSink, at_least: usize) -> Vec<RecommendationBatch> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let batches = sink.batches();
            if batches.len() >= at_least || Instant::now() >= deadline {
                return batches;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn runner_publishes_on_startup_and_trigger() {
        let snapshot = snapshot();
        let tender_id = snapshot.tender.id_typed();
        let source = Arc::new(FixedSource {
            snapshot,
            calls: AtomicU32::new(0),
        });
        let sink = Arc::new(InMemoryRecommendationSink::new());

        let handle = EvaluationRunner {
            interval: Duration::from_secs(3600),
            ..EvaluationRunner::default()
        }
        .spawn("test-runner", tender_id, Arc::clone(&source), Arc::clone(&sink));

        let startup = wait_for_batches(&sink, 1);
        assert!(!startup.is_empty());
        assert_eq!(startup[0].tender_id, tender_id);
        assert_eq!(startup[0].len(), 1);

        handle.trigger();
        let after_trigger = wait_for_batches(&sink, 2);
        assert!(after_trigger.len() >= 2);

        handle.shutdown();
    }

    #[test]
    fn runner_survives_snapshot_failures_and_stops_cleanly() {
        let sink = Arc::new(InMemoryRecommendationSink::new());
        let handle = EvaluationRunner {
            interval: Duration::from_secs(3600),
            max_retries: 1,
            base_backoff: Duration::from_millis(1),
            ..EvaluationRunner::default()
        }
        .spawn(
            "failing-runner",
            TenderId::new(),
            Arc::new(FailingSource),
            Arc::clone(&sink),
        );

        // Give the first (failing) cycle time to run its retries.
        thread::sleep(Duration::from_millis(50));
        handle.shutdown();
        assert!(sink.batches().is_empty());
    }
}
