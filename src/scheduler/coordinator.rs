//! Batch coordinator
//!
//! Runs the three probes of one batch concurrently under a shared
//! deadline, guards publication by generation, and cancels a superseded
//! batch cooperatively the moment a newer one starts.

use crate::models::{ProbeResult, SanitizedMetrics};
use crate::output::DisplaySink;
use crate::probe::ProbeRunner;
use crate::sanitize::sanitize;
use crate::types::ProbeKind;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Lifecycle of the batch machinery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No batch in flight
    Idle,
    /// The batch with this generation is running
    Running(u64),
}

/// How a finished batch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// All probes settled and the results were published
    Completed(u64),
    /// A newer batch started first; the results were discarded
    Superseded(u64),
    /// The batch deadline cut at least one probe short
    TimedOut(u64),
}

struct CurrentBatch {
    generation: u64,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owner of the generation counter and the in-flight batch.
///
/// The generation counter is the single piece of shared mutable state in
/// the whole scheduling domain; it only ever advances through `start`.
/// A finished batch publishes to the sink only while its generation is
/// still the active one, so a slow probe from batch N can never overwrite
/// a fresh result from batch N+1.
pub struct BatchCoordinator {
    runner: Arc<dyn ProbeRunner>,
    sink: Arc<dyn DisplaySink>,
    batch_deadline: Duration,
    generation: AtomicU64,
    current: Mutex<Option<CurrentBatch>>,
    state: StdMutex<BatchState>,
    last_outcome: StdMutex<Option<BatchOutcome>>,
}

impl BatchCoordinator {
    pub fn new(
        runner: Arc<dyn ProbeRunner>,
        sink: Arc<dyn DisplaySink>,
        batch_deadline: Duration,
    ) -> Self {
        Self {
            runner,
            sink,
            batch_deadline,
            generation: AtomicU64::new(0),
            current: Mutex::new(None),
            state: StdMutex::new(BatchState::Idle),
            last_outcome: StdMutex::new(None),
        }
    }

    /// The generation of the most recently started batch
    pub fn active_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Current lifecycle state
    pub fn state(&self) -> BatchState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// How the most recently finished batch ended
    pub fn last_outcome(&self) -> Option<BatchOutcome> {
        *self.last_outcome.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a new batch, superseding any batch still in flight.
    ///
    /// The superseded batch is cancelled cooperatively and its eventual
    /// results are discarded by the publish gate. Returns the new
    /// batch's generation.
    pub async fn start(self: &Arc<Self>) -> u64 {
        let mut current = self.current.lock().await;

        if let Some(previous) = current.take() {
            debug!("superseding batch generation {}", previous.generation);
            previous.cancel.cancel();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        self.set_state(BatchState::Running(generation));

        let coordinator = Arc::clone(self);
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            coordinator.run_batch(generation, token).await;
        });

        *current = Some(CurrentBatch {
            generation,
            cancel,
            task,
        });
        generation
    }

    /// Start a batch and wait for it to settle. Used by one-shot mode.
    pub async fn run_to_completion(self: &Arc<Self>) {
        self.start().await;
        self.join_current().await;
    }

    /// Wait for the in-flight batch, if any, to settle
    pub async fn join_current(&self) {
        let batch = self.current.lock().await.take();
        if let Some(batch) = batch {
            if let Err(e) = batch.task.await {
                warn!("batch task aborted: {}", e);
            }
        }
    }

    /// Cancel any in-flight batch and immediately render the
    /// disconnected state without waiting for probes to settle.
    pub async fn interrupt_offline(&self) {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            info!("offline: cancelling batch generation {}", previous.generation);
            previous.cancel.cancel();
        }
        self.sink.render(&SanitizedMetrics::unavailable(), false);
    }

    /// Cancel any in-flight batch without rendering, e.g. on shutdown
    pub async fn cancel_current(&self) {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            previous.cancel.cancel();
        }
    }

    /// Render the one-time degraded state for environments that cannot
    /// observe the network at all
    pub fn render_unsupported(&self) {
        self.sink.render_unsupported();
    }

    async fn run_batch(&self, generation: u64, cancel: CancellationToken) {
        info!("batch {} started", generation);

        let (download, upload, latency) = tokio::join!(
            self.run_probe(ProbeKind::Download, &cancel),
            self.run_probe(ProbeKind::Upload, &cancel),
            self.run_probe(ProbeKind::Latency, &cancel),
        );
        let deadline_hit = download.1 || upload.1 || latency.1;
        let results = [download.0, upload.0, latency.0];

        // Publish gate: only the active generation may reach the sink
        if cancel.is_cancelled() || self.active_generation() != generation {
            debug!("batch {} superseded; discarding its results", generation);
            self.finish(generation, BatchOutcome::Superseded(generation));
            return;
        }

        for result in &results {
            debug!("batch {}: {}", generation, result.describe());
        }

        let metrics = sanitize(&results);
        self.sink.render(&metrics, true);

        let outcome = if deadline_hit {
            BatchOutcome::TimedOut(generation)
        } else {
            BatchOutcome::Completed(generation)
        };
        info!("batch {} finished: {:?}", generation, outcome);
        self.finish(generation, outcome);
    }

    /// Run one probe with the batch deadline as a backstop over the
    /// probe's own timeout. Returns the result and whether the backstop
    /// fired.
    async fn run_probe(&self, kind: ProbeKind, cancel: &CancellationToken) -> (ProbeResult, bool) {
        match timeout(self.batch_deadline, self.runner.run(kind, cancel.child_token())).await {
            Ok(result) => (result, false),
            Err(_) => {
                warn!("{} probe exceeded the batch deadline", kind);
                (ProbeResult::timed_out(kind, self.batch_deadline), true)
            }
        }
    }

    fn set_state(&self, next: BatchState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    fn finish(&self, generation: u64, outcome: BatchOutcome) {
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            // A superseded batch must not stomp the state of the batch
            // that replaced it.
            if *state == BatchState::Running(generation) {
                *state = BatchState::Idle;
            }
        }
        *self.last_outcome.lock().unwrap_or_else(|e| e.into_inner()) = Some(outcome);
    }
}
