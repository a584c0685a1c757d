//! Request lifecycle for one "generate text" action.
//!
//! A controller owns its snapshot; callers read it or subscribe to changes
//! but never write it. Submissions are not gated while one is pending: every
//! spawned call publishes its own outcome when it settles, so the last call
//! to settle decides what is visible.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{FailureKind, GenerationError, ValidationError};
use crate::generator::TextGenerator;
use crate::metrics::{GENERATION_LATENCY, IN_FLIGHT, OUTCOMES_TOTAL, SUBMISSIONS_TOTAL};
use crate::prompt::FeatureSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Read-only view of a controller at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: RequestState,
    pub result: Option<String>,
    pub error: Option<String>,
    pub failure: Option<FailureKind>,
    pub updated_at: DateTime<Utc>,
}

impl Snapshot {
    fn idle() -> Self {
        Self {
            state: RequestState::Idle,
            result: None,
            error: None,
            failure: None,
            updated_at: Utc::now(),
        }
    }

    fn pending() -> Self {
        Self {
            state: RequestState::Pending,
            ..Self::idle()
        }
    }

    fn succeeded(text: String) -> Self {
        Self {
            state: RequestState::Succeeded,
            result: Some(text),
            ..Self::idle()
        }
    }

    fn failed(kind: FailureKind, message: &str) -> Self {
        Self {
            state: RequestState::Failed,
            error: Some(message.to_string()),
            failure: Some(kind),
            ..Self::idle()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == RequestState::Pending
    }
}

#[derive(Clone)]
pub struct GenerationController {
    feature: Arc<FeatureSpec>,
    generator: Arc<dyn TextGenerator>,
    snapshot: Arc<watch::Sender<Snapshot>>,
    sequence: Arc<AtomicU64>,
}

impl GenerationController {
    pub fn new(feature: FeatureSpec, generator: Arc<dyn TextGenerator>) -> Self {
        let (tx, _) = watch::channel(Snapshot::idle());
        Self {
            feature: Arc::new(feature),
            generator,
            snapshot: Arc::new(tx),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn feature(&self) -> &FeatureSpec {
        &self.feature
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Validates `values` and, when they are all filled, publishes `Pending`
    /// and spawns the one outbound call for this submission.
    ///
    /// Must be called from within a tokio runtime. The returned handle
    /// resolves once the outcome has been published.
    pub fn submit(&self, values: &[String]) -> Result<JoinHandle<()>, ValidationError> {
        let name = self.feature.name.clone();
        SUBMISSIONS_TOTAL.with_label_values(&[name.as_str()]).inc();

        if let Err(err) = self.feature.validate(values) {
            debug!(feature = %name, field = %err.field, "submission rejected");
            OUTCOMES_TOTAL
                .with_label_values(&[name.as_str(), FailureKind::Validation.as_str()])
                .inc();
            self.snapshot
                .send_replace(Snapshot::failed(FailureKind::Validation, &err.message));
            return Err(err);
        }

        let prompt = self.feature.render_prompt(values);
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        self.snapshot.send_replace(Snapshot::pending());
        IN_FLIGHT.with_label_values(&[name.as_str()]).inc();
        info!(feature = %name, seq, "submission dispatched");

        let controller = self.clone();
        Ok(tokio::spawn(async move {
            let start = Instant::now();
            // a panicking generator still settles as a transport failure
            let generator = Arc::clone(&controller.generator);
            let call = tokio::spawn(async move { generator.generate(&prompt).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(err) => Err(GenerationError::Aborted(err.to_string())),
            };
            GENERATION_LATENCY
                .with_label_values(&[name.as_str()])
                .observe(start.elapsed().as_secs_f64());
            IN_FLIGHT.with_label_values(&[name.as_str()]).dec();
            controller.settle(seq, outcome);
        }))
    }

    fn settle(&self, seq: u64, outcome: Result<String, GenerationError>) {
        let name = self.feature.name.as_str();
        let next = match outcome {
            Ok(text) => {
                info!(feature = name, seq, chars = text.chars().count(), "generation succeeded");
                OUTCOMES_TOTAL.with_label_values(&[name, "succeeded"]).inc();
                Snapshot::succeeded(text)
            }
            Err(err) => {
                let kind = err.kind();
                let message = match kind {
                    FailureKind::ResponseShape => {
                        warn!(feature = name, seq, error = %err, "unexpected response shape");
                        &self.feature.empty_response_message
                    }
                    _ => {
                        error!(feature = name, seq, error = %err, "generation call failed");
                        &self.feature.transport_message
                    }
                };
                OUTCOMES_TOTAL.with_label_values(&[name, kind.as_str()]).inc();
                Snapshot::failed(kind, message)
            }
        };
        self.snapshot.send_replace(next);
    }
}
