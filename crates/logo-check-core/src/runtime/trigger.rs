// crates/logo-check-core/src/runtime/trigger.rs
// ============================================================================
// Module: Logo Check Verification Trigger
// Description: Activation entry point issuing one contained verification call.
// Purpose: Run logo verification in the background without affecting the host.
// Dependencies: crate::core, crate::diagnostics, crate::interfaces, tokio
// ============================================================================

//! ## Overview
//! [`VerificationTrigger::on_activate`] is the explicit entry point the host
//! surface calls when it becomes active. The call allocates an activation id,
//! moves the activation to `Pending`, and spawns one task that invokes the
//! injected [`VerificationService`] exactly once. The host never waits on the
//! service and never sees its errors.
//! Invariants:
//! - Exactly one service call per activation; no dedupe, caching, or retry.
//! - Exactly one diagnostic record per failed activation, none on success.
//! - Panics and timeouts inside the service call are contained like any other
//!   failure.
//! - Dropping the [`ActivationHandle`] does not cancel the pending call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinError;

use crate::core::identifiers::ActivationId;
use crate::core::identifiers::RecordId;
use crate::core::outcome::VerificationError;
use crate::core::outcome::VerificationOutcome;
use crate::core::outcome::VerificationRequest;
use crate::core::state::ActivationState;
use crate::core::state::Settlement;
use crate::core::state::StateError;
use crate::diagnostics::DiagnosticRecord;
use crate::diagnostics::StderrDiagnosticSink;
use crate::interfaces::DiagnosticSink;
use crate::interfaces::VerificationService;

// ============================================================================
// SECTION: Build Errors
// ============================================================================

/// Errors returned while assembling a trigger.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Only construction can fail; activation is infallible.
#[derive(Debug, Error)]
pub enum TriggerBuildError {
    /// No verification service was configured.
    #[error("verification service is not configured")]
    MissingService,
    /// No runtime handle was supplied and none is current.
    #[error("no tokio runtime available for activation tasks")]
    NoRuntime,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for a verification trigger.
///
/// # Invariants
/// - `build` succeeds only when a service is configured and a runtime is reachable.
/// - Diagnostics default to [`StderrDiagnosticSink`].
#[derive(Default)]
pub struct VerificationTriggerBuilder {
    /// Injected verification service.
    service: Option<Arc<dyn VerificationService>>,
    /// Injected diagnostic sink.
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    /// Optional per-activation deadline.
    timeout: Option<Duration>,
    /// Runtime used to spawn activation tasks.
    runtime: Option<Handle>,
}

impl VerificationTriggerBuilder {
    /// Sets the verification service.
    #[must_use]
    pub fn service(self, service: impl VerificationService + 'static) -> Self {
        self.service_arc(Arc::new(service))
    }

    /// Sets a shared verification service.
    #[must_use]
    pub fn service_arc(mut self, service: Arc<dyn VerificationService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Sets the diagnostic sink.
    #[must_use]
    pub fn diagnostics(self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics_arc(Arc::new(sink))
    }

    /// Sets a shared diagnostic sink.
    #[must_use]
    pub fn diagnostics_arc(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Sets a per-activation deadline for the service call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the runtime used to spawn activation tasks.
    #[must_use]
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Builds the trigger.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerBuildError::MissingService`] when no service is set and
    /// [`TriggerBuildError::NoRuntime`] when no runtime is reachable.
    pub fn build(self) -> Result<VerificationTrigger, TriggerBuildError> {
        let service = self.service.ok_or(TriggerBuildError::MissingService)?;
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| TriggerBuildError::NoRuntime)?,
        };
        let diagnostics = self.diagnostics.unwrap_or_else(|| Arc::new(StderrDiagnosticSink));
        Ok(VerificationTrigger {
            service,
            diagnostics,
            timeout: self.timeout,
            runtime,
            activations: AtomicU64::new(0),
        })
    }
}

// ============================================================================
// SECTION: Trigger
// ============================================================================

/// Lifecycle-bound verification trigger.
///
/// # Invariants
/// - Holds no per-activation state; activations are independent.
/// - Activation ids are allocated monotonically starting at 1 and wrap to 1
///   after `u64::MAX`.
pub struct VerificationTrigger {
    /// Injected verification service.
    service: Arc<dyn VerificationService>,
    /// Injected diagnostic sink.
    diagnostics: Arc<dyn DiagnosticSink>,
    /// Optional per-activation deadline.
    timeout: Option<Duration>,
    /// Runtime used to spawn activation tasks.
    runtime: Handle,
    /// Monotonic counter backing activation ids.
    pub(super) activations: AtomicU64,
}

impl VerificationTrigger {
    /// Returns a builder for the trigger.
    #[must_use]
    pub fn builder() -> VerificationTriggerBuilder {
        VerificationTriggerBuilder::default()
    }

    /// Handles a host activation for the given record.
    ///
    /// Issues exactly one verification request in the background and returns
    /// immediately. Failures are recorded through the diagnostic sink and never
    /// returned to the caller.
    ///
    /// The activation id is allocated and the state moves to
    /// [`ActivationState::Pending`] before this returns, but the service call
    /// itself starts when the runtime first polls the spawned task. On a
    /// current-thread runtime that happens only once the host yields.
    pub fn on_activate(&self, record_id: RecordId) -> ActivationHandle {
        let activation_id = self.next_activation_id();
        let (state_tx, state_rx) = watch::channel(ActivationState::Idle);
        // A fresh channel always starts Idle, so this cannot fail.
        let _ = transition(&state_tx, ActivationState::begin);

        let task = ActivationTask {
            activation_id,
            record_id: record_id.clone(),
            service: Arc::clone(&self.service),
            diagnostics: Arc::clone(&self.diagnostics),
            timeout: self.timeout,
            runtime: self.runtime.clone(),
            state: state_tx,
        };
        self.runtime.spawn(task.run());

        ActivationHandle {
            activation_id,
            record_id,
            state: state_rx,
        }
    }

    /// Allocates the next activation identifier.
    pub(super) fn next_activation_id(&self) -> ActivationId {
        let seq = self.activations.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        ActivationId::from_raw(seq).unwrap_or(ActivationId::new(NonZeroU64::MIN))
    }
}

// ============================================================================
// SECTION: Activation Handle
// ============================================================================

/// Host-side view of one activation.
///
/// # Invariants
/// - Observing the handle never affects the activation task.
#[derive(Debug, Clone)]
pub struct ActivationHandle {
    /// Activation identifier.
    activation_id: ActivationId,
    /// Record under verification.
    record_id: RecordId,
    /// Receiver tracking the activation state.
    state: watch::Receiver<ActivationState>,
}

impl ActivationHandle {
    /// Returns the activation identifier.
    #[must_use]
    pub const fn activation_id(&self) -> ActivationId {
        self.activation_id
    }

    /// Returns the record under verification.
    #[must_use]
    pub const fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// Returns a snapshot of the current activation state.
    #[must_use]
    pub fn state(&self) -> ActivationState {
        *self.state.borrow()
    }

    /// Waits until the activation settles.
    ///
    /// Always resolves. If the runtime drops the task before it settles, the
    /// activation reports as contained with an `aborted` error kind.
    pub async fn settled(mut self) -> Settlement {
        match self.state.wait_for(ActivationState::is_terminal).await {
            Ok(state) => state.settlement().unwrap_or(ABORTED_SETTLEMENT),
            Err(_) => ABORTED_SETTLEMENT,
        }
    }
}

/// Settlement reported when the task vanished before settling.
const ABORTED_SETTLEMENT: Settlement = Settlement::Contained {
    error_kind: "aborted",
};

// ============================================================================
// SECTION: Activation Task
// ============================================================================

/// Owned state for one spawned activation.
struct ActivationTask {
    /// Activation identifier.
    activation_id: ActivationId,
    /// Record under verification.
    record_id: RecordId,
    /// Injected verification service.
    service: Arc<dyn VerificationService>,
    /// Injected diagnostic sink.
    diagnostics: Arc<dyn DiagnosticSink>,
    /// Optional per-activation deadline.
    timeout: Option<Duration>,
    /// Runtime used to isolate the service call.
    runtime: Handle,
    /// Sender publishing the activation state.
    state: watch::Sender<ActivationState>,
}

impl ActivationTask {
    /// Runs the activation to settlement.
    async fn run(self) {
        let outcome = self.invoke().await;
        let settlement = match outcome {
            Ok(_report) => Settlement::Verified,
            Err(error) => {
                let record =
                    DiagnosticRecord::failure(self.activation_id, self.record_id.clone(), &error);
                self.diagnostics.record(&record);
                Settlement::Contained {
                    error_kind: error.kind(),
                }
            }
        };
        // Only this task settles, and it does so once.
        let _ = transition(&self.state, |state| state.settle(settlement));
    }

    /// Issues the single service call, converting panics and timeouts into errors.
    async fn invoke(&self) -> VerificationOutcome {
        let service = Arc::clone(&self.service);
        let record_id = self.record_id.clone();
        let activation_id = self.activation_id;
        let call = self.runtime.spawn(async move {
            let request = VerificationRequest::new(&record_id, activation_id);
            service.check_logo_match(&request).await
        });

        let Some(limit) = self.timeout else {
            return call.await.unwrap_or_else(|err| Err(join_failure(&err)));
        };
        let abort = call.abort_handle();
        match tokio::time::timeout(limit, call).await {
            Ok(joined) => joined.unwrap_or_else(|err| Err(join_failure(&err))),
            Err(_) => {
                abort.abort();
                Err(VerificationError::Timeout {
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                })
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Applies a state transition to the published activation state.
fn transition(
    sender: &watch::Sender<ActivationState>,
    step: impl FnOnce(ActivationState) -> Result<ActivationState, StateError>,
) -> Result<(), StateError> {
    let mut result = Ok(());
    sender.send_modify(|state| match step(*state) {
        Ok(next) => *state = next,
        Err(err) => result = Err(err),
    });
    result
}

/// Maps a join failure of the service task into a contained error.
pub(super) fn join_failure(err: &JoinError) -> VerificationError {
    if err.is_panic() {
        VerificationError::Aborted("verification service panicked".to_string())
    } else {
        VerificationError::Aborted("verification service task cancelled".to_string())
    }
}
