//! Stop, remove, verify-removed, recreate cycle for one pipeline.
//!
//! # Data Flow
//! ```text
//! reload action fires
//!     → factory builds a fresh definition (re-resolves config values)
//!     → segment group derived from the fresh identifiers
//!     → engine: stop + remove each segment, in order
//!     → poll status until every identifier reports absent (bounded)
//!     → engine: add the fresh pipeline definition
//! ```
//!
//! # Design Decisions
//! - A fresh definition per job: embedded endpoints are always current
//!   and the identifiers always reflect current naming rules
//! - Polling is best-effort: after the attempt ceiling, recreation is
//!   attempted anyway and a lingering identifier surfaces as a
//!   namespace collision from the engine
//! - Every failure terminates the job without propagating; the
//!   dispatching task must never see a panic or an error

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use futures_util::FutureExt;

use crate::engine::contract::{EngineError, RoutingEngine};
use crate::engine::definition::{
    BuildError, PipelineDefinitionFactory, PipelineSegmentGroup,
};
use crate::observability::metrics;
use crate::reload::locks::SegmentLocks;
use crate::reload::registry::ReloadAction;
use crate::resilience::retry::{poll_until, PollPolicy};

/// Phase a reload job is currently in, kept for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    Constructing,
    Stopping,
    Removing,
    PollingQuiescence,
    Recreating,
}

/// Terminal result of one reload job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Every segment quiesced and the fresh pipeline was accepted.
    Succeeded,

    /// The poll ceiling was reached with segments still present, but
    /// recreation went through anyway.
    TimedOutButProceeded,

    /// The job failed; details are in the log, keyed by job id.
    Failed,
}

impl ReloadOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadOutcome::Succeeded => "succeeded",
            ReloadOutcome::TimedOutButProceeded => "timed_out_but_proceeded",
            ReloadOutcome::Failed => "failed",
        }
    }
}

/// Ephemeral per-invocation state; created when an action fires and
/// discarded after completion.
#[derive(Debug)]
struct ReloadJob {
    id: Uuid,
    state: ReloadState,
    group: Option<PipelineSegmentGroup>,
    poll_attempts: u32,
    timed_out: bool,
}

impl ReloadJob {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: ReloadState::Constructing,
            group: None,
            poll_attempts: 0,
            timed_out: false,
        }
    }
}

#[derive(Debug, Error)]
enum ReloadError {
    #[error("pipeline construction failed: {0}")]
    Construction(#[from] BuildError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Drives the full reload cycle for one pipeline-segment group.
///
/// The factory, not a definition instance, is what gets injected:
/// definitions resolve connection strings when they are constructed, so
/// only a fresh build per job guarantees up-to-date values.
pub struct PipelineReloadController {
    engine: Arc<dyn RoutingEngine>,
    factory: Arc<dyn PipelineDefinitionFactory>,
    locks: Arc<SegmentLocks>,
    policy: PollPolicy,
}

impl PipelineReloadController {
    pub fn new(
        engine: Arc<dyn RoutingEngine>,
        factory: Arc<dyn PipelineDefinitionFactory>,
        locks: Arc<SegmentLocks>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            engine,
            factory,
            locks,
            policy,
        }
    }

    /// Package this controller as a registrable reload action.
    pub fn action(self: Arc<Self>) -> ReloadAction {
        let controller = self;
        Arc::new(move || {
            let controller = controller.clone();
            async move {
                controller.run().await;
            }
            .boxed()
        })
    }

    /// Run one reload job to completion.
    ///
    /// Infallible by design: every error is contained and logged here,
    /// so the notification task driving this call stays alive no matter
    /// what the engine or the factory does.
    pub async fn run(&self) -> ReloadOutcome {
        let mut job = ReloadJob::new();

        let outcome = match self.execute(&mut job).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::error!(
                    job_id = %job.id,
                    state = ?job.state,
                    group = ?job.group,
                    error = %error,
                    "reload job failed"
                );
                ReloadOutcome::Failed
            }
        };

        metrics::record_reload_outcome(outcome);
        outcome
    }

    async fn execute(&self, job: &mut ReloadJob) -> Result<ReloadOutcome, ReloadError> {
        let definition = self.factory.build()?;
        let group = definition.segment_group();
        job.group = Some(group.clone());

        tracing::info!(job_id = %job.id, group = %group, "reload job starting");

        // serializes against any in-flight job touching the same segments
        let _guards = self.locks.acquire(&group).await;

        for id in group.ids() {
            job.state = ReloadState::Stopping;
            tracing::info!(job_id = %job.id, segment_id = %id, "stopping and removing segment");
            self.engine.stop_segment(id)?;

            job.state = ReloadState::Removing;
            self.engine.remove_segment(id)?;
        }

        job.state = ReloadState::PollingQuiescence;
        let poll = poll_until(&self.policy, || {
            group
                .ids()
                .iter()
                .all(|id| self.engine.segment_status(id).is_none())
        })
        .await;
        job.poll_attempts = poll.attempts;
        job.timed_out = !poll.satisfied;

        if poll.satisfied {
            tracing::info!(
                job_id = %job.id,
                attempts = poll.attempts,
                "all segments report absent, recreating"
            );
        } else {
            tracing::warn!(
                job_id = %job.id,
                attempts = poll.attempts,
                group = %group,
                "segments still present after final status check, proceeding anyway"
            );
        }

        job.state = ReloadState::Recreating;
        self.engine.add_pipeline(&definition)?;

        let outcome = if job.timed_out {
            ReloadOutcome::TimedOutButProceeded
        } else {
            ReloadOutcome::Succeeded
        };
        tracing::info!(
            job_id = %job.id,
            attempts = job.poll_attempts,
            outcome = outcome.as_str(),
            "reload job finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::contract::SegmentStatus;
    use crate::engine::definition::PipelineDefinition;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Minimal engine double; the integration suite carries the fully
    /// scripted one.
    #[derive(Default)]
    struct FlakyEngine {
        calls: Mutex<Vec<String>>,
        collide_on_add: bool,
        fail_stop: bool,
    }

    impl RoutingEngine for FlakyEngine {
        fn stop_segment(&self, id: &str) -> Result<(), EngineError> {
            self.calls.lock().unwrap().push(format!("stop {id}"));
            if self.fail_stop {
                return Err(EngineError::UnknownSegment(id.to_string()));
            }
            Ok(())
        }

        fn remove_segment(&self, id: &str) -> Result<(), EngineError> {
            self.calls.lock().unwrap().push(format!("remove {id}"));
            Ok(())
        }

        fn segment_status(&self, _id: &str) -> Option<SegmentStatus> {
            None
        }

        fn add_pipeline(&self, definition: &PipelineDefinition) -> Result<(), EngineError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("add {}", definition.base_id()));
            if self.collide_on_add {
                return Err(EngineError::NamespaceCollision(
                    definition.ingress_id().to_string(),
                ));
            }
            Ok(())
        }
    }

    fn controller_with(engine: Arc<FlakyEngine>) -> PipelineReloadController {
        let factory = || -> Result<PipelineDefinition, BuildError> {
            Ok(PipelineDefinition::new("orders", "amq:in", None))
        };
        PipelineReloadController::new(
            engine,
            Arc::new(factory),
            Arc::new(SegmentLocks::new()),
            PollPolicy {
                max_attempts: 3,
                interval: Duration::from_millis(5),
            },
        )
    }

    #[tokio::test]
    async fn test_construction_failure_touches_no_segment() {
        let engine = Arc::new(FlakyEngine::default());
        let factory = || -> Result<PipelineDefinition, BuildError> {
            Err(BuildError::MissingProperty("db.host".into()))
        };
        let controller = PipelineReloadController::new(
            engine.clone(),
            Arc::new(factory),
            Arc::new(SegmentLocks::new()),
            PollPolicy::default(),
        );

        assert_eq!(controller.run().await, ReloadOutcome::Failed);
        assert!(engine.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_namespace_collision_fails_job_without_retry() {
        let engine = Arc::new(FlakyEngine {
            collide_on_add: true,
            ..Default::default()
        });
        let controller = controller_with(engine.clone());

        assert_eq!(controller.run().await, ReloadOutcome::Failed);

        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls.iter().filter(|c| c.starts_with("add")).count(), 1);
    }

    #[tokio::test]
    async fn test_stop_failure_is_contained() {
        let engine = Arc::new(FlakyEngine {
            fail_stop: true,
            ..Default::default()
        });
        let controller = controller_with(engine.clone());

        assert_eq!(controller.run().await, ReloadOutcome::Failed);
        assert!(engine
            .calls
            .lock()
            .unwrap()
            .iter()
            .all(|c| !c.starts_with("add")));
    }
}
