//! Shared mock scaffolding for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pipeline_reload::engine::{
    BuildError, EngineError, PipelineDefinition, PipelineDefinitionFactory, RoutingEngine,
    SegmentStatus,
};

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Stop(String),
    Remove(String),
    Status(String),
    AddPipeline(String),
}

/// Scripted in-memory routing engine that records every call.
///
/// Segment teardown is modeled with a per-identifier budget of status
/// queries that still report the segment as present; once the budget is
/// spent the segment reports absent, mimicking eventually-consistent
/// removal.
#[derive(Default)]
pub struct MockEngine {
    calls: Mutex<Vec<EngineCall>>,
    present_budget: Mutex<HashMap<String, usize>>,
    collide_on_add: AtomicBool,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Report `id` as present for the next `polls` status queries.
    /// Pass `usize::MAX` for a segment that never goes away.
    pub fn set_present(&self, id: &str, polls: usize) {
        self.present_budget
            .lock()
            .unwrap()
            .insert(id.to_string(), polls);
    }

    /// Make every subsequent `add_pipeline` fail with a namespace
    /// collision.
    pub fn set_collide_on_add(&self, collide: bool) {
        self.collide_on_add.store(collide, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_status_queries(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, EngineCall::Status(_)))
            .count()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RoutingEngine for MockEngine {
    fn stop_segment(&self, id: &str) -> Result<(), EngineError> {
        self.record(EngineCall::Stop(id.to_string()));
        Ok(())
    }

    fn remove_segment(&self, id: &str) -> Result<(), EngineError> {
        self.record(EngineCall::Remove(id.to_string()));
        Ok(())
    }

    fn segment_status(&self, id: &str) -> Option<SegmentStatus> {
        self.record(EngineCall::Status(id.to_string()));

        let mut budgets = self.present_budget.lock().unwrap();
        match budgets.get_mut(id) {
            Some(0) | None => None,
            Some(remaining) => {
                if *remaining != usize::MAX {
                    *remaining -= 1;
                }
                Some(SegmentStatus::Stopped)
            }
        }
    }

    fn add_pipeline(&self, definition: &PipelineDefinition) -> Result<(), EngineError> {
        self.record(EngineCall::AddPipeline(definition.base_id().to_string()));

        if self.collide_on_add.load(Ordering::SeqCst) {
            return Err(EngineError::NamespaceCollision(
                definition.ingress_id().to_string(),
            ));
        }
        Ok(())
    }
}

/// Factory that counts its builds and stamps each definition's ingress
/// endpoint with the build generation.
pub fn counting_factory(
    base_id: &'static str,
    builds: Arc<AtomicUsize>,
) -> Arc<dyn PipelineDefinitionFactory> {
    Arc::new(move || -> Result<PipelineDefinition, BuildError> {
        let generation = builds.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PipelineDefinition::new(
            base_id,
            format!("amq:{base_id}.inbound?gen={generation}"),
            Some(format!("cache:{base_id}")),
        ))
    })
}
