//! Startup wiring: configuration to action registry.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::config::schema::ReloadConfig;
use crate::engine::contract::RoutingEngine;
use crate::engine::definition::PipelineDefinitionFactory;
use crate::reload::controller::PipelineReloadController;
use crate::reload::locks::SegmentLocks;
use crate::reload::registry::ReloadActionRegistry;

/// Errors wiring the registry from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A watch declaration names a pipeline with no registered factory.
    #[error("no pipeline definition factory registered for '{0}'")]
    UnknownPipeline(String),
}

/// Build the read-only action registry from a validated configuration.
///
/// One reload controller is created per watch declaration. All
/// controllers share the engine handle and one segment lock table, so
/// jobs whose groups overlap serialize no matter which watch fired
/// them.
pub fn build_registry(
    config: &ReloadConfig,
    engine: Arc<dyn RoutingEngine>,
    factories: &HashMap<String, Arc<dyn PipelineDefinitionFactory>>,
) -> Result<ReloadActionRegistry, StartupError> {
    let locks = Arc::new(SegmentLocks::new());
    let mut builder = ReloadActionRegistry::builder();

    for watch in &config.watch {
        let factory = factories
            .get(&watch.pipeline)
            .ok_or_else(|| StartupError::UnknownPipeline(watch.pipeline.clone()))?
            .clone();

        let controller = Arc::new(PipelineReloadController::new(
            engine.clone(),
            factory,
            locks.clone(),
            config.poller.poll_policy(),
        ));

        tracing::info!(
            pipeline = %watch.pipeline,
            properties = ?watch.properties,
            "registering reload action"
        );
        builder =
            builder.register_reload_action(watch.properties.iter().cloned(), controller.action());
    }

    Ok(builder.build())
}
