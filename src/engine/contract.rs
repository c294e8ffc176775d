//! Requests the reload subsystem issues to the routing engine.

use thiserror::Error;

use crate::engine::definition::PipelineDefinition;

/// Lifecycle status the engine reports for a registered segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatus {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Errors surfaced by the engine for segment and pipeline requests.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A submitted identifier is still registered in the segment
    /// namespace. This is the expected failure mode of re-addition when
    /// teardown has not finished.
    #[error("segment identifier already registered: {0}")]
    NamespaceCollision(String),

    /// The engine does not know the requested segment.
    #[error("unknown segment: {0}")]
    UnknownSegment(String),

    /// The engine refused the request for an internal reason.
    #[error("engine rejected request: {0}")]
    Rejected(String),
}

/// The slice of the routing engine consumed by reload jobs.
///
/// All calls are synchronous and may block on engine-internal locking.
/// Stop and remove are fire-and-forget: an `Ok` return means the request
/// was accepted, not that teardown is durable. Removal completes
/// asynchronously and is observed through [`RoutingEngine::segment_status`]
/// returning `None`.
pub trait RoutingEngine: Send + Sync {
    /// Ask the engine to stop a running segment.
    fn stop_segment(&self, id: &str) -> Result<(), EngineError>;

    /// Ask the engine to remove a stopped segment from its namespace.
    fn remove_segment(&self, id: &str) -> Result<(), EngineError>;

    /// Current status of a segment, or `None` once it is fully removed.
    fn segment_status(&self, id: &str) -> Option<SegmentStatus>;

    /// Submit a freshly constructed pipeline for addition.
    ///
    /// Fails with [`EngineError::NamespaceCollision`] if any of the
    /// definition's identifiers is still registered.
    fn add_pipeline(&self, definition: &PipelineDefinition) -> Result<(), EngineError>;
}
