//! Routing-engine boundary.
//!
//! # Data Flow
//! ```text
//! Reload job:
//!     → contract.rs (stop/remove/status/add requests to the engine)
//!     → definition.rs (fresh pipeline definitions, segment naming)
//! ```
//!
//! # Design Decisions
//! - The engine appears only as a trait; this crate never drives message
//!   flow itself
//! - Segment identifiers are derived data, not inherited behavior: any
//!   type that can name its ingress/business-logic/egress segments can
//!   be reloaded
//! - Engine calls are synchronous and may block on engine-internal
//!   locking; quiescence is observed, never assumed

pub mod contract;
pub mod definition;

pub use contract::{EngineError, RoutingEngine, SegmentStatus};
pub use definition::{
    BuildError, PipelineDefinition, PipelineDefinitionFactory, PipelineSegmentGroup, SegmentRole,
    SegmentSpec,
};
