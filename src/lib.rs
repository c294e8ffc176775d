//! Configuration-driven pipeline reload for a message-routing engine.
//!
//! Pipeline segments embed externally-sourced configuration values
//! (connection strings, endpoint hosts) at construction time. When an
//! operator changes one of those values at runtime, the affected segments
//! must be torn down and rebuilt to pick the new value up, without an
//! engine restart and without breaking the segment-naming conventions
//! other components depend on.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌───────────────────────────────────────────────────┐
//!                       │              PIPELINE RELOAD SUBSYSTEM            │
//!  property file change │  ┌─────────┐    ┌────────────┐    ┌────────────┐  │
//!  ─────────────────────┼─▶│  store  │───▶│ dispatcher │───▶│  registry  │  │
//!                       │  │ source  │    │ (2-phase)  │    │ (startup)  │  │
//!                       │  └─────────┘    └─────┬──────┘    └─────┬──────┘  │
//!                       │                       │ value changed   │ action  │
//!                       │                       ▼                 ▼         │
//!                       │                 ┌──────────────────────────┐      │
//!                       │                 │ reload controller        │      │
//!                       │                 │ stop → remove → poll     │      │
//!                       │                 │ quiescence → recreate    │      │
//!                       │                 └────────────┬─────────────┘      │
//!                       │                              │                    │
//!                       │ ┌────────────────────────────▼─────────────────┐  │
//!                       │ │ routing engine (external collaborator)       │  │
//!                       │ │ stop_segment / remove_segment / status / add │  │
//!                       │ └──────────────────────────────────────────────┘  │
//!                       └───────────────────────────────────────────────────┘
//! ```
//!
//! Reload actions run inline on the task that delivers the notification;
//! there is no internal pool or queue, so per-property ordering is exactly
//! the store's delivery ordering and a slow reload applies backpressure to
//! the notification stream.

// Core subsystems
pub mod engine;
pub mod reload;
pub mod store;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ReloadConfig;
pub use engine::{PipelineDefinition, RoutingEngine};
pub use lifecycle::Shutdown;
pub use reload::{ChangeDispatcher, PipelineReloadController, ReloadOutcome};
