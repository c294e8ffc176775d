//! Configuration-driven pipeline reload.
//!
//! # Data Flow
//! ```text
//! store notification (before phase, old value active)
//!     → dispatcher snapshots the value into the cache
//! store notification (after phase, new value active)
//!     → dispatcher compares the new value against the snapshot
//!     → unchanged: suppressed as notification noise
//!     → changed: every registered action set containing the key fires
//!     → controller: stop → remove → poll quiescence → recreate
//! ```
//!
//! # Design Decisions
//! - Actions run inline on the notification task; per-property ordering
//!   is preserved and a slow reload applies backpressure to the stream
//! - The registry is frozen at startup; there is no runtime-mutable
//!   registration surface
//! - Jobs whose segment groups overlap serialize on per-segment locks

pub mod cache;
pub mod controller;
pub mod dispatcher;
pub mod locks;
pub mod registry;

pub use cache::PropertyValueCache;
pub use controller::{PipelineReloadController, ReloadOutcome, ReloadState};
pub use dispatcher::ChangeDispatcher;
pub use locks::SegmentLocks;
pub use registry::{ReloadAction, ReloadActionRegistry, ReloadRegistryBuilder};
