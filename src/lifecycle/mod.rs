//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build controllers → Freeze registry
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Dispatcher drains → Source watcher dropped
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then controllers, then the registry
//! - The registry is frozen before the first notification is consumed
//! - In-flight reload jobs are never interrupted; shutdown stops the
//!   intake, not the job

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_registry, StartupError};
