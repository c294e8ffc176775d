//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher and controllers produce:
//!     → structured log events (tracing, job-id correlated)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → whatever metrics recorder the embedding engine installs
//! ```
//!
//! # Design Decisions
//! - A reload's only caller-visible surface is logs and counters, so
//!   every job carries a correlation id through its log events
//! - Counters only; exposition belongs to the embedding engine

pub mod logging;
pub mod metrics;
