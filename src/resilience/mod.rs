//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Reload job waiting for segment teardown:
//!     → retry.rs (bounded fixed-interval polling, then proceed)
//! ```
//!
//! # Design Decisions
//! - Polling is bounded; an unresponsive engine can never hang a job
//! - Fixed interval, no jitter: one caller per segment group, no herd
//! - Exhaustion is a result, not an error; callers decide what it means

pub mod retry;
