//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ReloadConfig (validated, immutable)
//!     → lifecycle::startup builds the action registry from it
//! ```
//!
//! # Design Decisions
//! - This file declares what to watch; the dynamic values being watched
//!   live in the separate property store (see the store module)
//! - Config is immutable once loaded; the registry built from it has no
//!   runtime-mutable surface
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::PollerConfig;
pub use schema::ReloadConfig;
pub use schema::WatchConfig;
