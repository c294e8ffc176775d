//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check watch declarations carry usable property sets
//! - Validate value ranges (poll attempts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ReloadConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::ReloadConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The poller would never check segment status.
    ZeroPollAttempts,

    /// A watch declaration lists no properties to monitor.
    EmptyPropertySet { pipeline: String },

    /// A watch declaration contains a blank property name.
    BlankPropertyName { pipeline: String },

    /// A watch declaration names no pipeline.
    BlankPipelineId { index: usize },

    /// Two watch declarations target the same pipeline.
    DuplicatePipeline { pipeline: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroPollAttempts => {
                write!(f, "poller.max_attempts must be at least 1")
            }
            ValidationError::EmptyPropertySet { pipeline } => {
                write!(f, "watch for pipeline '{}' lists no properties", pipeline)
            }
            ValidationError::BlankPropertyName { pipeline } => {
                write!(f, "watch for pipeline '{}' contains a blank property name", pipeline)
            }
            ValidationError::BlankPipelineId { index } => {
                write!(f, "watch entry {} names no pipeline", index)
            }
            ValidationError::DuplicatePipeline { pipeline } => {
                write!(f, "pipeline '{}' appears in more than one watch entry", pipeline)
            }
        }
    }
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &ReloadConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.poller.max_attempts == 0 {
        errors.push(ValidationError::ZeroPollAttempts);
    }

    let mut seen_pipelines = HashSet::new();
    for (index, watch) in config.watch.iter().enumerate() {
        if watch.pipeline.trim().is_empty() {
            errors.push(ValidationError::BlankPipelineId { index });
            continue;
        }

        if !seen_pipelines.insert(watch.pipeline.clone()) {
            errors.push(ValidationError::DuplicatePipeline {
                pipeline: watch.pipeline.clone(),
            });
        }

        if watch.properties.is_empty() {
            errors.push(ValidationError::EmptyPropertySet {
                pipeline: watch.pipeline.clone(),
            });
        } else if watch.properties.iter().any(|p| p.trim().is_empty()) {
            errors.push(ValidationError::BlankPropertyName {
                pipeline: watch.pipeline.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
