//! Pipeline definitions and segment naming.
//!
//! Every logical pipeline follows one shape: an ingress adapter that
//! receives from the outside world, a business-logic segment that is
//! purely internal, and optionally an egress adapter that sends results
//! onward. A pipeline that returns data to its caller has no egress
//! adapter. Segment identifiers are derived from the pipeline's base id
//! with fixed suffixes, so every component that needs to address a
//! segment (the engine, reload jobs, test harnesses) derives the same
//! names from the same base id.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Suffix naming a pipeline's ingress adapter segment.
pub const INGRESS_SEGMENT_SUFFIX: &str = "_ingress";

/// Suffix naming a pipeline's business-logic segment.
pub const BUSINESS_LOGIC_SEGMENT_SUFFIX: &str = "_business_logic";

/// Suffix naming a pipeline's egress adapter segment.
pub const EGRESS_SEGMENT_SUFFIX: &str = "_egress";

/// Role a segment plays within one logical pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentRole {
    Ingress,
    BusinessLogic,
    Egress,
}

/// One submittable segment: its identifier, role, and the resolved
/// endpoint it binds to. The business-logic segment is purely internal
/// and carries no endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub id: String,
    pub role: SegmentRole,
    pub endpoint: Option<String>,
}

/// The ordered list of segment identifiers comprising one logical
/// reloadable pipeline.
///
/// Identifiers must be unique within the engine's segment namespace at
/// the moment a pipeline is submitted; re-addition fails while any of
/// them is still registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSegmentGroup {
    ids: Vec<String>,
}

impl PipelineSegmentGroup {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True if any identifier appears in both groups.
    pub fn overlaps(&self, other: &PipelineSegmentGroup) -> bool {
        self.ids.iter().any(|id| other.ids.contains(id))
    }
}

impl fmt::Display for PipelineSegmentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.ids.join(", "))
    }
}

/// A fully resolved pipeline definition, ready for submission.
///
/// Construction embeds the configuration values current at that moment;
/// a definition is never refreshed in place. To pick up new values,
/// build a new one through a [`PipelineDefinitionFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDefinition {
    base_id: String,
    ingress_id: String,
    business_logic_id: String,
    egress_id: Option<String>,
    segments: Vec<SegmentSpec>,
}

impl PipelineDefinition {
    /// Assemble a definition for `base_id` with the given resolved
    /// endpoints. Passing `None` for the egress endpoint declares a
    /// pipeline that returns data to its caller instead of sending it
    /// onward.
    pub fn new(
        base_id: impl Into<String>,
        ingress_endpoint: impl Into<String>,
        egress_endpoint: Option<String>,
    ) -> Self {
        let base_id = base_id.into();
        let ingress_id = format!("{base_id}{INGRESS_SEGMENT_SUFFIX}");
        let business_logic_id = format!("{base_id}{BUSINESS_LOGIC_SEGMENT_SUFFIX}");
        let egress_id = egress_endpoint
            .as_ref()
            .map(|_| format!("{base_id}{EGRESS_SEGMENT_SUFFIX}"));

        let mut segments = vec![
            SegmentSpec {
                id: ingress_id.clone(),
                role: SegmentRole::Ingress,
                endpoint: Some(ingress_endpoint.into()),
            },
            SegmentSpec {
                id: business_logic_id.clone(),
                role: SegmentRole::BusinessLogic,
                endpoint: None,
            },
        ];
        if let (Some(id), Some(endpoint)) = (&egress_id, egress_endpoint) {
            segments.push(SegmentSpec {
                id: id.clone(),
                role: SegmentRole::Egress,
                endpoint: Some(endpoint),
            });
        }

        Self {
            base_id,
            ingress_id,
            business_logic_id,
            egress_id,
            segments,
        }
    }

    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    pub fn ingress_id(&self) -> &str {
        &self.ingress_id
    }

    pub fn business_logic_id(&self) -> &str {
        &self.business_logic_id
    }

    pub fn egress_id(&self) -> Option<&str> {
        self.egress_id.as_deref()
    }

    pub fn segments(&self) -> &[SegmentSpec] {
        &self.segments
    }

    /// The identifiers a reload job must cycle, in teardown order.
    pub fn segment_group(&self) -> PipelineSegmentGroup {
        PipelineSegmentGroup {
            ids: self.segments.iter().map(|s| s.id.clone()).collect(),
        }
    }
}

/// Error from constructing a pipeline definition.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A configuration property the definition depends on has no value.
    #[error("required property {0} is not set")]
    MissingProperty(String),

    /// Construction failed for a definition-specific reason.
    #[error("{0}")]
    Other(String),
}

/// Produces a fresh pipeline definition with configuration values
/// re-resolved at construction time.
///
/// Implementations must not touch the engine: side effects happen only
/// when the returned definition is submitted. A plain closure works --
/// `Fn() -> Result<PipelineDefinition, BuildError>` implements this
/// trait directly.
pub trait PipelineDefinitionFactory: Send + Sync {
    fn build(&self) -> Result<PipelineDefinition, BuildError>;
}

impl<F> PipelineDefinitionFactory for F
where
    F: Fn() -> Result<PipelineDefinition, BuildError> + Send + Sync,
{
    fn build(&self) -> Result<PipelineDefinition, BuildError> {
        (self)()
    }
}
