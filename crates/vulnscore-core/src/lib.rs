//! vulnscore Core - CVSS v3.1 scoring and vector handling
//!
//! This crate provides the scoring engine used throughout vulnscore:
//! - `Metric`, `MetricsRecord`: the qualitative metrics describing a vulnerability
//! - `weights`: the numeric weight tables published for CVSS v3.1
//! - `evaluate`: base, temporal and environmental scores with severity ratings
//! - `parse_vector`, `serialize_vector`: the `CVSS:3.1/...` vector string codec

pub mod error;
pub mod metric;
pub mod record;
pub mod roundup;
pub mod score;
pub mod severity;
pub mod vector;
pub mod weights;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use metric::{Metric, MetricFamily, Scope, NOT_DEFINED};
pub use record::MetricsRecord;
pub use roundup::roundup;
pub use score::{evaluate, ScoreResult, SubScores};
pub use severity::Severity;
pub use vector::{parse_vector, serialize_vector, VERSION_LABEL};
