//! CVSS v3.1 score evaluation
//!
//! [`evaluate`] resolves a [`MetricsRecord`] into a fully populated input,
//! then runs the base, temporal and environmental engines in that order.
//! Evaluation is pure: no shared state, safe to call from any thread.

mod base;
mod environmental;
mod resolve;
mod temporal;

use crate::error::Result;
use crate::record::MetricsRecord;
use crate::severity::Severity;
use crate::vector::serialize_vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use self::base::base_score;
use self::environmental::environmental_score;
use self::resolve::ResolvedMetrics;
use self::temporal::TemporalAdjustment;

/// Intermediate sub-scores, exposed for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub impact: f64,
    pub exploitability: f64,
    pub modified_impact: f64,
    pub modified_exploitability: f64,
}

/// Scores and severities computed from one metrics record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub base_score: f64,
    pub base_severity: Severity,
    pub temporal_score: f64,
    pub temporal_severity: Severity,
    pub environmental_score: f64,
    pub environmental_severity: Severity,
    /// Vector string of the record that was scored
    pub vector: String,
    pub sub_scores: SubScores,
}

impl ScoreResult {
    /// Highest of the three severities
    pub fn overall_severity(&self) -> Severity {
        self.base_severity
            .max(self.temporal_severity)
            .max(self.environmental_severity)
    }
}

/// Compute base, temporal and environmental scores for `record`.
///
/// Fails without a partial result if a base metric is missing or any
/// present metric has a code outside its domain.
pub fn evaluate(record: &MetricsRecord) -> Result<ScoreResult> {
    let metrics = ResolvedMetrics::resolve(record)?;

    let base = base_score(&metrics.base)?;
    let temporal = TemporalAdjustment::resolve(&metrics.temporal)?;
    let temporal_score = temporal.apply(base.score);
    let environmental = environmental_score(&metrics.modified, &metrics.requirements, &temporal)?;

    let result = ScoreResult {
        base_score: base.score,
        base_severity: Severity::from_score(base.score),
        temporal_score,
        temporal_severity: Severity::from_score(temporal_score),
        environmental_score: environmental.score,
        environmental_severity: Severity::from_score(environmental.score),
        vector: serialize_vector(record),
        sub_scores: SubScores {
            impact: base.impact,
            exploitability: base.exploitability,
            modified_impact: environmental.modified_impact,
            modified_exploitability: environmental.modified_exploitability,
        },
    };

    trace!(sub_scores = ?result.sub_scores, "Computed sub-scores");
    debug!(
        vector = %result.vector,
        base = result.base_score,
        temporal = result.temporal_score,
        environmental = result.environmental_score,
        "Evaluated CVSS record"
    );

    Ok(result)
}
