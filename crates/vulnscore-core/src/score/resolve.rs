//! Resolution of a metrics record into a fully populated scoring input
//!
//! Every "X" or absent optional metric is replaced here, before any formula
//! runs: temporal and requirement metrics become `None` (weight 1.0) and
//! modified metrics take the base metric's code.

use crate::error::{Error, Result};
use crate::metric::{Metric, Scope, NOT_DEFINED};
use crate::record::MetricsRecord;

/// Exploitability and impact metrics, either base or modified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CoreMetrics {
    pub attack_vector: &'static str,
    pub attack_complexity: &'static str,
    pub privileges_required: &'static str,
    pub user_interaction: &'static str,
    pub scope: Scope,
    pub confidentiality: &'static str,
    pub integrity: &'static str,
    pub availability: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TemporalMetrics {
    pub exploit_code_maturity: Option<&'static str>,
    pub remediation_level: Option<&'static str>,
    pub report_confidence: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Requirements {
    pub confidentiality: Option<&'static str>,
    pub integrity: Option<&'static str>,
    pub availability: Option<&'static str>,
}

/// Scoring input with no unresolved "not defined" values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedMetrics {
    pub base: CoreMetrics,
    pub temporal: TemporalMetrics,
    pub requirements: Requirements,
    pub modified: CoreMetrics,
}

impl ResolvedMetrics {
    pub fn resolve(record: &MetricsRecord) -> Result<Self> {
        let base = CoreMetrics {
            attack_vector: mandatory(record, Metric::AttackVector)?,
            attack_complexity: mandatory(record, Metric::AttackComplexity)?,
            privileges_required: mandatory(record, Metric::PrivilegesRequired)?,
            user_interaction: mandatory(record, Metric::UserInteraction)?,
            scope: Scope::from_code(Metric::Scope, mandatory(record, Metric::Scope)?)?,
            confidentiality: mandatory(record, Metric::Confidentiality)?,
            integrity: mandatory(record, Metric::Integrity)?,
            availability: mandatory(record, Metric::Availability)?,
        };

        let temporal = TemporalMetrics {
            exploit_code_maturity: optional(record, Metric::ExploitCodeMaturity)?,
            remediation_level: optional(record, Metric::RemediationLevel)?,
            report_confidence: optional(record, Metric::ReportConfidence)?,
        };

        let requirements = Requirements {
            confidentiality: optional(record, Metric::ConfidentialityRequirement)?,
            integrity: optional(record, Metric::IntegrityRequirement)?,
            availability: optional(record, Metric::AvailabilityRequirement)?,
        };

        let modified_scope = match optional(record, Metric::ModifiedScope)? {
            Some(code) => Scope::from_code(Metric::ModifiedScope, code)?,
            None => base.scope,
        };
        let modified = CoreMetrics {
            attack_vector: optional(record, Metric::ModifiedAttackVector)?
                .unwrap_or(base.attack_vector),
            attack_complexity: optional(record, Metric::ModifiedAttackComplexity)?
                .unwrap_or(base.attack_complexity),
            privileges_required: optional(record, Metric::ModifiedPrivilegesRequired)?
                .unwrap_or(base.privileges_required),
            user_interaction: optional(record, Metric::ModifiedUserInteraction)?
                .unwrap_or(base.user_interaction),
            scope: modified_scope,
            confidentiality: optional(record, Metric::ModifiedConfidentiality)?
                .unwrap_or(base.confidentiality),
            integrity: optional(record, Metric::ModifiedIntegrity)?.unwrap_or(base.integrity),
            availability: optional(record, Metric::ModifiedAvailability)?
                .unwrap_or(base.availability),
        };

        Ok(Self {
            base,
            temporal,
            requirements,
            modified,
        })
    }
}

fn mandatory(record: &MetricsRecord, metric: Metric) -> Result<&'static str> {
    let code = record
        .get(metric)
        .ok_or(Error::MissingMandatoryMetric { metric })?;
    metric.check_code(code)
}

fn optional(record: &MetricsRecord, metric: Metric) -> Result<Option<&'static str>> {
    match record.get(metric) {
        Some(code) => {
            let code = metric.check_code(code)?;
            Ok((code != NOT_DEFINED).then_some(code))
        }
        None => Ok(None),
    }
}
