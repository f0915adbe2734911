//! Environmental score: modified base metrics weighted by security requirements
//!
//! The modified impact formula differs from the base one for changed scope
//! (exponent 13 and the 0.9731 factor) and the sub-score is capped at 0.915.
//! Both follow CVSS v3.1 and do not share code with [`super::base`].

use super::resolve::{CoreMetrics, Requirements};
use super::temporal::TemporalAdjustment;
use crate::error::Result;
use crate::metric::{Metric, Scope};
use crate::roundup::roundup;
use crate::weights::{optional_weight, weight};

const MISS_CAP: f64 = 0.915;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EnvironmentalScore {
    pub modified_impact: f64,
    pub modified_exploitability: f64,
    pub score: f64,
}

pub(crate) fn environmental_score(
    modified: &CoreMetrics,
    requirements: &Requirements,
    temporal: &TemporalAdjustment,
) -> Result<EnvironmentalScore> {
    let scope = modified.scope;

    let attack_vector = weight(Metric::ModifiedAttackVector, modified.attack_vector, scope)?;
    let attack_complexity =
        weight(Metric::ModifiedAttackComplexity, modified.attack_complexity, scope)?;
    let privileges_required =
        weight(Metric::ModifiedPrivilegesRequired, modified.privileges_required, scope)?;
    let user_interaction =
        weight(Metric::ModifiedUserInteraction, modified.user_interaction, scope)?;
    let confidentiality = weight(Metric::ModifiedConfidentiality, modified.confidentiality, scope)?;
    let integrity = weight(Metric::ModifiedIntegrity, modified.integrity, scope)?;
    let availability = weight(Metric::ModifiedAvailability, modified.availability, scope)?;

    let confidentiality_requirement =
        optional_weight(Metric::ConfidentialityRequirement, requirements.confidentiality)?;
    let integrity_requirement =
        optional_weight(Metric::IntegrityRequirement, requirements.integrity)?;
    let availability_requirement =
        optional_weight(Metric::AvailabilityRequirement, requirements.availability)?;

    let miss = (1.0
        - ((1.0 - confidentiality_requirement * confidentiality)
            * (1.0 - integrity_requirement * integrity)
            * (1.0 - availability_requirement * availability)))
        .min(MISS_CAP);

    let modified_impact = match scope {
        Scope::Unchanged => 6.42 * miss,
        Scope::Changed => 7.52 * (miss - 0.029) - 3.25 * (miss * 0.9731 - 0.02).powf(13.0),
    };

    let modified_exploitability =
        8.22 * attack_vector * attack_complexity * privileges_required * user_interaction;

    let score = if modified_impact <= 0.0 {
        0.0
    } else {
        match scope {
            Scope::Unchanged => {
                temporal.apply(roundup((modified_impact + modified_exploitability).min(10.0)))
            }
            Scope::Changed => temporal.apply(roundup(
                (1.08 * (modified_impact + modified_exploitability)).min(10.0),
            )),
        }
    };

    Ok(EnvironmentalScore {
        modified_impact,
        modified_exploitability,
        score,
    })
}
