//! CVSS v3.1 metric weights
//!
//! Tables are keyed by category code. Modified metrics share the table of
//! the base metric they override. The "X" code is absent from every table:
//! callers resolve it before lookup (to 1.0 or to the base metric's code).

use crate::error::{Error, Result};
use crate::metric::{Metric, Scope};

/// Code to weight pairs for one metric
pub type WeightTable = &'static [(&'static str, f64)];

pub const ATTACK_VECTOR: WeightTable = &[("N", 0.85), ("A", 0.62), ("L", 0.55), ("P", 0.2)];

pub const ATTACK_COMPLEXITY: WeightTable = &[("L", 0.77), ("H", 0.44)];

/// Privileges Required when scope is unchanged
pub const PRIVILEGES_REQUIRED_UNCHANGED: WeightTable = &[("N", 0.85), ("L", 0.62), ("H", 0.27)];

/// Privileges Required when scope is changed
pub const PRIVILEGES_REQUIRED_CHANGED: WeightTable = &[("N", 0.85), ("L", 0.68), ("H", 0.5)];

pub const USER_INTERACTION: WeightTable = &[("N", 0.85), ("R", 0.62)];

/// Shared by C, I and A
pub const CIA_IMPACT: WeightTable = &[("H", 0.56), ("L", 0.22), ("N", 0.0)];

pub const EXPLOIT_CODE_MATURITY: WeightTable =
    &[("H", 1.0), ("F", 0.97), ("P", 0.94), ("U", 0.91)];

pub const REMEDIATION_LEVEL: WeightTable = &[("U", 1.0), ("W", 0.97), ("T", 0.96), ("O", 0.95)];

pub const REPORT_CONFIDENCE: WeightTable = &[("C", 1.0), ("R", 0.96), ("U", 0.92)];

/// Shared by CR, IR and AR
pub const SECURITY_REQUIREMENT: WeightTable = &[("H", 1.5), ("M", 1.0), ("L", 0.5)];

/// Weight of a metric that is neither set nor overridden
pub const NEUTRAL: f64 = 1.0;

/// Look up the numeric weight of `code` for `metric`.
///
/// `scope` is only consulted for PR and MPR, whose weight depends on the
/// effective scope. Scope metrics themselves carry no weight.
pub fn weight(metric: Metric, code: &str, scope: Scope) -> Result<f64> {
    let table = match metric.base_metric().unwrap_or(metric) {
        Metric::AttackVector => ATTACK_VECTOR,
        Metric::AttackComplexity => ATTACK_COMPLEXITY,
        Metric::PrivilegesRequired => match scope {
            Scope::Unchanged => PRIVILEGES_REQUIRED_UNCHANGED,
            Scope::Changed => PRIVILEGES_REQUIRED_CHANGED,
        },
        Metric::UserInteraction => USER_INTERACTION,
        Metric::Confidentiality | Metric::Integrity | Metric::Availability => CIA_IMPACT,
        Metric::ExploitCodeMaturity => EXPLOIT_CODE_MATURITY,
        Metric::RemediationLevel => REMEDIATION_LEVEL,
        Metric::ReportConfidence => REPORT_CONFIDENCE,
        Metric::ConfidentialityRequirement
        | Metric::IntegrityRequirement
        | Metric::AvailabilityRequirement => SECURITY_REQUIREMENT,
        // S and MS select a formula, they are never multiplied in
        _ => return Err(Error::UnweightedMetric { metric }),
    };

    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, w)| *w)
        .ok_or_else(|| Error::invalid_value(metric, code))
}

/// Weight of an optional metric whose "not defined" state is `None`
pub fn optional_weight(metric: Metric, code: Option<&str>) -> Result<f64> {
    match code {
        Some(code) => weight(metric, code, Scope::Unchanged),
        None => Ok(NEUTRAL),
    }
}
