//! Temporal adjustment of a score

use super::resolve::TemporalMetrics;
use crate::error::Result;
use crate::metric::Metric;
use crate::roundup::roundup;
use crate::weights::optional_weight;

/// Resolved temporal weights. Each is at most 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TemporalAdjustment {
    pub exploit_code_maturity: f64,
    pub remediation_level: f64,
    pub report_confidence: f64,
}

impl TemporalAdjustment {
    pub fn resolve(metrics: &TemporalMetrics) -> Result<Self> {
        Ok(Self {
            exploit_code_maturity: optional_weight(
                Metric::ExploitCodeMaturity,
                metrics.exploit_code_maturity,
            )?,
            remediation_level: optional_weight(Metric::RemediationLevel, metrics.remediation_level)?,
            report_confidence: optional_weight(Metric::ReportConfidence, metrics.report_confidence)?,
        })
    }

    /// Scale `score` by the temporal weights and round up
    pub fn apply(&self, score: f64) -> f64 {
        roundup(score * self.exploit_code_maturity * self.remediation_level * self.report_confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_adjustment() {
        let adjustment = TemporalAdjustment::resolve(&TemporalMetrics::default()).unwrap();
        assert_eq!(adjustment.apply(9.8), 9.8);
        assert_eq!(adjustment.apply(0.0), 0.0);
    }

    #[test]
    fn test_scaled_adjustment() {
        let adjustment = TemporalAdjustment::resolve(&TemporalMetrics {
            exploit_code_maturity: Some("P"),
            remediation_level: Some("O"),
            report_confidence: Some("C"),
        })
        .unwrap();
        // 9.8 * 0.94 * 0.95 * 1.0 = 8.7514
        assert_eq!(adjustment.apply(9.8), 8.8);
    }

    #[test]
    fn test_unproven_unknown_lowest() {
        let adjustment = TemporalAdjustment::resolve(&TemporalMetrics {
            exploit_code_maturity: Some("U"),
            remediation_level: Some("O"),
            report_confidence: Some("U"),
        })
        .unwrap();
        // 10.0 * 0.91 * 0.95 * 0.92 = 7.9534
        assert_eq!(adjustment.apply(10.0), 8.0);
    }
}
