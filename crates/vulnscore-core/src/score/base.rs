//! Base score: impact, exploitability and their scope-dependent combination

use super::resolve::CoreMetrics;
use crate::error::Result;
use crate::metric::{Metric, Scope};
use crate::roundup::roundup;
use crate::weights::weight;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BaseScore {
    pub impact: f64,
    pub exploitability: f64,
    pub score: f64,
}

pub(crate) fn base_score(metrics: &CoreMetrics) -> Result<BaseScore> {
    let scope = metrics.scope;

    let attack_vector = weight(Metric::AttackVector, metrics.attack_vector, scope)?;
    let attack_complexity = weight(Metric::AttackComplexity, metrics.attack_complexity, scope)?;
    let privileges_required = weight(Metric::PrivilegesRequired, metrics.privileges_required, scope)?;
    let user_interaction = weight(Metric::UserInteraction, metrics.user_interaction, scope)?;
    let confidentiality = weight(Metric::Confidentiality, metrics.confidentiality, scope)?;
    let integrity = weight(Metric::Integrity, metrics.integrity, scope)?;
    let availability = weight(Metric::Availability, metrics.availability, scope)?;

    let iss = 1.0 - ((1.0 - confidentiality) * (1.0 - integrity) * (1.0 - availability));

    let impact = match scope {
        Scope::Unchanged => 6.42 * iss,
        Scope::Changed => 7.52 * (iss - 0.029) - 3.25 * (iss - 0.02).powf(15.0),
    };

    let exploitability =
        8.22 * attack_vector * attack_complexity * privileges_required * user_interaction;

    let score = if impact <= 0.0 {
        0.0
    } else {
        match scope {
            Scope::Unchanged => roundup((impact + exploitability).min(10.0)),
            Scope::Changed => roundup((1.08 * (impact + exploitability)).min(10.0)),
        }
    };

    Ok(BaseScore {
        impact,
        exploitability,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(av: &'static str, pr: &'static str, scope: Scope, cia: [&'static str; 3]) -> CoreMetrics {
        CoreMetrics {
            attack_vector: av,
            attack_complexity: "L",
            privileges_required: pr,
            user_interaction: "N",
            scope,
            confidentiality: cia[0],
            integrity: cia[1],
            availability: cia[2],
        }
    }

    #[test]
    fn test_unchanged_scope() {
        let base = base_score(&metrics("N", "N", Scope::Unchanged, ["H", "H", "H"])).unwrap();
        assert_eq!(base.score, 9.8);
        assert!((base.impact - 5.8731).abs() < 1e-4);
        assert!((base.exploitability - 3.8870).abs() < 1e-4);
    }

    #[test]
    fn test_changed_scope_caps_at_ten() {
        let base = base_score(&metrics("N", "N", Scope::Changed, ["H", "H", "H"])).unwrap();
        assert_eq!(base.score, 10.0);
        assert!((base.impact - 6.0477).abs() < 1e-4);
    }

    #[test]
    fn test_changed_scope_uses_changed_privileges_weight() {
        let base = base_score(&metrics("N", "L", Scope::Changed, ["L", "L", "N"])).unwrap();
        // 8.22 * 0.85 * 0.77 * 0.68 * 0.85
        assert!((base.exploitability - 3.1096).abs() < 1e-4);
        assert_eq!(base.score, 6.4);
    }

    #[test]
    fn test_no_impact_scores_zero() {
        let base = base_score(&metrics("N", "N", Scope::Unchanged, ["N", "N", "N"])).unwrap();
        assert_eq!(base.impact, 0.0);
        assert_eq!(base.score, 0.0);
    }
}
