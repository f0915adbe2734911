//! CVSS v3.1 metric definitions and their code domains

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Code meaning "not defined" for every optional metric
pub const NOT_DEFINED: &str = "X";

/// Metric group a metric belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFamily {
    /// The eight mandatory exploitability and impact metrics
    Base,
    /// Exploit maturity, remediation level and report confidence
    Temporal,
    /// Security requirements (CR, IR, AR)
    Requirement,
    /// Base metrics overridden for a specific environment
    Modified,
}

/// A CVSS v3.1 metric, identified by its vector abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "AV")]
    AttackVector,
    #[serde(rename = "AC")]
    AttackComplexity,
    #[serde(rename = "PR")]
    PrivilegesRequired,
    #[serde(rename = "UI")]
    UserInteraction,
    #[serde(rename = "S")]
    Scope,
    #[serde(rename = "C")]
    Confidentiality,
    #[serde(rename = "I")]
    Integrity,
    #[serde(rename = "A")]
    Availability,
    #[serde(rename = "E")]
    ExploitCodeMaturity,
    #[serde(rename = "RL")]
    RemediationLevel,
    #[serde(rename = "RC")]
    ReportConfidence,
    #[serde(rename = "CR")]
    ConfidentialityRequirement,
    #[serde(rename = "IR")]
    IntegrityRequirement,
    #[serde(rename = "AR")]
    AvailabilityRequirement,
    #[serde(rename = "MAV")]
    ModifiedAttackVector,
    #[serde(rename = "MAC")]
    ModifiedAttackComplexity,
    #[serde(rename = "MPR")]
    ModifiedPrivilegesRequired,
    #[serde(rename = "MUI")]
    ModifiedUserInteraction,
    #[serde(rename = "MS")]
    ModifiedScope,
    #[serde(rename = "MC")]
    ModifiedConfidentiality,
    #[serde(rename = "MI")]
    ModifiedIntegrity,
    #[serde(rename = "MA")]
    ModifiedAvailability,
}

impl Metric {
    /// Mandatory metrics, in vector order
    pub const BASE: [Metric; 8] = [
        Metric::AttackVector,
        Metric::AttackComplexity,
        Metric::PrivilegesRequired,
        Metric::UserInteraction,
        Metric::Scope,
        Metric::Confidentiality,
        Metric::Integrity,
        Metric::Availability,
    ];

    /// Temporal metrics, in vector order
    pub const TEMPORAL: [Metric; 3] = [
        Metric::ExploitCodeMaturity,
        Metric::RemediationLevel,
        Metric::ReportConfidence,
    ];

    /// Requirement and modified base metrics, in vector order
    pub const ENVIRONMENTAL: [Metric; 11] = [
        Metric::ConfidentialityRequirement,
        Metric::IntegrityRequirement,
        Metric::AvailabilityRequirement,
        Metric::ModifiedAttackVector,
        Metric::ModifiedAttackComplexity,
        Metric::ModifiedPrivilegesRequired,
        Metric::ModifiedUserInteraction,
        Metric::ModifiedScope,
        Metric::ModifiedConfidentiality,
        Metric::ModifiedIntegrity,
        Metric::ModifiedAvailability,
    ];

    /// Iterate over every metric in canonical vector order
    pub fn all() -> impl Iterator<Item = Metric> {
        Self::BASE
            .into_iter()
            .chain(Self::TEMPORAL)
            .chain(Self::ENVIRONMENTAL)
    }

    /// Vector abbreviation (e.g. "AV")
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Metric::AttackVector => "AV",
            Metric::AttackComplexity => "AC",
            Metric::PrivilegesRequired => "PR",
            Metric::UserInteraction => "UI",
            Metric::Scope => "S",
            Metric::Confidentiality => "C",
            Metric::Integrity => "I",
            Metric::Availability => "A",
            Metric::ExploitCodeMaturity => "E",
            Metric::RemediationLevel => "RL",
            Metric::ReportConfidence => "RC",
            Metric::ConfidentialityRequirement => "CR",
            Metric::IntegrityRequirement => "IR",
            Metric::AvailabilityRequirement => "AR",
            Metric::ModifiedAttackVector => "MAV",
            Metric::ModifiedAttackComplexity => "MAC",
            Metric::ModifiedPrivilegesRequired => "MPR",
            Metric::ModifiedUserInteraction => "MUI",
            Metric::ModifiedScope => "MS",
            Metric::ModifiedConfidentiality => "MC",
            Metric::ModifiedIntegrity => "MI",
            Metric::ModifiedAvailability => "MA",
        }
    }

    /// Human-readable metric name
    pub fn name(&self) -> &'static str {
        match self {
            Metric::AttackVector => "Attack Vector",
            Metric::AttackComplexity => "Attack Complexity",
            Metric::PrivilegesRequired => "Privileges Required",
            Metric::UserInteraction => "User Interaction",
            Metric::Scope => "Scope",
            Metric::Confidentiality => "Confidentiality",
            Metric::Integrity => "Integrity",
            Metric::Availability => "Availability",
            Metric::ExploitCodeMaturity => "Exploit Code Maturity",
            Metric::RemediationLevel => "Remediation Level",
            Metric::ReportConfidence => "Report Confidence",
            Metric::ConfidentialityRequirement => "Confidentiality Requirement",
            Metric::IntegrityRequirement => "Integrity Requirement",
            Metric::AvailabilityRequirement => "Availability Requirement",
            Metric::ModifiedAttackVector => "Modified Attack Vector",
            Metric::ModifiedAttackComplexity => "Modified Attack Complexity",
            Metric::ModifiedPrivilegesRequired => "Modified Privileges Required",
            Metric::ModifiedUserInteraction => "Modified User Interaction",
            Metric::ModifiedScope => "Modified Scope",
            Metric::ModifiedConfidentiality => "Modified Confidentiality",
            Metric::ModifiedIntegrity => "Modified Integrity",
            Metric::ModifiedAvailability => "Modified Availability",
        }
    }

    pub fn family(&self) -> MetricFamily {
        match self {
            Metric::AttackVector
            | Metric::AttackComplexity
            | Metric::PrivilegesRequired
            | Metric::UserInteraction
            | Metric::Scope
            | Metric::Confidentiality
            | Metric::Integrity
            | Metric::Availability => MetricFamily::Base,
            Metric::ExploitCodeMaturity | Metric::RemediationLevel | Metric::ReportConfidence => {
                MetricFamily::Temporal
            }
            Metric::ConfidentialityRequirement
            | Metric::IntegrityRequirement
            | Metric::AvailabilityRequirement => MetricFamily::Requirement,
            _ => MetricFamily::Modified,
        }
    }

    /// Whether the metric must be present for scoring
    pub fn is_mandatory(&self) -> bool {
        self.family() == MetricFamily::Base
    }

    /// For a modified metric, the base metric it overrides
    pub fn base_metric(&self) -> Option<Metric> {
        match self {
            Metric::ModifiedAttackVector => Some(Metric::AttackVector),
            Metric::ModifiedAttackComplexity => Some(Metric::AttackComplexity),
            Metric::ModifiedPrivilegesRequired => Some(Metric::PrivilegesRequired),
            Metric::ModifiedUserInteraction => Some(Metric::UserInteraction),
            Metric::ModifiedScope => Some(Metric::Scope),
            Metric::ModifiedConfidentiality => Some(Metric::Confidentiality),
            Metric::ModifiedIntegrity => Some(Metric::Integrity),
            Metric::ModifiedAvailability => Some(Metric::Availability),
            _ => None,
        }
    }

    /// Valid codes for this metric. Optional metrics accept "X".
    pub fn domain(&self) -> &'static [&'static str] {
        match self {
            Metric::AttackVector => &["N", "A", "L", "P"],
            Metric::AttackComplexity => &["L", "H"],
            Metric::PrivilegesRequired => &["N", "L", "H"],
            Metric::UserInteraction => &["N", "R"],
            Metric::Scope => &["U", "C"],
            Metric::Confidentiality | Metric::Integrity | Metric::Availability => &["H", "L", "N"],
            Metric::ExploitCodeMaturity => &["X", "H", "F", "P", "U"],
            Metric::RemediationLevel => &["X", "U", "W", "T", "O"],
            Metric::ReportConfidence => &["X", "C", "R", "U"],
            Metric::ConfidentialityRequirement
            | Metric::IntegrityRequirement
            | Metric::AvailabilityRequirement => &["X", "H", "M", "L"],
            Metric::ModifiedAttackVector => &["X", "N", "A", "L", "P"],
            Metric::ModifiedAttackComplexity => &["X", "L", "H"],
            Metric::ModifiedPrivilegesRequired => &["X", "N", "L", "H"],
            Metric::ModifiedUserInteraction => &["X", "N", "R"],
            Metric::ModifiedScope => &["X", "U", "C"],
            Metric::ModifiedConfidentiality
            | Metric::ModifiedIntegrity
            | Metric::ModifiedAvailability => &["X", "H", "L", "N"],
        }
    }

    /// Return the static form of `code` if it belongs to this metric's domain
    pub fn canonical_code(&self, code: &str) -> Option<&'static str> {
        self.domain().iter().copied().find(|c| *c == code)
    }

    /// Check a code against this metric's domain
    pub fn check_code(&self, code: &str) -> Result<&'static str> {
        self.canonical_code(code)
            .ok_or_else(|| Error::invalid_value(*self, code))
    }

    /// Human-readable name of a code for this metric (e.g. AV:N is "Network")
    pub fn value_name(&self, code: &str) -> Option<&'static str> {
        let metric = self.base_metric().unwrap_or(*self);
        let name = match (metric, code) {
            (_, "X") if !self.is_mandatory() => "Not Defined",
            (Metric::AttackVector, "N") => "Network",
            (Metric::AttackVector, "A") => "Adjacent Network",
            (Metric::AttackVector, "L") => "Local",
            (Metric::AttackVector, "P") => "Physical",
            (Metric::AttackComplexity, "L") => "Low",
            (Metric::AttackComplexity, "H") => "High",
            (Metric::PrivilegesRequired, "N") => "None",
            (Metric::PrivilegesRequired, "L") => "Low",
            (Metric::PrivilegesRequired, "H") => "High",
            (Metric::UserInteraction, "N") => "None",
            (Metric::UserInteraction, "R") => "Required",
            (Metric::Scope, "U") => "Unchanged",
            (Metric::Scope, "C") => "Changed",
            (Metric::Confidentiality | Metric::Integrity | Metric::Availability, "H") => "High",
            (Metric::Confidentiality | Metric::Integrity | Metric::Availability, "L") => "Low",
            (Metric::Confidentiality | Metric::Integrity | Metric::Availability, "N") => "None",
            (Metric::ExploitCodeMaturity, "H") => "High",
            (Metric::ExploitCodeMaturity, "F") => "Functional",
            (Metric::ExploitCodeMaturity, "P") => "Proof-of-Concept",
            (Metric::ExploitCodeMaturity, "U") => "Unproven",
            (Metric::RemediationLevel, "U") => "Unavailable",
            (Metric::RemediationLevel, "W") => "Workaround",
            (Metric::RemediationLevel, "T") => "Temporary Fix",
            (Metric::RemediationLevel, "O") => "Official Fix",
            (Metric::ReportConfidence, "C") => "Confirmed",
            (Metric::ReportConfidence, "R") => "Reasonable",
            (Metric::ReportConfidence, "U") => "Unknown",
            (Metric::ConfidentialityRequirement, code)
            | (Metric::IntegrityRequirement, code)
            | (Metric::AvailabilityRequirement, code) => match code {
                "H" => "High",
                "M" => "Medium",
                "L" => "Low",
                _ => return None,
            },
            _ => return None,
        };
        Some(name)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Metric::all()
            .find(|m| m.abbreviation() == s)
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

/// Whether impact is confined to the vulnerable component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    #[serde(rename = "U")]
    Unchanged,
    #[serde(rename = "C")]
    Changed,
}

impl Scope {
    /// Parse a scope code ("U" or "C") for the given scope metric
    pub fn from_code(metric: Metric, code: &str) -> Result<Self> {
        match code {
            "U" => Ok(Scope::Unchanged),
            "C" => Ok(Scope::Changed),
            other => Err(Error::invalid_value(metric, other)),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Scope::Unchanged => "U",
            Scope::Changed => "C",
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Scope::Changed)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
