//! Metrics record - the qualitative input to scoring

use crate::error::{Error, Result};
use crate::metric::{Metric, NOT_DEFINED};
use crate::vector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A set of CVSS v3.1 metric values, keyed by metric.
///
/// Values are stored as given; domain checks happen in [`validate`](Self::validate),
/// when parsing a vector, and at evaluation time. Keys outside the v3.1
/// metric set are kept as extensions so they survive a parse/serialize cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRecord {
    values: BTreeMap<Metric, String>,

    /// Unrecognised key/value pairs, in order of appearance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extensions: Vec<(String, String)>,
}

impl MetricsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, metric: Metric, code: impl Into<String>) -> Self {
        self.set(metric, code);
        self
    }

    /// Set a metric value, returning the previous one
    pub fn set(&mut self, metric: Metric, code: impl Into<String>) -> Option<String> {
        self.values.insert(metric, code.into())
    }

    pub fn get(&self, metric: Metric) -> Option<&str> {
        self.values.get(&metric).map(String::as_str)
    }

    pub fn remove(&mut self, metric: Metric) -> Option<String> {
        self.values.remove(&metric)
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    /// Value of an optional metric, treating "X" the same as absent
    pub fn defined(&self, metric: Metric) -> Option<&str> {
        self.get(metric).filter(|code| *code != NOT_DEFINED)
    }

    /// Present metrics in canonical vector order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &str)> + '_ {
        Metric::all().filter_map(move |m| self.get(m).map(|code| (m, code)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.extensions.is_empty()
    }

    /// Keep an unrecognised key, replacing an earlier value for the same key.
    ///
    /// Keys naming a v3.1 metric belong in [`set`](Self::set). Neither key nor
    /// value may be empty or contain the `:` and `/` vector separators.
    pub fn set_extension(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let key = key.into();
        let value = value.into();

        let reason = if key.parse::<Metric>().is_ok() {
            Some("key is a CVSS v3.1 metric")
        } else if key.is_empty() || value.is_empty() {
            Some("empty key or value")
        } else if key.contains([':', '/']) || value.contains([':', '/']) {
            Some("contains a vector separator")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Error::InvalidExtension { key, reason });
        }

        match self.extensions.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.extensions.push((key, value)),
        }
        Ok(())
    }

    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn extensions(&self) -> &[(String, String)] {
        &self.extensions
    }

    /// Copy of this record without "X" entries
    pub fn explicit(&self) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|(_, code)| code.as_str() != NOT_DEFINED)
                .map(|(m, code)| (*m, code.clone()))
                .collect(),
            extensions: self.extensions.clone(),
        }
    }

    /// Check every present value against its domain and require all base metrics
    pub fn validate(&self) -> Result<()> {
        for (metric, code) in &self.values {
            metric.check_code(code)?;
        }
        match Metric::BASE.into_iter().find(|m| !self.contains(*m)) {
            Some(metric) => Err(Error::MissingMandatoryMetric { metric }),
            None => Ok(()),
        }
    }
}

impl FromStr for MetricsRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        vector::parse_vector(s)
    }
}

impl std::fmt::Display for MetricsRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&vector::serialize_vector(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn critical_record() -> MetricsRecord {
        MetricsRecord::new()
            .with(Metric::AttackVector, "N")
            .with(Metric::AttackComplexity, "L")
            .with(Metric::PrivilegesRequired, "N")
            .with(Metric::UserInteraction, "N")
            .with(Metric::Scope, "U")
            .with(Metric::Confidentiality, "H")
            .with(Metric::Integrity, "H")
            .with(Metric::Availability, "H")
    }

    #[test]
    fn test_set_and_get() {
        let mut record = MetricsRecord::new();
        assert!(record.set(Metric::AttackVector, "N").is_none());
        assert_eq!(record.set(Metric::AttackVector, "L"), Some("N".into()));
        assert_eq!(record.get(Metric::AttackVector), Some("L"));
        assert_eq!(record.remove(Metric::AttackVector), Some("L".into()));
        assert!(record.is_empty());
    }

    #[test]
    fn test_defined_treats_x_as_absent() {
        let record = critical_record().with(Metric::ExploitCodeMaturity, "X");
        assert!(record.contains(Metric::ExploitCodeMaturity));
        assert_eq!(record.defined(Metric::ExploitCodeMaturity), None);
        assert_eq!(record.explicit(), critical_record());
    }

    #[test]
    fn test_iter_is_canonical_order() {
        let record = MetricsRecord::new()
            .with(Metric::ModifiedAvailability, "L")
            .with(Metric::ReportConfidence, "C")
            .with(Metric::AttackVector, "N");
        let order: Vec<Metric> = record.iter().map(|(m, _)| m).collect();
        assert_eq!(
            order,
            vec![
                Metric::AttackVector,
                Metric::ReportConfidence,
                Metric::ModifiedAvailability
            ]
        );
    }

    #[test]
    fn test_extensions_replace_by_key() {
        let mut record = MetricsRecord::new();
        record.set_extension("XYZ", "1").unwrap();
        record.set_extension("ABC", "2").unwrap();
        record.set_extension("XYZ", "3").unwrap();
        assert_eq!(record.extension("XYZ"), Some("3"));
        assert_eq!(record.extensions().len(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_extensions_reject_metric_keys_and_separators() {
        let mut record = critical_record();
        for (key, value) in [
            ("AV", "L"),
            ("MS", "C"),
            ("", "1"),
            ("XYZ", ""),
            ("X:Y", "1"),
            ("XYZ", "a/b"),
            ("XYZ", "a:b"),
        ] {
            assert!(
                matches!(
                    record.set_extension(key, value),
                    Err(Error::InvalidExtension { .. })
                ),
                "{key}:{value}"
            );
        }
        assert!(record.extensions().is_empty());

        let vector = record.to_string();
        assert_eq!(vector.parse::<MetricsRecord>().unwrap(), record);
    }

    #[test]
    fn test_extension_survives_round_trip() {
        let mut record = critical_record();
        record.set_extension("XQ", "7").unwrap();
        let reparsed: MetricsRecord = record.to_string().parse().unwrap();
        assert_eq!(reparsed, record);
        assert_eq!(reparsed.extension("XQ"), Some("7"));
    }

    #[test]
    fn test_validate() {
        assert!(critical_record().validate().is_ok());

        let mut missing = critical_record();
        missing.remove(Metric::Integrity);
        assert_eq!(
            missing.validate(),
            Err(Error::MissingMandatoryMetric {
                metric: Metric::Integrity
            })
        );

        let bad = critical_record().with(Metric::RemediationLevel, "Z");
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidMetricValue {
                metric: Metric::RemediationLevel,
                ..
            })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let record = critical_record().with(Metric::ModifiedScope, "C");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"MS\":\"C\""));
        let back: MetricsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
