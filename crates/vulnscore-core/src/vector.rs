//! CVSS v3.1 vector string codec
//!
//! Vectors look like `CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H`, optionally
//! followed by temporal and environmental metrics.

use crate::error::{Error, Result};
use crate::metric::Metric;
use crate::record::MetricsRecord;
use std::fmt::Write;
use tracing::debug;

/// Version label every v3.1 vector starts with
pub const VERSION_LABEL: &str = "CVSS:3.1";

/// Serialize a record to its vector string.
///
/// Base metrics come first in fixed order, then temporal, then environmental.
/// Optional metrics set to "X" are omitted. Unrecognised keys kept from a
/// previous parse are appended last, in their original order.
pub fn serialize_vector(record: &MetricsRecord) -> String {
    let mut vector = String::from(VERSION_LABEL);

    for metric in Metric::BASE {
        if let Some(code) = record.get(metric) {
            push_segment(&mut vector, metric.abbreviation(), code);
        }
    }
    for metric in Metric::TEMPORAL.into_iter().chain(Metric::ENVIRONMENTAL) {
        if let Some(code) = record.defined(metric) {
            push_segment(&mut vector, metric.abbreviation(), code);
        }
    }
    for (key, value) in record.extensions() {
        push_segment(&mut vector, key, value);
    }

    vector
}

fn push_segment(vector: &mut String, key: &str, value: &str) {
    // Writing to a String cannot fail
    let _ = write!(vector, "/{key}:{value}");
}

/// Parse a vector string into a metrics record.
///
/// Known metrics are checked against their domain; unknown keys are kept as
/// extensions. Base metrics are not required here: a record missing one
/// fails later, at evaluation.
pub fn parse_vector(vector: &str) -> Result<MetricsRecord> {
    let vector = vector.trim();
    let body = vector
        .strip_prefix(VERSION_LABEL)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(|| Error::malformed(vector.split('/').next().unwrap_or_default()))?;

    let mut record = MetricsRecord::new();
    for segment in body.split('/') {
        let (key, value) = segment
            .split_once(':')
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .ok_or_else(|| Error::malformed(segment))?;

        match key.parse::<Metric>() {
            Ok(metric) => {
                let code = metric.check_code(value)?;
                if record.set(metric, code).is_some() {
                    return Err(Error::DuplicateMetric { metric });
                }
            }
            Err(_) => {
                debug!(key, value, "Keeping unrecognised vector metric");
                record
                    .set_extension(key, value)
                    .map_err(|_| Error::malformed(segment))?;
            }
        }
    }

    Ok(record)
}
