//! Round-up to one decimal place, as defined in CVSS v3.1 Appendix A

const SCALE: f64 = 100_000.0;
const STEP: i64 = 10_000;

/// Smallest multiple of 0.1 that is greater than or equal to `value`.
///
/// Works on `value` scaled to an integer so that results such as
/// `4.000000000000001` round to 4.0 instead of 4.1.
pub fn roundup(value: f64) -> f64 {
    let scaled = (value * SCALE).round() as i64;
    if scaled % STEP == 0 {
        scaled as f64 / SCALE
    } else {
        (scaled.div_euclid(STEP) + 1) as f64 / 10.0
    }
}
