//! Damage and battle-power arithmetic behind the calculator page.

use crate::numeric::{number_from_str, parse_float, parse_int};

/// Numeric sum of the raw input values. An empty input counts as `0` and a
/// non-numeric one turns the total into `NaN`.
pub fn damage_total<S: AsRef<str>>(inputs: &[S]) -> f64 {
    inputs
        .iter()
        .map(|raw| number_from_str(raw.as_ref()))
        .sum()
}

/// The raw values joined as strings, which is what `a + b + c` yields on
/// unconverted input values.
pub fn damage_concatenated<S: AsRef<str>>(inputs: &[S]) -> String {
    inputs.iter().map(AsRef::as_ref).collect()
}

/// `floor(parseInt(base) * (parseInt(level) / 10) * parseFloat(multiplier))`.
pub fn battle_power(base: &str, level: &str, multiplier: &str) -> f64 {
    let base = parse_int(base, None);
    let level = parse_int(level, None);
    let multiplier = parse_float(multiplier);
    (base * (level / 10.0) * multiplier).floor()
}
