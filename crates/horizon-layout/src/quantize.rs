// crates/horizon-layout/src/quantize.rs
//
// Final coordinate normalization shared by both orientation modes.

/// Round to `decimals` digits: nearest on the exact binary value, ties to even.
///
/// Goes through the correctly rounded decimal string so results are
/// bit-identical to any other runtime that formats with the same rule.
/// Never returns `-0.0`.
pub fn quantize(value: f64, decimals: usize) -> f64 {
    let rounded: f64 = format!("{:.*}", decimals, value).parse().unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Snap `|v| < epsilon` to exactly 0.0, then quantize.
pub fn finalize(value: f64, epsilon: f64, decimals: usize) -> f64 {
    if value.abs() < epsilon {
        0.0
    } else {
        quantize(value, decimals)
    }
}
