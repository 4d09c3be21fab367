//! Confidence normalisation shared by the analysis and self-check paths.

/// Clamp a probability into `[0.0, 1.0]`. Non-finite input maps to `0.0`.
pub fn clamp_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The reported form of any confidence or condition score:
/// clamped to the unit interval, then rounded to 2 decimals.
pub fn normalise_confidence(value: f64) -> f64 {
    round2(clamp_unit(value))
}
