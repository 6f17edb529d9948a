//! Numeric guards for formula boundaries.
//!
//! Every helper is total: non-finite input is replaced by the documented
//! fallback and reported with `tracing::warn!`, never propagated.

/// Upper bound for energy and fitness
pub const STAT_MAX: f32 = 100.0;

/// Return `value`, or `fallback` if it is NaN or infinite.
pub fn finite_or(value: f32, fallback: f32, what: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!("non-finite {} ({}), using fallback {}", what, value, fallback);
        fallback
    }
}

/// Clamp a 0..=100 stat. Non-finite input falls back to 0.
pub fn clamp_stat(value: f32, what: &str) -> f32 {
    finite_or(value, 0.0, what).clamp(0.0, STAT_MAX)
}

/// Divide with a guarded denominator. Zero, negative-zero or non-finite
/// results fall back to `fallback`.
pub fn safe_ratio(numerator: f32, denominator: f32, fallback: f32, what: &str) -> f32 {
    if denominator == 0.0 {
        tracing::warn!("zero denominator in {}, using fallback {}", what, fallback);
        return fallback;
    }
    finite_or(numerator / denominator, fallback, what)
}

/// Natural log of a strictly positive value; anything else falls back.
pub fn safe_ln(value: f32, fallback: f32, what: &str) -> f32 {
    if value > 0.0 && value.is_finite() {
        value.ln()
    } else {
        tracing::warn!("invalid log argument {} ({}), using fallback {}", what, value, fallback);
        fallback
    }
}

/// Guard a probability: non-finite becomes 0, the rest is clamped to [0, 1].
pub fn probability(value: f32, what: &str) -> f32 {
    finite_or(value, 0.0, what).clamp(0.0, 1.0)
}
