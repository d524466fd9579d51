//! Engine time base
//!
//! Every instant and duration inside the engine is a whole number of
//! microseconds. Seconds only appear at the edges (tick lengths, tuning,
//! event timestamps) and are converted here, so instants that should
//! coincide always compare equal.

/// Engine instant or duration in microseconds
pub type Micros = u64;

pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Seconds to microseconds, rounded to the nearest microsecond
///
/// Negative and NaN inputs give 0; values past the range saturate.
pub fn to_micros(seconds: f64) -> Micros {
    if seconds.is_nan() || seconds <= 0.0 {
        return 0;
    }
    (seconds * MICROS_PER_SEC as f64).round() as Micros
}

/// Microseconds to seconds
pub fn to_secs(micros: Micros) -> f64 {
    micros as f64 / MICROS_PER_SEC as f64
}
