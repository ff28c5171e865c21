//! Directional deviation against tolerance bounds.

/// Describe a measured value against optional `[min, max]` bounds.
///
/// Policy, in priority order:
/// 1. both bounds absent → `"<measured><unit> (no reference)"`
/// 2. below `min` → negative-signed delta of `min - measured`
/// 3. above `max` → positive-signed delta of `measured - max`
/// 4. otherwise → within range
///
/// Deltas are rounded to 4 decimal places. A rule with `min > max` is
/// malformed; the min check simply wins (documented ambiguity, not fixed
/// here — the rules file is the thing to repair).
pub fn describe(measured: f64, min: Option<f64>, max: Option<f64>, unit: &str) -> String {
    match (min, max) {
        (None, None) => format!("{measured}{unit} (no reference)"),
        (Some(min), _) if measured < min => {
            let delta = round4(min - measured);
            format!("{measured}{unit} (-{delta}{unit} below range)")
        }
        (_, Some(max)) if measured > max => {
            let delta = round4(measured - max);
            format!("{measured}{unit} (+{delta}{unit} above range)")
        }
        _ => format!("{measured}{unit} (within range)"),
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
