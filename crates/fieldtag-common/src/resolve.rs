//! Duplicate-result resolution.
//!
//! The same (location, date, analyte) key can be hit by more than one sheet
//! column — re-analyzed samples, lab duplicates. The result table keeps every
//! raw string; this module picks the one to display: the highest detected
//! concentration, so the conservative reading wins over an arbitrary one.

/// Lab qualifier letters that may trail a reported concentration ("5.0 J").
/// At most one trailing qualifier is stripped before numeric comparison.
pub const QUALIFIERS: [char; 8] = ['J', 'U', 'E', 'N', 'T', 'B', 'R', 'L'];

/// Numeric rank of a raw result string for duplicate comparison.
///
/// Unparseable values rank at negative infinity: they lose to any parseable
/// value but never fail the resolution.
fn rank(value: &str) -> f64 {
    let mut s = value.trim();
    if let Some(stripped) = s.strip_suffix(&QUALIFIERS[..]) {
        s = stripped.trim_end();
    }
    s.parse::<f64>().unwrap_or(f64::NEG_INFINITY)
}

/// Pick the display value among duplicates.
///
/// Empty slice resolves to the empty string; a single value is returned
/// verbatim (qualifiers intact). With several values the highest numeric
/// rank wins; ties keep the first-seen entry.
pub fn resolve(values: &[String]) -> String {
    match values {
        [] => String::new(),
        [only] => only.clone(),
        _ => {
            let mut best = &values[0];
            let mut best_rank = rank(best);
            for value in &values[1..] {
                let r = rank(value);
                if r > best_rank {
                    best = value;
                    best_rank = r;
                }
            }
            best.clone()
        }
    }
}
