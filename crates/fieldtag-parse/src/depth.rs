//! Depth-interval extraction from sample names.
//!
//! Depth-qualified sheets encode the sampled interval as a suffix of the
//! row-1 sample name, e.g. `915239-SB-A1-6.0-9.0` for location `SB-A1`.
//! Header and sample-name rows are frequently inconsistent about zero
//! padding (`SB-A01` vs `SB-A1`), so matching retries with leading zeros
//! stripped from every digit run on both sides.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Strip leading zeros from every run of digits: `"SB-A01"` → `"SB-A1"`.
/// A run of only zeros keeps a single `0`.
pub fn strip_leading_zeros(s: &str) -> String {
    DIGIT_RUNS
        .replace_all(s, |caps: &regex::Captures<'_>| {
            let run = caps[0].trim_start_matches('0');
            if run.is_empty() { "0" } else { run }.to_string()
        })
        .into_owned()
}

/// Drop a trailing `.0` from each hyphen-delimited numeric segment:
/// `"2.0-6.0"` → `"2-6"`, while `"2.5-6"` is left alone.
fn trim_zero_decimals(depth: &str) -> String {
    depth
        .split('-')
        .map(|segment| {
            match segment.strip_suffix(".0") {
                Some(head)
                    if !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()) =>
                {
                    head
                }
                _ => segment,
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn suffix_after(sample_name: &str, location_id: &str) -> Option<String> {
    let at = sample_name.find(location_id)?;
    let suffix = sample_name[at + location_id.len()..]
        .trim()
        .trim_matches('-');
    if suffix.is_empty() {
        return None;
    }
    Some(trim_zero_decimals(suffix))
}

/// Derive the depth interval for a column from its sample name.
///
/// Returns `None` when the location ID cannot be located in the sample name
/// even after zero-padding normalization; such columns are excluded from
/// depth-qualified indexing by the parser.
pub fn extract_depth(sample_name: &str, location_id: &str) -> Option<String> {
    if let Some(depth) = suffix_after(sample_name, location_id) {
        return Some(depth);
    }
    suffix_after(
        &strip_leading_zeros(sample_name),
        &strip_leading_zeros(location_id),
    )
}
