use crate::{InstrumentedSearch, MatchResult};

pub struct Baseline;

impl InstrumentedSearch for Baseline {
    const NAME: &'static str = "Brute Force (Baseline)";

    fn search_bytes(text: &[u8], pattern: &[u8]) -> MatchResult {
        baseline_scan(text, pattern)
    }
}

/// Plain left-to-right scan, one comparison per byte inspected.
pub fn baseline_scan(text: &[u8], pattern: &[u8]) -> MatchResult {
    let n = text.len();
    let m = pattern.len();

    if m == 0 {
        return MatchResult::empty_pattern();
    }

    let mut result = MatchResult::default();
    if m > n {
        return result;
    }

    for i in 0..=n - m {
        result.verifications += 1;
        if verify_at(text, pattern, i, &mut result.comparisons) {
            result.match_index = Some(i);
            break;
        }
    }

    log::debug!(
        "baseline_scan: n={} m={} found={:?} comparisons={}",
        n,
        m,
        result.match_index,
        result.comparisons
    );
    result
}

/// Compares `pattern` against `text[offset..offset + m]`, charging one
/// comparison per byte including the failing one.
pub(crate) fn verify_at(text: &[u8], pattern: &[u8], offset: usize, comparisons: &mut u64) -> bool {
    for (j, &p) in pattern.iter().enumerate() {
        *comparisons += 1;
        if text[offset + j] != p {
            return false;
        }
    }
    true
}
