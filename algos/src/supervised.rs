use std::collections::HashSet;

use crate::naive::verify_at;
use crate::{InstrumentedSearch, MatchResult};

pub struct Supervised;

impl InstrumentedSearch for Supervised {
    const NAME: &'static str = "Supervised (Enhanced)";

    fn search_bytes(text: &[u8], pattern: &[u8]) -> MatchResult {
        supervised_scan(text, pattern)
    }
}

/// Set of distinct bytes seen in the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    seen: HashSet<u8>,
}

impl Vocabulary {
    pub fn learn(pattern: &[u8]) -> Self {
        Self {
            seen: pattern.iter().copied().collect(),
        }
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.seen.contains(&byte)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

pub fn checksum(window: &[u8]) -> u64 {
    window.iter().map(|&b| u64::from(b)).sum()
}

/// Necessary conditions learned from the pattern before scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedFilters {
    pub vocabulary: Vocabulary,
    pub checksum: u64,
}

impl LearnedFilters {
    pub fn learn(pattern: &[u8]) -> Self {
        Self {
            vocabulary: Vocabulary::learn(pattern),
            checksum: checksum(pattern),
        }
    }
}

/// Scan with two filters in front of the byte-by-byte check:
/// leading byte in the vocabulary (1 unit), then window checksum (1 unit),
/// then verification (1 unit per byte).
pub fn supervised_scan(text: &[u8], pattern: &[u8]) -> MatchResult {
    let n = text.len();
    let m = pattern.len();

    if m == 0 {
        return MatchResult::empty_pattern();
    }

    let mut result = MatchResult::default();
    if m > n {
        return result;
    }

    let filters = LearnedFilters::learn(pattern);

    for i in 0..=n - m {
        result.comparisons += 1;
        if !filters.vocabulary.contains(text[i]) {
            result.vocab_skips += 1;
            continue;
        }

        result.comparisons += 1;
        if checksum(&text[i..i + m]) != filters.checksum {
            result.checksum_skips += 1;
            continue;
        }

        result.verifications += 1;
        if verify_at(text, pattern, i, &mut result.comparisons) {
            result.match_index = Some(i);
            break;
        }
    }

    log::debug!(
        "supervised_scan: n={} m={} found={:?} comparisons={} vocab_skips={} checksum_skips={}",
        n,
        m,
        result.match_index,
        result.comparisons,
        result.vocab_skips,
        result.checksum_skips
    );
    result
}
