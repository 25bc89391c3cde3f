mod naive;
mod supervised;

use std::fmt;

pub use naive::{Baseline, baseline_scan};
pub use supervised::{LearnedFilters, Supervised, Vocabulary, checksum, supervised_scan};

/// Outcome of one instrumented scan.
///
/// `verifications` counts the offsets that went through the byte-by-byte
/// check. For the baseline that is every scanned offset; for the supervised
/// scan it is the offsets that survived both filters, so
/// `vocab_skips + checksum_skips + verifications` is always the number of
/// offsets visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub match_index: Option<usize>,
    pub comparisons: u64,
    pub vocab_skips: u64,
    pub checksum_skips: u64,
    pub verifications: u64,
}

impl MatchResult {
    /// Convention shared by both scans: the empty pattern matches at 0 for free.
    pub(crate) fn empty_pattern() -> Self {
        Self {
            match_index: Some(0),
            ..Self::default()
        }
    }

    pub fn found(&self) -> bool {
        self.match_index.is_some()
    }

    pub fn positions_scanned(&self) -> u64 {
        self.vocab_skips + self.checksum_skips + self.verifications
    }

    /// Match index as reported to humans, `-1` when nothing matched.
    pub fn display_index(&self) -> i64 {
        self.match_index.map_or(-1, |i| i as i64)
    }
}

pub trait InstrumentedSearch {
    const NAME: &'static str;

    fn search_bytes(text: &[u8], pattern: &[u8]) -> MatchResult;

    fn search(text: &str, pattern: &str) -> MatchResult {
        Self::search_bytes(text.as_bytes(), pattern.as_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Baseline,
    Supervised,
}

impl Algorithm {
    /// Measurement order. The supervised scan always runs second.
    pub const ALL: [Algorithm; 2] = [Algorithm::Baseline, Algorithm::Supervised];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Baseline => Baseline::NAME,
            Algorithm::Supervised => Supervised::NAME,
        }
    }

    pub fn search(self, text: &str, pattern: &str) -> MatchResult {
        match self {
            Algorithm::Baseline => Baseline::search(text, pattern),
            Algorithm::Supervised => Supervised::search(text, pattern),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
