use std::hint::black_box;
use std::time::Instant;

use algos::{Algorithm, MatchResult};
use log::debug;

use crate::alloc::{AllocatorProbe, MemoryProbe};
use crate::error::{ExperimentError, InputField};

/// One algorithm's outcome plus what it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub result: MatchResult,
    pub elapsed_ns: u64,
    pub memory_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub baseline: Measurement,
    pub enhanced: Measurement,
}

impl RunResult {
    pub fn measurement(&self, algorithm: Algorithm) -> &Measurement {
        match algorithm {
            Algorithm::Baseline => &self.baseline,
            Algorithm::Supervised => &self.enhanced,
        }
    }

    /// Both scans reported the same outcome.
    pub fn agrees(&self) -> bool {
        self.baseline.result.match_index == self.enhanced.result.match_index
    }
}

pub fn validate_input(text: &str, pattern: &str) -> Result<(), ExperimentError> {
    if text.is_empty() {
        return Err(ExperimentError::InvalidInput(InputField::Text));
    }
    if pattern.is_empty() {
        return Err(ExperimentError::InvalidInput(InputField::Pattern));
    }
    Ok(())
}

/// Runs both scans on one input under the same timing and allocation window.
///
/// The baseline is always measured first. Anything warmed up by the first
/// run (caches, allocator free lists) therefore favours the supervised scan
/// consistently across runs.
#[derive(Debug, Clone, Default)]
pub struct ExperimentRunner<P = AllocatorProbe> {
    probe: P,
}

impl ExperimentRunner<AllocatorProbe> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: MemoryProbe> ExperimentRunner<P> {
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    pub fn run(&self, text: &str, pattern: &str) -> Result<RunResult, ExperimentError> {
        validate_input(text, pattern)?;

        let baseline = self.measure(Algorithm::Baseline, text, pattern);
        let enhanced = self.measure(Algorithm::Supervised, text, pattern);

        debug!(
            "run: size={} baseline=({}ns, {}B, {} cmp) enhanced=({}ns, {}B, {} cmp)",
            text.len(),
            baseline.elapsed_ns,
            baseline.memory_bytes,
            baseline.result.comparisons,
            enhanced.elapsed_ns,
            enhanced.memory_bytes,
            enhanced.result.comparisons
        );

        Ok(RunResult { baseline, enhanced })
    }

    fn measure(&self, algorithm: Algorithm, text: &str, pattern: &str) -> Measurement {
        let mark = self.probe.start();
        let start = Instant::now();
        let result = black_box(algorithm.search(black_box(text), black_box(pattern)));
        let elapsed = start.elapsed();
        let memory_bytes = self.probe.peak_since(mark);

        Measurement {
            result,
            elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
            memory_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Hands out a scripted sequence of deltas.
    struct ScriptedProbe {
        deltas: RefCell<Vec<u64>>,
    }

    impl MemoryProbe for ScriptedProbe {
        fn start(&self) -> usize {
            0
        }

        fn peak_since(&self, _mark: usize) -> u64 {
            self.deltas.borrow_mut().remove(0)
        }
    }

    #[test]
    fn rejects_empty_input() {
        let runner = ExperimentRunner::new();
        assert_eq!(
            runner.run("", "a"),
            Err(ExperimentError::InvalidInput(InputField::Text))
        );
        assert_eq!(
            runner.run("abc", ""),
            Err(ExperimentError::InvalidInput(InputField::Pattern))
        );
    }

    #[test]
    fn measures_baseline_then_supervised() {
        let runner = ExperimentRunner::with_probe(ScriptedProbe {
            deltas: RefCell::new(vec![11, 22]),
        });
        let run = runner.run("AAAAB", "AAB").unwrap();
        assert_eq!(run.baseline.memory_bytes, 11);
        assert_eq!(run.enhanced.memory_bytes, 22);
        assert_eq!(run.baseline.result.checksum_skips, 0);
        assert_eq!(run.enhanced.result.checksum_skips, 2);
        assert!(run.agrees());
    }

    #[test]
    fn pattern_longer_than_text_is_a_clean_miss() {
        let run = ExperimentRunner::new().run("ab", "abc").unwrap();
        assert_eq!(run.baseline.result, MatchResult::default());
        assert_eq!(run.enhanced.result, MatchResult::default());
    }

    #[test]
    fn measurement_lookup_by_algorithm() {
        let run = ExperimentRunner::new().run("xyzab", "ab").unwrap();
        assert_eq!(
            run.measurement(Algorithm::Supervised).result.vocab_skips,
            3
        );
        assert_eq!(run.measurement(Algorithm::Baseline).result.match_index, Some(3));
    }
}
