//! Derived metrics and the human-readable outputs built from a run.

use std::fmt;

use algos::Algorithm;

use crate::runner::RunResult;
use crate::trend::TrendHistory;

/// `(baseline - enhanced) / baseline * 100`, or 0 when the baseline is 0.
pub fn percentage_gain(baseline: u64, enhanced: u64) -> f64 {
    if baseline == 0 {
        return 0.0;
    }
    (baseline as f64 - enhanced as f64) / baseline as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    pub comparisons: f64,
    pub time: f64,
    pub memory: f64,
}

impl Gains {
    pub fn from_run(run: &RunResult) -> Self {
        let (b, e) = (&run.baseline, &run.enhanced);
        Self {
            comparisons: percentage_gain(b.result.comparisons, e.result.comparisons),
            time: percentage_gain(b.elapsed_ns, e.elapsed_ns),
            memory: percentage_gain(b.memory_bytes, e.memory_bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSummary {
    pub points: usize,
    /// Percent change of the baseline runtime from the first to the last
    /// point; only present with two or more points.
    pub runtime_change: Option<f64>,
}

impl TrendSummary {
    pub fn from_history(history: &TrendHistory) -> Self {
        let store = history.time();
        let runtime_change = match (store.first(), store.last()) {
            (Some(first), Some(last)) if store.len() >= 2 => Some(if first.baseline == 0.0 {
                0.0
            } else {
                (last.baseline - first.baseline) / first.baseline * 100.0
            }),
            _ => None,
        };
        Self {
            points: store.len(),
            runtime_change,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    SupervisionHelps,
    OverheadExceededSavings,
}

impl Verdict {
    pub fn from_gain(comparison_gain: f64) -> Self {
        if comparison_gain > 0.0 {
            Verdict::SupervisionHelps
        } else {
            Verdict::OverheadExceededSavings
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub run: RunResult,
    pub gains: Gains,
    pub trend: TrendSummary,
    pub verdict: Verdict,
}

impl Report {
    /// `history` is the trend as it stood before `run` was recorded.
    pub fn new(run: &RunResult, history: &TrendHistory) -> Self {
        let gains = Gains::from_run(run);
        Self {
            run: *run,
            gains,
            trend: TrendSummary::from_history(history),
            verdict: Verdict::from_gain(gains.comparisons),
        }
    }
}

const RULE: &str = "══════════════════════════════════════════════════════";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (b, e) = (&self.run.baseline, &self.run.enhanced);

        writeln!(f, "{RULE}")?;
        writeln!(f, "{:^54}", "RESEARCH ANALYSIS REPORT")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;

        writeln!(f, "▶ Baseline Algorithm Results (Brute Force)")?;
        writeln!(f, "  ├─ Execution Time  : {} ns", b.elapsed_ns)?;
        writeln!(f, "  ├─ Memory Usage    : {} bytes", b.memory_bytes)?;
        writeln!(f, "  ├─ Comparisons     : {}", b.result.comparisons)?;
        writeln!(
            f,
            "  └─ Match Found     : {} at index {}",
            b.result.found(),
            b.result.display_index()
        )?;
        writeln!(f)?;

        writeln!(f, "▶ Enhanced Algorithm Results (Supervised)")?;
        writeln!(f, "  ├─ Execution Time  : {} ns", e.elapsed_ns)?;
        writeln!(f, "  ├─ Memory Usage    : {} bytes", e.memory_bytes)?;
        writeln!(f, "  ├─ Comparisons     : {}", e.result.comparisons)?;
        writeln!(
            f,
            "  ├─ Vocab Skips     : {} (positions rejected by the vocabulary filter)",
            e.result.vocab_skips
        )?;
        writeln!(
            f,
            "  ├─ Checksum Skips  : {} (positions rejected by the checksum filter)",
            e.result.checksum_skips
        )?;
        writeln!(
            f,
            "  └─ Match Found     : {} at index {}",
            e.result.found(),
            e.result.display_index()
        )?;
        writeln!(f)?;

        let saved = b.result.comparisons as i128 - e.result.comparisons as i128;
        writeln!(f, "▶ Performance Comparison")?;
        writeln!(
            f,
            "  ├─ Comparison Reduction : {} fewer checks ({:.2}% gain)",
            saved, self.gains.comparisons
        )?;
        writeln!(f, "  ├─ Time Reduction       : {:.2}% faster", self.gains.time)?;
        writeln!(f, "  └─ Memory Reduction     : {:.2}% less memory", self.gains.memory)?;
        writeln!(f)?;

        writeln!(f, "▶ Performance Trends")?;
        writeln!(f, "  ├─ Data points collected: {}", self.trend.points)?;
        if let Some(change) = self.trend.runtime_change {
            writeln!(
                f,
                "  ├─ BF Runtime Trend     : {:.1}% change over collected sizes",
                change
            )?;
        }
        writeln!(f, "  └─ Run a sweep to populate the trend charts")?;
        writeln!(f)?;

        writeln!(f, "▶ Conclusion")?;
        match self.verdict {
            Verdict::SupervisionHelps => {
                writeln!(f, "  Supervision helps: the learned vocabulary and checksum")?;
                writeln!(f, "  filters removed comparisons without changing the match.")?;
            }
            Verdict::OverheadExceededSavings => {
                writeln!(f, "  In this trial the filter overhead exceeded savings.")?;
                writeln!(f, "  Larger inputs with more diverse patterns are recommended.")?;
            }
        }
        writeln!(f)?;
        write!(f, "{RULE}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub method: &'static str,
    pub comparisons: u64,
    pub time_ns: u64,
    pub memory_bytes: u64,
    /// `None` for the baseline, which has no filters.
    pub vocab_skips: Option<u64>,
    pub checksum_skips: Option<u64>,
    /// `None` for the baseline, which is the reference.
    pub gain: Option<f64>,
}

impl TableRow {
    /// Both scans always return the exact match, so accuracy is fixed.
    pub const ACCURACY: &'static str = "100.0";

    pub fn cells(&self) -> [String; 8] {
        let or_na = |v: Option<u64>| v.map_or_else(|| "N/A".to_string(), |v| v.to_string());
        [
            self.method.to_string(),
            Self::ACCURACY.to_string(),
            self.comparisons.to_string(),
            self.time_ns.to_string(),
            self.memory_bytes.to_string(),
            or_na(self.vocab_skips),
            or_na(self.checksum_skips),
            self.gain
                .map_or_else(|| "0%".to_string(), |g| format!("{:.2}%", g)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    pub rows: [TableRow; 2],
}

impl ResultsTable {
    pub const HEADERS: [&'static str; 8] = [
        "Method",
        "Accuracy (%)",
        "Comparisons",
        "Time (ns)",
        "Memory (bytes)",
        "Vocab Skips",
        "Checksum Skips",
        "Efficiency Gain",
    ];

    pub fn from_run(run: &RunResult) -> Self {
        let gains = Gains::from_run(run);
        let (b, e) = (&run.baseline, &run.enhanced);
        Self {
            rows: [
                TableRow {
                    method: Algorithm::Baseline.name(),
                    comparisons: b.result.comparisons,
                    time_ns: b.elapsed_ns,
                    memory_bytes: b.memory_bytes,
                    vocab_skips: None,
                    checksum_skips: None,
                    gain: None,
                },
                TableRow {
                    method: Algorithm::Supervised.name(),
                    comparisons: e.result.comparisons,
                    time_ns: e.elapsed_ns,
                    memory_bytes: e.memory_bytes,
                    vocab_skips: Some(e.result.vocab_skips),
                    checksum_skips: Some(e.result.checksum_skips),
                    gain: Some(gains.comparisons),
                },
            ],
        }
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<[String; 8]> = self.rows.iter().map(TableRow::cells).collect();
        let mut widths = Self::HEADERS.map(str::len);
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |f: &mut fmt::Formatter<'_>, row: &[&str]| -> fmt::Result {
            for (i, (cell, w)) in row.iter().zip(widths).enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                if i == 0 {
                    write!(f, "{:<w$}", cell, w = w)?;
                } else {
                    write!(f, "{:>w$}", cell, w = w)?;
                }
            }
            writeln!(f)
        };

        line(f, &Self::HEADERS)?;
        let total = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
        writeln!(f, "{}", "-".repeat(total))?;
        for row in &cells {
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            line(f, &row)?;
        }
        Ok(())
    }
}
