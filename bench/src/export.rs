use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use charts::DashboardScenes;
use charts::svg::to_svg;
use engine::{ResultsTable, TrendHistory};

const TREND_HEADERS: [&str; 5] = [
    "Input Size",
    "Baseline Time (ns)",
    "Enhanced Time (ns)",
    "Baseline Memory (bytes)",
    "Enhanced Memory (bytes)",
];

pub fn write_table_csv<W: Write>(writer: W, table: &ResultsTable) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(ResultsTable::HEADERS)?;
    for row in &table.rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per recorded run, time and memory side by side.
fn trend_rows(history: &TrendHistory) -> Vec<[String; 5]> {
    history
        .time()
        .points()
        .iter()
        .zip(history.memory().points())
        .map(|(t, m)| {
            [
                t.size.to_string(),
                t.baseline.to_string(),
                t.enhanced.to_string(),
                m.baseline.to_string(),
                m.enhanced.to_string(),
            ]
        })
        .collect()
}

pub fn write_trend_csv<W: Write>(writer: W, history: &TrendHistory) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TREND_HEADERS)?;
    for row in trend_rows(history) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_trend_text<W: Write>(mut out: W, history: &TrendHistory) -> io::Result<()> {
    writeln!(out, "{:=^110}", " INPUT-SIZE TREND ")?;
    writeln!(
        out,
        "{:>12} | {:>20} | {:>20} | {:>24} | {:>24}",
        TREND_HEADERS[0], TREND_HEADERS[1], TREND_HEADERS[2], TREND_HEADERS[3], TREND_HEADERS[4]
    )?;
    writeln!(out, "{:-^110}", "")?;
    for row in trend_rows(history) {
        writeln!(
            out,
            "{:>12} | {:>20} | {:>20} | {:>24} | {:>24}",
            row[0], row[1], row[2], row[3], row[4]
        )?;
    }
    writeln!(out, "{:=^110}", " END ")
}

/// Writes every dashboard panel as `<dir>/<panel>.svg`, creating `dir` if needed.
pub fn write_charts(dir: &Path, scenes: &DashboardScenes) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(4);
    for (stem, scene) in scenes.named() {
        let path = dir.join(format!("{stem}.svg"));
        fs::write(&path, to_svg(scene)?)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use algos::MatchResult;
    use charts::Dashboard;
    use engine::{Measurement, RunResult};

    use super::*;

    fn run(comparisons: (u64, u64), time: (u64, u64)) -> RunResult {
        let m = |comparisons, elapsed_ns| Measurement {
            result: MatchResult {
                comparisons,
                ..MatchResult::default()
            },
            elapsed_ns,
            memory_bytes: 32,
        };
        RunResult {
            baseline: m(comparisons.0, time.0),
            enhanced: m(comparisons.1, time.1),
        }
    }

    #[test]
    fn results_table_as_csv() {
        let table = ResultsTable::from_run(&run((40, 10), (800, 200)));
        let mut buf = Vec::new();
        write_table_csv(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Method,Accuracy (%),Comparisons,Time (ns),Memory (bytes),Vocab Skips,Checksum Skips,Efficiency Gain"
        );
        assert_eq!(lines[1], "Brute Force (Baseline),100.0,40,800,32,N/A,N/A,0%");
        assert_eq!(lines[2], "Supervised (Enhanced),100.0,10,200,32,0,0,75.00%");
    }

    #[test]
    fn trend_rows_pair_time_and_memory() {
        let mut history = TrendHistory::new();
        history.record(36, &run((1, 1), (500, 250)));
        history.record(72, &run((1, 1), (900, 400)));

        let mut buf = Vec::new();
        write_trend_csv(&mut buf, &history).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "36,500,250,32,32");
        assert_eq!(lines[2], "72,900,400,32,32");

        let mut buf = Vec::new();
        write_trend_text(&mut buf, &history).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("INPUT-SIZE TREND"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn charts_land_in_directory() {
        let dir = std::env::temp_dir().join(format!("bench-charts-{}", std::process::id()));
        let mut dashboard = Dashboard::new();
        dashboard.show_run(&run((4, 2), (100, 60)));

        let written = write_charts(&dir, &dashboard.scenes(640.0, 400.0)).unwrap();
        assert_eq!(written.len(), 4);
        for path in &written {
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"));
        }
        assert!(dir.join("runtime_bars.svg").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
