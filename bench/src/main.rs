mod export;

use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use charts::Dashboard;
use clap::Parser;
use engine::{DEFAULT_MULTIPLIERS, ExperimentRunner, Session, SweepConfig, TrackingAllocator};
use log::{info, warn};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum TableFormat {
    Text,
    Csv,
}

/// Example:
/// cargo run --release -p bench -- --text "AAAAB" --pattern "AAB"
/// cargo run --release -p bench -- --text-file data/ipsum.txt --pattern Lorem --sweep --chart-dir charts-out
/// RUST_LOG=debug prints every measurement.
#[derive(Debug, clap::Parser)]
#[command(
    name = "bench",
    about = "Compare a brute-force scan against the supervised (filtered) scan on one input or across input sizes"
)]
struct Cli {
    #[arg(
        long,
        conflicts_with = "text_file",
        required_unless_present_any = ["text_file", "sweep"]
    )]
    text: Option<String>,

    /// Read the text from a file, `-` for stdin
    #[arg(long = "text-file", value_name = "TEXT_FILE", conflicts_with = "text")]
    text_file: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "pattern_file",
        required_unless_present = "pattern_file"
    )]
    pattern: Option<String>,

    #[arg(
        long = "pattern-file",
        value_name = "PATTERN_FILE",
        conflicts_with = "pattern",
        required_unless_present = "pattern"
    )]
    pattern_file: Option<PathBuf>,

    /// Run the input-size sweep first, growing the text (or a built-in sample) by each multiplier
    #[arg(long)]
    sweep: bool,

    /// Comma separated size multipliers for the sweep
    #[arg(long, value_delimiter = ',', value_name = "LIST")]
    multipliers: Vec<f64>,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 500.0)]
    height: f64,

    /// Directory to write the four charts into as SVG
    #[arg(long = "chart-dir", value_name = "DIR")]
    chart_dir: Option<PathBuf>,

    #[arg(long = "table-format", value_enum, default_value_t = TableFormat::Text)]
    table_format: TableFormat,

    /// Optional output file; if omitted, results are written to stdout
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let pattern = load_pattern(&cli)?;
    if pattern.is_empty() {
        return Err("Pattern must not be empty".into());
    }
    let text = load_optional_text(&cli)?;
    if text.as_deref() == Some("") {
        return Err("Text must not be empty".into());
    }
    let multipliers = resolve_multipliers(&cli.multipliers)?;
    if !(cli.width > 0.0 && cli.height > 0.0) {
        return Err(format!("Chart size must be positive (got {}x{})", cli.width, cli.height).into());
    }

    let mut out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let mut session = Session::with_runner(ExperimentRunner::new(), SweepConfig { multipliers });

    if cli.sweep {
        let base = text.as_deref().unwrap_or_default();
        eprintln!("> Running full input-size sweep...");
        let points = session.run_sweep(base, &pattern, |point| {
            eprintln!("Processed size: {}", point.size);
        })?;
        eprintln!("Sweep complete! {} data points collected.", points);
    }

    if let Some(ref text) = text {
        let run = session.run_experiment(text, &pattern)?;
        if !run.agrees() {
            warn!("scans disagree on the match index");
        }
    }

    write_results(&mut out, &session, cli.table_format)?;

    if let Some(ref dir) = cli.chart_dir {
        let mut dashboard = Dashboard::new();
        if let Some(run) = session.last_run() {
            dashboard.show_run(run);
        }
        dashboard.show_trends(session.trends());
        for path in export::write_charts(dir, &dashboard.scenes(cli.width, cli.height))? {
            info!("wrote {}", path.display());
        }
    }

    out.flush()?;
    Ok(())
}

fn write_results(out: &mut dyn Write, session: &Session, format: TableFormat) -> Result<(), Box<dyn Error>> {
    if let Some(table) = session.results_table() {
        match format {
            TableFormat::Text => write!(out, "{table}")?,
            TableFormat::Csv => export::write_table_csv(&mut *out, &table)?,
        }
        writeln!(out)?;
    }

    // Trends only need their own table when there is more than the single run.
    if session.trends().len() > usize::from(session.last_run().is_some()) {
        match format {
            TableFormat::Text => export::write_trend_text(&mut *out, session.trends())?,
            TableFormat::Csv => export::write_trend_csv(&mut *out, session.trends())?,
        }
        writeln!(out)?;
    }

    if let Some(report) = session.report() {
        write!(out, "{report}")?;
    }
    Ok(())
}

/// Falls back to the default sizes when no list is given.
fn resolve_multipliers(given: &[f64]) -> Result<Vec<f64>, Box<dyn Error>> {
    if given.is_empty() {
        return Ok(DEFAULT_MULTIPLIERS.to_vec());
    }
    if let Some(bad) = given.iter().find(|m| !(m.is_finite() && **m > 0.0)) {
        return Err(format!("multipliers must be finite and positive (got {bad})").into());
    }
    if given.windows(2).any(|w| w[1] < w[0]) {
        warn!("multipliers are not ascending; trend lines will double back");
    }
    Ok(given.to_vec())
}

fn load_pattern(cli: &Cli) -> Result<String, Box<dyn Error>> {
    if let Some(ref pat) = cli.pattern {
        Ok(pat.clone())
    } else if let Some(ref path) = cli.pattern_file {
        load_text(path)
    } else {
        Err("Either --pattern or --pattern-file must be provided".into())
    }
}

fn load_optional_text(cli: &Cli) -> Result<Option<String>, Box<dyn Error>> {
    match (&cli.text, &cli.text_file) {
        (Some(text), _) => Ok(Some(text.clone())),
        (None, Some(path)) => load_text(path).map(Some),
        (None, None) => Ok(None),
    }
}

fn load_text(path: &PathBuf) -> Result<String, Box<dyn Error>> {
    let mut buf = String::new();
    if path.as_os_str() == "-" {
        io::stdin().read_to_string(&mut buf)?;
    } else {
        File::open(path)?.read_to_string(&mut buf)?;
    }
    Ok(buf)
}
