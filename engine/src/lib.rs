pub mod alloc;
mod error;
pub mod report;
mod runner;
mod session;
pub mod sweep;
mod trend;

pub use alloc::{AllocatorProbe, MemoryProbe, TrackingAllocator};
pub use error::{ExperimentError, InputField};
pub use report::{Gains, Report, ResultsTable, TableRow, TrendSummary, Verdict, percentage_gain};
pub use runner::{ExperimentRunner, Measurement, RunResult, validate_input};
pub use session::{Session, SweepStatus};
pub use sweep::{
    DEFAULT_BASE_TEXT, DEFAULT_MULTIPLIERS, SweepConfig, SweepDriver, SweepEvent, SweepHandle,
    MAX_SWEEP_TEXT_BYTES, SweepPoint, build_sweep_text, repetitions, sweep_text_len,
};
pub use trend::{Metric, TrendHistory, TrendPoint, TrendSeries, TrendStore};
