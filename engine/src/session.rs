use log::{debug, info};

use crate::alloc::{AllocatorProbe, MemoryProbe};
use crate::error::ExperimentError;
use crate::report::{Report, ResultsTable};
use crate::runner::{ExperimentRunner, RunResult};
use crate::sweep::{SweepConfig, SweepDriver, SweepEvent, SweepHandle, SweepPoint};
use crate::trend::TrendHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStatus {
    Running,
    /// The batch is complete; charts should be redrawn now.
    Finished { points: usize },
}

/// Sole owner of the trend history and the report of the last single run.
///
/// Sweep workers never touch the history; their events are fed back through
/// [`Session::apply`] on the thread that owns the session.
///
/// The report is taken when its run happens and summarises the trend as it
/// stood before that run was added, so the first run reports no data points.
#[derive(Debug, Clone)]
pub struct Session<P = AllocatorProbe> {
    runner: ExperimentRunner<P>,
    sweep: SweepConfig,
    trends: TrendHistory,
    last_report: Option<Report>,
}

impl Session<AllocatorProbe> {
    pub fn new() -> Self {
        Self::with_runner(ExperimentRunner::new(), SweepConfig::default())
    }
}

impl Default for Session<AllocatorProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MemoryProbe + Clone + Send + 'static> Session<P> {
    pub fn with_runner(runner: ExperimentRunner<P>, sweep: SweepConfig) -> Self {
        Self {
            runner,
            sweep,
            trends: TrendHistory::new(),
            last_report: None,
        }
    }

    /// Runs both scans once and adds the result to the trends.
    pub fn run_experiment(&mut self, text: &str, pattern: &str) -> Result<&RunResult, ExperimentError> {
        let run = self.runner.run(text, pattern)?;
        let report = Report::new(&run, &self.trends);
        self.trends.record(text.len(), &run);
        Ok(&self.last_report.insert(report).run)
    }

    /// Clears the trends and starts a background sweep. Feed its events to
    /// [`Session::apply`].
    pub fn start_sweep(&mut self, base: &str, pattern: &str) -> Result<SweepHandle, ExperimentError> {
        let driver = SweepDriver::with_runner(self.sweep.clone(), self.runner.clone());
        let handle = driver.spawn(base, pattern)?;
        self.trends.clear();
        info!("sweep started over {} sizes", self.sweep.multipliers.len());
        Ok(handle)
    }

    pub fn apply(&mut self, event: SweepEvent) -> SweepStatus {
        match event {
            SweepEvent::Point(point) => {
                debug!("sweep point {}: size {}", point.index, point.size);
                self.trends.record(point.size, &point.run);
                SweepStatus::Running
            }
            SweepEvent::Finished { points } => {
                info!("sweep complete: {} data points collected", points);
                SweepStatus::Finished { points }
            }
        }
    }

    /// Starts a sweep and drains it, calling `on_point` before each point is
    /// applied. Returns the number of points collected.
    pub fn run_sweep<F>(&mut self, base: &str, pattern: &str, mut on_point: F) -> Result<usize, ExperimentError>
    where
        F: FnMut(&SweepPoint),
    {
        let mut handle = self.start_sweep(base, pattern)?;
        let mut collected = 0;
        while let Some(event) = handle.recv() {
            if let SweepEvent::Point(point) = &event {
                on_point(point);
            }
            if let SweepStatus::Finished { points } = self.apply(event) {
                collected = points;
            }
        }
        if handle.join().is_err() {
            log::error!("sweep worker panicked");
        }
        Ok(collected)
    }

    /// Empties both trend stores at once.
    pub fn clear_trends(&mut self) {
        self.trends.clear();
    }

    pub fn trends(&self) -> &TrendHistory {
        &self.trends
    }

    pub fn last_run(&self) -> Option<&RunResult> {
        self.last_report.as_ref().map(|report| &report.run)
    }

    pub fn report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    pub fn results_table(&self) -> Option<ResultsTable> {
        self.last_run().map(ResultsTable::from_run)
    }
}
