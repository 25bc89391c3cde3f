//! Input-size sweeps.
//!
//! A sweep grows a base text by each multiplier, appends the pattern so the
//! last window is always a hit, and runs both scans on the result. The work
//! happens on a worker thread that only ever *reports* points; whoever owns
//! the trend stores applies them. There is no way to cancel a sweep once it
//! has started.

use std::thread::{self, JoinHandle};

use kanal::{Receiver, Sender};
use log::{debug, error, info};

use crate::alloc::{AllocatorProbe, MemoryProbe};
use crate::error::{ExperimentError, InputField};
use crate::runner::{ExperimentRunner, RunResult};

pub const DEFAULT_MULTIPLIERS: [f64; 7] = [0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0];

/// Used when the caller has no base text of its own.
pub const DEFAULT_BASE_TEXT: &str = "DATA_STREAM_SAMPLE_TEXT_FOR_MATCHING";

/// Largest text a sweep point may build.
pub const MAX_SWEEP_TEXT_BYTES: usize = 1 << 30;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub multipliers: Vec<f64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            multipliers: DEFAULT_MULTIPLIERS.to_vec(),
        }
    }
}

/// Whole repetitions of the base text for a multiplier.
///
/// Fractions truncate and everything below 1 (NaN included) becomes a single
/// copy, so 0.5 and 1.0 build the same text.
pub fn repetitions(multiplier: f64) -> usize {
    (multiplier.floor() as usize).max(1)
}

/// Length of the text [`build_sweep_text`] would build, `None` past
/// [`MAX_SWEEP_TEXT_BYTES`].
pub fn sweep_text_len(base: &str, pattern: &str, multiplier: f64) -> Option<usize> {
    base.len()
        .checked_mul(repetitions(multiplier))?
        .checked_add(pattern.len())
        .filter(|&len| len <= MAX_SWEEP_TEXT_BYTES)
}

pub fn build_sweep_text(base: &str, pattern: &str, multiplier: f64) -> Result<String, ExperimentError> {
    let len = sweep_text_len(base, pattern, multiplier).ok_or(ExperimentError::SweepTooLarge {
        multiplier,
        limit: MAX_SWEEP_TEXT_BYTES,
    })?;
    let mut text = String::with_capacity(len);
    for _ in 0..repetitions(multiplier) {
        text.push_str(base);
    }
    text.push_str(pattern);
    Ok(text)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub index: usize,
    pub multiplier: f64,
    pub size: usize,
    pub run: RunResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    Point(SweepPoint),
    /// Sent exactly once, after the last point.
    Finished { points: usize },
}

pub struct SweepDriver<P = AllocatorProbe> {
    config: SweepConfig,
    runner: ExperimentRunner<P>,
}

impl SweepDriver<AllocatorProbe> {
    pub fn new(config: SweepConfig) -> Self {
        Self::with_runner(config, ExperimentRunner::new())
    }
}

impl<P: MemoryProbe> SweepDriver<P> {
    pub fn with_runner(config: SweepConfig, runner: ExperimentRunner<P>) -> Self {
        Self { config, runner }
    }

    /// Rejects the sweep up front: an empty pattern, or any multiplier whose
    /// text would be too large. Returns the base text actually used.
    fn check<'a>(&self, base: &'a str, pattern: &str) -> Result<&'a str, ExperimentError> {
        if pattern.is_empty() {
            return Err(ExperimentError::InvalidInput(InputField::Pattern));
        }
        let base = if base.is_empty() { DEFAULT_BASE_TEXT } else { base };
        let too_large = self
            .config
            .multipliers
            .iter()
            .find(|&&m| sweep_text_len(base, pattern, m).is_none());
        if let Some(&multiplier) = too_large {
            return Err(ExperimentError::SweepTooLarge {
                multiplier,
                limit: MAX_SWEEP_TEXT_BYTES,
            });
        }
        Ok(base)
    }

    /// Runs the sweep on the calling thread, handing every event to `emit`.
    /// `emit` returns `false` when nobody is listening any more.
    pub fn run<F>(&self, base: &str, pattern: &str, mut emit: F) -> Result<usize, ExperimentError>
    where
        F: FnMut(SweepEvent) -> bool,
    {
        let base = self.check(base, pattern)?;

        let mut points = 0;
        for (index, &multiplier) in self.config.multipliers.iter().enumerate() {
            let text = build_sweep_text(base, pattern, multiplier)?;
            let run = match self.runner.run(&text, pattern) {
                Ok(run) => run,
                Err(e) => {
                    error!("sweep: run at multiplier {} failed: {}", multiplier, e);
                    break;
                }
            };

            info!("sweep: processed size {}", text.len());
            points += 1;
            let point = SweepPoint {
                index,
                multiplier,
                size: text.len(),
                run,
            };
            if !emit(SweepEvent::Point(point)) {
                debug!("sweep: receiver gone after {} points", points);
                return Ok(points);
            }
        }

        emit(SweepEvent::Finished { points });
        Ok(points)
    }
}

impl<P: MemoryProbe + Send + 'static> SweepDriver<P> {
    /// Starts the sweep on a background thread.
    pub fn spawn(self, base: &str, pattern: &str) -> Result<SweepHandle, ExperimentError> {
        self.check(base, pattern)?;

        let (tx, rx): (Sender<SweepEvent>, Receiver<SweepEvent>) = kanal::unbounded();
        let base = base.to_string();
        let pattern = pattern.to_string();

        let worker = thread::spawn(move || {
            debug!("sweep worker start: {} sizes", self.config.multipliers.len());
            let outcome = self.run(&base, &pattern, |event| tx.send(event).is_ok());
            if let Err(e) = outcome {
                error!("sweep worker: {}", e);
            }
            debug!("sweep worker stop");
        });

        Ok(SweepHandle {
            events: rx,
            worker: Some(worker),
            finished: false,
        })
    }
}

/// Receiving end of a background sweep.
pub struct SweepHandle {
    events: Receiver<SweepEvent>,
    worker: Option<JoinHandle<()>>,
    finished: bool,
}

impl SweepHandle {
    /// Blocks for the next event; `None` once the sweep has finished.
    pub fn recv(&mut self) -> Option<SweepEvent> {
        if self.finished {
            return None;
        }
        match self.events.recv() {
            Ok(event) => Some(self.observe(event)),
            Err(_) => {
                self.finished = true;
                None
            }
        }
    }

    /// Non-blocking variant of [`SweepHandle::recv`]. `None` also means
    /// "nothing yet"; check [`SweepHandle::is_finished`] to tell the two apart.
    pub fn try_recv(&mut self) -> Option<SweepEvent> {
        if self.finished {
            return None;
        }
        match self.events.try_recv() {
            Ok(Some(event)) => Some(self.observe(event)),
            Ok(None) => None,
            Err(_) => {
                self.finished = true;
                None
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Waits for the worker thread to exit.
    pub fn join(mut self) -> thread::Result<()> {
        match self.worker.take() {
            Some(worker) => worker.join(),
            None => Ok(()),
        }
    }

    fn observe(&mut self, event: SweepEvent) -> SweepEvent {
        if matches!(event, SweepEvent::Finished { .. }) {
            self.finished = true;
        }
        event
    }
}

impl Iterator for SweepHandle {
    type Item = SweepEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}
