use crate::runner::RunResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub size: f64,
    pub baseline: f64,
    pub enhanced: f64,
}

/// Parallel columns of a store, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    pub xs: Vec<f64>,
    pub baseline: Vec<f64>,
    pub enhanced: Vec<f64>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Append-only, chronological. Sizes may repeat or go backwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendStore {
    points: Vec<TrendPoint>,
}

impl TrendStore {
    pub fn push(&mut self, point: TrendPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrendPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrendPoint> {
        self.points.last()
    }

    pub fn series(&self) -> TrendSeries {
        let mut series = TrendSeries {
            xs: Vec::with_capacity(self.len()),
            baseline: Vec::with_capacity(self.len()),
            enhanced: Vec::with_capacity(self.len()),
        };
        for p in &self.points {
            series.xs.push(p.size);
            series.baseline.push(p.baseline);
            series.enhanced.push(p.enhanced);
        }
        series
    }

    fn clear(&mut self) {
        self.points.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Time,
    Memory,
}

impl Metric {
    fn point(self, size: usize, run: &RunResult) -> TrendPoint {
        let (baseline, enhanced) = match self {
            Metric::Time => (run.baseline.elapsed_ns, run.enhanced.elapsed_ns),
            Metric::Memory => (run.baseline.memory_bytes, run.enhanced.memory_bytes),
        };
        TrendPoint {
            size: size as f64,
            baseline: baseline as f64,
            enhanced: enhanced as f64,
        }
    }
}

/// The time and memory stores, kept in lockstep: every run lands in both and
/// a reset empties both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendHistory {
    time: TrendStore,
    memory: TrendStore,
}

impl TrendHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, size: usize, run: &RunResult) {
        self.time.push(Metric::Time.point(size, run));
        self.memory.push(Metric::Memory.point(size, run));
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.memory.clear();
    }

    pub fn store(&self, metric: Metric) -> &TrendStore {
        match metric {
            Metric::Time => &self.time,
            Metric::Memory => &self.memory,
        }
    }

    pub fn time(&self) -> &TrendStore {
        &self.time
    }

    pub fn memory(&self) -> &TrendStore {
        &self.memory
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
