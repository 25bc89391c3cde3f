use algos::Algorithm;
use engine::{Metric, RunResult, TrendHistory};

use crate::scene::{Color, Scene};
use crate::{BarChart, ChartConfig, TrendChart};

const RUNTIME_COLORS: [Color; 2] = [Color::rgb(70, 130, 200), Color::rgb(50, 170, 100)];
const MEMORY_COLORS: [Color; 2] = [Color::rgb(200, 100, 70), Color::rgb(170, 70, 170)];

/// The four panels of the comparison view: per-run bars for time and memory,
/// and trend lines for both against input size.
#[derive(Debug, Clone)]
pub struct Dashboard {
    runtime_bars: BarChart,
    memory_bars: BarChart,
    runtime_trend: TrendChart,
    memory_trend: TrendChart,
}

/// One rendered frame of every panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardScenes {
    pub runtime_bars: Scene,
    pub memory_bars: Scene,
    pub runtime_trend: Scene,
    pub memory_trend: Scene,
}

impl DashboardScenes {
    /// Panels paired with a stable file stem.
    pub fn named(&self) -> [(&'static str, &Scene); 4] {
        [
            ("runtime_bars", &self.runtime_bars),
            ("memory_bars", &self.memory_bars),
            ("runtime_trend", &self.runtime_trend),
            ("memory_trend", &self.memory_trend),
        ]
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        let names = [Algorithm::Baseline.name(), Algorithm::Supervised.name()];
        Self {
            runtime_bars: BarChart::new(
                ChartConfig::new("Execution Time Comparison", "Algorithm", "Time (nanoseconds)")
                    .palette(&RUNTIME_COLORS),
            ),
            memory_bars: BarChart::new(
                ChartConfig::new("Memory Usage Comparison", "Algorithm", "Memory (bytes)")
                    .palette(&MEMORY_COLORS),
            ),
            runtime_trend: TrendChart::new(
                ChartConfig::new("Runtime vs Input Size", "Input Size (characters)", "Time (nanoseconds)")
                    .palette(&RUNTIME_COLORS)
                    .series_names(&names),
            ),
            memory_trend: TrendChart::new(
                ChartConfig::new("Memory Usage vs Input Size", "Input Size (characters)", "Memory (bytes)")
                    .palette(&MEMORY_COLORS)
                    .series_names(&names),
            ),
        }
    }

    pub fn show_run(&mut self, run: &RunResult) {
        let labels = Algorithm::ALL.map(Algorithm::name);
        let times = Algorithm::ALL.map(|a| run.measurement(a).elapsed_ns as f64);
        let memory = Algorithm::ALL.map(|a| run.measurement(a).memory_bytes as f64);
        self.runtime_bars.set_data(&labels, &times);
        self.memory_bars.set_data(&labels, &memory);
    }

    pub fn show_trends(&mut self, history: &TrendHistory) {
        self.runtime_trend.set_data(history.store(Metric::Time).series());
        self.memory_trend.set_data(history.store(Metric::Memory).series());
    }

    pub fn clear_trends(&mut self) {
        self.runtime_trend.clear();
        self.memory_trend.clear();
    }

    pub fn scenes(&self, width: f64, height: f64) -> DashboardScenes {
        DashboardScenes {
            runtime_bars: self.runtime_bars.render(width, height),
            memory_bars: self.memory_bars.render(width, height),
            runtime_trend: self.runtime_trend.render(width, height),
            memory_trend: self.memory_trend.render(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use algos::MatchResult;
    use engine::Measurement;

    use super::*;
    use crate::Role;

    fn run(time: (u64, u64), memory: (u64, u64)) -> RunResult {
        let m = |elapsed_ns, memory_bytes| Measurement {
            result: MatchResult::default(),
            elapsed_ns,
            memory_bytes,
        };
        RunResult {
            baseline: m(time.0, memory.0),
            enhanced: m(time.1, memory.1),
        }
    }

    #[test]
    fn fresh_dashboard_is_all_placeholders() {
        let scenes = Dashboard::new().scenes(800.0, 500.0);
        for (_, scene) in scenes.named() {
            assert!(scene.is_placeholder());
        }
    }

    #[test]
    fn run_fills_both_bar_panels() {
        let mut dashboard = Dashboard::new();
        dashboard.show_run(&run((4000, 1000), (256, 512)));
        let scenes = dashboard.scenes(800.0, 500.0);

        assert_eq!(scenes.runtime_bars.count(Role::Bar), 2);
        assert_eq!(
            scenes.runtime_bars.texts(Role::CategoryLabel),
            vec!["Brute Force (Baseline)", "Supervised (Enhanced)"]
        );
        assert_eq!(scenes.runtime_bars.texts(Role::ValueLabel), vec!["4.0K", "1.0K"]);
        assert_eq!(scenes.memory_bars.texts(Role::ValueLabel), vec!["256", "512"]);
        assert!(scenes.runtime_trend.is_placeholder());
    }

    #[test]
    fn trends_draw_both_series_and_clear_back() {
        let mut history = TrendHistory::new();
        history.record(10, &run((100, 50), (0, 0)));
        history.record(20, &run((200, 90), (64, 64)));

        let mut dashboard = Dashboard::new();
        dashboard.show_trends(&history);
        let scenes = dashboard.scenes(800.0, 500.0);
        for scene in [&scenes.runtime_trend, &scenes.memory_trend] {
            assert_eq!(scene.count(Role::Series(0)), 1);
            assert_eq!(scene.count(Role::Series(1)), 1);
            assert_eq!(scene.texts(Role::XTickLabel), vec!["10", "20"]);
        }
        assert_eq!(
            scenes.memory_trend.texts(Role::Title),
            vec!["Memory Usage vs Input Size"]
        );

        dashboard.clear_trends();
        let scenes = dashboard.scenes(800.0, 500.0);
        assert!(scenes.runtime_trend.is_placeholder());
        assert!(scenes.memory_trend.is_placeholder());
    }

    #[test]
    fn file_stems_are_distinct() {
        let scenes = Dashboard::new().scenes(400.0, 300.0);
        let mut stems: Vec<_> = scenes.named().iter().map(|(n, _)| *n).collect();
        stems.sort_unstable();
        stems.dedup();
        assert_eq!(stems.len(), 4);
    }
}
