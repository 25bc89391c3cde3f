mod axis;
mod bar;
mod dashboard;
mod format;
pub mod scene;
pub mod svg;
mod trend;

pub use bar::{BAR_PLACEHOLDER, BarChart, render_bar_chart};
pub use dashboard::{Dashboard, DashboardScenes};
pub use format::format_large_number;
pub use scene::{Color, Role, Scene, SceneKind, Shape};
pub use trend::{TREND_PLACEHOLDER, TrendChart, render_trend_chart};

use scene::Color as C;

/// Static description of one chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Cycled per bar (bar charts) or per series (trend charts).
    pub palette: Vec<Color>,
    /// Legend entries for trend charts; unused by bar charts.
    pub series_names: Vec<String>,
}

impl ChartConfig {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            palette: vec![C::rgb(70, 130, 200), C::rgb(50, 170, 100)],
            series_names: Vec::new(),
        }
    }

    pub fn palette(mut self, palette: &[Color]) -> Self {
        self.palette = palette.to_vec();
        self
    }

    pub fn series_names(mut self, names: &[&str]) -> Self {
        self.series_names = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub(crate) fn color(&self, i: usize) -> Color {
        if self.palette.is_empty() {
            return C::GRAY;
        }
        self.palette[i % self.palette.len()]
    }
}
