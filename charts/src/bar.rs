use log::trace;

use crate::ChartConfig;
use crate::axis::{axes, axis_ceiling, axis_titles, frame, placeholder, value_grid};
use crate::format::format_large_number;
use crate::scene::{Anchor, Color, PlotArea, Point, Role, Scene, Shape, Stroke, TextStyle};

pub const BAR_PLACEHOLDER: &str = "Run an experiment to see results";

const PADDING: f64 = 60.0;
const MAX_BAR_WIDTH: f64 = 80.0;
const SLOT_GAP: f64 = 20.0;

/// One bar per value in equal-width slots, scaled against
/// `max(largest value, 1)`. Labels pair with values by position.
pub fn render_bar_chart(
    config: &ChartConfig,
    labels: &[String],
    values: &[f64],
    width: f64,
    height: f64,
) -> Scene {
    let mut scene = Scene::new(width, height);
    frame(&mut scene, config);

    if values.is_empty() {
        placeholder(&mut scene, BAR_PLACEHOLDER);
        return scene;
    }

    let area = PlotArea::inset(width, height, PADDING, 20.0);
    let ceiling = axis_ceiling(values.iter().copied());
    trace!("bar chart '{}': {} bars, ceiling {}", config.title, values.len(), ceiling);

    axes(&mut scene, &area, Stroke::new(Color::rgb(200, 210, 220), 1.0));
    value_grid(&mut scene, &area, ceiling);

    let slot = area.width / values.len() as f64;
    let bar_width = (slot - SLOT_GAP).min(MAX_BAR_WIDTH).max(1.0);
    let value_style = TextStyle::new(11.0, Color::rgb(40, 60, 100))
        .bold()
        .anchor(Anchor::Middle);
    let category_style = TextStyle::new(10.0, Color::rgb(60, 80, 120)).anchor(Anchor::Middle);

    for (i, &value) in values.iter().enumerate() {
        let top = area.y_for(value, ceiling);
        let x = area.x + i as f64 * slot + (slot - bar_width) / 2.0;
        let center = x + bar_width / 2.0;
        let color = config.color(i);

        scene.push(
            Role::Bar,
            Shape::Rect {
                origin: Point::new(x, top),
                width: bar_width,
                height: area.bottom() - top,
                fill: color,
                stroke: Some(Stroke::new(color.darker(), 1.5)),
                corner_radius: 8.0,
            },
        );
        scene.push(
            Role::ValueLabel,
            Shape::text(Point::new(center, top - 5.0), format_large_number(value), value_style),
        );
        let label = labels.get(i).map(String::as_str).unwrap_or_default();
        scene.push(
            Role::CategoryLabel,
            Shape::text(Point::new(center, area.bottom() + 15.0), label, category_style),
        );
    }

    axis_titles(&mut scene, &area, config);
    scene
}

/// A bar chart panel. Holds the last data it was given so a redraw without
/// new data paints the same thing.
#[derive(Debug, Clone)]
pub struct BarChart {
    config: ChartConfig,
    labels: Vec<String>,
    values: Vec<f64>,
}

impl BarChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_data(&mut self, labels: &[&str], values: &[f64]) {
        self.labels = labels.iter().map(|s| s.to_string()).collect();
        self.values = values.to_vec();
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.values.clear();
    }

    pub fn render(&self, width: f64, height: f64) -> Scene {
        render_bar_chart(&self.config, &self.labels, &self.values, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChartConfig {
        ChartConfig::new("Execution Time Comparison", "Algorithm", "Time (nanoseconds)")
    }

    fn bars(scene: &Scene) -> Vec<(f64, f64, f64, f64)> {
        scene
            .shapes(Role::Bar)
            .map(|s| match s {
                Shape::Rect { origin, width, height, .. } => (origin.x, origin.y, *width, *height),
                other => panic!("bar is not a rect: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn empty_values_render_placeholder() {
        let scene = render_bar_chart(&config(), &[], &[], 600.0, 400.0);
        assert!(scene.is_placeholder());
        assert_eq!(scene.texts(Role::Placeholder), vec![BAR_PLACEHOLDER]);
        assert_eq!(scene.count(Role::Gridline), 0);
        assert_eq!(scene.count(Role::Bar), 0);
    }

    #[test]
    fn bars_scale_against_largest_value() {
        let labels = vec!["Brute Force (Baseline)".to_string(), "Supervised (Enhanced)".to_string()];
        let scene = render_bar_chart(&config(), &labels, &[2000.0, 500.0], 600.0, 400.0);
        let area = PlotArea::inset(600.0, 400.0, 60.0, 20.0);

        assert!(!scene.is_placeholder());
        let bars = bars(&scene);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].3, area.height);
        assert_eq!(bars[1].3, area.height / 4.0);
        // both bars stand on the x axis
        assert_eq!(bars[0].1 + bars[0].3, area.bottom());
        assert_eq!(bars[1].1 + bars[1].3, area.bottom());

        assert_eq!(scene.texts(Role::ValueLabel), vec!["2.0K", "500"]);
        assert_eq!(scene.texts(Role::CategoryLabel), labels);
        assert_eq!(scene.texts(Role::TickLabel).last(), Some(&"2.0K"));
    }

    #[test]
    fn bar_width_is_capped() {
        let scene = render_bar_chart(&config(), &[], &[1.0, 2.0], 1200.0, 400.0);
        assert!(bars(&scene).iter().all(|b| b.2 == 80.0));

        let crowded: Vec<f64> = (1..=40).map(f64::from).collect();
        let scene = render_bar_chart(&config(), &[], &crowded, 600.0, 400.0);
        assert!(bars(&scene).iter().all(|b| b.2 >= 1.0 && b.2 < 80.0));
    }

    #[test]
    fn all_zero_values_use_unit_ceiling() {
        let scene = render_bar_chart(&config(), &[], &[0.0, 0.0], 600.0, 400.0);
        assert!(bars(&scene).iter().all(|b| b.3 == 0.0));
        assert_eq!(scene.texts(Role::TickLabel).last(), Some(&"1"));
    }

    #[test]
    fn panel_redraw_without_new_data_is_stable() {
        let mut panel = BarChart::new(config());
        assert!(panel.render(600.0, 400.0).is_placeholder());

        panel.set_data(&["a", "b"], &[3.0, 4.0]);
        let first = panel.render(600.0, 400.0);
        assert_eq!(first, panel.render(600.0, 400.0));

        panel.clear();
        assert!(panel.render(600.0, 400.0).is_placeholder());
    }
}
