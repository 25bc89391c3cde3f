use engine::TrendSeries;
use log::trace;

use crate::ChartConfig;
use crate::axis::{axes, axis_ceiling, axis_titles, frame, placeholder, value_grid};
use crate::format::format_large_number;
use crate::scene::{Anchor, Color, PlotArea, Point, Role, Scene, Shape, Stroke, TextStyle};

pub const TREND_PLACEHOLDER: &str =
    "Run 'Full Input-Size Sweep' or multiple experiments to see trends";

const PADDING: f64 = 70.0;
const AREA_ALPHA: u8 = 40;
const MARKER_RADIUS: f64 = 5.0;
const LEGEND_WIDTH: f64 = 230.0;
const LEGEND_ROW: f64 = 20.0;

/// Maps the independent variable linearly from `[min(xs), max(xs)]` onto the
/// plot width.
#[derive(Debug, Clone, Copy, PartialEq)]
struct XScale {
    min: f64,
    max: f64,
}

impl XScale {
    fn fit(xs: &[f64]) -> Self {
        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == min {
            max = min + 1.0;
        }
        Self { min, max }
    }

    fn x(&self, area: &PlotArea, value: f64) -> f64 {
        area.x + (value - self.min) / (self.max - self.min) * area.width
    }
}

/// Line chart of one or more dependent series against `xs`.
///
/// Points are drawn in the order given; unsorted or repeated x values are
/// fine. Each series gets a translucent area, a polyline, point markers and
/// a legend row.
pub fn render_trend_chart(
    config: &ChartConfig,
    xs: &[f64],
    series: &[&[f64]],
    width: f64,
    height: f64,
) -> Scene {
    let mut scene = Scene::new(width, height);
    frame(&mut scene, config);

    if xs.is_empty() {
        placeholder(&mut scene, TREND_PLACEHOLDER);
        return scene;
    }

    let area = PlotArea::inset(width, height, PADDING, 30.0);
    let scale = XScale::fit(xs);
    let ceiling = axis_ceiling(series.iter().flat_map(|s| s.iter().copied()));
    trace!(
        "trend chart '{}': {} points, x in [{}, {}], ceiling {}",
        config.title,
        xs.len(),
        scale.min,
        scale.max,
        ceiling
    );

    value_grid(&mut scene, &area, ceiling);
    axes(&mut scene, &area, Stroke::new(Color::rgb(150, 170, 200), 1.5));

    let tick_stroke = Stroke::new(Color::rgb(100, 120, 150), 1.0);
    let tick_style = TextStyle::new(10.0, Color::rgb(100, 120, 150)).anchor(Anchor::Middle);
    for &x in xs {
        let px = scale.x(&area, x);
        scene.push(
            Role::XTick,
            Shape::line(
                Point::new(px, area.bottom()),
                Point::new(px, area.bottom() + 4.0),
                tick_stroke,
            ),
        );
        scene.push(
            Role::XTickLabel,
            Shape::text(
                Point::new(px, area.bottom() + 15.0),
                format_large_number(x),
                tick_style,
            ),
        );
    }

    for (i, values) in series.iter().enumerate() {
        let points: Vec<Point> = xs
            .iter()
            .zip(values.iter())
            .map(|(&x, &v)| Point::new(scale.x(&area, x), area.y_for(v, ceiling)))
            .collect();
        draw_series(&mut scene, &area, i, &points, config.color(i));
    }

    legend(&mut scene, &area, config, series.len());
    axis_titles(&mut scene, &area, config);
    scene
}

fn draw_series(scene: &mut Scene, area: &PlotArea, index: usize, points: &[Point], color: Color) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };

    let mut outline = Vec::with_capacity(points.len() + 2);
    outline.push(Point::new(first.x, area.bottom()));
    outline.extend_from_slice(points);
    outline.push(Point::new(last.x, area.bottom()));
    scene.push(
        Role::Area(index),
        Shape::Polygon {
            points: outline,
            fill: color.with_alpha(AREA_ALPHA),
        },
    );

    scene.push(
        Role::Series(index),
        Shape::Polyline {
            points: points.to_vec(),
            stroke: Stroke::new(color, 2.5),
        },
    );

    for &center in points {
        scene.push(
            Role::Marker(index),
            Shape::Circle {
                center,
                radius: MARKER_RADIUS,
                fill: Color::WHITE,
                stroke: Some(Stroke::new(color, 2.0)),
            },
        );
    }
}

fn legend(scene: &mut Scene, area: &PlotArea, config: &ChartConfig, series: usize) {
    let rows = series.min(config.series_names.len());
    if rows == 0 {
        return;
    }

    let lx = area.right() - 220.0;
    let ly = area.y + 10.0;
    scene.push(
        Role::Legend,
        Shape::Rect {
            origin: Point::new(lx - 8.0, ly - 14.0),
            width: LEGEND_WIDTH,
            height: rows as f64 * LEGEND_ROW + 10.0,
            fill: Color::WHITE.with_alpha(200),
            stroke: Some(Stroke::new(Color::rgb(180, 190, 210), 1.0)),
            corner_radius: 10.0,
        },
    );

    for (i, name) in config.series_names.iter().take(rows).enumerate() {
        let color = config.color(i);
        let y = ly + i as f64 * LEGEND_ROW;
        scene.push(
            Role::Legend,
            Shape::line(Point::new(lx, y + 3.0), Point::new(lx + 25.0, y + 3.0), Stroke::new(color, 3.0)),
        );
        scene.push(
            Role::Legend,
            Shape::Circle {
                center: Point::new(lx + 12.0, y + 3.0),
                radius: 4.0,
                fill: color,
                stroke: None,
            },
        );
        scene.push(
            Role::LegendLabel,
            Shape::text(
                Point::new(lx + 32.0, y + 7.0),
                name.as_str(),
                TextStyle::new(11.0, Color::rgb(50, 70, 110)),
            ),
        );
    }
}

/// A trend chart panel holding the series last handed to it.
#[derive(Debug, Clone)]
pub struct TrendChart {
    config: ChartConfig,
    data: TrendSeries,
}

impl TrendChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            data: TrendSeries::default(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replaces the displayed data wholesale; nothing from earlier calls is kept.
    pub fn set_data(&mut self, data: TrendSeries) {
        self.data = data;
    }

    pub fn clear(&mut self) {
        self.data = TrendSeries::default();
    }

    pub fn render(&self, width: f64, height: f64) -> Scene {
        render_trend_chart(
            &self.config,
            &self.data.xs,
            &[&self.data.baseline, &self.data.enhanced],
            width,
            height,
        )
    }
}
