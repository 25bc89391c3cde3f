use crate::ChartConfig;
use crate::format::format_large_number;
use crate::scene::{Anchor, Color, PlotArea, Point, Role, Scene, SceneKind, Shape, Stroke, TextStyle};

/// Gridlines sit at `i / GRID_DIVISIONS` of the ceiling for `i` in `0..=GRID_DIVISIONS`.
pub(crate) const GRID_DIVISIONS: usize = 5;

const BACKGROUND: Color = Color::rgb(248, 251, 255);
const TITLE: Color = Color::rgb(40, 60, 100);
const GRID: Color = Color::rgb(220, 228, 238);
const TICK_TEXT: Color = Color::rgb(100, 120, 150);
const LABEL: Color = Color::rgb(60, 80, 120);

pub(crate) fn frame(scene: &mut Scene, config: &ChartConfig) {
    scene.push(
        Role::Background,
        Shape::Rect {
            origin: Point::new(0.0, 0.0),
            width: scene.width,
            height: scene.height,
            fill: BACKGROUND,
            stroke: None,
            corner_radius: 0.0,
        },
    );
    let title = Shape::text(
        Point::new(scene.width / 2.0, 28.0),
        config.title.as_str(),
        TextStyle::new(15.0, TITLE).bold().anchor(Anchor::Middle),
    );
    scene.push(Role::Title, title);
}

pub(crate) fn placeholder(scene: &mut Scene, message: &str) {
    scene.kind = SceneKind::Placeholder;
    let text = Shape::text(
        Point::new(scene.width / 2.0, scene.height / 2.0),
        message,
        TextStyle::new(13.0, Color::GRAY).italic().anchor(Anchor::Middle),
    );
    scene.push(Role::Placeholder, text);
}

/// Top of the value axis: the largest value, but never below 1.
pub(crate) fn axis_ceiling(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, f64::max).max(1.0)
}

pub(crate) fn value_grid(scene: &mut Scene, area: &PlotArea, ceiling: f64) {
    for i in 0..=GRID_DIVISIONS {
        let frac = i as f64 / GRID_DIVISIONS as f64;
        let y = area.bottom() - frac * area.height;
        scene.push(
            Role::Gridline,
            Shape::line(Point::new(area.x, y), Point::new(area.right(), y), Stroke::new(GRID, 1.0)),
        );
        scene.push(
            Role::TickLabel,
            Shape::text(
                Point::new(area.x - 4.0, y + 4.0),
                format_large_number(ceiling * frac),
                TextStyle::new(10.0, TICK_TEXT).anchor(Anchor::End),
            ),
        );
    }
}

pub(crate) fn axes(scene: &mut Scene, area: &PlotArea, stroke: Stroke) {
    let origin = Point::new(area.x, area.bottom());
    scene.push(Role::Axis, Shape::line(Point::new(area.x, area.y), origin, stroke));
    scene.push(Role::Axis, Shape::line(origin, Point::new(area.right(), area.bottom()), stroke));
}

pub(crate) fn axis_titles(scene: &mut Scene, area: &PlotArea, config: &ChartConfig) {
    let style = TextStyle::new(11.0, LABEL).bold().anchor(Anchor::Middle);
    scene.push(
        Role::AxisLabel,
        Shape::text(
            Point::new(area.x + area.width / 2.0, scene.height - 5.0),
            config.x_label.as_str(),
            style,
        ),
    );
    scene.push(
        Role::AxisLabel,
        Shape::text(
            Point::new(12.0, area.y + area.height / 2.0),
            config.y_label.as_str(),
            style.rotated(-90.0),
        ),
    );
}
