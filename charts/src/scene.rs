//! Resolution-independent drawing description produced by the renderers.
//!
//! Coordinates are pixels with the origin at the top-left corner. Every
//! shape carries a [`Role`] so callers (and tests) can pick out bars, grid
//! lines or legend entries without reverse-engineering geometry.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same hue scaled by 0.7, used for outlines.
    pub fn darker(self) -> Self {
        let d = |c: u8| (u16::from(c) * 7 / 10) as u8;
        Self {
            r: d(self.r),
            g: d(self.g),
            b: d(self.b),
            a: self.a,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub anchor: Anchor,
    pub bold: bool,
    pub italic: bool,
    /// Degrees, clockwise, around the text origin.
    pub rotation: f64,
}

impl TextStyle {
    pub const fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            anchor: Anchor::Start,
            bold: false,
            italic: false,
            rotation: 0.0,
        }
    }

    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Color,
        stroke: Option<Stroke>,
        corner_radius: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Text {
        at: Point,
        content: String,
        style: TextStyle,
    },
}

impl Shape {
    pub fn text(at: Point, content: impl Into<String>, style: TextStyle) -> Self {
        Shape::Text {
            at,
            content: content.into(),
            style,
        }
    }

    pub fn line(from: Point, to: Point, stroke: Stroke) -> Self {
        Shape::Line { from, to, stroke }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// What a shape stands for in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Title,
    Placeholder,
    Axis,
    AxisLabel,
    Gridline,
    TickLabel,
    Bar,
    ValueLabel,
    CategoryLabel,
    XTick,
    XTickLabel,
    /// Filled region under series `n`.
    Area(usize),
    /// Polyline of series `n`.
    Series(usize),
    /// Point markers of series `n`.
    Marker(usize),
    Legend,
    LegendLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub role: Role,
    pub shape: Shape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Chart,
    /// No data: only the frame and a centered message.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub kind: SceneKind,
    elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            kind: SceneKind::Chart,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, role: Role, shape: Shape) {
        self.elements.push(Element { role, shape });
    }

    /// Elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn shapes(&self, role: Role) -> impl Iterator<Item = &Shape> + '_ {
        self.elements
            .iter()
            .filter(move |e| e.role == role)
            .map(|e| &e.shape)
    }

    pub fn count(&self, role: Role) -> usize {
        self.shapes(role).count()
    }

    pub fn texts(&self, role: Role) -> Vec<&str> {
        self.shapes(role).filter_map(Shape::as_text).collect()
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == SceneKind::Placeholder
    }
}

/// The rectangle data is mapped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Area left after reserving `pad` on every side, 20 more on the left
    /// for tick labels and `bottom_extra` under the x axis.
    pub fn inset(width: f64, height: f64, pad: f64, bottom_extra: f64) -> Self {
        let x = pad + 20.0;
        let y = pad;
        Self {
            x,
            y,
            width: (width - x - pad).max(1.0),
            height: (height - y - pad - bottom_extra).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// y coordinate of `value` on an axis that tops out at `ceiling`.
    pub fn y_for(&self, value: f64, ceiling: f64) -> f64 {
        self.bottom() - (value.max(0.0) / ceiling) * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_maps_values_bottom_up() {
        let area = PlotArea::inset(400.0, 300.0, 60.0, 20.0);
        assert_eq!(area.x, 80.0);
        assert_eq!(area.width, 260.0);
        assert_eq!(area.height, 160.0);
        assert_eq!(area.y_for(0.0, 10.0), area.bottom());
        assert_eq!(area.y_for(10.0, 10.0), area.y);
        assert_eq!(area.y_for(-4.0, 10.0), area.bottom());
    }

    #[test]
    fn tiny_canvas_keeps_positive_area() {
        let area = PlotArea::inset(10.0, 10.0, 60.0, 20.0);
        assert!(area.width > 0.0 && area.height > 0.0);
    }

    #[test]
    fn darker_scales_channels() {
        assert_eq!(Color::rgb(100, 200, 10).darker(), Color::rgb(70, 140, 7));
    }
}
