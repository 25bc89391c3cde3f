//! SVG output for a [`Scene`], drawn through the plotters SVG backend.

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Polygon, Rectangle, Text};
use plotters::prelude::SVGBackend;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform, IntoFont, RGBAColor, ShapeStyle};
use thiserror::Error;

use crate::scene::{Anchor, Color, Point, Scene, Shape, Stroke, TextStyle};

#[derive(Debug, Error)]
#[error("svg rendering failed: {0}")]
pub struct SvgError(String);

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for SvgError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        SvgError(err.to_string())
    }
}

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Draws every element in scene order. Coordinates are rounded to whole
/// pixels; corner radii are not drawn.
pub fn to_svg(scene: &Scene) -> Result<String, SvgError> {
    let size = (dimension(scene.width), dimension(scene.height));
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        for element in scene.elements() {
            draw_shape(&root, &element.shape)?;
        }
        root.present()?;
    }
    Ok(buf)
}

fn draw_shape(area: &Area<'_>, shape: &Shape) -> Result<(), SvgError> {
    match shape {
        Shape::Rect {
            origin,
            width,
            height,
            fill,
            stroke,
            ..
        } => {
            let corners = [coord(*origin), coord(Point::new(origin.x + width, origin.y + height))];
            area.draw(&Rectangle::new(corners, fill_style(*fill)))?;
            if let Some(stroke) = stroke {
                area.draw(&Rectangle::new(corners, stroke_style(*stroke)))?;
            }
        }
        Shape::Line { from, to, stroke } => {
            area.draw(&PathElement::new(vec![coord(*from), coord(*to)], stroke_style(*stroke)))?;
        }
        Shape::Polyline { points, stroke } => {
            area.draw(&PathElement::new(coords(points), stroke_style(*stroke)))?;
        }
        Shape::Polygon { points, fill } => {
            area.draw(&Polygon::new(coords(points), fill_style(*fill)))?;
        }
        Shape::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let r = radius.round() as i32;
            area.draw(&Circle::new(coord(*center), r, fill_style(*fill)))?;
            if let Some(stroke) = stroke {
                area.draw(&Circle::new(coord(*center), r, stroke_style(*stroke)))?;
            }
        }
        Shape::Text { at, content, style } => {
            let color = rgba(style.color);
            let text_style = ("sans-serif", style.size, font_style(style))
                .into_font()
                .transform(rotation(style.rotation))
                .color(&color)
                .pos(Pos::new(h_pos(style.anchor), VPos::Bottom));
            area.draw(&Text::new(content.as_str(), coord(*at), text_style))?;
        }
    }
    Ok(())
}

fn dimension(v: f64) -> u32 {
    v.round().max(1.0) as u32
}

fn coord(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn coords(points: &[Point]) -> Vec<(i32, i32)> {
    points.iter().copied().map(coord).collect()
}

fn rgba(c: Color) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, f64::from(c.a) / 255.0)
}

fn fill_style(c: Color) -> ShapeStyle {
    ShapeStyle {
        color: rgba(c),
        filled: true,
        stroke_width: 0,
    }
}

fn stroke_style(s: Stroke) -> ShapeStyle {
    ShapeStyle {
        color: rgba(s.color),
        filled: false,
        stroke_width: (s.width.round() as u32).max(1),
    }
}

fn font_style(style: &TextStyle) -> FontStyle {
    if style.bold {
        FontStyle::Bold
    } else if style.italic {
        FontStyle::Italic
    } else {
        FontStyle::Normal
    }
}

fn rotation(degrees: f64) -> FontTransform {
    match degrees.rem_euclid(360.0).round() as i32 {
        90 => FontTransform::Rotate90,
        180 => FontTransform::Rotate180,
        270 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

fn h_pos(anchor: Anchor) -> HPos {
    match anchor {
        Anchor::Start => HPos::Left,
        Anchor::Middle => HPos::Center,
        Anchor::End => HPos::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Role;
    use crate::{BAR_PLACEHOLDER, ChartConfig, render_bar_chart};

    #[test]
    fn bar_chart_document() {
        let scene = render_bar_chart(
            &ChartConfig::new("Execution Time Comparison", "Algorithm", "Time (nanoseconds)"),
            &["alpha".to_string(), "beta".to_string()],
            &[4000.0, 1000.0],
            640.0,
            480.0,
        );
        let svg = to_svg(&scene).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Execution Time Comparison"));
        assert!(svg.contains("alpha"));
        assert!(svg.contains("4.0K"));
        // background once, each outlined bar as fill plus outline
        assert_eq!(svg.matches("<rect").count(), 1 + 2 * scene.count(Role::Bar));
        // only the y axis title is rotated
        assert_eq!(svg.matches("rotate(").count(), 1);
    }

    #[test]
    fn text_is_escaped() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.push(
            Role::Title,
            Shape::text(Point::new(1.0, 2.0), "a<b & c", TextStyle::new(10.0, Color::GRAY)),
        );
        let svg = to_svg(&scene).unwrap();
        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(!svg.contains("a<b"));
    }

    #[test]
    fn rotation_snaps_to_quarter_turns() {
        assert!(matches!(rotation(-90.0), FontTransform::Rotate270));
        assert!(matches!(rotation(90.0), FontTransform::Rotate90));
        assert!(matches!(rotation(180.0), FontTransform::Rotate180));
        assert!(matches!(rotation(0.0), FontTransform::None));
    }

    #[test]
    fn placeholder_renders_message() {
        let scene = render_bar_chart(&ChartConfig::new("t", "x", "y"), &[], &[], 300.0, 200.0);
        let svg = to_svg(&scene).unwrap();
        assert!(svg.contains(BAR_PLACEHOLDER));
        assert_eq!(svg.matches("<rect").count(), 1);
    }
}
