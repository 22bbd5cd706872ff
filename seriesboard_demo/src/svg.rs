// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG painter for rendered scenes.

use std::fmt::Write as _;

use kurbo::{BezPath, Point};
use peniko::Brush;
use seriesboard_core::{MarkPayload, Scene, TextAnchor, TextBaseline};

/// Paints `scene` as a standalone SVG document sized to its viewport.
pub(crate) fn scene_to_svg(scene: &Scene) -> String {
    let view = scene.view;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    );

    for mark in scene.resolved_marks() {
        match &mark.payload {
            MarkPayload::Polyline(p) => {
                let d = polyline_path(&p.points, false).to_svg();
                let _ = write!(out, r#"<path d="{d}" fill="none""#);
                write_paint_attr(&mut out, "stroke", &p.stroke);
                let _ = write!(
                    out,
                    r#" stroke-width="{}" stroke-linejoin="round""#,
                    p.stroke_width
                );
                out.push_str("/>\n");
            }
            MarkPayload::Area(a) => {
                let d = polyline_path(&a.points, true).to_svg();
                let _ = write!(out, r#"<path d="{d}""#);
                write_paint_attr(&mut out, "fill", &a.fill);
                out.push_str("/>\n");
            }
            MarkPayload::Rect(r) => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                );
                write_paint_attr(&mut out, "fill", &r.fill);
                if let Some((stroke, width)) = &r.stroke {
                    write_paint_attr(&mut out, "stroke", stroke);
                    let _ = write!(out, r#" stroke-width="{width}""#);
                }
                out.push_str("/>\n");
            }
            MarkPayload::Circle(c) => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}""#,
                    c.center.x, c.center.y, c.radius
                );
                write_paint_attr(&mut out, "fill", &c.fill);
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                };
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                );
                if t.angle != 0.0 {
                    let _ = write!(
                        out,
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    );
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn polyline_path(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        if closed {
            path.close_path();
        }
    }
    path
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use peniko::color::palette::css;
    use seriesboard_core::{CircleMark, Mark, MarkId, TextMark};

    use super::*;

    #[test]
    fn plot_space_marks_are_mapped_into_the_plot_rect() {
        let mut scene = Scene::new(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Rect::new(10.0, 10.0, 110.0, 60.0),
        );
        scene.push(
            Mark::new(
                MarkId::from_raw(1),
                MarkPayload::Circle(CircleMark {
                    center: Point::new(50.0, 50.0),
                    radius: 3.0,
                    fill: Brush::Solid(css::RED),
                }),
            )
            .in_plot_space(),
        );
        scene.push(Mark::new(
            MarkId::from_raw(2),
            MarkPayload::Text(TextMark {
                pos: Point::new(5.0, 5.0),
                text: String::from("a < b"),
                font_size: 10.0,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Alphabetic,
                fill: Brush::Solid(css::BLACK),
            }),
        ));
        let svg = scene_to_svg(&scene);
        assert!(svg.contains(r##"<circle cx="60" cy="35" r="3" fill="#ff0000"/>"##));
        assert!(svg.contains("a &lt; b"));
    }
}
