// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendered scenes.

use alloc::vec::Vec;

use kurbo::{Affine, Rect};

use crate::mark::{CoordinateSpace, Mark, MarkId, MarkKind, MarkPayload};

/// Extent of plot space along each axis.
pub const PLOT_EXTENT: f64 = 100.0;

/// Counters describing data problems that rendering worked around.
///
/// None of these are errors: a scene is always produced. They let callers surface a warning
/// (or tests assert that a degenerate input was noticed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderDiagnostics {
    /// Plots whose source series is not available.
    pub missing_series: usize,
    /// Plots whose source series has no points.
    pub empty_plots: usize,
    /// Values left out of a log-axis domain because they were zero or negative.
    pub non_positive_log_values: usize,
    /// Filter conditions that were dropped (malformed or referencing unknown series).
    pub dropped_conditions: usize,
    /// `$ref` predicates that could not be aligned to a point.
    pub unaligned_references: usize,
}

impl RenderDiagnostics {
    /// Returns `true` when nothing was worked around.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// The output of rendering one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// The whole viewport.
    pub view: Rect,
    /// The plot rectangle inside `view` that plot space maps onto.
    pub plot: Rect,
    /// Marks in emission order; see [`Scene::sorted_marks`] for paint order.
    pub marks: Vec<Mark>,
    /// Data problems encountered while rendering.
    pub diagnostics: RenderDiagnostics,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new(view: Rect, plot: Rect) -> Self {
        Self {
            view,
            plot,
            marks: Vec::new(),
            diagnostics: RenderDiagnostics::default(),
        }
    }

    /// Appends a mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Appends marks.
    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    /// Transform from plot space (`0..=100` on both axes) into view space.
    pub fn plot_to_view(&self) -> Affine {
        let sx = self.plot.width() / PLOT_EXTENT;
        let sy = self.plot.height() / PLOT_EXTENT;
        Affine::translate((self.plot.x0, self.plot.y0)) * Affine::scale_non_uniform(sx, sy)
    }

    /// Marks in paint order: ascending `(z_index, id)`.
    pub fn sorted_marks(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Marks in paint order with all geometry resolved into view space.
    ///
    /// Widths, radii and font sizes are already view units and are left untouched.
    pub fn resolved_marks(&self) -> Vec<Mark> {
        let to_view = self.plot_to_view();
        self.sorted_marks()
            .into_iter()
            .map(|m| match m.space {
                CoordinateSpace::View => m.clone(),
                CoordinateSpace::Plot => Mark {
                    space: CoordinateSpace::View,
                    payload: transform_payload(&m.payload, to_view),
                    ..m.clone()
                },
            })
            .collect()
    }

    /// Looks up a mark by id.
    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.iter().find(|m| m.id == id)
    }

    /// Iterates over marks of one kind, in emission order.
    pub fn marks_of_kind(&self, kind: MarkKind) -> impl Iterator<Item = &Mark> + '_ {
        self.marks.iter().filter(move |m| m.kind() == kind)
    }

    /// Iterates over the strings of all text marks.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.marks.iter().filter_map(|m| m.payload.text())
    }
}

fn transform_payload(payload: &MarkPayload, t: Affine) -> MarkPayload {
    let mut out = payload.clone();
    match &mut out {
        MarkPayload::Polyline(m) => m.points.iter_mut().for_each(|p| *p = t * *p),
        MarkPayload::Area(m) => m.points.iter_mut().for_each(|p| *p = t * *p),
        MarkPayload::Rect(m) => m.rect = t.transform_rect_bbox(m.rect),
        MarkPayload::Circle(m) => m.center = t * m.center,
        MarkPayload::Text(m) => m.pos = t * m.pos,
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Point;
    use peniko::Brush;
    use peniko::color::palette::css;

    use super::*;
    use crate::mark::{CircleMark, RectMark};

    fn circle(id: u64, z: i32, center: Point) -> Mark {
        Mark::new(
            MarkId::from_raw(id),
            MarkPayload::Circle(CircleMark {
                center,
                radius: 3.0,
                fill: Brush::Solid(css::BLACK),
            }),
        )
        .with_z_index(z)
    }

    #[test]
    fn plot_space_maps_onto_plot_rect() {
        let scene = Scene::new(
            Rect::new(0.0, 0.0, 400.0, 300.0),
            Rect::new(50.0, 20.0, 350.0, 220.0),
        );
        let t = scene.plot_to_view();
        assert_eq!(t * Point::new(0.0, 0.0), Point::new(50.0, 20.0));
        assert_eq!(t * Point::new(100.0, 100.0), Point::new(350.0, 220.0));
        assert_eq!(t * Point::new(50.0, 50.0), Point::new(200.0, 120.0));
    }

    #[test]
    fn sorted_marks_break_z_ties_by_id() {
        let mut scene = Scene::new(Rect::ZERO, Rect::ZERO);
        scene.push(circle(3, 10, Point::ZERO));
        scene.push(circle(1, 10, Point::ZERO));
        scene.push(circle(2, -5, Point::ZERO));
        let order: Vec<u64> = scene.sorted_marks().iter().map(|m| m.id.raw()).collect();
        assert_eq!(order, [2, 1, 3]);
    }

    #[test]
    fn resolved_marks_keep_radius_and_map_positions() {
        let mut scene = Scene::new(
            Rect::new(0.0, 0.0, 200.0, 200.0),
            Rect::new(0.0, 0.0, 200.0, 100.0),
        );
        scene.push(circle(1, 0, Point::new(50.0, 50.0)).in_plot_space());
        scene.push(Mark::new(
            MarkId::from_raw(2),
            MarkPayload::Rect(RectMark {
                rect: Rect::new(0.0, 0.0, 10.0, 100.0),
                fill: Brush::Solid(css::RED),
                stroke: None,
            }),
        ));
        let resolved = scene.resolved_marks();
        let MarkPayload::Circle(c) = &resolved[0].payload else {
            panic!("expected circle first");
        };
        assert_eq!(c.center, Point::new(100.0, 50.0));
        assert_eq!(c.radius, 3.0);
        let MarkPayload::Rect(r) = &resolved[1].payload else {
            panic!("expected rect second");
        };
        // View-space marks pass through unchanged.
        assert_eq!(r.rect, Rect::new(0.0, 0.0, 10.0, 100.0));
        assert!(resolved.iter().all(|m| m.space == CoordinateSpace::View));
    }
}
