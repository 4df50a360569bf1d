//! Obstacle geometry built from simple shapes. A shape keeps an immutable set of points in its
//! own canonical frame together with its current placement in the parent frame; the placed points
//! are always derived from those two on demand, so moving a shape never accumulates error in its
//! points.

mod primitives;
mod seq_polygon;

use crate::common::points::transform_points;
use crate::diagnostics::DiagnosticSink;
use crate::environment::ObstacleProvider;
use crate::{Iso2, Point2};

pub use primitives::{arrow_points, circle_points, rectangle_points, triangle_points};
pub use seq_polygon::{parse_commands, trace_commands, BuildCommand};

/// Default spacing between generated points, in world units
pub const DEFAULT_RES: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rectangle { base: f64, height: f64 },
    Circle { radius: f64 },
    Arrow { base: f64, height: f64 },
    Triangle { base: f64, height: f64 },
    SeqPolygon(Vec<BuildCommand>),
    Compound(Vec<Shape>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    canonical: Vec<Point2>,
    placement: Iso2,
}

impl Shape {
    fn from_parts(kind: ShapeKind, canonical: Vec<Point2>) -> Self {
        Self {
            kind,
            canonical,
            placement: Iso2::identity(),
        }
    }

    pub fn rectangle(base: f64, height: f64, res: f64) -> Self {
        let res = res.abs();
        Self::from_parts(
            ShapeKind::Rectangle { base, height },
            rectangle_points(base, height, res),
        )
    }

    pub fn square(side: f64, res: f64) -> Self {
        Self::rectangle(side, side, res)
    }

    pub fn circle(radius: f64, res: f64) -> Self {
        let res = res.abs();
        Self::from_parts(ShapeKind::Circle { radius }, circle_points(radius, res))
    }

    pub fn arrow(base: f64, height: f64, res: f64) -> Self {
        let res = res.abs();
        Self::from_parts(
            ShapeKind::Arrow { base, height },
            arrow_points(base, height, res),
        )
    }

    pub fn triangle(base: f64, height: f64, res: f64) -> Self {
        let res = res.abs();
        Self::from_parts(
            ShapeKind::Triangle { base, height },
            triangle_points(base, height, res),
        )
    }

    pub fn seq_polygon(commands: &[BuildCommand], res: f64) -> Self {
        let res = res.abs();
        Self::from_parts(
            ShapeKind::SeqPolygon(commands.to_vec()),
            trace_commands(commands, res),
        )
    }

    /// Build a command polygon from textual commands such as `("right", "380")` or
    /// `("skip", "on")`. Commands that cannot be understood are reported to the sink and skipped;
    /// the rest of the polygon is built as if they were not there.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatsense::{Shape, RecordingSink};
    /// let sink = RecordingSink::new();
    /// let walls = Shape::seq_polygon_from_text(
    ///     &[("start", "0,0"), ("right", "2"), ("jump", "1"), ("up", "1")],
    ///     1.0,
    ///     &sink,
    /// );
    /// assert_eq!(walls.size(), 3);
    /// assert_eq!(sink.len(), 1);
    /// ```
    pub fn seq_polygon_from_text(
        commands: &[(&str, &str)],
        res: f64,
        sink: &dyn DiagnosticSink,
    ) -> Self {
        Self::seq_polygon(&parse_commands(commands, sink), res)
    }

    /// Group several shapes into one. The members keep their own placements, and the compound's
    /// placement is applied on top of them.
    pub fn compound(shapes: Vec<Shape>) -> Self {
        let canonical = shapes.iter().flat_map(|s| s.get_points()).collect();
        Self::from_parts(ShapeKind::Compound(shapes), canonical)
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn placement(&self) -> &Iso2 {
        &self.placement
    }

    /// The points in the shape's own frame, before placement
    pub fn canonical_points(&self) -> &[Point2] {
        &self.canonical
    }

    pub fn size(&self) -> usize {
        self.canonical.len()
    }

    /// Shift the shape by `(dx, dy)` in the parent frame
    pub fn translated(mut self, dx: f64, dy: f64) -> Self {
        self.placement = Iso2::translation(dx, dy) * self.placement;
        self
    }

    /// Rotate the shape by `degrees` about the origin of the parent frame
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.placement = Iso2::rotation(degrees.to_radians()) * self.placement;
        self
    }

    /// Rotate the shape about the parent origin by `degrees` and then shift it by `(dx, dy)`
    pub fn moved(self, dx: f64, dy: f64, degrees: f64) -> Self {
        self.rotated(degrees).translated(dx, dy)
    }

    /// Discard every previous placement
    pub fn reset(mut self) -> Self {
        self.placement = Iso2::identity();
        self
    }
}

impl ObstacleProvider for Shape {
    fn get_points(&self) -> Vec<Point2> {
        transform_points(&self.canonical, &self.placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translate_then_rotate_order_matters() {
        let a = Shape::square(1.0, 0.5).translated(10.0, 0.0).rotated(90.0);
        let b = Shape::square(1.0, 0.5).rotated(90.0).translated(10.0, 0.0);

        // First vertex is the canonical origin
        assert_relative_eq!(a.get_points()[0], Point2::new(0.0, 10.0), epsilon = 1.0e-12);
        assert_relative_eq!(b.get_points()[0], Point2::new(10.0, 0.0), epsilon = 1.0e-12);
    }

    #[test]
    fn test_canonical_points_never_change() {
        let shape = Shape::circle(2.0, 0.5);
        let canonical = shape.canonical_points().to_vec();
        let moved = shape.moved(5.0, 5.0, 33.0).moved(-5.0, 1.0, -12.0);
        assert_eq!(moved.canonical_points(), canonical.as_slice());

        let reset = moved.reset();
        assert_eq!(reset.get_points(), canonical);
    }

    #[test]
    fn test_compound_applies_own_placement_over_members() {
        let leg = Shape::square(1.0, 0.5);
        let legs = vec![leg.clone(), leg.translated(4.0, 0.0)];
        let chair = Shape::compound(legs).translated(100.0, 0.0);

        let points = chair.get_points();
        assert_eq!(points.len(), 2 * 12);
        assert_relative_eq!(points[0], Point2::new(100.0, 0.0));
        assert_relative_eq!(points[12], Point2::new(104.0, 0.0));
    }
}
