//! Simple polygon type and basic queries.
//!
//! A [`Polygon`] is the input to the skeleton engine: a single closed
//! boundary loop given as an ordered vertex list. Vertices are supplied in
//! counter-clockwise order for shrink operations, so that the interior lies
//! on the left of each directed edge.

use crate::primitives::Point2;
use num_traits::Float;

/// A simple polygon represented as a sequence of vertices.
///
/// The polygon is implicitly closed (the last vertex connects to the first).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The vertices of the polygon in CCW order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    ///
    /// The vertices should be in counter-clockwise order for a positive
    /// area. If provided in clockwise order, area calculations will be
    /// negative.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates an empty polygon.
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the signed area of the polygon using the shoelace formula.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        let n = self.vertices.len();
        if n < 3 {
            return F::zero();
        }

        let mut sum = F::zero();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            sum = sum + (a.x * b.y - b.x * a.y);
        }
        sum / (F::one() + F::one())
    }

    /// Returns the absolute area of the polygon.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns the perimeter of the polygon.
    pub fn perimeter(&self) -> F {
        let n = self.vertices.len();
        if n < 2 {
            return F::zero();
        }

        let mut perimeter = F::zero();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            perimeter = perimeter + a.distance(b);
        }
        perimeter
    }

    /// Tests if the polygon is strictly convex.
    ///
    /// Every corner must turn in the same direction; collinear runs count as
    /// convex. A convex polygon produces a skeleton with edge-collapse
    /// events only.
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut sign = F::zero();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            let turn = (b - a).cross(c - b);

            if turn != F::zero() {
                if sign != F::zero() && turn.signum() != sign {
                    return false;
                }
                sign = turn.signum();
            }
        }
        true
    }

    /// Returns the bounding box as (min, max) points, or `None` for an
    /// empty polygon.
    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }

        Some((min, max))
    }
}
