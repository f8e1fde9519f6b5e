//! One convex layer: the boundary of a hull, or a degenerate 1–2 point tail.

use crate::geom::{GeomCfg, Point, Turn};

/// Ordered boundary points of one convex layer.
///
/// Invariants (for layers produced by the hull algorithms):
/// - distinct coordinates, counter-clockwise, starting at the lexicographically
///   smallest vertex;
/// - no collinear vertices, so layers with ≥3 vertices are strictly convex.
///
/// The final 1–2 point remainder of a peeling run is stored as a degenerate
/// layer in lexicographic order and may contain coordinate-equal points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    vertices: Vec<Point>,
}

impl Layer {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fewer than three points: not a polygon.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    /// Every consecutive triple (with wraparound) makes a left turn under `cfg`.
    /// Degenerate layers are vacuously convex.
    pub fn is_strictly_convex(&self, cfg: &GeomCfg) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return true;
        }
        (0..n).all(|k| {
            let a = self.vertices[k];
            let b = self.vertices[(k + 1) % n];
            let c = self.vertices[(k + 2) % n];
            cfg.turn(a, b, c) == Turn::Left
        })
    }
}

impl From<Vec<Point>> for Layer {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}
