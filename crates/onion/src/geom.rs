//! Orientation predicate and point ordering shared by every hull algorithm.
//!
//! All convexity decisions in the crate go through `GeomCfg::turn`, so a change
//! to the tolerance policy applies to Graham scan, Jarvis march and the
//! divide-and-conquer tangent search alike.

use std::cmp::Ordering;

use nalgebra::Vector2;

/// A planar point. Equality is exact on both coordinates.
pub type Point = Vector2<f64>;

/// Twice the signed area of the triangle `(o, a, b)`.
///
/// Positive for a left (counter-clockwise) turn, negative for a right turn,
/// zero when the three points are collinear.
#[inline]
pub fn orientation(o: Point, a: Point, b: Point) -> f64 {
    let oa = a - o;
    let ob = b - o;
    oa.x * ob.y - oa.y * ob.x
}

/// Classification of three ordered points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Collinear,
    Right,
}

/// Geometry configuration (tolerances).
///
/// `eps_orient` is the band around zero treated as collinear. The default of
/// `0.0` compares against exact zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps_orient: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps_orient: 0.0 }
    }
}

impl GeomCfg {
    #[inline]
    pub fn turn(&self, o: Point, a: Point, b: Point) -> Turn {
        let v = orientation(o, a, b);
        if v > self.eps_orient {
            Turn::Left
        } else if v < -self.eps_orient {
            Turn::Right
        } else {
            Turn::Collinear
        }
    }
}

/// Lexicographic order: x ascending, ties by y ascending.
#[inline]
pub fn lex_cmp(a: &Point, b: &Point) -> Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Sort by `lex_cmp` (stable, so equal points keep their input order).
pub fn sort_lex(points: &mut [Point]) {
    points.sort_by(lex_cmp);
}

#[inline]
pub(crate) fn dist2(a: Point, b: Point) -> f64 {
    (b - a).norm_squared()
}
