//! Jarvis march (gift wrapping).

use crate::error::HullError;
use crate::geom::{dist2, sort_lex, GeomCfg, Point, Turn};
use crate::layer::Layer;

use super::lex_min_index;

/// Wrap counter-clockwise from the lexicographically smallest point. O(n·h).
///
/// From each vertex the next one is the candidate with no other point strictly
/// to its right; among candidates collinear with the current vertex the
/// farthest wins, so intermediate collinear points are never emitted.
pub fn jarvis_march(points: &[Point], cfg: &GeomCfg) -> Result<Layer, HullError> {
    if points.len() < 3 {
        return Ok(Layer::new(points.to_vec()));
    }
    let distinct = {
        let mut pts = points.to_vec();
        sort_lex(&mut pts);
        pts.dedup();
        pts.len()
    };
    let start = points[lex_min_index(points)];
    let mut hull = Vec::new();
    let mut cur = start;
    loop {
        hull.push(cur);
        if hull.len() > distinct {
            return Err(HullError::WrapDiverged {
                iterations: hull.len(),
            });
        }
        let mut next: Option<Point> = None;
        for &r in points {
            if r == cur {
                continue;
            }
            next = match next {
                None => Some(r),
                Some(q) => match cfg.turn(cur, q, r) {
                    Turn::Right => Some(r),
                    Turn::Collinear if dist2(cur, r) > dist2(cur, q) => Some(r),
                    _ => Some(q),
                },
            };
        }
        match next {
            // Every point coincides with `cur`.
            None => break,
            Some(q) if q == start => break,
            Some(q) => cur = q,
        }
    }
    Ok(Layer::new(hull))
}
