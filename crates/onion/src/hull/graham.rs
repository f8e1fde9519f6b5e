//! Graham scan in its monotone-chain form.

use crate::geom::{sort_lex, GeomCfg, Point, Turn};
use crate::layer::Layer;

/// Sort lexicographically, then build lower and upper chains, popping on every
/// non-left turn so collinear points never survive. O(n log n).
pub fn graham_scan(points: &[Point], cfg: &GeomCfg) -> Layer {
    if points.len() < 3 {
        return Layer::new(points.to_vec());
    }
    let mut pts: Vec<Point> = points.to_vec();
    sort_lex(&mut pts);
    pts.dedup();
    if pts.len() == 1 {
        return Layer::new(pts);
    }
    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2
            && cfg.turn(lower[lower.len() - 2], lower[lower.len() - 1], *p) != Turn::Left
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2
            && cfg.turn(upper[upper.len() - 2], upper[upper.len() - 1], *p) != Turn::Left
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    Layer::new(hull)
}
