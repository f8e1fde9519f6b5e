//! Divide-and-conquer hull with tangent merging.
//!
//! The recursion splits a lexicographically sorted, duplicate-free array by
//! index. Sorting happens once, in `divide_and_conquer`; the recursive helper
//! only ever sees `(sorted, lo, hi)`, so every left sub-hull lies strictly
//! before every right sub-hull in x-then-y order.
//!
//! Sub-hulls are canonical (counter-clockwise, starting at their
//! lexicographic minimum, 1 or 2 points allowed), which fixes where the
//! tangent walks start and in which direction they move.

use crate::error::{HullError, Tangent};
use crate::geom::{dist2, lex_cmp, sort_lex, GeomCfg, Point, Turn};
use crate::layer::Layer;

use super::{lex_max_index, lex_min_index};

/// Divide-and-conquer convex hull. O(n log n).
///
/// Fails only if a tangent walk exceeds its move budget, which means the
/// orientation predicate classified the same configuration inconsistently.
pub fn divide_and_conquer(points: &[Point], cfg: &GeomCfg) -> Result<Layer, HullError> {
    if points.len() < 3 {
        return Ok(Layer::new(points.to_vec()));
    }
    let mut sorted = points.to_vec();
    sort_lex(&mut sorted);
    sorted.dedup();
    let hull = hull_range(&sorted, 0, sorted.len(), cfg)?;
    Ok(Layer::new(hull))
}

fn hull_range(sorted: &[Point], lo: usize, hi: usize, cfg: &GeomCfg) -> Result<Vec<Point>, HullError> {
    debug_assert!(sorted[lo..hi]
        .windows(2)
        .all(|w| lex_cmp(&w[0], &w[1]).is_lt()));
    if hi - lo <= 1 {
        return Ok(sorted[lo..hi].to_vec());
    }
    let mid = lo + (hi - lo) / 2;
    let left = hull_range(sorted, lo, mid, cfg)?;
    let right = hull_range(sorted, mid, hi, cfg)?;
    merge(&left, &right, cfg)
}

#[inline]
fn next(k: usize, n: usize) -> usize {
    (k + 1) % n
}

#[inline]
fn prev(k: usize, n: usize) -> usize {
    (k + n - 1) % n
}

/// Move budget for one tangent search (strict walk plus collinear extension).
#[inline]
fn tangent_budget(left: usize, right: usize) -> usize {
    2 * (left + right) + 2
}

struct Walk {
    tangent: Tangent,
    moves: usize,
    budget: usize,
    left: usize,
    right: usize,
}

impl Walk {
    fn new(tangent: Tangent, left: usize, right: usize) -> Self {
        Self {
            tangent,
            moves: 0,
            budget: tangent_budget(left, right),
            left,
            right,
        }
    }

    fn step(&mut self) -> Result<(), HullError> {
        self.moves += 1;
        if self.moves > self.budget {
            return Err(HullError::TangentSearchDiverged {
                tangent: self.tangent,
                iterations: self.moves,
                left: self.left,
                right: self.right,
            });
        }
        Ok(())
    }
}

/// Slide `k` along `chain` (using `advance`) while the next vertex stays on the
/// line through `anchor` and `chain[k]` and lies farther from `anchor`.
fn extend_collinear(
    anchor: Point,
    chain: &[Point],
    mut k: usize,
    advance: fn(usize, usize) -> usize,
    cfg: &GeomCfg,
    walk: &mut Walk,
) -> Result<usize, HullError> {
    let n = chain.len();
    while n > 1 {
        let cand = chain[advance(k, n)];
        if cfg.turn(anchor, chain[k], cand) != Turn::Collinear
            || dist2(anchor, cand) <= dist2(anchor, chain[k])
        {
            break;
        }
        walk.step()?;
        k = advance(k, n);
    }
    Ok(k)
}

/// Upper tangent `(i, j)`: no vertex of either hull lies strictly left of the
/// directed line `left[i] -> right[j]`. On the left hull the walk moves
/// counter-clockwise, on the right hull clockwise.
fn upper_tangent(left: &[Point], right: &[Point], cfg: &GeomCfg) -> Result<(usize, usize), HullError> {
    let (nl, nr) = (left.len(), right.len());
    let mut walk = Walk::new(Tangent::Upper, nl, nr);
    let mut i = lex_max_index(left);
    let mut j = lex_min_index(right);
    loop {
        let mut moved = false;
        while nr > 1 && cfg.turn(left[i], right[j], right[prev(j, nr)]) == Turn::Left {
            walk.step()?;
            j = prev(j, nr);
        }
        while nl > 1 && cfg.turn(left[i], right[j], left[next(i, nl)]) == Turn::Left {
            walk.step()?;
            i = next(i, nl);
            moved = true;
        }
        if !moved {
            break;
        }
    }
    let i = extend_collinear(right[j], left, i, next, cfg, &mut walk)?;
    let j = extend_collinear(left[i], right, j, prev, cfg, &mut walk)?;
    Ok((i, j))
}

/// Lower tangent `(i, j)`: no vertex lies strictly right of `left[i] -> right[j]`.
/// The walks run opposite to `upper_tangent`.
fn lower_tangent(left: &[Point], right: &[Point], cfg: &GeomCfg) -> Result<(usize, usize), HullError> {
    let (nl, nr) = (left.len(), right.len());
    let mut walk = Walk::new(Tangent::Lower, nl, nr);
    let mut i = lex_max_index(left);
    let mut j = lex_min_index(right);
    loop {
        let mut moved = false;
        while nr > 1 && cfg.turn(left[i], right[j], right[next(j, nr)]) == Turn::Right {
            walk.step()?;
            j = next(j, nr);
        }
        while nl > 1 && cfg.turn(left[i], right[j], left[prev(i, nl)]) == Turn::Right {
            walk.step()?;
            i = prev(i, nl);
            moved = true;
        }
        if !moved {
            break;
        }
    }
    let i = extend_collinear(right[j], left, i, prev, cfg, &mut walk)?;
    let j = extend_collinear(left[i], right, j, next, cfg, &mut walk)?;
    Ok((i, j))
}

/// Splice two canonical sub-hulls along their tangents: the left arc runs
/// counter-clockwise from the upper to the lower tangent vertex, the right arc
/// from the lower back up to the upper one. The arcs facing each other are
/// dropped.
fn merge(left: &[Point], right: &[Point], cfg: &GeomCfg) -> Result<Vec<Point>, HullError> {
    if left.is_empty() {
        return Ok(right.to_vec());
    }
    if right.is_empty() {
        return Ok(left.to_vec());
    }
    let (nl, nr) = (left.len(), right.len());
    let (iu, ju) = upper_tangent(left, right, cfg)?;
    let (il, jl) = lower_tangent(left, right, cfg)?;

    let mut merged = Vec::with_capacity(nl + nr);
    let mut k = iu;
    loop {
        merged.push(left[k]);
        if k == il {
            break;
        }
        k = next(k, nl);
    }
    let mut k = jl;
    loop {
        merged.push(right[k]);
        if k == ju {
            break;
        }
        k = next(k, nr);
    }
    let start = lex_min_index(&merged);
    merged.rotate_left(start);
    Ok(merged)
}
