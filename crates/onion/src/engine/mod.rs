//! Layer engine: owns the point set and recomputes every layer from scratch
//! after each mutation.
//!
//! Purpose
//! - Peel convex layers off a point set with the selected hull algorithm and
//!   record one `Step` per layer for replay.
//! - Support point insertion/removal and peeling/re-adding whole layers, each
//!   followed by a full recomputation (no incremental hull maintenance).
//!
//! Conventions
//! - Each hull vertex removes exactly one coordinate-equal point from the
//!   remaining set; further copies stay for inner layers.
//! - The final 1–2 points form a degenerate layer in lexicographic order, so
//!   layers depend only on the point multiset, not its storage order. The
//!   matching `Step` still records the tail in storage order.
//! - Coordinates must be finite; a NaN or infinite point fails the
//!   computation before any hull is built.
//! - Mutations are transactional: layers are computed for the candidate point
//!   set first and state is committed only on success.

use std::time::{Duration, Instant};

use crate::error::{HullError, SetAlgorithmError};
use crate::geom::{sort_lex, GeomCfg, Point};
use crate::hull::HullAlgorithm;
use crate::layer::Layer;
use crate::trace::{Step, StepTrace};

/// Engine configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineCfg {
    pub algorithm: HullAlgorithm,
    pub geom: GeomCfg,
}

/// Telemetry of the most recent recomputation (overwritten, not accumulated).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerfInfo {
    pub duration: Duration,
    pub layer_count: usize,
}

/// Peel `points` into convex layers, outermost first.
///
/// Returns the layer stack and one step per layer. An empty input yields two
/// empty sequences.
pub fn compute_layers(
    points: &[Point],
    algorithm: HullAlgorithm,
    geom: &GeomCfg,
) -> Result<(Vec<Layer>, Vec<Step>), HullError> {
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(HullError::NonFinitePoint { index });
    }
    let mut layers = Vec::new();
    let mut steps = Vec::new();
    let mut remaining = points.to_vec();
    while !remaining.is_empty() {
        if remaining.len() < 3 {
            let tail = std::mem::take(&mut remaining);
            let mut vertices = tail.clone();
            sort_lex(&mut vertices);
            let layer = Layer::new(vertices);
            steps.push(Step {
                remaining: tail,
                hull: layer.clone(),
            });
            layers.push(layer);
            break;
        }
        let hull = algorithm.compute_hull(&remaining, geom)?;
        let next = remove_one_per_vertex(&remaining, hull.vertices());
        steps.push(Step {
            remaining,
            hull: hull.clone(),
        });
        layers.push(hull);
        remaining = next;
    }
    Ok((layers, steps))
}

/// Drop the first not-yet-taken coordinate match for each vertex, keeping the
/// relative order of what stays.
fn remove_one_per_vertex(points: &[Point], vertices: &[Point]) -> Vec<Point> {
    let mut taken = vec![false; points.len()];
    for v in vertices {
        if let Some(k) = (0..points.len()).find(|&k| !taken[k] && points[k] == *v) {
            taken[k] = true;
        }
    }
    points
        .iter()
        .zip(taken)
        .filter_map(|(p, t)| (!t).then_some(*p))
        .collect()
}

/// Dynamic convex layers over an owned point set.
#[derive(Clone, Debug, Default)]
pub struct LayerEngine {
    cfg: EngineCfg,
    points: Vec<Point>,
    layers: Vec<Layer>,
    peeled: Vec<Layer>,
    steps: StepTrace,
    perf: PerfInfo,
}

impl LayerEngine {
    pub fn new(cfg: EngineCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineCfg {
        &self.cfg
    }

    pub fn algorithm(&self) -> HullAlgorithm {
        self.cfg.algorithm
    }

    /// Recompute layers and steps for the current point set.
    pub fn recompute(&mut self) -> Result<(), HullError> {
        self.commit(self.points.clone())
    }

    /// Compute layers for the candidate point set and, on success, make it the
    /// engine state. On failure nothing changes.
    fn commit(&mut self, points: Vec<Point>) -> Result<(), HullError> {
        let started = Instant::now();
        let (layers, steps) = compute_layers(&points, self.cfg.algorithm, &self.cfg.geom)
            .inspect_err(|e| tracing::warn!(error = %e, "recompute failed; state unchanged"))?;
        let duration = started.elapsed();
        tracing::debug!(
            algorithm = %self.cfg.algorithm,
            points = points.len(),
            layers = layers.len(),
            elapsed_us = duration.as_micros() as u64,
            "recompute"
        );
        self.perf = PerfInfo {
            duration,
            layer_count: layers.len(),
        };
        self.points = points;
        self.layers = layers;
        self.steps = StepTrace::from(steps);
        Ok(())
    }

    /// Switch hull algorithm and recompute. On failure the previous algorithm
    /// stays selected.
    pub fn set_algorithm(&mut self, algorithm: HullAlgorithm) -> Result<(), HullError> {
        let previous = self.cfg.algorithm;
        self.cfg.algorithm = algorithm;
        let res = self.recompute();
        if res.is_err() {
            self.cfg.algorithm = previous;
        }
        res
    }

    /// Parse a selector name and switch to it. Unknown names leave the engine
    /// untouched.
    pub fn set_algorithm_by_name(&mut self, name: &str) -> Result<(), SetAlgorithmError> {
        let algorithm: HullAlgorithm = name.parse()?;
        self.set_algorithm(algorithm)?;
        Ok(())
    }

    /// Replace the point set wholesale and clear the peeled stack.
    pub fn initialize(&mut self, points: Vec<Point>) -> Result<(), HullError> {
        self.commit(points)?;
        self.peeled.clear();
        Ok(())
    }

    /// Append `p` (duplicates allowed).
    pub fn add_point(&mut self, p: Point) -> Result<(), HullError> {
        let mut candidate = self.points.clone();
        candidate.push(p);
        self.commit(candidate)
    }

    /// Remove the first coordinate-equal copy of `p`. Returns `false` (and does
    /// not recompute) when `p` is absent.
    pub fn remove_point(&mut self, p: Point) -> Result<bool, HullError> {
        let Some(k) = self.points.iter().position(|q| *q == p) else {
            tracing::warn!(x = p.x, y = p.y, "remove_point: no such point");
            return Ok(false);
        };
        let mut candidate = self.points.clone();
        candidate.remove(k);
        self.commit(candidate)?;
        Ok(true)
    }

    /// Move the outermost layer onto the peeled stack and rebuild the point set
    /// from the remaining layers. Returns `false` when there is nothing to peel.
    pub fn peel_one_layer(&mut self) -> Result<bool, HullError> {
        let Some((outer, inner)) = self.layers.split_first() else {
            tracing::warn!("peel_one_layer: no layers left");
            return Ok(false);
        };
        let outer = outer.clone();
        let candidate: Vec<Point> = inner
            .iter()
            .flat_map(|l| l.vertices().iter().copied())
            .collect();
        self.commit(candidate)?;
        self.peeled.push(outer);
        Ok(true)
    }

    /// Pop the most recently peeled layer and union its points back in.
    /// Returns `false` when the peeled stack is empty.
    pub fn re_add_layer(&mut self) -> Result<bool, HullError> {
        let Some(layer) = self.peeled.last() else {
            tracing::warn!("re_add_layer: nothing peeled");
            return Ok(false);
        };
        let mut candidate = self.points.clone();
        candidate.extend_from_slice(layer.vertices());
        self.commit(candidate)?;
        self.peeled.pop();
        Ok(true)
    }

    /// Layers outermost first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn all_points(&self) -> &[Point] {
        &self.points
    }

    /// Steps of the most recent recomputation. Clone to hand a snapshot to
    /// another thread.
    pub fn computation_steps(&self) -> &StepTrace {
        &self.steps
    }

    pub fn performance_info(&self) -> PerfInfo {
        self.perf
    }

    /// Peeled layers, most recently peeled last.
    pub fn peeled(&self) -> &[Layer] {
        &self.peeled
    }

    pub fn peeled_count(&self) -> usize {
        self.peeled.len()
    }
}

#[cfg(test)]
mod tests;
