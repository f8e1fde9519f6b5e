//! JSON shapes printed or written by the CLI.

use onion::{LayerEngine, Point, Step, StepTrace};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LayersReport {
    pub algorithm: String,
    pub points: usize,
    pub layer_count: usize,
    pub duration_us: u64,
    pub peeled: usize,
    pub layers: Vec<Vec<[f64; 2]>>,
}

impl LayersReport {
    pub fn from_engine(engine: &LayerEngine) -> Self {
        let perf = engine.performance_info();
        Self {
            algorithm: engine.algorithm().to_string(),
            points: engine.all_points().len(),
            layer_count: perf.layer_count,
            duration_us: perf.duration.as_micros() as u64,
            peeled: engine.peeled_count(),
            layers: engine
                .layers()
                .iter()
                .map(|l| coords(l.vertices()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub remaining: Vec<[f64; 2]>,
    pub hull: Vec<[f64; 2]>,
}

impl StepReport {
    fn new(index: usize, step: &Step) -> Self {
        Self {
            index,
            remaining: coords(&step.remaining),
            hull: coords(step.hull.vertices()),
        }
    }
}

pub fn steps_report(trace: &StepTrace) -> Vec<StepReport> {
    trace
        .iter()
        .enumerate()
        .map(|(k, s)| StepReport::new(k, s))
        .collect()
}

pub fn coords(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}
