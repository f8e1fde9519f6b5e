//! Convex hull algorithms.
//!
//! Purpose
//! - Three interchangeable strategies (Graham scan, Jarvis march,
//!   divide-and-conquer) returning the same canonical hull, selected at runtime
//!   through the closed `HullAlgorithm` enum.
//!
//! Output convention (all three)
//! - Inputs with fewer than three points are returned unchanged.
//! - Otherwise: distinct vertices, counter-clockwise, starting at the
//!   lexicographically smallest point, collinear points dropped. All-identical
//!   input yields one vertex; all-collinear input yields its two extremes.
//!
//! Every turn decision goes through `GeomCfg::turn`, so the algorithms agree
//! on what counts as collinear.

mod divide;
mod graham;
mod jarvis;

use std::fmt;
use std::str::FromStr;

pub use divide::divide_and_conquer;
pub use graham::graham_scan;
pub use jarvis::jarvis_march;

use crate::error::{ConfigError, HullError};
use crate::geom::{lex_cmp, GeomCfg, Point};
use crate::layer::Layer;

/// The closed set of hull strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HullAlgorithm {
    #[default]
    GrahamScan,
    JarvisMarch,
    DivideAndConquer,
}

impl HullAlgorithm {
    pub const ALL: [HullAlgorithm; 3] = [
        HullAlgorithm::GrahamScan,
        HullAlgorithm::JarvisMarch,
        HullAlgorithm::DivideAndConquer,
    ];

    /// Short selector name, accepted back by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            HullAlgorithm::GrahamScan => "graham",
            HullAlgorithm::JarvisMarch => "jarvis",
            HullAlgorithm::DivideAndConquer => "divide",
        }
    }

    /// Compute the hull of `points` with this strategy.
    pub fn compute_hull(self, points: &[Point], cfg: &GeomCfg) -> Result<Layer, HullError> {
        match self {
            HullAlgorithm::GrahamScan => Ok(graham_scan(points, cfg)),
            HullAlgorithm::JarvisMarch => jarvis_march(points, cfg),
            HullAlgorithm::DivideAndConquer => divide_and_conquer(points, cfg),
        }
    }
}

impl fmt::Display for HullAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HullAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graham" | "graham-scan" | "andrew" => Ok(HullAlgorithm::GrahamScan),
            "jarvis" | "jarvis-march" | "gift-wrapping" => Ok(HullAlgorithm::JarvisMarch),
            "divide" | "divide-and-conquer" | "dc" => Ok(HullAlgorithm::DivideAndConquer),
            _ => Err(ConfigError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Index of the lexicographically smallest point (first on ties).
pub(crate) fn lex_min_index(points: &[Point]) -> usize {
    let mut best = 0;
    for (k, p) in points.iter().enumerate().skip(1) {
        if lex_cmp(p, &points[best]).is_lt() {
            best = k;
        }
    }
    best
}

/// Index of the lexicographically largest point (first on ties).
pub(crate) fn lex_max_index(points: &[Point]) -> usize {
    let mut best = 0;
    for (k, p) in points.iter().enumerate().skip(1) {
        if lex_cmp(p, &points[best]).is_gt() {
            best = k;
        }
    }
    best
}
