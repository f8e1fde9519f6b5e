//! Convex layers (onion peeling) of planar point sets.
//!
//! The crate is organised leaves first:
//! - `geom`: the orientation predicate and its tolerance policy.
//! - `hull`: Graham scan, Jarvis march and divide-and-conquer hulls behind one
//!   closed `HullAlgorithm` enum.
//! - `engine`: the `LayerEngine` state machine (point set, layer stack, peeled
//!   stack) which recomputes everything from scratch after each mutation.
//! - `trace`: the replayable step sequence built by every recomputation.
//! - `source`: random and file-based point sources.

pub mod engine;
pub mod error;
pub mod geom;
pub mod hull;
pub mod layer;
pub mod source;
pub mod trace;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use engine::{compute_layers, EngineCfg, LayerEngine, PerfInfo};
pub use error::{ConfigError, HullError, SetAlgorithmError, SourceError};
pub use geom::{orientation, GeomCfg, Point, Turn};
pub use hull::HullAlgorithm;
pub use layer::Layer;
pub use trace::{Step, StepTrace, ViewFit};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::engine::{compute_layers, EngineCfg, LayerEngine, PerfInfo};
    pub use crate::geom::{orientation, GeomCfg, Point, Turn};
    pub use crate::hull::{divide_and_conquer, graham_scan, jarvis_march, HullAlgorithm};
    pub use crate::layer::Layer;
    pub use crate::source::{random_points, read_points, read_points_or_empty, RandomCfg};
    pub use crate::trace::{Step, StepTrace, ViewFit};
}
